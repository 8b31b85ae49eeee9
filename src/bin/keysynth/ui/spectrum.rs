//! Spectrum analyzer widget
//!
//! FFT of the latest scope window, sampled at log-spaced frequencies so the
//! keyboard's range (roughly 500 Hz to 1.3 kHz) gets a readable share of the
//! width.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};
use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::sync::Arc;

/// Number of frequency bins to display
const SPECTRUM_BINS: usize = 64;
/// Lowest and highest displayed frequency (Hz)
const MIN_FREQ: f32 = 100.0;
const MAX_FREQ: f32 = 8_000.0;
/// Floor of the magnitude axis
const FLOOR_DB: f64 = -100.0;

/// Spectrum analyzer with FFT processing
pub struct SpectrumAnalyzer {
    /// Hann window coefficients
    window: Vec<f32>,
    /// FFT bin indices corresponding to each display point
    bin_indices: Vec<usize>,
    fft: Arc<dyn Fft<f32>>,
    /// Scratch buffer for FFT computation
    scratch: Vec<Complex<f32>>,
    /// Current spectrum data: (display position 0..1, magnitude_db)
    spectrum: Vec<(f64, f64)>,
}

impl SpectrumAnalyzer {
    /// # Arguments
    /// * `buffer_len` - FFT size (matches the scope window)
    /// * `sample_rate` - Audio sample rate in Hz
    pub fn new(buffer_len: usize, sample_rate: f32) -> Self {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(buffer_len);

        // Hann window - reduces spectral leakage
        let window: Vec<f32> = (0..buffer_len)
            .map(|i| {
                if buffer_len > 1 {
                    let denom = (buffer_len - 1) as f32;
                    0.5 * (1.0 - (std::f32::consts::TAU * i as f32 / denom).cos())
                } else {
                    1.0
                }
            })
            .collect();

        let max_freq = (sample_rate / 2.0).min(MAX_FREQ).max(MIN_FREQ + 1.0);
        let ratio = (max_freq / MIN_FREQ) as f64;
        let half = (buffer_len / 2).max(1);

        let bin_indices = (0..SPECTRUM_BINS)
            .map(|i| {
                let t = i as f64 / (SPECTRUM_BINS - 1) as f64;
                let freq = MIN_FREQ as f64 * ratio.powf(t);
                let index = (freq * buffer_len as f64 / sample_rate.max(1.0) as f64).round() as usize;
                index.min(half - 1)
            })
            .collect();

        let spectrum = (0..SPECTRUM_BINS)
            .map(|i| (i as f64 / (SPECTRUM_BINS - 1) as f64, FLOOR_DB))
            .collect();

        Self {
            window,
            bin_indices,
            fft,
            scratch: vec![Complex::new(0.0, 0.0); buffer_len],
            spectrum,
        }
    }

    /// Recompute from a full window; partial windows are ignored.
    pub fn update(&mut self, buffer: &[f32]) {
        if buffer.len() != self.window.len() {
            return;
        }

        for ((bin, &sample), &w) in self.scratch.iter_mut().zip(buffer).zip(&self.window) {
            *bin = Complex::new(sample * w, 0.0);
        }

        self.fft.process(&mut self.scratch);

        for ((_, magnitude_db), &index) in self.spectrum.iter_mut().zip(&self.bin_indices) {
            let bin = self.scratch[index];
            let power = bin.norm_sqr().max(1e-12);
            *magnitude_db = (10.0 * (power as f64).log10()).max(FLOOR_DB);
        }
    }

    pub fn data(&self) -> &[(f64, f64)] {
        &self.spectrum
    }
}

/// Render the spectrum analyzer widget
pub fn render_spectrum(frame: &mut Frame, area: Rect, spectrum: &[(f64, f64)]) {
    let block = Block::default().title(" Spectrum ").borders(Borders::ALL);

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Green))
        .data(spectrum);

    let max_db = spectrum.iter().map(|(_, db)| *db).fold(FLOOR_DB, f64::max);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([0.0, 1.0])
                .labels(vec![format!("{MIN_FREQ:.0}Hz"), format!("{MAX_FREQ:.0}Hz")])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([FLOOR_DB, max_db.max(0.0) + 10.0])
                .labels(vec!["-100", "-60", "-20", "0"])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}

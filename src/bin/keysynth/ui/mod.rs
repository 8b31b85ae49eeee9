//! TUI module for keysynth
//!
//! Shows the keyboard, gain and output level, plus a scope and spectrum of
//! what the audio callback is producing.

mod keyboard;
mod spectrum;
mod status;
mod waveform;

use color_eyre::eyre::Result as EyreResult;
use crossterm::event;
use keysynth::synth::VoiceControls;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    DefaultTerminal, Frame,
};
use rtrb::Consumer;
use std::time::Duration;

use super::input::{handle_event, Action, KeyMode};

use keyboard::render_keyboard;
use spectrum::{render_spectrum, SpectrumAnalyzer};
use status::{render_status, AudioStats};
use waveform::render_waveform;

/// Audio visualization buffer size
pub const VIS_BUFFER_SIZE: usize = 1024;

/// Fixed properties of the running output stream.
#[derive(Debug, Clone, Copy)]
pub struct StreamInfo {
    pub sample_rate: u32,
    pub channels: u16,
}

/// UI application state
pub struct UiApp {
    /// Shared voice flags and gain (written here, read by the audio thread)
    controls: VoiceControls,
    /// Ring buffer receiver for audio samples
    audio_rx: Consumer<f32>,
    /// Audio sample buffer for visualization
    audio_buffer: Vec<f32>,
    spectrum: SpectrumAnalyzer,
    info: StreamInfo,
    mode: KeyMode,
    /// Whether the app should quit
    should_quit: bool,
}

impl UiApp {
    pub fn new(
        controls: VoiceControls,
        audio_rx: Consumer<f32>,
        info: StreamInfo,
        mode: KeyMode,
    ) -> Self {
        Self {
            controls,
            audio_rx,
            audio_buffer: vec![0.0; VIS_BUFFER_SIZE],
            spectrum: SpectrumAnalyzer::new(VIS_BUFFER_SIZE, info.sample_rate as f32),
            info,
            mode,
            should_quit: false,
        }
    }

    /// Run the UI event loop
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            self.poll_audio();

            terminal.draw(|frame| self.render(frame))?;

            // Drain every pending event so held keys feel immediate (~60fps redraw)
            if event::poll(Duration::from_millis(16))? {
                loop {
                    let ev = event::read()?;
                    if handle_event(&self.controls, self.mode, &ev) == Action::Quit {
                        self.should_quit = true;
                    }
                    if !event::poll(Duration::ZERO)? {
                        break;
                    }
                }
            }
        }

        Ok(())
    }

    /// Poll for new audio samples from ring buffer
    fn poll_audio(&mut self) {
        let mut received = false;
        while let Ok(sample) = self.audio_rx.pop() {
            self.audio_buffer.push(sample);
            received = true;
        }

        if received {
            // Keep only the last VIS_BUFFER_SIZE samples
            if self.audio_buffer.len() > VIS_BUFFER_SIZE {
                let excess = self.audio_buffer.len() - VIS_BUFFER_SIZE;
                self.audio_buffer.drain(0..excess);
            }
            self.spectrum.update(&self.audio_buffer);
        }
    }

    /// Render the UI
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),  // Status bar
                Constraint::Length(6),  // Keyboard
                Constraint::Min(6),     // Waveform
                Constraint::Length(10), // Spectrum
                Constraint::Length(1),  // Help bar
            ])
            .split(area);

        let stats = AudioStats::from_buffer(&self.audio_buffer);
        render_status(frame, chunks[0], &self.controls, &self.info, self.mode, &stats);
        render_keyboard(frame, chunks[1], &self.controls);
        render_waveform(frame, chunks[2], &self.audio_buffer);
        render_spectrum(frame, chunks[3], self.spectrum.data());

        let help = Paragraph::new(
            " [a..;] Play  [Space] Release all  [Up/Down] Gain  [Esc] Quit",
        )
        .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, chunks[4]);
    }
}

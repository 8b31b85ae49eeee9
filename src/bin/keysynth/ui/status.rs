//! Status bar widget - gain, stream format, held voices and output level

use keysynth::synth::{VoiceControls, NUM_VOICES};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::StreamInfo;
use crate::input::KeyMode;

/// Audio statistics for display
pub struct AudioStats {
    pub peak: f32,
    pub rms: f32,
}

impl AudioStats {
    /// Compute audio stats from a buffer
    pub fn from_buffer(buffer: &[f32]) -> Self {
        if buffer.is_empty() {
            return Self { peak: 0.0, rms: 0.0 };
        }
        let peak = buffer.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()));
        let rms = (buffer.iter().map(|&x| x * x).sum::<f32>() / buffer.len() as f32).sqrt();
        Self { peak, rms }
    }
}

pub fn render_status(
    frame: &mut Frame,
    area: Rect,
    controls: &VoiceControls,
    info: &StreamInfo,
    mode: KeyMode,
    audio_stats: &AudioStats,
) {
    let block = Block::default().title(" keysynth ").borders(Borders::ALL);

    let gain = controls.gain();
    let held = controls.active_count();
    let mode_str = match mode {
        KeyMode::Hold => "hold",
        KeyMode::Toggle => "toggle",
    };

    // Format sample rate nicely (e.g., 48000 -> "48.0kHz")
    let sample_rate_khz = info.sample_rate as f32 / 1000.0;

    let line = Line::from(vec![
        Span::styled(
            format!(" Gain: {:>3.0}%  ", gain * 100.0),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!("Voices: {held}/{NUM_VOICES}  "),
            Style::default().fg(if held > 0 { Color::Green } else { Color::Yellow }),
        ),
        Span::styled(
            format!("Keys: {mode_str}  "),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            format!("{:.1}kHz {}ch  ", sample_rate_khz, info.channels),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("Peak: {:.2}  RMS: {:.2}", audio_stats.peak, audio_stats.rms),
            Style::default().fg(Color::Magenta),
        ),
    ]);

    let paragraph = Paragraph::new(line).block(block);
    frame.render_widget(paragraph, area);
}

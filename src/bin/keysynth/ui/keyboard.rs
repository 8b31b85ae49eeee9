//! Keyboard widget - one cell per voice, lit while the voice sounds

use keysynth::synth::{VoiceControls, KEYBOARD};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Width of one key cell in characters
const KEY_WIDTH: usize = 4;

fn key_style(sharp: bool, active: bool) -> Style {
    match (sharp, active) {
        (_, true) => Style::default()
            .fg(Color::Black)
            .bg(Color::LightYellow)
            .add_modifier(Modifier::BOLD),
        (true, false) => Style::default().fg(Color::Gray).bg(Color::Black),
        (false, false) => Style::default().fg(Color::Black).bg(Color::White),
    }
}

/// Render the keyboard: note names, key faces and trigger characters
pub fn render_keyboard(frame: &mut Frame, area: Rect, controls: &VoiceControls) {
    let block = Block::default().title(" Keys ").borders(Borders::ALL);

    let mut names = Vec::with_capacity(KEYBOARD.len());
    let mut faces = Vec::with_capacity(KEYBOARD.len());
    let mut triggers = Vec::with_capacity(KEYBOARD.len());

    for (i, spec) in KEYBOARD.iter().enumerate() {
        let style = key_style(spec.is_sharp(), controls.is_active(i));
        let name = spec.label.unwrap_or('#');

        names.push(Span::styled(
            format!("{name:^KEY_WIDTH$}"),
            Style::default().fg(Color::DarkGray),
        ));
        faces.push(Span::styled(format!("{:^KEY_WIDTH$}", ""), style));
        triggers.push(Span::styled(format!("{:^KEY_WIDTH$}", spec.key), style));
    }

    let lines = vec![Line::from(names), Line::from(faces), Line::from(triggers)];
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(block);
    frame.render_widget(paragraph, area);
}

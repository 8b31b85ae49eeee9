//! Terminal events -> voice control writes.
//!
//! Both the on-screen keyboard and the audio read the same shared flags, so
//! whatever path turns a voice on, the display and the sound agree.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use keysynth::synth::{voice_for_key, VoiceControls};

/// Gain change per arrow press.
const GAIN_STEP: f32 = 0.05;

/// How trigger keys drive voices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyMode {
    /// Press starts the voice, release stops it.
    Hold,
    /// Each press flips the voice, for terminals without release events.
    Toggle,
}

/// What the event loop should do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Continue,
    Quit,
}

pub fn handle_event(controls: &VoiceControls, mode: KeyMode, event: &Event) -> Action {
    match event {
        Event::Key(key) => handle_key(controls, mode, key),
        Event::FocusLost => {
            // Release events never arrive once focus is gone.
            controls.release_all();
            Action::Continue
        }
        _ => Action::Continue,
    }
}

fn handle_key(controls: &VoiceControls, mode: KeyMode, key: &KeyEvent) -> Action {
    match key.kind {
        KeyEventKind::Press => handle_press(controls, mode, key.code),
        KeyEventKind::Release => {
            if let (KeyMode::Hold, KeyCode::Char(c)) = (mode, key.code) {
                if let Some(voice) = voice_for_key(c) {
                    controls.set_voice_active(voice, false);
                }
            }
            Action::Continue
        }
        KeyEventKind::Repeat => Action::Continue,
    }
}

fn handle_press(controls: &VoiceControls, mode: KeyMode, code: KeyCode) -> Action {
    match code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => return Action::Quit,
        KeyCode::Char(' ') => controls.release_all(),
        KeyCode::Up | KeyCode::Char('+') | KeyCode::Char('=') => {
            controls.set_gain(controls.gain() + GAIN_STEP);
        }
        KeyCode::Down | KeyCode::Char('-') => {
            controls.set_gain(controls.gain() - GAIN_STEP);
        }
        KeyCode::Char(c) => {
            if let Some(voice) = voice_for_key(c) {
                match mode {
                    KeyMode::Hold => controls.set_voice_active(voice, true),
                    KeyMode::Toggle => {
                        controls.toggle_voice(voice);
                    }
                }
            }
        }
        _ => {}
    }
    Action::Continue
}

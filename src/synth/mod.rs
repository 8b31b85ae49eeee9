// Purpose: Voice bank, shared control state and the fixed keyboard layout
// This layer sits above the oscillator and owns everything the audio callback reads

pub mod bank;
pub mod control;
pub mod keymap;

pub use bank::VoiceBank;
pub use control::VoiceControls;
pub use keymap::{voice_for_key, VoiceSpec, KEYBOARD, NUM_VOICES};

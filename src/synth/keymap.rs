#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of voices in the bank.
pub const NUM_VOICES: usize = 17;

/// Fixed identity of one voice: its pitch, trigger key and display label.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoiceSpec {
    /// Target frequency in Hz
    pub frequency: f64,
    /// Character that triggers this voice
    pub key: char,
    /// Note name, `None` for sharps
    pub label: Option<char>,
}

impl VoiceSpec {
    const fn natural(frequency: f64, key: char, label: char) -> Self {
        Self {
            frequency,
            key,
            label: Some(label),
        }
    }

    const fn sharp(frequency: f64, key: char) -> Self {
        Self {
            frequency,
            key,
            label: None,
        }
    }

    /// Black key on a piano layout.
    pub fn is_sharp(&self) -> bool {
        self.label.is_none()
    }
}

/// Chromatic run from C5 to E6 laid out on the home row, with the sharps on
/// the row above (the usual "tracker piano" mapping).
pub const KEYBOARD: [VoiceSpec; NUM_VOICES] = [
    VoiceSpec::natural(523.251, 'a', 'C'),
    VoiceSpec::sharp(554.365, 'w'),
    VoiceSpec::natural(587.330, 's', 'D'),
    VoiceSpec::sharp(622.254, 'e'),
    VoiceSpec::natural(659.485, 'd', 'E'),
    VoiceSpec::natural(698.456, 'f', 'F'),
    VoiceSpec::sharp(739.989, 't'),
    VoiceSpec::natural(783.991, 'g', 'G'),
    VoiceSpec::sharp(830.609, 'y'),
    VoiceSpec::natural(880.000, 'h', 'A'),
    VoiceSpec::sharp(932.328, 'u'),
    VoiceSpec::natural(987.767, 'j', 'B'),
    VoiceSpec::natural(1046.500, 'k', 'C'),
    VoiceSpec::sharp(1108.73, 'o'),
    VoiceSpec::natural(1174.66, 'l', 'D'),
    VoiceSpec::sharp(1244.51, 'p'),
    VoiceSpec::natural(1318.51, ';', 'E'),
];

/// Look up the voice triggered by `key`. Letters match in either case.
pub fn voice_for_key(key: char) -> Option<usize> {
    let key = key.to_ascii_lowercase();
    KEYBOARD.iter().position(|spec| spec.key == key)
}

pub mod dsp;
pub mod error;
pub mod synth; // Voice bank, control state and keyboard layout

pub use error::{Error, Result};

pub const MAX_BLOCK_SIZE: usize = 2048;

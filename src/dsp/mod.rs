//! Low-level DSP primitives used by the voice bank.
//!
//! These components are allocation-free and realtime-safe, making them safe to
//! call from inside an audio callback.

/// Phase-accumulating sine oscillator.
pub mod oscillator;

pub use oscillator::Oscillator;

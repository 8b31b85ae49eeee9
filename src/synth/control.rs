//! Lock-free control state shared between the UI thread and the audio callback.
//!
//! The UI thread is the only writer. The audio callback only loads. Every
//! flag and the gain are single atomics, so a write is one store and the
//! callback never waits on anything.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::synth::keymap::NUM_VOICES;

/// Gain used before anyone sets one.
pub const DEFAULT_GAIN: f32 = 0.5;

/// An f32 stored as its bit pattern, clamped to [0, 1] on write.
#[derive(Debug)]
struct AtomicGain(AtomicU32);

impl AtomicGain {
    fn new(value: f32) -> Self {
        Self(AtomicU32::new(clamp_gain(value).to_bits()))
    }

    #[inline]
    fn set(&self, value: f32) {
        self.0.store(clamp_gain(value).to_bits(), Ordering::Release);
    }

    #[inline]
    fn get(&self) -> f32 {
        f32::from_bits(self.0.load(Ordering::Acquire))
    }
}

/// NaN counts as silence.
fn clamp_gain(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

#[derive(Debug)]
struct ControlState {
    active: [AtomicBool; NUM_VOICES],
    gain: AtomicGain,
}

/// Cloneable handle to the shared voice flags and gain.
///
/// Clones refer to the same state, so the UI keeps one and the voice bank
/// keeps another.
#[derive(Debug, Clone)]
pub struct VoiceControls {
    state: Arc<ControlState>,
}

impl VoiceControls {
    pub fn new(gain: f32) -> Self {
        Self {
            state: Arc::new(ControlState {
                active: std::array::from_fn(|_| AtomicBool::new(false)),
                gain: AtomicGain::new(gain),
            }),
        }
    }

    /// Turn a voice on or off. Indices outside the bank are ignored.
    pub fn set_voice_active(&self, index: usize, active: bool) {
        if let Err(err) = self.try_set_voice_active(index, active) {
            tracing::warn!(%err, "ignoring voice change");
        }
    }

    pub fn try_set_voice_active(&self, index: usize, active: bool) -> Result<()> {
        let flag = self
            .state
            .active
            .get(index)
            .ok_or(Error::VoiceOutOfRange {
                index,
                voices: NUM_VOICES,
            })?;
        flag.store(active, Ordering::Release);
        Ok(())
    }

    /// Flip a voice and return its new state (`false` for unknown indices).
    pub fn toggle_voice(&self, index: usize) -> bool {
        match self.state.active.get(index) {
            Some(flag) => !flag.fetch_xor(true, Ordering::AcqRel),
            None => false,
        }
    }

    /// Force every voice off (focus loss, panic button).
    pub fn release_all(&self) {
        for flag in &self.state.active {
            flag.store(false, Ordering::Release);
        }
    }

    #[inline]
    pub fn is_active(&self, index: usize) -> bool {
        self.state
            .active
            .get(index)
            .is_some_and(|flag| flag.load(Ordering::Acquire))
    }

    pub fn active_voices(&self) -> impl Iterator<Item = usize> + '_ {
        (0..NUM_VOICES).filter(|&i| self.is_active(i))
    }

    pub fn active_count(&self) -> usize {
        self.active_voices().count()
    }

    /// Replace the gain. Values outside [0, 1] are clamped, NaN becomes 0.
    pub fn set_gain(&self, value: f32) {
        self.state.gain.set(value);
    }

    #[inline]
    pub fn gain(&self) -> f32 {
        self.state.gain.get()
    }
}

impl Default for VoiceControls {
    fn default() -> Self {
        Self::new(DEFAULT_GAIN)
    }
}

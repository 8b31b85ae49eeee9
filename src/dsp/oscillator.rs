use std::f64::consts::TAU;

use crate::error::{Error, Result};

/*
Sine Oscillator
===============

A sine oscillator is a phase accumulator feeding a sine function. Every
sample we read sin(phase), then advance the phase by a fixed step:

    increment = 2π × frequency / sample_rate

At 48 kHz a 440 Hz tone advances about 0.0576 radians per sample, so one
full cycle takes roughly 109 samples.

Phase wrapping
--------------

The accumulator is folded back into [0, 2π) after every step. sin() is
periodic so the output is identical, but an unbounded phase slowly loses
precision in the low bits once it reaches millions of radians (a few
minutes of audio). Wrapping keeps the argument small forever.

Ordering
--------

The increment depends on both frequency and sample rate. Setting the
sample rate does not touch the increment; callers reapply the frequency
afterwards. Setting a frequency while the rate is still 0 is rejected.
*/

/// Single-voice sine generator.
#[derive(Debug, Clone, Default)]
pub struct Oscillator {
    sample_rate: u32,
    phase: f64,
    phase_increment: f64,
}

impl Oscillator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the sample rate. The increment is left as is until the next
    /// `set_frequency` call.
    pub fn set_sampling_rate(&mut self, rate: u32) {
        self.sample_rate = rate;
    }

    pub fn sampling_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Compute the per-sample phase increment for `freq` Hz.
    ///
    /// Fails without touching the current increment if the sample rate is
    /// still 0 or `freq` is not a finite positive number.
    pub fn set_frequency(&mut self, freq: f64) -> Result<()> {
        if self.sample_rate == 0 {
            return Err(Error::UnconfiguredSampleRate);
        }
        if !freq.is_finite() || freq <= 0.0 {
            return Err(Error::InvalidFrequency(freq));
        }

        self.phase_increment = TAU * freq / self.sample_rate as f64;
        Ok(())
    }

    pub fn phase_increment(&self) -> f64 {
        self.phase_increment
    }

    pub fn phase(&self) -> f64 {
        self.phase
    }

    /// Return sin(phase), then advance the phase by one sample.
    #[inline]
    pub fn tick(&mut self) -> f64 {
        let sample = self.phase.sin();
        self.phase += self.phase_increment;
        if self.phase >= TAU {
            self.phase %= TAU;
        }
        sample
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frequency_before_sample_rate_is_rejected() {
        let mut osc = Oscillator::new();
        assert_eq!(osc.set_frequency(440.0), Err(Error::UnconfiguredSampleRate));
        assert_eq!(osc.phase_increment(), 0.0);
        assert_eq!(osc.tick(), 0.0);
        assert_eq!(osc.tick(), 0.0);
    }

    #[test]
    fn rejects_bad_frequencies() {
        let mut osc = Oscillator::new();
        osc.set_sampling_rate(48_000);
        osc.set_frequency(440.0).unwrap();
        let before = osc.phase_increment();

        assert!(osc.set_frequency(0.0).is_err());
        assert!(osc.set_frequency(-1.0).is_err());
        assert!(osc.set_frequency(f64::NAN).is_err());
        assert!(osc.set_frequency(f64::INFINITY).is_err());
        assert_eq!(osc.phase_increment(), before);
    }

    #[test]
    fn sample_rate_change_keeps_old_increment() {
        let mut osc = Oscillator::new();
        osc.set_sampling_rate(48_000);
        osc.set_frequency(480.0).unwrap();
        let at_48k = osc.phase_increment();

        osc.set_sampling_rate(96_000);
        assert_eq!(osc.phase_increment(), at_48k);

        osc.set_frequency(480.0).unwrap();
        assert!((osc.phase_increment() - at_48k / 2.0).abs() < 1e-12);
    }

    #[test]
    fn valid_sine() {
        let sample_rate = 48_000;
        let freq = 440.0;
        let mut osc = Oscillator::new();
        osc.set_sampling_rate(sample_rate);
        osc.set_frequency(freq).unwrap();

        // sample n should be sin(2pi f n / sr)
        for n in 0..200 {
            let expected = (TAU * freq * n as f64 / sample_rate as f64).sin();
            let actual = osc.tick();
            assert!(
                (actual - expected).abs() < 1e-9,
                "sample {n}: expected {expected}, got {actual}"
            );
        }
    }

    #[test]
    fn phase_stays_wrapped() {
        let mut osc = Oscillator::new();
        osc.set_sampling_rate(8_000);
        osc.set_frequency(3_999.0).unwrap();

        for _ in 0..100_000 {
            osc.tick();
            assert!((0.0..TAU).contains(&osc.phase()));
        }
    }
}

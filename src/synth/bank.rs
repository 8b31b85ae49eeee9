use crate::dsp::oscillator::Oscillator;
use crate::error::{Error, Result};
use crate::synth::control::VoiceControls;
use crate::synth::keymap::{KEYBOARD, NUM_VOICES};
use crate::MAX_BLOCK_SIZE;

/*
Voice Bank
==========

One sine oscillator per key, all mixed into a single mono signal that is
copied to both output channels.

Mixing
------

For each frame, every active oscillator is ticked once and the results are
averaged:

    out = (Σ active samples) × gain / active_count

Averaging keeps the output inside [-gain, +gain] no matter how many keys
are held, so a chord is never louder than a single note. With nothing held
the output is exactly 0; the division is skipped rather than producing NaN.

Inactive oscillators are not ticked, so a voice resumes from wherever its
phase stopped.

Realtime contract
-----------------

The render methods do no allocation, take no locks and cannot fail. The
active flags and gain are sampled once at the start of each block, so a
block is rendered against a consistent snapshot even if the UI writes in
the middle of it. An unconfigured bank renders silence.
*/

/// Fixed bank of sine voices plus the mixer that sums them.
pub struct VoiceBank {
    oscillators: [Oscillator; NUM_VOICES],
    controls: VoiceControls,
    sample_rate: u32,
    mix_buffer: Vec<f32>,
}

impl VoiceBank {
    /// Create an unconfigured bank reading from `controls`.
    pub fn new(controls: VoiceControls) -> Self {
        Self {
            oscillators: std::array::from_fn(|_| Oscillator::new()),
            controls,
            sample_rate: 0,
            mix_buffer: vec![0.0; MAX_BLOCK_SIZE],
        }
    }

    /// Set the sample rate on every oscillator and recompute its increment.
    ///
    /// Must not run concurrently with a render call; the engine stops the
    /// stream first.
    pub fn configure(&mut self, sample_rate: u32) -> Result<()> {
        if sample_rate == 0 {
            tracing::warn!("refusing to configure voice bank with a zero sample rate");
            return Err(Error::InvalidSampleRate);
        }

        for (osc, spec) in self.oscillators.iter_mut().zip(KEYBOARD.iter()) {
            osc.set_sampling_rate(sample_rate);
            osc.set_frequency(spec.frequency)?;
        }
        self.sample_rate = sample_rate;

        tracing::debug!(sample_rate, voices = NUM_VOICES, "voice bank configured");
        Ok(())
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn is_configured(&self) -> bool {
        self.sample_rate > 0
    }

    /// Handle to the shared control state this bank reads from.
    pub fn controls(&self) -> &VoiceControls {
        &self.controls
    }

    /// Convenience passthrough to [`VoiceControls::set_voice_active`].
    pub fn set_voice_active(&self, index: usize, active: bool) {
        self.controls.set_voice_active(index, active);
    }

    /// Convenience passthrough to [`VoiceControls::set_gain`].
    pub fn set_gain(&self, value: f32) {
        self.controls.set_gain(value);
    }

    /// Render `left.len()` frames into both channels.
    ///
    /// Both channels receive the same mix. If `right` is a different length,
    /// only the common prefix is mixed and any leftover samples in either
    /// buffer are zeroed.
    pub fn render_block(&mut self, left: &mut [f32], right: &mut [f32]) {
        let frames = left.len().min(right.len());

        self.render_mono(&mut left[..frames]);
        right[..frames].copy_from_slice(&left[..frames]);

        left[frames..].fill(0.0);
        right[frames..].fill(0.0);
    }

    /// Render into an interleaved device buffer, writing the mix to every
    /// channel. A trailing partial frame is zeroed.
    pub fn render_interleaved(&mut self, data: &mut [f32], channels: usize) {
        if channels == 0 {
            data.fill(0.0);
            return;
        }

        let total_frames = data.len() / channels;
        let mut frames_written = 0;

        // Take the scratch buffer out so render_mono can borrow self mutably.
        let mut mix = std::mem::take(&mut self.mix_buffer);
        while frames_written < total_frames {
            let frames_remaining = total_frames - frames_written;
            let frames_to_render = frames_remaining.min(MAX_BLOCK_SIZE);

            let block = &mut mix[..frames_to_render];
            self.render_mono(block);

            let out_off = frames_written * channels;
            let out = &mut data[out_off..out_off + frames_to_render * channels];
            for (frame, &s) in out.chunks_exact_mut(channels).zip(block.iter()) {
                frame.fill(s);
            }

            frames_written += frames_to_render;
        }
        self.mix_buffer = mix;

        data[frames_written * channels..].fill(0.0);
    }

    fn render_mono(&mut self, out: &mut [f32]) {
        if self.sample_rate == 0 {
            out.fill(0.0);
            return;
        }

        let mut active = [false; NUM_VOICES];
        let mut n_active = 0usize;
        for (i, flag) in active.iter_mut().enumerate() {
            *flag = self.controls.is_active(i);
            n_active += *flag as usize;
        }

        if n_active == 0 {
            out.fill(0.0);
            return;
        }

        let scale = self.controls.gain() as f64 / n_active as f64;

        for sample in out.iter_mut() {
            let mut total = 0.0f64;
            for (osc, _) in self
                .oscillators
                .iter_mut()
                .zip(active.iter())
                .filter(|(_, on)| **on)
            {
                total += osc.tick();
            }
            *sample = (total * scale) as f32;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured(sample_rate: u32) -> VoiceBank {
        let mut bank = VoiceBank::new(VoiceControls::new(1.0));
        bank.configure(sample_rate).unwrap();
        bank
    }

    #[test]
    fn unconfigured_bank_is_silent() {
        let mut bank = VoiceBank::new(VoiceControls::new(1.0));
        bank.set_voice_active(0, true);

        let mut left = vec![1.0f32; 64];
        let mut right = vec![1.0f32; 64];
        bank.render_block(&mut left, &mut right);

        assert!(left.iter().chain(right.iter()).all(|&s| s == 0.0));
    }

    #[test]
    fn zero_sample_rate_is_rejected() {
        let mut bank = VoiceBank::new(VoiceControls::default());
        assert_eq!(bank.configure(0), Err(Error::InvalidSampleRate));
        assert!(!bank.is_configured());
    }

    #[test]
    fn configure_applies_frequencies() {
        let bank = configured(44_100);
        assert_eq!(bank.sample_rate(), 44_100);
        for (osc, spec) in bank.oscillators.iter().zip(KEYBOARD.iter()) {
            let expected = std::f64::consts::TAU * spec.frequency / 44_100.0;
            assert!((osc.phase_increment() - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn channels_are_identical() {
        let mut bank = configured(48_000);
        bank.set_voice_active(2, true);
        bank.set_voice_active(9, true);

        let mut left = vec![0.0f32; 300];
        let mut right = vec![0.0f32; 300];
        bank.render_block(&mut left, &mut right);

        assert_eq!(left, right);
        assert!(left.iter().any(|&s| s != 0.0));
    }

    #[test]
    fn mismatched_buffers_zero_the_tail() {
        let mut bank = configured(48_000);
        bank.set_voice_active(4, true);

        let mut left = vec![9.0f32; 32];
        let mut right = vec![9.0f32; 40];
        bank.render_block(&mut left, &mut right);

        assert_eq!(&left[..], &right[..32]);
        assert!(right[32..].iter().all(|&s| s == 0.0));
    }

    #[test]
    fn interleaved_matches_block_render() {
        let controls = VoiceControls::new(0.7);
        controls.set_voice_active(0, true);
        controls.set_voice_active(12, true);

        let mut planar = VoiceBank::new(controls.clone());
        planar.configure(48_000).unwrap();
        let mut interleaved = VoiceBank::new(controls);
        interleaved.configure(48_000).unwrap();

        // Larger than one internal block so chunking is exercised.
        let frames = MAX_BLOCK_SIZE + 100;
        let mut left = vec![0.0f32; frames];
        let mut right = vec![0.0f32; frames];
        planar.render_block(&mut left, &mut right);

        let channels = 3;
        let mut data = vec![5.0f32; frames * channels + 1];
        interleaved.render_interleaved(&mut data, channels);

        for (i, frame) in data.chunks_exact(channels).enumerate() {
            assert!(frame.iter().all(|&s| s == left[i]), "frame {i}");
        }
        assert_eq!(data[frames * channels], 0.0);
    }

    #[test]
    fn inactive_voices_hold_their_phase() {
        let mut bank = configured(48_000);
        bank.set_voice_active(0, true);
        let mut left = vec![0.0f32; 10];
        let mut right = vec![0.0f32; 10];
        bank.render_block(&mut left, &mut right);

        let phase_before = bank.oscillators[0].phase();
        bank.set_voice_active(0, false);
        bank.render_block(&mut left, &mut right);
        assert_eq!(bank.oscillators[0].phase(), phase_before);
        assert_eq!(bank.oscillators[1].phase(), 0.0);
    }
}

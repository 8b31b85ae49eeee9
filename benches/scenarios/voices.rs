//! Benchmarks for whole-bank rendering.
//!
//! Cost grows with the number of held keys, so the chord sizes cover the
//! empty bank, a single note, a triad and every key at once (the worst case).

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use keysynth::synth::{VoiceBank, VoiceControls, NUM_VOICES};

use crate::BLOCK_SIZES;

const CHORDS: &[(&str, &[usize])] = &[
    ("silent", &[]),
    ("single", &[9]),
    ("triad", &[0, 4, 7]),
];

fn bank_with(voices: impl IntoIterator<Item = usize>) -> VoiceBank {
    let controls = VoiceControls::new(0.5);
    for v in voices {
        controls.set_voice_active(v, true);
    }
    let mut bank = VoiceBank::new(controls);
    bank.configure(48_000).expect("non-zero sample rate");
    bank
}

pub fn bench_voices(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/voices");

    for &size in BLOCK_SIZES {
        let mut left = vec![0.0f32; size];
        let mut right = vec![0.0f32; size];

        for &(name, chord) in CHORDS {
            let mut bank = bank_with(chord.iter().copied());
            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
                b.iter(|| {
                    bank.render_block(black_box(&mut left), black_box(&mut right));
                })
            });
        }

        // === ALL KEYS HELD ===
        let mut bank = bank_with(0..NUM_VOICES);
        group.bench_with_input(BenchmarkId::new("all_keys", size), &size, |b, _| {
            b.iter(|| {
                bank.render_block(black_box(&mut left), black_box(&mut right));
            })
        });

        // === DEVICE CALLBACK ===
        // Interleaved stereo, the shape cpal hands the callback
        let mut data = vec![0.0f32; size * 2];
        let mut bank = bank_with([0, 4, 7]);
        group.bench_with_input(BenchmarkId::new("interleaved_triad", size), &size, |b, _| {
            b.iter(|| {
                bank.render_interleaved(black_box(&mut data), 2);
            })
        });
    }

    group.finish();
}

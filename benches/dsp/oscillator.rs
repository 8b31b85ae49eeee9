//! Benchmarks for sine oscillator ticking.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use keysynth::dsp::Oscillator;

use crate::BLOCK_SIZES;

pub fn bench_oscillator(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/oscillator");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f64; size];

        let mut osc = Oscillator::new();
        osc.set_sampling_rate(48_000);
        osc.set_frequency(440.0).expect("sample rate is set");

        group.bench_with_input(BenchmarkId::new("sine", size), &size, |b, _| {
            b.iter(|| {
                for sample in black_box(&mut buffer).iter_mut() {
                    *sample = osc.tick();
                }
            })
        });
    }

    group.finish();
}

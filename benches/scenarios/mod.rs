//! Real-world scenario benchmarks.
//!
//! These model what the audio callback actually does: render a block with
//! some number of keys held.

mod voices;

pub use voices::bench_voices;

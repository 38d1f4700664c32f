//! Random source used by the spawner, enemy fire rolls and the star field.
//!
//! The simulation never talks to `rand` directly so tests can feed it a
//! scripted sequence instead.

use rand::Rng;
use rand::rngs::ThreadRng;

pub trait RandomSource {
    /// Uniform sample in `[0, 1)`.
    fn next_unit(&mut self) -> f32;

    /// True with probability `chance`.
    fn roll(&mut self, chance: f32) -> bool {
        self.next_unit() < chance
    }

    /// Uniform index in `0..n`. `n` must be non-zero.
    fn pick(&mut self, n: usize) -> usize {
        ((self.next_unit() * n as f32) as usize).min(n - 1)
    }

    /// Uniform sample in `[min, min + span)`. `span` is a width, not an
    /// upper bound.
    fn offset_from(&mut self, min: f32, span: f32) -> f32 {
        self.next_unit() * span + min
    }
}

/// Production source backed by any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngSource<R: Rng> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

/// The generator the game runs with.
pub type ThreadRngSource = RngSource<ThreadRng>;

impl Default for RngSource<ThreadRng> {
    fn default() -> Self {
        Self::new(rand::rng())
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_unit(&mut self) -> f32 {
        self.rng.random::<f32>()
    }
}

/// Replays a fixed list of samples, cycling when it runs out.
#[derive(Debug, Clone)]
pub struct SequenceSource {
    values: Vec<f32>,
    cursor: usize,
}

impl SequenceSource {
    /// Scripted source over `values`, each expected in `[0, 1)`.
    ///
    /// # Panics
    ///
    /// Panics if `values` is empty.
    pub fn new(values: Vec<f32>) -> Self {
        assert!(!values.is_empty(), "SequenceSource needs at least one value");
        Self { values, cursor: 0 }
    }

    /// Always yields `value`.
    pub fn constant(value: f32) -> Self {
        Self::new(vec![value])
    }
}

impl RandomSource for SequenceSource {
    fn next_unit(&mut self) -> f32 {
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}

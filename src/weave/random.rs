//! Random index sources for the interleave stage.
//!
//! The interleave stage only ever asks for "an index below `upper`". Keeping
//! that behind [`RandomSource`] lets tests swap in a seeded or scripted
//! source and assert exact output.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Source of uniformly distributed indices.
pub trait RandomSource: Send + Sync {
    /// Return an index in `0..upper`. `upper` is never zero.
    fn pick(&self, upper: usize) -> usize;
}

/// Production source backed by rand's thread-local generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn pick(&self, upper: usize) -> usize {
        rand::thread_rng().gen_range(0..upper)
    }
}

/// Reproducible source seeded from a `u64`.
#[derive(Debug)]
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandom {
    fn pick(&self, upper: usize) -> usize {
        let mut rng = self
            .rng
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        rng.gen_range(0..upper)
    }
}

/// Scripted source that cycles through fixed indices (each taken modulo `upper`).
#[derive(Debug)]
pub struct SequenceRandom {
    indices: Vec<usize>,
    cursor: AtomicUsize,
}

impl SequenceRandom {
    pub fn new(indices: impl Into<Vec<usize>>) -> Self {
        let mut indices = indices.into();
        if indices.is_empty() {
            indices.push(0);
        }
        Self {
            indices,
            cursor: AtomicUsize::new(0),
        }
    }
}

impl RandomSource for SequenceRandom {
    fn pick(&self, upper: usize) -> usize {
        let at = self.cursor.fetch_add(1, Ordering::Relaxed);
        self.indices[at % self.indices.len()] % upper
    }
}

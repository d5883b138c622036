//! Reversal stage
//!
//! Reverses the sequence of Unicode scalar values. Grapheme clusters are not
//! kept together: a combining mark ends up in front of its base character.

use crate::weave::transforms::Runnable;

/// Reverse stage
#[derive(Debug, Default, Clone, Copy)]
pub struct Reverse;

impl Reverse {
    pub fn new() -> Self {
        Reverse
    }
}

impl Runnable<String, String> for Reverse {
    fn run(&self, input: String) -> String {
        input.chars().rev().collect()
    }
}

//! Character interleaving stage
//!
//! Inserts one character into every gap between adjacent characters of the
//! normalized text. Nothing goes before the first character or after the
//! last, so empty and single-character input come back unchanged and an
//! `n`-character input (n >= 2) grows to `2n - 1` characters.
//!
//! In random mode each gap gets its own draw from the alphabet.

use crate::weave::alphabet::Alphabet;
use crate::weave::config::InterleaveMode;
use crate::weave::random::{RandomSource, ThreadRandom};
use crate::weave::transforms::Runnable;
use std::sync::Arc;

/// Interleave stage
pub struct Interleave {
    mode: InterleaveMode,
    random: Arc<dyn RandomSource>,
}

impl Interleave {
    pub fn new(mode: InterleaveMode, random: Arc<dyn RandomSource>) -> Self {
        Interleave { mode, random }
    }

    /// Stage using the thread-local generator for random draws.
    pub fn with_thread_random(mode: InterleaveMode) -> Self {
        Self::new(mode, Arc::new(ThreadRandom))
    }

    fn draw(&self, alphabet: Alphabet) -> char {
        let chars = alphabet.chars();
        chars[self.random.pick(chars.len())]
    }

    /// Weave `text` according to the mode.
    pub fn weave(&self, text: &str) -> String {
        match self.mode {
            InterleaveMode::None => text.to_string(),
            InterleaveMode::Fixed(sep) => weave_with(text, || sep),
            InterleaveMode::Random(alphabet) => weave_with(text, || self.draw(alphabet)),
        }
    }
}

/// Put `next_gap()` between every adjacent pair of characters of `text`.
fn weave_with(text: &str, mut next_gap: impl FnMut() -> char) -> String {
    let mut chars = text.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };

    let mut woven = String::with_capacity(text.len() * 2);
    woven.push(first);
    for c in chars {
        woven.push(next_gap());
        woven.push(c);
    }
    woven
}

impl Runnable<String, String> for Interleave {
    fn run(&self, input: String) -> String {
        if self.mode.is_none() {
            return input;
        }
        self.weave(&input)
    }
}

//! Standard transform definitions
//!
//! Builders that turn a [`Configuration`] into a ready-to-run transform.

use crate::weave::config::{Configuration, InterleaveMode};
use crate::weave::random::RandomSource;
use crate::weave::transforms::stages::{Interleave, Reverse, StripWhitespace};
use crate::weave::transforms::{Runnable, Transform};
use std::sync::Arc;

/// Type alias for a text-to-text transform
pub type TextTransform = Transform<String, String>;

/// Skips a stage when its toggle is off.
struct Optional<S>(Option<S>);

impl<S> Runnable<String, String> for Optional<S>
where
    S: Runnable<String, String>,
{
    fn run(&self, input: String) -> String {
        match &self.0 {
            Some(stage) => stage.run(input),
            None => input,
        }
    }
}

/// Stages 2 and 3 (interleave, reverse) for a configuration.
///
/// This is what runs after normalization, whether normalization was local or
/// delegated.
pub fn build_tail(config: &Configuration, random: Arc<dyn RandomSource>) -> TextTransform {
    let interleave = match config.effective_interleave() {
        InterleaveMode::None => None,
        mode => Some(Interleave::new(mode, random)),
    };
    let reverse = config.reverse.then(Reverse::new);

    Transform::identity()
        .then(Optional(interleave))
        .then(Optional(reverse))
}

/// The full local pipeline for a configuration.
///
/// Returns `None` when the configuration asks for remote normalization, which
/// cannot run inside a synchronous transform.
pub fn build_local(config: &Configuration, random: Arc<dyn RandomSource>) -> Option<TextTransform> {
    let strip = StripWhitespace::for_config(config)?;
    Some(
        Transform::identity()
            .then(strip)
            .then(build_tail(config, random)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weave::alphabet::Alphabet;
    use crate::weave::random::{SequenceRandom, ThreadRandom};

    fn local(config: &Configuration) -> TextTransform {
        build_local(config, Arc::new(ThreadRandom)).unwrap()
    }

    #[test]
    fn test_build_local_strip_only() {
        assert_eq!(local(&Configuration::blanket()).run(" a\tb\n".to_string()), "ab");
        assert_eq!(local(&Configuration::default()).run(" a\tb\n".to_string()), "a\tb");

        let reverse = Configuration::passthrough().with_reverse(true);
        assert_eq!(local(&reverse).run("abc".to_string()), "cba");
    }

    #[test]
    fn test_build_local_full_chain() {
        let config = Configuration::default()
            .with_interleave(InterleaveMode::Fixed('-'))
            .with_reverse(true);
        assert_eq!(local(&config).run("a b\nc".to_string()), "c-b-a");
    }

    #[test]
    fn test_build_local_rejects_remote() {
        assert!(build_local(&Configuration::remote(), Arc::new(ThreadRandom)).is_none());
    }

    #[test]
    fn test_build_tail_skips_normalization() {
        let config = Configuration::remote()
            .with_interleave(InterleaveMode::Random(Alphabet::Alphanumeric));
        let tail = build_tail(&config, Arc::new(SequenceRandom::new(vec![25])));
        assert_eq!(tail.run("a b".to_string()), "aZ Zb");
    }

    #[test]
    fn test_build_tail_drops_stripped_separator() {
        let config = Configuration::blanket().with_interleave(InterleaveMode::Fixed(' '));
        let tail = build_tail(&config, Arc::new(ThreadRandom));
        assert_eq!(tail.run("ab".to_string()), "ab");
    }

    #[test]
    fn test_interleave_runs_before_reverse() {
        let config = Configuration::passthrough()
            .with_interleave(InterleaveMode::Random(Alphabet::Alphanumeric))
            .with_reverse(true);
        // draws 'a' then 'b'
        let random = Arc::new(SequenceRandom::new(vec![26, 27]));
        let transform = build_local(&config, random).unwrap();
        assert_eq!(transform.run("xyz".to_string()), "zbyax");
    }
}

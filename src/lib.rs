//! # stringweave
//!
//! Turns a short text into a "woven" string: whitespace is stripped, a fixed
//! or random character is threaded between the remaining characters, and the
//! result can be reversed.
//!
//! The main entry points are [`transform`] for local configurations and
//! [`Weaver`] when a remote normalizer or a custom random source is needed.

pub mod weave;

pub use weave::alphabet::Alphabet;
pub use weave::config::{
    Configuration, InterleaveMode, PresetRegistry, ProcessingPreset, WhitespacePolicy,
};
pub use weave::pipeline::{transform, Invocation, PipelineState, WeaveError, Weaver};
pub use weave::random::{RandomSource, SeededRandom, SequenceRandom, ThreadRandom};
pub use weave::remote::{CommandNormalizer, Normalizer, ServiceError};

//! Core weaving library
//!
//! - [`config`]: per-invocation configuration and named presets
//! - [`transforms`]: the stage chain (whitespace, interleave, reverse)
//! - [`pipeline`]: validation, the invocation state machine and [`Weaver`](pipeline::Weaver)
//! - [`remote`]: the remote normalizer interface
//! - [`alphabet`], [`random`]: inputs to random interleaving

pub mod alphabet;
pub mod config;
pub mod pipeline;
pub mod random;
pub mod remote;
pub mod transforms;

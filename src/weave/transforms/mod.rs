//! Transform pipeline infrastructure
//!
//! Each weaving stage implements [`Runnable`], and stages are chained into a
//! [`Transform`] with `.then()`. The compiler checks that each stage's input
//! type matches the previous stage's output type. Every stage is total, so
//! running a chain cannot fail.
//!
//! ```rust,ignore
//! let pipeline = Transform::identity()
//!     .then(StripWhitespace::granular(true, true))
//!     .then(Interleave::new(InterleaveMode::Fixed('-'), random))
//!     .then(Reverse::new());
//!
//! assert_eq!(pipeline.run("a b".to_string()), "b-a");
//! ```
//!
//! # Module Organization
//!
//! - [`stages`]: the individual stages (whitespace, interleave, reverse)
//! - [`standard`]: building a local pipeline from a [`Configuration`](crate::weave::config::Configuration)

pub mod stages;
pub mod standard;

/// Trait for anything that can transform an input to an output
///
/// Implemented by the individual stages; [`Transform`] composes them.
pub trait Runnable<I, O> {
    /// Execute this transformation on the input
    fn run(&self, input: I) -> O;
}

/// A composable transformation pipeline from `I` to `O`.
pub struct Transform<I, O> {
    run_fn: Box<dyn Fn(I) -> O + Send + Sync>,
}

impl<I, O> Transform<I, O> {
    /// Create a transform from a function
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(I) -> O + Send + Sync + 'static,
    {
        Transform {
            run_fn: Box::new(f),
        }
    }

    /// Chain a stage onto this transform.
    ///
    /// The stage's input type must match this transform's output type.
    pub fn then<O2, S>(self, stage: S) -> Transform<I, O2>
    where
        S: Runnable<O, O2> + Send + Sync + 'static,
        I: 'static,
        O: 'static,
        O2: 'static,
    {
        let prev_run = self.run_fn;
        Transform {
            run_fn: Box::new(move |input| {
                let intermediate = prev_run(input);
                stage.run(intermediate)
            }),
        }
    }

    /// Execute this transform on the given input
    pub fn run(&self, input: I) -> O {
        (self.run_fn)(input)
    }
}

impl<T: 'static> Transform<T, T> {
    /// Create an identity transform, the starting point of a chain
    pub fn identity() -> Self {
        Transform::from_fn(|x| x)
    }
}

impl<I, O> Runnable<I, O> for Transform<I, O>
where
    I: 'static,
    O: 'static,
{
    fn run(&self, input: I) -> O {
        Transform::run(self, input)
    }
}

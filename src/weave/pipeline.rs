//! Weave pipeline entry points
//!
//! [`Weaver`] runs the stages for one configuration at a time:
//!
//! 1. whitespace normalization (local, or through a [`Normalizer`])
//! 2. interleaving
//! 3. reversal
//!
//! Input that is empty after trimming is rejected before any stage runs.
//! Local stages cannot fail; the only failure after validation is a remote
//! normalizer error.
//!
//! ```rust,ignore
//! let weaver = Weaver::new();
//! let out = weaver.transform("Hi\nThere ", &Configuration::default().with_reverse(true))?;
//! assert_eq!(out, "erehTiH");
//! ```

use crate::weave::config::Configuration;
use crate::weave::random::{RandomSource, ThreadRandom};
use crate::weave::remote::{Normalizer, ServiceError};
use crate::weave::transforms::standard::{build_local, build_tail};
use crate::weave::transforms::stages::whitespace::is_blanket_whitespace;
use std::sync::Arc;
use thiserror::Error;

/// Errors surfaced to the caller of the pipeline
#[derive(Debug, Error)]
pub enum WeaveError {
    /// Nothing but whitespace was supplied
    #[error("input is empty; enter some text to weave")]
    EmptyInput,

    #[error("remote normalization failed: {0}")]
    RemoteNormalizationFailure(#[from] ServiceError),
}

/// Where an [`Invocation`] is in its lifecycle.
#[derive(Debug)]
pub enum PipelineState {
    Idle,
    Processing,
    Done(String),
    Failed(WeaveError),
}

impl PipelineState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, PipelineState::Done(_) | PipelineState::Failed(_))
    }
}

/// One run of the pipeline.
///
/// An invocation starts `Idle`. [`Weaver::invoke`] moves it to `Processing`
/// once the input passes validation and then to `Done` or `Failed`. Input
/// rejected by validation leaves it `Idle` and is reported through
/// [`Invocation::rejection`].
#[derive(Debug)]
pub struct Invocation {
    state: PipelineState,
    rejection: Option<WeaveError>,
}

impl Invocation {
    pub fn new() -> Self {
        Invocation {
            state: PipelineState::Idle,
            rejection: None,
        }
    }

    pub fn state(&self) -> &PipelineState {
        &self.state
    }

    /// The validation error, if the input never entered `Processing`.
    pub fn rejection(&self) -> Option<&WeaveError> {
        self.rejection.as_ref()
    }

    /// `Idle -> Processing`, or stay `Idle` when the input is blank.
    fn begin(&mut self, input: &str) -> bool {
        if let Err(err) = validate(input) {
            self.rejection = Some(err);
            return false;
        }
        self.state = PipelineState::Processing;
        true
    }

    fn finish(&mut self, result: Result<String, WeaveError>) {
        self.state = match result {
            Ok(text) => PipelineState::Done(text),
            Err(err) => PipelineState::Failed(err),
        };
    }

    /// Collapse the invocation into the caller-facing result.
    pub fn into_result(self) -> Result<String, WeaveError> {
        if let Some(err) = self.rejection {
            return Err(err);
        }
        match self.state {
            PipelineState::Done(text) => Ok(text),
            PipelineState::Failed(err) => Err(err),
            PipelineState::Idle | PipelineState::Processing => Err(WeaveError::EmptyInput),
        }
    }
}

impl Default for Invocation {
    fn default() -> Self {
        Self::new()
    }
}

/// Reject input that is empty after trimming.
///
/// Trimming removes Unicode whitespace and U+FEFF.
pub fn validate(input: &str) -> Result<(), WeaveError> {
    if input.chars().all(is_blanket_whitespace) {
        return Err(WeaveError::EmptyInput);
    }
    Ok(())
}

/// Runs configurations against input text
#[derive(Clone)]
pub struct Weaver {
    random: Arc<dyn RandomSource>,
    normalizer: Option<Arc<dyn Normalizer>>,
}

impl Weaver {
    /// Weaver with thread-local randomness and no remote normalizer
    pub fn new() -> Self {
        Self {
            random: Arc::new(ThreadRandom),
            normalizer: None,
        }
    }

    pub fn with_random(mut self, random: Arc<dyn RandomSource>) -> Self {
        self.random = random;
        self
    }

    pub fn with_normalizer(mut self, normalizer: Arc<dyn Normalizer>) -> Self {
        self.normalizer = Some(normalizer);
        self
    }

    /// Run the local pipeline.
    ///
    /// A remote configuration fails with
    /// [`WeaveError::RemoteNormalizationFailure`]; use
    /// [`transform_async`](Self::transform_async) for those.
    pub fn transform(&self, input: &str, config: &Configuration) -> Result<String, WeaveError> {
        validate(input)?;
        let pipeline = build_local(config, self.random.clone())
            .ok_or(WeaveError::RemoteNormalizationFailure(ServiceError::Unavailable))?;
        Ok(pipeline.run(input.to_string()))
    }

    /// Run the pipeline, awaiting the normalizer when the configuration is remote.
    pub async fn transform_async(
        &self,
        input: &str,
        config: &Configuration,
    ) -> Result<String, WeaveError> {
        if !config.is_remote() {
            return self.transform(input, config);
        }
        validate(input)?;

        let normalizer = self
            .normalizer
            .as_ref()
            .ok_or(ServiceError::Unavailable)?;
        let normalized = normalizer.normalize(input).await?;
        Ok(build_tail(config, self.random.clone()).run(normalized))
    }

    /// Run the pipeline and report the final state of the invocation.
    pub async fn invoke(&self, input: &str, config: &Configuration) -> Invocation {
        let mut invocation = Invocation::new();
        if invocation.begin(input) {
            let result = self.transform_async(input, config).await;
            invocation.finish(result);
        }
        invocation
    }
}

impl Default for Weaver {
    fn default() -> Self {
        Self::new()
    }
}

/// Run the local pipeline with thread-local randomness.
pub fn transform(input: &str, config: &Configuration) -> Result<String, WeaveError> {
    Weaver::new().transform(input, config)
}

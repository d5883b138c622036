//! Remote whitespace normalization
//!
//! When a configuration selects [`WhitespacePolicy::Remote`], stage 1 is
//! handed to a [`Normalizer`] instead of being computed locally. The pipeline
//! only relies on the input/output contract: text in, normalized text out, or
//! a [`ServiceError`].
//!
//! [`CommandNormalizer`] talks to an external program over stdin/stdout using
//! a small JSON protocol:
//!
//! ```text
//! stdin:  {"text": "Hello\n World"}
//! stdout: {"strippedText": "Hello World"}
//! ```
//!
//! [`WhitespacePolicy::Remote`]: crate::weave::config::WhitespacePolicy::Remote

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::io;
use std::process::Stdio;
use std::time::Duration;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Default time a [`CommandNormalizer`] waits for its program.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Why a remote normalization did not produce text.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("no remote normalizer is configured")]
    Unavailable,

    #[error("failed to run normalizer: {0}")]
    Spawn(#[from] io::Error),

    #[error("normalizer timed out after {0:?}")]
    Timeout(Duration),

    #[error("normalizer exited with {status}: {stderr}")]
    Exit { status: String, stderr: String },

    #[error("malformed normalizer response: {0}")]
    MalformedResponse(String),
}

/// External text-processing service used for remote normalization.
#[async_trait]
pub trait Normalizer: Send + Sync {
    /// Return `text` with newlines and extra spaces removed.
    async fn normalize(&self, text: &str) -> Result<String, ServiceError>;
}

/// Request body written to the normalizer program.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct NormalizeRequest {
    pub text: String,
}

/// Response body read back from the normalizer program.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NormalizeResponse {
    pub stripped_text: String,
}

/// Runs a shell command as the normalization service.
#[derive(Debug, Clone)]
pub struct CommandNormalizer {
    command: String,
    timeout: Duration,
}

impl CommandNormalizer {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn shell(&self) -> Command {
        #[cfg(windows)]
        let mut cmd = {
            let mut cmd = Command::new("cmd");
            cmd.arg("/C").arg(&self.command);
            cmd
        };
        #[cfg(not(windows))]
        let mut cmd = {
            let mut cmd = Command::new("sh");
            cmd.arg("-c").arg(&self.command);
            cmd
        };
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        cmd
    }

    async fn exchange(&self, text: &str) -> Result<String, ServiceError> {
        let request = serde_json::to_vec(&NormalizeRequest {
            text: text.to_string(),
        })
        .map_err(|e| ServiceError::MalformedResponse(e.to_string()))?;

        let mut child = self.shell().spawn()?;
        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(&request).await?;
            stdin.shutdown().await?;
        }

        let output = child.wait_with_output().await?;
        if !output.status.success() {
            return Err(ServiceError::Exit {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        parse_response(&output.stdout)
    }
}

/// Decode the program's stdout into the normalized text.
pub fn parse_response(stdout: &[u8]) -> Result<String, ServiceError> {
    let response: NormalizeResponse = serde_json::from_slice(stdout)
        .map_err(|e| ServiceError::MalformedResponse(e.to_string()))?;
    Ok(response.stripped_text)
}

#[async_trait]
impl Normalizer for CommandNormalizer {
    async fn normalize(&self, text: &str) -> Result<String, ServiceError> {
        tokio::time::timeout(self.timeout, self.exchange(text))
            .await
            .map_err(|_| ServiceError::Timeout(self.timeout))?
    }
}

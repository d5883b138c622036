//! Shared configuration loader for stringweave.
//!
//! `defaults/stringweave.default.toml` is embedded into every binary so that
//! docs and runtime behavior stay in sync. Applications layer user-specific
//! files on top of those defaults via [`Loader`] before deserializing into
//! [`WeaveConfig`], then resolve it against a preset registry with
//! [`WeaveConfig::resolve`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use stringweave::{
    Alphabet, CommandNormalizer, Configuration, InterleaveMode, PresetRegistry, WhitespacePolicy,
};

const DEFAULT_TOML: &str = include_str!("../defaults/stringweave.default.toml");

/// Top-level configuration consumed by stringweave front ends.
#[derive(Debug, Clone, Deserialize)]
pub struct WeaveConfig {
    pub preset: String,
    #[serde(default)]
    pub weave: WeaveOverrides,
    pub remote: RemoteConfig,
}

/// Interleave selector as written in config files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InterleaveKind {
    None,
    Fixed,
    Random,
}

/// Per-field overrides applied on top of the selected preset.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WeaveOverrides {
    pub remove_newlines: Option<bool>,
    pub remove_spaces: Option<bool>,
    pub policy: Option<WhitespacePolicy>,
    pub interleave: Option<InterleaveKind>,
    pub fixed_char: Option<String>,
    pub alphabet: Option<Alphabet>,
    pub reverse: Option<bool>,
}

impl WeaveOverrides {
    /// Apply every override that is set to `config`.
    pub fn apply(&self, mut config: Configuration) -> Configuration {
        if let Some(v) = self.remove_newlines {
            config.remove_newlines = v;
        }
        if let Some(v) = self.remove_spaces {
            config.remove_spaces = v;
        }
        if let Some(policy) = self.policy {
            config.policy = policy;
        }

        let alphabet = self.alphabet.or(match config.interleave {
            InterleaveMode::Random(alphabet) => Some(alphabet),
            _ => None,
        });
        match self.interleave {
            Some(InterleaveKind::None) => config.interleave = InterleaveMode::None,
            Some(InterleaveKind::Fixed) => {
                config.interleave =
                    InterleaveMode::fixed_from_str(self.fixed_char.as_deref().unwrap_or(""));
            }
            Some(InterleaveKind::Random) => {
                config.interleave =
                    InterleaveMode::Random(alphabet.unwrap_or(Alphabet::Alphanumeric));
            }
            None => {
                // Tweak the preset's own mode when only its parameter is given
                match config.interleave {
                    InterleaveMode::Fixed(_) => {
                        if let Some(c) = &self.fixed_char {
                            config.interleave = InterleaveMode::fixed_from_str(c);
                        }
                    }
                    InterleaveMode::Random(_) => {
                        if let Some(alphabet) = self.alphabet {
                            config.interleave = InterleaveMode::Random(alphabet);
                        }
                    }
                    InterleaveMode::None => {}
                }
            }
        }

        if let Some(v) = self.reverse {
            config.reverse = v;
        }
        config
    }
}

/// Settings for the process-backed remote normalizer.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteConfig {
    #[serde(default)]
    pub command: Option<String>,
    pub timeout_ms: u64,
}

impl RemoteConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// The configured normalizer, if a non-empty command is set.
    pub fn normalizer(&self) -> Option<CommandNormalizer> {
        let command = self.command.as_deref().map(str::trim)?;
        if command.is_empty() {
            return None;
        }
        Some(CommandNormalizer::new(command).with_timeout(self.timeout()))
    }
}

impl WeaveConfig {
    /// Look up the preset and apply the overrides.
    pub fn resolve(&self, registry: &PresetRegistry) -> Result<Configuration, ConfigError> {
        let preset = registry.get(&self.preset).ok_or_else(|| {
            let known: Vec<_> = registry.list_all().iter().map(|p| p.name.as_str()).collect();
            ConfigError::Message(format!(
                "unknown preset '{}' (available: {})",
                self.preset,
                known.join(", ")
            ))
        })?;
        Ok(self.weave.apply(preset.config.clone()))
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer configuration text, e.g. from a test or an environment variable.
    pub fn with_toml_str(mut self, toml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(toml, FileFormat::Toml));
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<WeaveConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<WeaveConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.preset, "default");
        assert_eq!(config.remote.timeout_ms, 10_000);
        assert!(config.remote.normalizer().is_none());

        let resolved = config
            .resolve(&PresetRegistry::with_defaults())
            .expect("default preset to exist");
        assert_eq!(resolved, Configuration::default());
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("preset", "weave")
            .expect("override to apply")
            .set_override("weave.reverse", true)
            .expect("override to apply")
            .build()
            .expect("config to build");
        let resolved = config.resolve(&PresetRegistry::with_defaults()).unwrap();
        assert_eq!(resolved.policy, WhitespacePolicy::Blanket);
        assert!(resolved.reverse);
    }

    #[test]
    fn layered_toml_selects_fixed_interleave() {
        let config = Loader::new()
            .with_toml_str(
                r#"
                [weave]
                interleave = "fixed"
                fixed_char = "*#"
                policy = "blanket"
                "#,
            )
            .build()
            .unwrap();
        let resolved = config.resolve(&PresetRegistry::with_defaults()).unwrap();
        assert_eq!(resolved.interleave, InterleaveMode::Fixed('*'));
        assert_eq!(resolved.policy, WhitespacePolicy::Blanket);
    }

    #[test]
    fn empty_fixed_char_means_no_interleave() {
        let config = Loader::new()
            .with_toml_str("[weave]\ninterleave = \"fixed\"\nfixed_char = \"\"\n")
            .build()
            .unwrap();
        let resolved = config.resolve(&PresetRegistry::with_defaults()).unwrap();
        assert_eq!(resolved.interleave, InterleaveMode::None);
    }

    #[test]
    fn alphabet_override_keeps_random_preset() {
        let config = Loader::new()
            .with_toml_str("preset = \"weave-random\"\n[weave]\nalphabet = \"symbols\"\n")
            .build()
            .unwrap();
        let resolved = config.resolve(&PresetRegistry::with_defaults()).unwrap();
        assert_eq!(resolved.interleave, InterleaveMode::Random(Alphabet::Symbols));
    }

    #[test]
    fn unknown_preset_is_an_error() {
        let config = Loader::new()
            .set_override("preset", "tapestry")
            .unwrap()
            .build()
            .unwrap();
        let err = config
            .resolve(&PresetRegistry::with_defaults())
            .unwrap_err();
        assert!(err.to_string().contains("tapestry"));
    }

    #[test]
    fn remote_command_builds_normalizer() {
        let config = Loader::new()
            .with_toml_str("[remote]\ncommand = \"my-normalizer --json\"\ntimeout_ms = 250\n")
            .build()
            .unwrap();
        let normalizer = config.remote.normalizer().expect("command is set");
        assert_eq!(normalizer.command(), "my-normalizer --json");
        assert_eq!(normalizer.timeout(), Duration::from_millis(250));
    }

    #[test]
    fn missing_required_file_fails() {
        let result = Loader::new()
            .with_file("/definitely/not/here/stringweave.toml")
            .build();
        assert!(result.is_err());
    }
}

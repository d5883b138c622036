//! Weaving configuration and named presets
//!
//! A [`Configuration`] selects:
//! 1. How whitespace is normalized (granular toggles, blanket strip, or remote)
//! 2. Which interleave mode runs, if any
//! 3. Whether the result is reversed
//!
//! [`PresetRegistry`] holds named configurations so front ends can refer to a
//! whole setup by name.

use crate::weave::alphabet::Alphabet;
use crate::weave::transforms::stages::whitespace::{is_blanket_whitespace, is_granular_whitespace};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// How stage 1 removes whitespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WhitespacePolicy {
    /// Remove `\n`/`\r` and U+0020 according to the two toggles.
    /// Tabs and other whitespace are kept.
    #[default]
    Granular,
    /// Remove every Unicode whitespace character in one pass.
    /// The toggles are ignored.
    Blanket,
    /// Delegate normalization to the installed [`Normalizer`](crate::weave::remote::Normalizer).
    Remote,
}

/// What stage 2 inserts between characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InterleaveMode {
    #[default]
    None,
    Fixed(char),
    Random(Alphabet),
}

impl InterleaveMode {
    /// Fixed mode from user-entered text.
    ///
    /// Only the first character is kept. An empty string means no interleave.
    pub fn fixed_from_str(s: &str) -> Self {
        match s.chars().next() {
            Some(c) => InterleaveMode::Fixed(c),
            None => InterleaveMode::None,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, InterleaveMode::None)
    }
}

/// Per-invocation settings for the weave pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    pub remove_newlines: bool,
    pub remove_spaces: bool,
    pub policy: WhitespacePolicy,
    pub interleave: InterleaveMode,
    pub reverse: bool,
}

impl Default for Configuration {
    fn default() -> Self {
        Self::granular(true, true)
    }
}

impl Configuration {
    /// Granular stripping with the given toggles, nothing else.
    pub fn granular(remove_newlines: bool, remove_spaces: bool) -> Self {
        Configuration {
            remove_newlines,
            remove_spaces,
            policy: WhitespacePolicy::Granular,
            interleave: InterleaveMode::None,
            reverse: false,
        }
    }

    /// Blanket whitespace stripping, nothing else.
    pub fn blanket() -> Self {
        Configuration {
            policy: WhitespacePolicy::Blanket,
            ..Self::granular(true, true)
        }
    }

    /// Remote normalization, nothing else.
    pub fn remote() -> Self {
        Configuration {
            policy: WhitespacePolicy::Remote,
            ..Self::granular(true, true)
        }
    }

    /// No stripping, no interleave, no reversal.
    pub fn passthrough() -> Self {
        Self::granular(false, false)
    }

    pub fn with_interleave(mut self, interleave: InterleaveMode) -> Self {
        self.interleave = interleave;
        self
    }

    pub fn with_reverse(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }

    pub fn with_policy(mut self, policy: WhitespacePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn is_remote(&self) -> bool {
        self.policy == WhitespacePolicy::Remote
    }

    /// Whether normalization under this configuration removes `c`.
    ///
    /// A remote normalizer is held to the two toggles.
    pub fn strips(&self, c: char) -> bool {
        match self.policy {
            WhitespacePolicy::Blanket => is_blanket_whitespace(c),
            WhitespacePolicy::Granular | WhitespacePolicy::Remote => {
                is_granular_whitespace(c, self.remove_newlines, self.remove_spaces)
            }
        }
    }

    /// The interleave mode stage 2 actually runs.
    ///
    /// A fixed separator that normalization would strip is dropped, so the
    /// output never contains whitespace the configuration asked to remove.
    pub fn effective_interleave(&self) -> InterleaveMode {
        match self.interleave {
            InterleaveMode::Fixed(c) if self.strips(c) => InterleaveMode::None,
            mode => mode,
        }
    }
}

/// A named configuration
#[derive(Debug, Clone)]
pub struct ProcessingPreset {
    pub name: String,
    pub description: String,
    pub config: Configuration,
}

/// Registry of named configurations
#[derive(Debug, Clone, Default)]
pub struct PresetRegistry {
    presets: HashMap<String, ProcessingPreset>,
}

impl PresetRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        PresetRegistry {
            presets: HashMap::new(),
        }
    }

    /// Register a preset, replacing any preset with the same name
    pub fn register(&mut self, preset: ProcessingPreset) {
        self.presets.insert(preset.name.clone(), preset);
    }

    pub fn get(&self, name: &str) -> Option<&ProcessingPreset> {
        self.presets.get(name)
    }

    pub fn has(&self, name: &str) -> bool {
        self.presets.contains_key(name)
    }

    /// List all presets (sorted by name)
    pub fn list_all(&self) -> Vec<&ProcessingPreset> {
        let mut presets: Vec<_> = self.presets.values().collect();
        presets.sort_by(|a, b| a.name.cmp(&b.name));
        presets
    }

    /// Create registry with the built-in presets
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        registry.register(ProcessingPreset {
            name: "default".into(),
            description: "Remove newlines and spaces, keep tabs".into(),
            config: Configuration::default(),
        });

        registry.register(ProcessingPreset {
            name: "mirror".into(),
            description: "Remove newlines and spaces, then reverse".into(),
            config: Configuration::default().with_reverse(true),
        });

        // Blanket-stripping family
        registry.register(ProcessingPreset {
            name: "weave".into(),
            description: "Strip all whitespace".into(),
            config: Configuration::blanket(),
        });

        registry.register(ProcessingPreset {
            name: "weave-fixed".into(),
            description: "Strip all whitespace, join characters with '-'".into(),
            config: Configuration::blanket().with_interleave(InterleaveMode::Fixed('-')),
        });

        registry.register(ProcessingPreset {
            name: "weave-random".into(),
            description: "Strip all whitespace, weave in random A-Z a-z 0-9".into(),
            config: Configuration::blanket()
                .with_interleave(InterleaveMode::Random(Alphabet::Alphanumeric)),
        });

        registry.register(ProcessingPreset {
            name: "weave-symbols".into(),
            description: "Strip all whitespace, weave in random punctuation".into(),
            config: Configuration::blanket()
                .with_interleave(InterleaveMode::Random(Alphabet::Symbols)),
        });

        registry.register(ProcessingPreset {
            name: "remote".into(),
            description: "Delegate whitespace removal to an external normalizer".into(),
            config: Configuration::remote(),
        });

        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_granular_both_toggles() {
        let config = Configuration::default();
        assert_eq!(config.policy, WhitespacePolicy::Granular);
        assert!(config.remove_newlines);
        assert!(config.remove_spaces);
        assert!(config.interleave.is_none());
        assert!(!config.reverse);
    }

    #[test]
    fn test_fixed_from_str() {
        assert_eq!(InterleaveMode::fixed_from_str(""), InterleaveMode::None);
        assert_eq!(InterleaveMode::fixed_from_str("-"), InterleaveMode::Fixed('-'));
        assert_eq!(InterleaveMode::fixed_from_str("ab"), InterleaveMode::Fixed('a'));
        assert_eq!(InterleaveMode::fixed_from_str("é!"), InterleaveMode::Fixed('é'));
    }

    #[test]
    fn test_stripped_separator_is_dropped() {
        let config = Configuration::default();
        for sep in [' ', '\n', '\r'] {
            let config = config.clone().with_interleave(InterleaveMode::Fixed(sep));
            assert_eq!(config.effective_interleave(), InterleaveMode::None, "{sep:?}");
        }

        let tab = config.clone().with_interleave(InterleaveMode::Fixed('\t'));
        assert_eq!(tab.effective_interleave(), InterleaveMode::Fixed('\t'));

        let keep_spaces =
            Configuration::granular(true, false).with_interleave(InterleaveMode::Fixed(' '));
        assert_eq!(keep_spaces.effective_interleave(), InterleaveMode::Fixed(' '));
    }

    #[test]
    fn test_blanket_drops_any_whitespace_separator() {
        for sep in ['\t', '\u{00A0}', '\u{FEFF}'] {
            let config = Configuration::blanket().with_interleave(InterleaveMode::Fixed(sep));
            assert_eq!(config.effective_interleave(), InterleaveMode::None, "{sep:?}");
        }
        let dash = Configuration::blanket().with_interleave(InterleaveMode::Fixed('-'));
        assert_eq!(dash.effective_interleave(), InterleaveMode::Fixed('-'));

        let random =
            Configuration::blanket().with_interleave(InterleaveMode::Random(Alphabet::Symbols));
        assert_eq!(random.effective_interleave(), random.interleave);
    }

    #[test]
    fn test_registry_defaults() {
        let registry = PresetRegistry::with_defaults();
        for name in [
            "default",
            "mirror",
            "weave",
            "weave-fixed",
            "weave-random",
            "weave-symbols",
            "remote",
        ] {
            assert!(registry.has(name), "missing preset {name}");
        }
        assert!(registry.get("remote").unwrap().config.is_remote());
        assert!(registry.get("nope").is_none());
    }

    #[test]
    fn test_registry_list_sorted() {
        let registry = PresetRegistry::with_defaults();
        let names: Vec<_> = registry.list_all().iter().map(|p| p.name.as_str()).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }

    #[test]
    fn test_register_replaces() {
        let mut registry = PresetRegistry::new();
        registry.register(ProcessingPreset {
            name: "x".into(),
            description: "first".into(),
            config: Configuration::default(),
        });
        registry.register(ProcessingPreset {
            name: "x".into(),
            description: "second".into(),
            config: Configuration::blanket(),
        });
        assert_eq!(registry.list_all().len(), 1);
        assert_eq!(registry.get("x").unwrap().description, "second");
    }

    #[test]
    fn test_json_shape() {
        let config = Configuration::blanket()
            .with_interleave(InterleaveMode::Random(Alphabet::Symbols))
            .with_reverse(true);
        let json = serde_json::to_value(&config).unwrap();
        insta::assert_json_snapshot!(json, @r###"
        {
          "interleave": {
            "random": "symbols"
          },
          "policy": "blanket",
          "remove_newlines": true,
          "remove_spaces": true,
          "reverse": true
        }
        "###);
    }

    #[test]
    fn test_deserialize_partial_json_fills_defaults() {
        let config: Configuration =
            serde_json::from_str(r#"{"interleave": {"fixed": "*"}, "reverse": true}"#).unwrap();
        assert_eq!(config.interleave, InterleaveMode::Fixed('*'));
        assert!(config.reverse);
        assert_eq!(config.policy, WhitespacePolicy::Granular);
        assert!(config.remove_spaces);
    }
}

//! Whitespace normalization stage
//!
//! Two local policies:
//!
//! - granular: each `\n`/`\r` (when newlines are selected) and each U+0020
//!   (when spaces are selected) is deleted on its own. Tabs, non-breaking
//!   spaces and other whitespace are left alone.
//! - blanket: every character matching `\s`, plus the byte order mark
//!   U+FEFF, is deleted in a single regex substitution.
//!
//! Runs are never collapsed into a replacement character; offending
//! characters simply disappear.

use crate::weave::config::{Configuration, WhitespacePolicy};
use crate::weave::transforms::Runnable;
use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s\x{FEFF}]+").expect("valid regex"));

/// Whether blanket stripping removes `c`.
///
/// Unicode White_Space plus U+FEFF, the same set the empty-input check trims.
pub fn is_blanket_whitespace(c: char) -> bool {
    c.is_whitespace() || c == '\u{FEFF}'
}

/// Whether granular stripping with the given toggles removes `c`.
pub fn is_granular_whitespace(c: char, remove_newlines: bool, remove_spaces: bool) -> bool {
    let newline = remove_newlines && (c == '\n' || c == '\r');
    let space = remove_spaces && c == ' ';
    newline || space
}

/// Local whitespace stripping stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StripWhitespace {
    Granular {
        remove_newlines: bool,
        remove_spaces: bool,
    },
    Blanket,
}

impl StripWhitespace {
    pub fn granular(remove_newlines: bool, remove_spaces: bool) -> Self {
        StripWhitespace::Granular {
            remove_newlines,
            remove_spaces,
        }
    }

    pub fn blanket() -> Self {
        StripWhitespace::Blanket
    }

    /// The local stage for a configuration, or `None` when normalization is remote.
    pub fn for_config(config: &Configuration) -> Option<Self> {
        match config.policy {
            WhitespacePolicy::Granular => Some(Self::granular(
                config.remove_newlines,
                config.remove_spaces,
            )),
            WhitespacePolicy::Blanket => Some(Self::blanket()),
            WhitespacePolicy::Remote => None,
        }
    }

    /// Apply the policy to `text`.
    pub fn strip(&self, text: &str) -> String {
        match *self {
            StripWhitespace::Granular {
                remove_newlines,
                remove_spaces,
            } => text
                .chars()
                .filter(|&c| !is_granular_whitespace(c, remove_newlines, remove_spaces))
                .collect(),
            StripWhitespace::Blanket => WHITESPACE.replace_all(text, "").into_owned(),
        }
    }
}

impl Runnable<String, String> for StripWhitespace {
    fn run(&self, input: String) -> String {
        if let StripWhitespace::Granular {
            remove_newlines: false,
            remove_spaces: false,
        } = self
        {
            return input;
        }
        self.strip(&input)
    }
}

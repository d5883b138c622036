//! Fixed character sets used for random interleaving.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const ALPHANUMERIC: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
const SYMBOLS: &str = "!#$%&*+-./:;<=>?@^_|~()[]{},'\"";

static ALPHANUMERIC_CHARS: Lazy<Vec<char>> = Lazy::new(|| ALPHANUMERIC.chars().collect());
static SYMBOL_CHARS: Lazy<Vec<char>> = Lazy::new(|| SYMBOLS.chars().collect());

/// The characters a random draw may produce.
///
/// Alphabets are constants of the configuration; callers pick one by name
/// but never supply their own symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Alphabet {
    /// `A-Z a-z 0-9`, 62 symbols in that order
    Alphanumeric,
    /// Punctuation and symbols, no whitespace
    Symbols,
}

impl Alphabet {
    pub const ALL: [Alphabet; 2] = [Alphabet::Alphanumeric, Alphabet::Symbols];

    /// The ordered symbol table.
    pub fn chars(&self) -> &'static [char] {
        match self {
            Alphabet::Alphanumeric => &ALPHANUMERIC_CHARS,
            Alphabet::Symbols => &SYMBOL_CHARS,
        }
    }

    pub fn len(&self) -> usize {
        self.chars().len()
    }

    /// Always false; both tables are non-empty.
    pub fn is_empty(&self) -> bool {
        self.chars().is_empty()
    }

    pub fn contains(&self, c: char) -> bool {
        self.chars().contains(&c)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Alphabet::Alphanumeric => "alphanumeric",
            Alphabet::Symbols => "symbols",
        }
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Alphabet {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "alphanumeric" | "alnum" => Ok(Alphabet::Alphanumeric),
            "symbols" | "punctuation" => Ok(Alphabet::Symbols),
            other => Err(format!(
                "unknown alphabet '{}' (expected alphanumeric or symbols)",
                other
            )),
        }
    }
}

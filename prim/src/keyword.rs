//! Reserved spellings
//!
//! The lexer emits dedicated tokens for `lambda` and `if`, and the grammar
//! treats them as special forms in head position. The boolean
//! literals are resolved by the evaluator, which takes their spellings from
//! [`Keywords`] so a host can rename them.

use serde::{Deserialize, Serialize};

/// Reserved word
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    Lambda,
    If,
    True,
    False,
}

impl Keyword {
    /// Default spelling
    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::Lambda => "lambda",
            Keyword::If => "if",
            Keyword::True => "true",
            Keyword::False => "false",
        }
    }
}

impl std::fmt::Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Spellings of the two boolean literals seen by the evaluator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Keywords {
    pub true_lit: String,
    pub false_lit: String,
}

impl Keywords {
    /// Boolean denoted by `name`, if it is one of the literals
    pub fn boolean(&self, name: &str) -> Option<bool> {
        if name == self.true_lit {
            Some(true)
        } else if name == self.false_lit {
            Some(false)
        } else {
            None
        }
    }
}

impl Default for Keywords {
    fn default() -> Self {
        Keywords {
            true_lit: Keyword::True.as_str().to_string(),
            false_lit: Keyword::False.as_str().to_string(),
        }
    }
}

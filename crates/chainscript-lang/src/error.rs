use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A recoverable lexical diagnostic: an illegal character was skipped.
///
/// The scanner drops the character, records the diagnostic, and keeps going;
/// hosts decide how to surface it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexDiagnostic {
    pub character: char,
    pub line: u32,
}

impl fmt::Display for LexDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "illegal character {:?} at line {}", self.character, self.line)
    }
}

/// A fatal parse failure. No partial AST is produced.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum SyntaxError {
    #[error("syntax error at {found} (line {line})")]
    UnexpectedToken { found: String, line: u32 },

    #[error("unexpected end of input")]
    UnexpectedEof,

    #[error("duplicate attribute '{name}' in schema (line {line})")]
    DuplicateAttribute { name: String, line: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lex_diagnostic_display() {
        let diag = LexDiagnostic {
            character: '$',
            line: 3,
        };
        assert_eq!(diag.to_string(), "illegal character '$' at line 3");
    }

    #[test]
    fn syntax_error_display() {
        let err = SyntaxError::UnexpectedToken {
            found: "','".into(),
            line: 2,
        };
        assert_eq!(err.to_string(), "syntax error at ',' (line 2)");
        assert_eq!(SyntaxError::UnexpectedEof.to_string(), "unexpected end of input");
    }
}

//! The chainscript language pipeline.
//!
//! Turns DSL source text into an abstract syntax tree in two stages:
//!
//! - [`Scanner`] — a lazy, line-tracking token iterator with recoverable
//!   illegal-character diagnostics
//! - [`parse`] — a recursive-descent parser over the token stream, one token
//!   of lookahead, no backtracking
//!
//! The parser is pure over the token sequence: it performs no ledger lookups
//! and no type checking. All semantic checks live in `chainscript-exec`.
//!
//! [`parse_program`] is the front door for hosts: scan fully, keep the
//! lexical diagnostics, parse, and hand back both.

pub mod ast;
pub mod error;
pub mod parser;
pub mod scanner;
pub mod token;

pub use ast::{BlockDefinition, Operation, Program};
pub use error::{LexDiagnostic, SyntaxError};
pub use parser::parse;
pub use scanner::{scan, Scanner};
pub use token::{Token, TokenKind};

/// Scan and parse a whole program.
///
/// Lexical diagnostics are recoverable and returned beside the AST; a syntax
/// error aborts with no partial AST.
pub fn parse_program(source: &str) -> Result<(Program, Vec<LexDiagnostic>), SyntaxError> {
    let (tokens, diagnostics) = scan(source);
    let program = parse(&tokens)?;
    Ok((program, diagnostics))
}

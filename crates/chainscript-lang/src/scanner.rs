//! Lexical scanner: source text → lazy token sequence.
//!
//! The scanner is a finite, consume-once iterator. Newlines advance the line
//! counter and are discarded along with other whitespace; `//` comments run
//! to end of line; anything that matches no rule is an illegal character —
//! recorded as a [`LexDiagnostic`], skipped, never fatal.

use tracing::warn;

use crate::error::LexDiagnostic;
use crate::token::{Token, TokenKind};

/// A lazy token iterator over DSL source text.
pub struct Scanner {
    chars: Vec<char>,
    pos: usize,
    line: u32,
    diagnostics: Vec<LexDiagnostic>,
}

impl Scanner {
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
            line: 1,
            diagnostics: Vec::new(),
        }
    }

    /// The current 1-based line number. Monotonically non-decreasing.
    pub fn line(&self) -> u32 {
        self.line
    }

    /// Diagnostics recorded so far.
    pub fn diagnostics(&self) -> &[LexDiagnostic] {
        &self.diagnostics
    }

    /// Consume the scanner, keeping only its diagnostics.
    pub fn into_diagnostics(self) -> Vec<LexDiagnostic> {
        self.diagnostics
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    fn illegal(&mut self, character: char) {
        warn!(%character, line = self.line, "illegal character skipped");
        self.diagnostics.push(LexDiagnostic {
            character,
            line: self.line,
        });
    }

    fn scan_word(&mut self) -> TokenKind {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_alphanumeric() || c == '_') {
            self.pos += 1;
        }
        let word: String = self.chars[start..self.pos].iter().collect();
        TokenKind::from_word(&word)
    }

    /// A double-quoted run with no embedded quote or newline, quotes
    /// stripped, no escape processing. An unterminated string reports the
    /// opening quote as illegal and rescans from the character after it.
    fn scan_string(&mut self) -> Option<TokenKind> {
        let start = self.pos;
        self.pos += 1; // opening quote
        while let Some(c) = self.peek() {
            match c {
                '"' => {
                    let content: String = self.chars[start + 1..self.pos].iter().collect();
                    self.pos += 1;
                    return Some(TokenKind::Str(content));
                }
                '\n' => break,
                _ => self.pos += 1,
            }
        }
        self.illegal('"');
        self.pos = start + 1;
        None
    }

    /// `digits.digits`, `.digits`, or `digits`; float iff a point is present.
    fn scan_number(&mut self) -> TokenKind {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            self.pos += 1;
        }
        let mut is_float = false;
        if self.peek() == Some('.') && matches!(self.peek_at(1), Some(c) if c.is_ascii_digit()) {
            is_float = true;
            self.pos += 1;
            while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                self.pos += 1;
            }
        }
        let text: String = self.chars[start..self.pos].iter().collect();
        if is_float {
            TokenKind::Float(text.parse().unwrap_or(f64::INFINITY))
        } else {
            match text.parse() {
                Ok(i) => TokenKind::Int(i),
                // digit run too long for i64: keep the value as a float
                Err(_) => TokenKind::Float(text.parse().unwrap_or(f64::INFINITY)),
            }
        }
    }
}

impl Iterator for Scanner {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        loop {
            let c = self.peek()?;
            match c {
                '\n' => {
                    self.line += 1;
                    self.pos += 1;
                }
                ' ' | '\t' | '\r' => {
                    self.pos += 1;
                }
                '/' if self.peek_at(1) == Some('/') => {
                    while !matches!(self.peek(), None | Some('\n')) {
                        self.pos += 1;
                    }
                }
                ',' | '=' | ':' | '(' | ')' => {
                    let line = self.line;
                    self.pos += 1;
                    let kind = match c {
                        ',' => TokenKind::Comma,
                        '=' => TokenKind::Assign,
                        ':' => TokenKind::Colon,
                        '(' => TokenKind::LParen,
                        _ => TokenKind::RParen,
                    };
                    return Some(Token::new(kind, line));
                }
                '"' => {
                    let line = self.line;
                    if let Some(kind) = self.scan_string() {
                        return Some(Token::new(kind, line));
                    }
                }
                c if c.is_ascii_alphabetic() => {
                    let line = self.line;
                    let kind = self.scan_word();
                    return Some(Token::new(kind, line));
                }
                c if c.is_ascii_digit() => {
                    let line = self.line;
                    let kind = self.scan_number();
                    return Some(Token::new(kind, line));
                }
                '.' if matches!(self.peek_at(1), Some(c) if c.is_ascii_digit()) => {
                    let line = self.line;
                    let kind = self.scan_number();
                    return Some(Token::new(kind, line));
                }
                other => {
                    self.illegal(other);
                    self.pos += 1;
                }
            }
        }
    }
}

/// Scan a whole source text eagerly: tokens plus lexical diagnostics.
pub fn scan(source: &str) -> (Vec<Token>, Vec<LexDiagnostic>) {
    let mut scanner = Scanner::new(source);
    let tokens: Vec<Token> = scanner.by_ref().collect();
    (tokens, scanner.into_diagnostics())
}

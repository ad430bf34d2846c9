//! Recursive-descent parser: token sequence → [`Program`].
//!
//! The grammar is deterministic with one token of lookahead at every
//! decision point (the reserved word leading each operation disambiguates
//! every alternative), so there is no backtracking. Parsing is a pure
//! function of the token sequence.

use chainscript_types::{FieldValue, Schema, SchemaError, TypeTag};

use crate::ast::{BlockDefinition, Operation, Program};
use crate::error::SyntaxError;
use crate::token::{Token, TokenKind};

/// Parse a token sequence into a program.
///
/// ```text
/// program         = blockDefinition operation+
/// blockDefinition = "block" Identifier "=" "(" attribute ("," attribute)* ")"
/// attribute       = Identifier ":" typeKeyword
/// operation       = "add" Identifier "=" "(" fieldAssign ("," fieldAssign)* ")"
///                 | "print" Identifier | "view" Identifier | "run" Identifier
///                 | "mine" Identifier  | "export" Identifier
/// fieldAssign     = Identifier ":" (StringLiteral | NumberLiteral)
/// ```
pub fn parse(tokens: &[Token]) -> Result<Program, SyntaxError> {
    Parser { tokens, pos: 0 }.parse_program()
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn parse_program(&mut self) -> Result<Program, SyntaxError> {
        let definition = self.parse_block_definition()?;

        let mut operations = Vec::new();
        while self.peek().is_some() {
            operations.push(self.parse_operation()?);
        }
        if operations.is_empty() {
            // a definition with no operations is an incomplete program
            return Err(SyntaxError::UnexpectedEof);
        }

        Ok(Program {
            definition,
            operations,
        })
    }

    fn parse_block_definition(&mut self) -> Result<BlockDefinition, SyntaxError> {
        let line = self.expect(TokenKind::Block)?;
        let name = self.take_identifier()?;
        self.expect(TokenKind::Assign)?;
        self.expect(TokenKind::LParen)?;

        let mut attributes = vec![self.parse_attribute()?];
        while self.at(&TokenKind::Comma) {
            self.pos += 1;
            attributes.push(self.parse_attribute()?);
        }
        self.expect(TokenKind::RParen)?;

        let schema = Schema::new(attributes).map_err(|e| match e {
            SchemaError::DuplicateAttribute { name } => {
                SyntaxError::DuplicateAttribute { name, line }
            }
        })?;

        Ok(BlockDefinition { name, schema })
    }

    fn parse_attribute(&mut self) -> Result<(String, TypeTag), SyntaxError> {
        let name = self.take_identifier()?;
        self.expect(TokenKind::Colon)?;
        let tag = self.take_type()?;
        Ok((name, tag))
    }

    fn parse_operation(&mut self) -> Result<Operation, SyntaxError> {
        let kind = match self.peek() {
            Some(token) => token.kind.clone(),
            None => return Err(SyntaxError::UnexpectedEof),
        };
        match kind {
            TokenKind::Add => {
                self.pos += 1;
                let target = self.take_identifier()?;
                self.expect(TokenKind::Assign)?;
                self.expect(TokenKind::LParen)?;
                let mut fields = vec![self.parse_field_assign()?];
                while self.at(&TokenKind::Comma) {
                    self.pos += 1;
                    fields.push(self.parse_field_assign()?);
                }
                self.expect(TokenKind::RParen)?;
                Ok(Operation::Add { target, fields })
            }
            TokenKind::Print => {
                self.pos += 1;
                Ok(Operation::Print {
                    target: self.take_identifier()?,
                })
            }
            TokenKind::View => {
                self.pos += 1;
                Ok(Operation::View {
                    target: self.take_identifier()?,
                })
            }
            TokenKind::Run => {
                self.pos += 1;
                Ok(Operation::Run {
                    target: self.take_identifier()?,
                })
            }
            TokenKind::Mine => {
                self.pos += 1;
                Ok(Operation::Mine {
                    target: self.take_identifier()?,
                })
            }
            TokenKind::Export => {
                self.pos += 1;
                Ok(Operation::Export {
                    target: self.take_identifier()?,
                })
            }
            _ => Err(self.unexpected()),
        }
    }

    fn parse_field_assign(&mut self) -> Result<(String, FieldValue), SyntaxError> {
        let name = self.take_identifier()?;
        self.expect(TokenKind::Colon)?;
        let value = self.take_literal()?;
        Ok((name, value))
    }

    // ---- token-level helpers ----

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn at(&self, kind: &TokenKind) -> bool {
        matches!(self.peek(), Some(token) if token.kind == *kind)
    }

    /// Consume `kind` and return its line, or fail on whatever is there.
    fn expect(&mut self, kind: TokenKind) -> Result<u32, SyntaxError> {
        match self.peek() {
            Some(token) if token.kind == kind => {
                let line = token.line;
                self.pos += 1;
                Ok(line)
            }
            _ => Err(self.unexpected()),
        }
    }

    fn take_identifier(&mut self) -> Result<String, SyntaxError> {
        match self.peek() {
            Some(Token {
                kind: TokenKind::Identifier(name),
                ..
            }) => {
                let name = name.clone();
                self.pos += 1;
                Ok(name)
            }
            _ => Err(self.unexpected()),
        }
    }

    fn take_type(&mut self) -> Result<TypeTag, SyntaxError> {
        match self.peek() {
            Some(Token {
                kind: TokenKind::Type(tag),
                ..
            }) => {
                let tag = *tag;
                self.pos += 1;
                Ok(tag)
            }
            _ => Err(self.unexpected()),
        }
    }

    fn take_literal(&mut self) -> Result<FieldValue, SyntaxError> {
        let value = match self.peek() {
            Some(Token {
                kind: TokenKind::Str(s),
                ..
            }) => FieldValue::Str(s.clone()),
            Some(Token {
                kind: TokenKind::Int(i),
                ..
            }) => FieldValue::Int(*i),
            Some(Token {
                kind: TokenKind::Float(x),
                ..
            }) => FieldValue::Float(*x),
            _ => return Err(self.unexpected()),
        };
        self.pos += 1;
        Ok(value)
    }

    fn unexpected(&self) -> SyntaxError {
        match self.peek() {
            Some(token) => SyntaxError::UnexpectedToken {
                found: token.kind.describe(),
                line: token.line,
            },
            None => SyntaxError::UnexpectedEof,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::scan;

    fn parse_source(source: &str) -> Result<Program, SyntaxError> {
        let (tokens, _) = scan(source);
        parse(&tokens)
    }

    #[test]
    fn definition_plus_one_operation() {
        let program = parse_source("block Loans = (amount: float)\nmine Loans").unwrap();
        assert_eq!(program.definition.name, "Loans");
        assert_eq!(program.definition.schema.len(), 1);
        assert_eq!(
            program.operations,
            vec![Operation::Mine {
                target: "Loans".into()
            }]
        );
    }

    #[test]
    fn add_with_mixed_literals() {
        let program = parse_source(
            r#"block L = (a: str, b: int, c: float)
               add L = (a: "x", b: 2, c: 3.5)"#,
        )
        .unwrap();
        match &program.operations[0] {
            Operation::Add { target, fields } => {
                assert_eq!(target, "L");
                assert_eq!(
                    fields,
                    &vec![
                        ("a".to_string(), FieldValue::Str("x".into())),
                        ("b".to_string(), FieldValue::Int(2)),
                        ("c".to_string(), FieldValue::Float(3.5)),
                    ]
                );
            }
            other => panic!("expected add, got {other:?}"),
        }
    }

    #[test]
    fn every_operation_keyword_parses() {
        let program = parse_source(
            "block L = (a: int)\n\
             add L = (a: 1)\nprint L\nview L\nrun L\nmine L\nexport L",
        )
        .unwrap();
        let keywords: Vec<&str> = program.operations.iter().map(Operation::keyword).collect();
        assert_eq!(keywords, vec!["add", "print", "view", "run", "mine", "export"]);
    }

    #[test]
    fn zero_operations_is_a_syntax_error() {
        let err = parse_source("block Loans = (amount: float)").unwrap_err();
        assert_eq!(err, SyntaxError::UnexpectedEof);
    }

    #[test]
    fn eof_mid_construct() {
        assert_eq!(
            parse_source("block Loans = (amount:").unwrap_err(),
            SyntaxError::UnexpectedEof
        );
        assert_eq!(
            parse_source("block Loans = (amount: float) add Loans").unwrap_err(),
            SyntaxError::UnexpectedEof
        );
    }

    #[test]
    fn unexpected_token_names_the_token_and_line() {
        let err = parse_source("block Loans = (amount float)\nmine Loans").unwrap_err();
        assert_eq!(
            err,
            SyntaxError::UnexpectedToken {
                found: "'float'".into(),
                line: 1
            }
        );
    }

    #[test]
    fn operation_must_start_with_a_keyword() {
        let err = parse_source("block L = (a: int)\nLoans mine").unwrap_err();
        assert_eq!(
            err,
            SyntaxError::UnexpectedToken {
                found: "'Loans'".into(),
                line: 2
            }
        );
    }

    #[test]
    fn trailing_tokens_after_operations_fail() {
        let err = parse_source("block L = (a: int)\nmine L )").unwrap_err();
        assert_eq!(
            err,
            SyntaxError::UnexpectedToken {
                found: "')'".into(),
                line: 2
            }
        );
    }

    #[test]
    fn reserved_words_cannot_name_ledgers_or_fields() {
        // "block block = ..." — the second 'block' is reserved
        let err = parse_source("block block = (a: int)\nmine block").unwrap_err();
        assert!(matches!(err, SyntaxError::UnexpectedToken { found, .. } if found == "'block'"));

        // "str" as a field name is reserved too
        let err = parse_source("block L = (a: int)\nadd L = (str: 1)").unwrap_err();
        assert!(matches!(err, SyntaxError::UnexpectedToken { found, .. } if found == "'str'"));
    }

    #[test]
    fn schema_value_positions_reject_literals() {
        let err = parse_source("block L = (a: 5)\nmine L").unwrap_err();
        assert_eq!(
            err,
            SyntaxError::UnexpectedToken {
                found: "5".into(),
                line: 1
            }
        );
    }

    #[test]
    fn field_values_must_be_literals() {
        let err = parse_source("block L = (a: int)\nadd L = (a: b)").unwrap_err();
        assert!(matches!(err, SyntaxError::UnexpectedToken { found, .. } if found == "'b'"));
    }

    #[test]
    fn duplicate_schema_attribute_is_reported_at_the_definition() {
        let err = parse_source("block L = (a: int, a: str)\nmine L").unwrap_err();
        assert_eq!(
            err,
            SyntaxError::DuplicateAttribute {
                name: "a".into(),
                line: 1
            }
        );
    }

    #[test]
    fn empty_program_fails() {
        assert_eq!(parse_source("").unwrap_err(), SyntaxError::UnexpectedEof);
    }
}

use chainscript_types::TypeTag;

/// A scanned token: its kind and the 1-based source line it started on.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub line: u32,
}

impl Token {
    pub fn new(kind: TokenKind, line: u32) -> Self {
        Self { kind, line }
    }
}

/// Every kind of token the scanner can produce.
///
/// An identifier that exactly matches a reserved word is always classified
/// as that reserved word; the grammar has no escape for this.
#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    // Operation and structural keywords.
    Block,
    Add,
    Print,
    View,
    Run,
    Mine,
    Export,
    // The seven type keywords, carried as their tag.
    Type(TypeTag),
    // Literals and names.
    Identifier(String),
    Str(String),
    Int(i64),
    Float(f64),
    // Punctuation.
    Comma,
    Assign,
    Colon,
    LParen,
    RParen,
}

impl TokenKind {
    /// Classify a scanned word: reserved keyword or identifier.
    pub fn from_word(word: &str) -> Self {
        match word {
            "block" => TokenKind::Block,
            "add" => TokenKind::Add,
            "print" => TokenKind::Print,
            "view" => TokenKind::View,
            "run" => TokenKind::Run,
            "mine" => TokenKind::Mine,
            "export" => TokenKind::Export,
            _ => match TypeTag::from_keyword(word) {
                Some(tag) => TokenKind::Type(tag),
                None => TokenKind::Identifier(word.to_string()),
            },
        }
    }

    /// Human-readable description for syntax errors, quoted the way the
    /// token appeared in source.
    pub fn describe(&self) -> String {
        match self {
            TokenKind::Block => "'block'".into(),
            TokenKind::Add => "'add'".into(),
            TokenKind::Print => "'print'".into(),
            TokenKind::View => "'view'".into(),
            TokenKind::Run => "'run'".into(),
            TokenKind::Mine => "'mine'".into(),
            TokenKind::Export => "'export'".into(),
            TokenKind::Type(tag) => format!("'{}'", tag.keyword()),
            TokenKind::Identifier(name) => format!("'{name}'"),
            TokenKind::Str(s) => format!("\"{s}\""),
            TokenKind::Int(i) => i.to_string(),
            TokenKind::Float(x) => format!("{x:?}"),
            TokenKind::Comma => "','".into(),
            TokenKind::Assign => "'='".into(),
            TokenKind::Colon => "':'".into(),
            TokenKind::LParen => "'('".into(),
            TokenKind::RParen => "')'".into(),
        }
    }
}

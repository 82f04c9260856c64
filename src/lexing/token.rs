use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    Data,
    VariableBegin,
    VariableEnd,
    BlockBegin,
    BlockEnd,
    Name,
    String,
    Integer,
    Comma,
    Assign,
    Colon,
    LeftParen,
    RightParen,
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let description = match self {
            TokenKind::Data => "template data",
            TokenKind::VariableBegin => "begin of print statement",
            TokenKind::VariableEnd => "end of print statement",
            TokenKind::BlockBegin => "begin of statement block",
            TokenKind::BlockEnd => "end of statement block",
            TokenKind::Name => "name",
            TokenKind::String => "string",
            TokenKind::Integer => "integer",
            TokenKind::Comma => "','",
            TokenKind::Assign => "'='",
            TokenKind::Colon => "':'",
            TokenKind::LeftParen => "'('",
            TokenKind::RightParen => "')'",
            TokenKind::Eof => "end of template",
        };
        f.write_str(description)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub line: usize,
}

impl Token {
    pub fn new(kind: TokenKind, value: &str, line: usize) -> Token {
        Token {
            kind,
            value: value.to_string(),
            line,
        }
    }

    pub fn test(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    /// Whether this is a name token spelling the given word, the usual way
    /// of recognizing keywords like `endtrans`.
    pub fn test_name(&self, name: &str) -> bool {
        self.kind == TokenKind::Name && self.value == name
    }

    /// Human readable description for error messages.
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Name => format!("'{}'", self.value),
            TokenKind::String => format!("string '{}'", self.value),
            TokenKind::Integer => format!("integer {}", self.value),
            kind => kind.to_string(),
        }
    }
}

//! Lexer for template source text

use tracing::debug;

use super::{Token, TokenKind};
use crate::parsing::ParsingError;
use crate::compile;

/// The delimiters marking statements, print expressions, and comments
/// within template text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Syntax {
    pub block_start: String,
    pub block_end: String,
    pub variable_start: String,
    pub variable_end: String,
    pub comment_start: String,
    pub comment_end: String,
}

impl Default for Syntax {
    fn default() -> Self {
        Syntax {
            block_start: "{%".to_string(),
            block_end: "%}".to_string(),
            variable_start: "{{".to_string(),
            variable_end: "}}".to_string(),
            comment_start: "{#".to_string(),
            comment_end: "#}".to_string(),
        }
    }
}

impl Syntax {
    /// Name of the first delimiter that is empty, if any. An empty
    /// delimiter would match everywhere.
    pub fn empty_delimiter(&self) -> Option<&'static str> {
        [
            ("block_start", &self.block_start),
            ("block_end", &self.block_end),
            ("variable_start", &self.variable_start),
            ("variable_end", &self.variable_end),
            ("comment_start", &self.comment_start),
            ("comment_end", &self.comment_end),
        ]
        .into_iter()
        .find(|(_, delimiter)| delimiter.is_empty())
        .map(|(name, _)| name)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Opener {
    Block,
    Variable,
    Comment,
    LineStatement,
}

pub struct Lexer<'e> {
    syntax: &'e Syntax,
    trim_blocks: bool,
    line_statement_prefix: Option<&'e str>,
}

struct Scanner<'s> {
    rest: &'s str,
    line: usize,
    at_line_start: bool,
    tokens: Vec<Token>,
}

impl<'s> Scanner<'s> {
    fn new(source: &'s str) -> Scanner<'s> {
        Scanner {
            rest: source,
            line: 1,
            at_line_start: true,
            tokens: Vec::new(),
        }
    }

    fn push(&mut self, kind: TokenKind, value: &str) {
        self.tokens
            .push(Token::new(kind, value, self.line));
    }

    fn advance(&mut self, width: usize) {
        let (taken, rest) = self
            .rest
            .split_at(width);
        self.line += taken
            .bytes()
            .filter(|&b| b == b'\n')
            .count();
        if !taken.is_empty() {
            self.at_line_start = taken.ends_with('\n');
        }
        self.rest = rest;
    }
}

impl<'e> Lexer<'e> {
    pub fn new(syntax: &'e Syntax) -> Lexer<'e> {
        Lexer {
            syntax,
            trim_blocks: false,
            line_statement_prefix: None,
        }
    }

    /// Drop the first newline after a block tag.
    pub fn with_trim_blocks(mut self, trim_blocks: bool) -> Lexer<'e> {
        self.trim_blocks = trim_blocks;
        self
    }

    /// Treat lines starting with the prefix as block statements.
    pub fn with_line_statement_prefix(mut self, prefix: Option<&'e str>) -> Lexer<'e> {
        self.line_statement_prefix = prefix.filter(|prefix| !prefix.is_empty());
        self
    }

    pub fn tokenize(&self, source: &str) -> Result<Vec<Token>, ParsingError> {
        let mut scanner = Scanner::new(source);

        while !scanner
            .rest
            .is_empty()
        {
            let rest = scanner.rest;
            match self.find_opener(rest, scanner.at_line_start) {
                None => {
                    scanner.push(TokenKind::Data, rest);
                    scanner.advance(rest.len());
                }
                Some((i, opener)) => {
                    if i > 0 {
                        scanner.push(TokenKind::Data, &rest[..i]);
                        scanner.advance(i);
                    }
                    match opener {
                        Opener::Comment => self.skip_comment(&mut scanner)?,
                        Opener::Variable => {
                            scanner.push(TokenKind::VariableBegin, "");
                            scanner.advance(
                                self.syntax
                                    .variable_start
                                    .len(),
                            );
                            self.lex_tag(
                                &mut scanner,
                                &self
                                    .syntax
                                    .variable_end,
                                TokenKind::VariableEnd,
                            )?;
                        }
                        Opener::Block => {
                            scanner.push(TokenKind::BlockBegin, "");
                            scanner.advance(
                                self.syntax
                                    .block_start
                                    .len(),
                            );
                            self.lex_tag(
                                &mut scanner,
                                &self
                                    .syntax
                                    .block_end,
                                TokenKind::BlockEnd,
                            )?;
                            if self.trim_blocks
                                && scanner
                                    .rest
                                    .starts_with('\n')
                            {
                                scanner.advance(1);
                            }
                        }
                        Opener::LineStatement => self.lex_line_statement(&mut scanner)?,
                    }
                }
            }
        }

        scanner.push(TokenKind::Eof, "");
        debug!("Lexed {} tokens", scanner.tokens.len());

        Ok(scanner.tokens)
    }

    fn find_opener(&self, rest: &str, at_line_start: bool) -> Option<(usize, Opener)> {
        // empty openers are never matched, otherwise nothing would advance
        let find = |opener: &str| {
            if opener.is_empty() {
                None
            } else {
                rest.find(opener)
            }
        };

        let mut candidates = vec![
            find(self.syntax.block_start.as_str()).map(|i| (i, Opener::Block)),
            find(self.syntax.variable_start.as_str()).map(|i| (i, Opener::Variable)),
            find(self.syntax.comment_start.as_str()).map(|i| (i, Opener::Comment)),
        ];

        if let Some(prefix) = self.line_statement_prefix {
            candidates.push(
                find_line_statement(rest, at_line_start, prefix)
                    .map(|i| (i, Opener::LineStatement)),
            );
        }

        candidates
            .into_iter()
            .flatten()
            .min_by_key(|(i, _)| *i)
    }

    fn skip_comment(&self, scanner: &mut Scanner) -> Result<(), ParsingError> {
        let opened = scanner.line;
        scanner.advance(
            self.syntax
                .comment_start
                .len(),
        );

        let end = &self
            .syntax
            .comment_end;
        match scanner
            .rest
            .find(end.as_str())
        {
            Some(i) => {
                scanner.advance(i + end.len());
                Ok(())
            }
            None => Err(ParsingError::UnclosedComment(opened)),
        }
    }

    fn lex_tag(
        &self,
        scanner: &mut Scanner,
        end: &str,
        closing: TokenKind,
    ) -> Result<(), ParsingError> {
        let opened = scanner.line;

        loop {
            let trimmed = scanner
                .rest
                .trim_start();
            scanner.advance(scanner.rest.len() - trimmed.len());

            if scanner
                .rest
                .is_empty()
            {
                return Err(ParsingError::UnclosedTag(opened, closing));
            }
            if scanner
                .rest
                .starts_with(end)
            {
                scanner.push(closing, "");
                scanner.advance(end.len());
                return Ok(());
            }

            lex_operand(scanner)?;
        }
    }

    fn lex_line_statement(&self, scanner: &mut Scanner) -> Result<(), ParsingError> {
        let indent = scanner.rest.len()
            - scanner
                .rest
                .trim_start_matches([' ', '\t'])
                .len();
        let width = self
            .line_statement_prefix
            .map(str::len)
            .unwrap_or(0);

        scanner.push(TokenKind::BlockBegin, "");
        scanner.advance(indent + width);

        loop {
            let trimmed = scanner
                .rest
                .trim_start_matches([' ', '\t', '\r']);
            scanner.advance(scanner.rest.len() - trimmed.len());

            if scanner
                .rest
                .is_empty()
                || scanner
                    .rest
                    .starts_with('\n')
            {
                scanner.push(TokenKind::BlockEnd, "");
                if !scanner
                    .rest
                    .is_empty()
                {
                    scanner.advance(1);
                }
                return Ok(());
            }

            lex_operand(scanner)?;
        }
    }
}

// a line statement is only recognized at the start of a line, ignoring
// leading blanks.
fn find_line_statement(rest: &str, at_line_start: bool, prefix: &str) -> Option<usize> {
    let mut start = if at_line_start {
        Some(0)
    } else {
        rest.find('\n')
            .map(|i| i + 1)
    };

    while let Some(i) = start {
        let line = &rest[i..];
        if line
            .trim_start_matches([' ', '\t'])
            .starts_with(prefix)
        {
            return Some(i);
        }
        start = line
            .find('\n')
            .map(|j| i + j + 1);
    }

    None
}

fn lex_operand(scanner: &mut Scanner) -> Result<(), ParsingError> {
    let rest = scanner.rest;

    if let Some(m) = compile!(r"^[A-Za-z_][A-Za-z0-9_]*").find(rest) {
        scanner.push(TokenKind::Name, m.as_str());
        scanner.advance(m.end());
        return Ok(());
    }

    if let Some(m) = compile!(r"^[0-9]+").find(rest) {
        scanner.push(TokenKind::Integer, m.as_str());
        scanner.advance(m.end());
        return Ok(());
    }

    if let Some(m) = compile!(r#"^(?s:"(?:[^"\\]|\\.)*"|'(?:[^'\\]|\\.)*')"#).find(rest) {
        let quoted = m.as_str();
        let value = unescape(&quoted[1..quoted.len() - 1]);
        scanner.push(TokenKind::String, &value);
        scanner.advance(m.end());
        return Ok(());
    }

    let c = match rest
        .chars()
        .next()
    {
        Some(c) => c,
        None => return Err(ParsingError::IllegalParserState(scanner.line)),
    };

    let kind = match c {
        '"' | '\'' => return Err(ParsingError::UnterminatedString(scanner.line)),
        ',' => TokenKind::Comma,
        '=' => TokenKind::Assign,
        ':' => TokenKind::Colon,
        '(' => TokenKind::LeftParen,
        ')' => TokenKind::RightParen,
        _ => return Err(ParsingError::InvalidCharacter(scanner.line, c)),
    };

    scanner.push(kind, &rest[..c.len_utf8()]);
    scanner.advance(c.len_utf8());
    Ok(())
}

fn unescape(content: &str) -> String {
    let mut result = String::with_capacity(content.len());
    let mut chars = content.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => result.push('\n'),
            Some('t') => result.push('\t'),
            Some('r') => result.push('\r'),
            Some(other) => result.push(other),
            None => result.push('\\'),
        }
    }

    result
}

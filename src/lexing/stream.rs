use super::{Token, TokenKind};
use crate::parsing::ParsingError;

/// A cursor over lexed tokens. There is always a current token; once the
/// end is reached the final `Eof` token stays current forever.
#[derive(Debug)]
pub struct TokenStream {
    tokens: Vec<Token>,
    position: usize,
}

impl TokenStream {
    pub fn new(mut tokens: Vec<Token>) -> TokenStream {
        let terminated = tokens
            .last()
            .map(|token| token.test(TokenKind::Eof))
            .unwrap_or(false);

        if !terminated {
            let line = tokens
                .last()
                .map(|token| token.line)
                .unwrap_or(1);
            tokens.push(Token::new(TokenKind::Eof, "", line));
        }

        TokenStream {
            tokens,
            position: 0,
        }
    }

    pub fn current(&self) -> &Token {
        &self.tokens[self.position]
    }

    /// The token after the current one, without consuming anything.
    pub fn look(&self) -> &Token {
        let i = (self.position + 1).min(self.tokens.len() - 1);
        &self.tokens[i]
    }

    /// Advance, returning the token that was current before advancing.
    pub fn next(&mut self) -> Token {
        let token = self
            .current()
            .clone();
        if self.position + 1 < self.tokens.len() {
            self.position += 1;
        }
        token
    }

    pub fn test(&self, kind: TokenKind) -> bool {
        self.current()
            .test(kind)
    }

    pub fn test_name(&self, name: &str) -> bool {
        self.current()
            .test_name(name)
    }

    /// Consume the current token if it is of the given kind.
    pub fn skip_if(&mut self, kind: TokenKind) -> bool {
        if self.test(kind) {
            self.next();
            true
        } else {
            false
        }
    }

    /// Consume and return the current token, which must be of the given
    /// kind.
    pub fn expect(&mut self, kind: TokenKind) -> Result<Token, ParsingError> {
        let current = self.current();
        if current.test(kind) {
            Ok(self.next())
        } else if current.test(TokenKind::Eof) {
            Err(ParsingError::UnexpectedEndOfInput(current.line, kind))
        } else {
            Err(ParsingError::Expected(current.line, kind, current.describe()))
        }
    }

    pub fn is_eof(&self) -> bool {
        self.test(TokenKind::Eof)
    }
}

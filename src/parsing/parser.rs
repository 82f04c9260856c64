use crate::environment::Environment;
use crate::language::*;
use crate::lexing::{TokenKind, TokenStream};

/// Whether an error is a failure to match the grammar, or input that is
/// well formed but breaks a rule of the language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Syntax,
    Assertion,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsingError {
    IllegalParserState(usize),
    Expected(usize, TokenKind, String),
    UnexpectedEndOfInput(usize, TokenKind),
    UnclosedTag(usize, TokenKind),
    UnclosedComment(usize),
    UnterminatedString(usize),
    InvalidCharacter(usize, char),
    InvalidExpression(usize, String),
    UnknownTag(usize, String),
    UnclosedTranslation(usize),
    DuplicateVariable(usize, String),
    MultiplePluralize(usize),
    ControlStructure(usize, String),
    PluralizeWithoutVariables(usize),
}

impl ParsingError {
    pub fn line(&self) -> usize {
        match self {
            ParsingError::IllegalParserState(line) => *line,
            ParsingError::Expected(line, _, _) => *line,
            ParsingError::UnexpectedEndOfInput(line, _) => *line,
            ParsingError::UnclosedTag(line, _) => *line,
            ParsingError::UnclosedComment(line) => *line,
            ParsingError::UnterminatedString(line) => *line,
            ParsingError::InvalidCharacter(line, _) => *line,
            ParsingError::InvalidExpression(line, _) => *line,
            ParsingError::UnknownTag(line, _) => *line,
            ParsingError::UnclosedTranslation(line) => *line,
            ParsingError::DuplicateVariable(line, _) => *line,
            ParsingError::MultiplePluralize(line) => *line,
            ParsingError::ControlStructure(line, _) => *line,
            ParsingError::PluralizeWithoutVariables(line) => *line,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ParsingError::DuplicateVariable(_, _)
            | ParsingError::MultiplePluralize(_)
            | ParsingError::ControlStructure(_, _)
            | ParsingError::PluralizeWithoutVariables(_) => ErrorKind::Assertion,
            _ => ErrorKind::Syntax,
        }
    }

    pub fn message(&self) -> String {
        match self {
            ParsingError::IllegalParserState(_) => "illegal parser state".to_string(),
            ParsingError::Expected(_, kind, found) => {
                format!("expected {}, got {}", kind, found)
            }
            ParsingError::UnexpectedEndOfInput(_, kind) => {
                format!("unexpected end of template, expected {}", kind)
            }
            ParsingError::UnclosedTag(_, kind) => format!("missing {}", kind),
            ParsingError::UnclosedComment(_) => "missing end of comment tag".to_string(),
            ParsingError::UnterminatedString(_) => "unterminated string".to_string(),
            ParsingError::InvalidCharacter(_, c) => format!("unexpected character '{}'", c),
            ParsingError::InvalidExpression(_, found) => format!("unexpected {}", found),
            ParsingError::UnknownTag(_, name) => format!("encountered unknown tag '{}'", name),
            ParsingError::UnclosedTranslation(_) => {
                "unexpected end of template, translatable section was never closed".to_string()
            }
            ParsingError::DuplicateVariable(_, name) => {
                format!("translatable variable '{}' defined twice", name)
            }
            ParsingError::MultiplePluralize(_) => {
                "a translatable section can have only one pluralize section".to_string()
            }
            ParsingError::ControlStructure(_, _) => {
                "control structures in translatable sections are not allowed".to_string()
            }
            ParsingError::PluralizeWithoutVariables(_) => {
                "pluralize without variables".to_string()
            }
        }
    }
}

/// Parser over the token stream of one template. Extensions are handed
/// the parser when one of their tags is encountered and must leave the
/// stream positioned after the end of their statement.
pub struct Parser<'e> {
    pub stream: TokenStream,
    environment: &'e Environment,
}

impl<'e> Parser<'e> {
    pub fn new(environment: &'e Environment, stream: TokenStream) -> Parser<'e> {
        Parser {
            stream,
            environment,
        }
    }

    pub fn parse(&mut self) -> Result<Node, ParsingError> {
        let mut body = Vec::new();

        while !self
            .stream
            .is_eof()
        {
            let token = self
                .stream
                .current();
            let line = token.line;

            match token.kind {
                TokenKind::Data => {
                    let token = self
                        .stream
                        .next();
                    body.push(Node::Output {
                        nodes: vec![Node::TemplateData {
                            data: token.value,
                            line,
                        }],
                        line,
                    });
                }
                TokenKind::VariableBegin => {
                    self.stream
                        .next();
                    let expression = self.parse_expression()?;
                    self.stream
                        .expect(TokenKind::VariableEnd)?;
                    body.push(Node::Output {
                        nodes: vec![expression],
                        line,
                    });
                }
                TokenKind::BlockBegin => {
                    self.stream
                        .next();
                    let statement = self.parse_statement()?;
                    body.push(statement);
                }
                _ => return Err(ParsingError::IllegalParserState(line)),
            }
        }

        Ok(Node::Template { body })
    }

    fn parse_statement(&mut self) -> Result<Node, ParsingError> {
        let token = self
            .stream
            .current();

        if !token.test(TokenKind::Name) {
            return Err(ParsingError::Expected(
                token.line,
                TokenKind::Name,
                token.describe(),
            ));
        }

        let environment = self.environment;
        match environment.extension_for(&token.value) {
            Some(extension) => extension.parse(self),
            None => Err(ParsingError::UnknownTag(
                token.line,
                token
                    .value
                    .clone(),
            )),
        }
    }

    /// Consume the end of the current statement.
    pub fn end_statement(&mut self) -> Result<(), ParsingError> {
        self.stream
            .expect(TokenKind::BlockEnd)?;
        Ok(())
    }

    pub fn parse_expression(&mut self) -> Result<Node, ParsingError> {
        let mut node = self.parse_primary()?;

        while self
            .stream
            .test(TokenKind::LeftParen)
        {
            node = self.parse_call(node)?;
        }

        Ok(node)
    }

    fn parse_primary(&mut self) -> Result<Node, ParsingError> {
        let token = self
            .stream
            .next();
        let line = token.line;

        match token.kind {
            TokenKind::Name => {
                let value = match token
                    .value
                    .as_str()
                {
                    "true" | "True" => Constant::Boolean(true),
                    "false" | "False" => Constant::Boolean(false),
                    "none" | "None" => Constant::None,
                    name => return Ok(Node::name(name, line)),
                };
                Ok(Node::Const { value, line })
            }
            TokenKind::String => {
                // adjacent string literals are joined
                let mut value = token.value;
                while self
                    .stream
                    .test(TokenKind::String)
                {
                    value.push_str(
                        &self
                            .stream
                            .next()
                            .value,
                    );
                }
                Ok(Node::Const {
                    value: Constant::String(value),
                    line,
                })
            }
            TokenKind::Integer => {
                let value = token
                    .value
                    .parse::<i64>()
                    .map_err(|_| ParsingError::InvalidExpression(line, token.describe()))?;
                Ok(Node::Const {
                    value: Constant::Integer(value),
                    line,
                })
            }
            TokenKind::LeftParen => {
                let node = self.parse_expression()?;
                self.stream
                    .expect(TokenKind::RightParen)?;
                Ok(node)
            }
            TokenKind::Eof => Err(ParsingError::UnexpectedEndOfInput(line, TokenKind::Name)),
            _ => Err(ParsingError::InvalidExpression(line, token.describe())),
        }
    }

    fn parse_call(&mut self, node: Node) -> Result<Node, ParsingError> {
        let line = self
            .stream
            .expect(TokenKind::LeftParen)?
            .line;

        let mut args = Vec::new();
        let mut kwargs = Vec::new();

        while !self
            .stream
            .test(TokenKind::RightParen)
        {
            if !args.is_empty() || !kwargs.is_empty() {
                self.stream
                    .expect(TokenKind::Comma)?;
                // trailing comma
                if self
                    .stream
                    .test(TokenKind::RightParen)
                {
                    break;
                }
            }

            if self
                .stream
                .test(TokenKind::Name)
                && self
                    .stream
                    .look()
                    .test(TokenKind::Assign)
            {
                let key = self
                    .stream
                    .next();
                self.stream
                    .next();
                let value = self.parse_expression()?;
                kwargs.push(Node::Keyword {
                    key: key.value,
                    value: Box::new(value),
                    line: key.line,
                });
            } else if !kwargs.is_empty() {
                let token = self
                    .stream
                    .current();
                return Err(ParsingError::InvalidExpression(
                    token.line,
                    "positional argument after keyword argument".to_string(),
                ));
            } else {
                args.push(self.parse_expression()?);
            }
        }

        self.stream
            .expect(TokenKind::RightParen)?;

        Ok(Node::Call {
            node: Box::new(node),
            args,
            kwargs,
            dyn_args: None,
            dyn_kwargs: None,
            line,
        })
    }
}

#[cfg(test)]
#[path = "checks/parser.rs"]
mod check;

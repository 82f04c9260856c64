//! Configuration shared by every template parsed or rendered: delimiters,
//! whitespace handling, registered extensions, and global functions.

use tracing::debug;

use crate::error::TemplateError;
use crate::i18n::TransExtension;
use crate::language::Node;
use crate::lexing::{Lexer, Syntax, Token};
use crate::parsing::{self, Parser, ParsingError};
use crate::runtime::{self, Context, Globals, RenderError};

/// A pluggable statement. The parser hands over control when it meets one
/// of the extension's tags, positioned at the tag name.
pub trait Extension {
    /// Name used to request this extension in configuration.
    fn name(&self) -> &'static str;

    /// Tag keywords this extension parses.
    fn tags(&self) -> &'static [&'static str];

    /// Install any functions templates using this extension rely on.
    fn update_globals(&self, _globals: &mut Globals) {}

    fn parse(&self, parser: &mut Parser<'_>) -> Result<Node, ParsingError>;
}

/// Look up an extension by the name it is configured with.
pub fn load_extension(name: &str) -> Option<Box<dyn Extension>> {
    match name {
        "trans" | "i18n" => Some(Box::new(TransExtension)),
        _ => None,
    }
}

pub struct Environment {
    pub syntax: Syntax,
    pub trim_blocks: bool,
    pub line_statement_prefix: Option<String>,
    extensions: Vec<Box<dyn Extension>>,
    globals: Globals,
}

impl Default for Environment {
    fn default() -> Self {
        Environment::new()
    }
}

impl Environment {
    pub fn new() -> Environment {
        Environment {
            syntax: Syntax::default(),
            trim_blocks: false,
            line_statement_prefix: None,
            extensions: Vec::new(),
            globals: Globals::new(),
        }
    }

    pub fn with_syntax(mut self, syntax: Syntax) -> Environment {
        self.syntax = syntax;
        self
    }

    pub fn with_trim_blocks(mut self, trim_blocks: bool) -> Environment {
        self.trim_blocks = trim_blocks;
        self
    }

    pub fn with_line_statement_prefix(mut self, prefix: Option<&str>) -> Environment {
        self.line_statement_prefix = prefix
            .filter(|prefix| !prefix.is_empty())
            .map(str::to_string);
        self
    }

    pub fn with_extension(mut self, extension: Box<dyn Extension>) -> Environment {
        self.add_extension(extension);
        self
    }

    /// Register an extension, replacing any already registered under the
    /// same name.
    pub fn add_extension(&mut self, extension: Box<dyn Extension>) {
        debug!("Adding extension '{}'", extension.name());

        extension.update_globals(&mut self.globals);
        self.extensions
            .retain(|existing| existing.name() != extension.name());
        self.extensions
            .push(extension);
    }

    pub fn extension_for(&self, tag: &str) -> Option<&dyn Extension> {
        self.extensions
            .iter()
            .find(|extension| {
                extension
                    .tags()
                    .iter()
                    .any(|candidate| *candidate == tag)
            })
            .map(|extension| extension.as_ref())
    }

    pub fn extension_names(&self) -> Vec<&'static str> {
        self.extensions
            .iter()
            .map(|extension| extension.name())
            .collect()
    }

    pub fn globals(&self) -> &Globals {
        &self.globals
    }

    pub fn tokenize(&self, source: &str) -> Result<Vec<Token>, ParsingError> {
        Lexer::new(&self.syntax)
            .with_trim_blocks(self.trim_blocks)
            .with_line_statement_prefix(
                self.line_statement_prefix
                    .as_deref(),
            )
            .tokenize(source)
    }

    /// Parse template source. Errors are reported against the given
    /// filename, or `<template>` if there isn't one.
    pub fn parse(&self, source: &str, filename: Option<&str>) -> Result<Node, TemplateError> {
        parsing::parse(self, source, filename)
            .map_err(|error| TemplateError::from_parsing(&error, filename, source))
    }

    pub fn render(&self, template: &Node, context: &Context) -> Result<String, RenderError> {
        runtime::render(template, context, &self.globals)
    }
}

#[cfg(test)]
mod check {
    use super::*;

    #[test]
    fn registering_extensions() {
        let mut environment = Environment::new();
        assert!(environment
            .extension_for("trans")
            .is_none());
        assert!(environment
            .globals()
            .is_empty());

        environment.add_extension(Box::new(TransExtension));
        environment.add_extension(Box::new(TransExtension));

        assert_eq!(environment.extension_names(), vec!["trans"]);
        assert!(environment
            .extension_for("trans")
            .is_some());
        assert!(environment
            .extension_for("endtrans")
            .is_none());

        let globals = environment.globals();
        assert!(globals.contains_key("_"));
        assert!(globals.contains_key("gettext"));
        assert!(globals.contains_key("ngettext"));
    }

    #[test]
    fn loading_by_name() {
        assert!(load_extension("trans").is_some());
        assert!(load_extension("i18n").is_some());
        assert!(load_extension("jinja2.ext.do").is_none());
    }

    #[test]
    fn unknown_tags() {
        let environment = Environment::new();
        let result = parsing::parse(&environment, "{% trans %}x{% endtrans %}", None);
        assert_eq!(
            result,
            Err(ParsingError::UnknownTag(1, "trans".to_string()))
        );
    }
}

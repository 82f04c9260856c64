use std::fmt;

use owo_colors::OwoColorize;

use crate::parsing::{ErrorKind, ParsingError};
use crate::problem::generate_error_message;

/// A parsing failure located within a named template, carrying enough of
/// the source to show the offending line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateError {
    pub problem: String,
    pub details: String,
    pub filename: String,
    pub line: usize,
    pub code: String,
    pub kind: ErrorKind,
}

impl TemplateError {
    pub fn from_parsing(error: &ParsingError, filename: Option<&str>, source: &str) -> TemplateError {
        let (problem, details) = generate_error_message(error);
        let line = error.line();

        let code = source
            .lines()
            .nth(line.saturating_sub(1))
            .unwrap_or("")
            .to_string();

        TemplateError {
            problem,
            details,
            filename: filename
                .unwrap_or("<template>")
                .to_string(),
            line,
            code,
            kind: error.kind(),
        }
    }
}

// Verbose detailed explanation
impl TemplateError {
    pub fn full_details(&self) -> String {
        let width = 3.max(
            self.line
                .to_string()
                .len(),
        );

        let label = match self.kind {
            ErrorKind::Syntax => "error",
            ErrorKind::Assertion => "assertion",
        };

        format!(
            r#"
{}: {}
{}:{}

{:width$} {}
{:width$} {} {}
{:width$} {}

{}
            "#,
            label.bright_red(),
            self.problem
                .bold(),
            self.filename,
            self.line,
            ' ',
            '|'.bright_blue(),
            self.line
                .bright_blue(),
            '|'.bright_blue(),
            self.code,
            ' ',
            '|'.bright_blue(),
            self.details
        )
        .trim_ascii()
        .to_string()
    }
}

// Concise version for internal use
impl fmt::Display for TemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error: {}:{} {}", self.filename, self.line, self.problem)
    }
}

//! Message extraction for catalog building tools

use std::collections::HashMap;
use std::fmt;
use std::io::Read;

use serde::de::value::MapDeserializer;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, info};

use super::extract::{extract_from_ast, Message};
use super::trans::TransExtension;
use crate::environment::{load_extension, Environment};
use crate::error::TemplateError;
use crate::language::Node;
use crate::lexing::Syntax;

#[derive(Debug)]
pub enum ExtractError {
    Unreadable(std::io::ErrorKind),
    InvalidOptions(String),
    UnknownEncoding(String),
    Undecodable(String),
    UnknownExtension(String),
    Template(TemplateError),
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractError::Unreadable(kind) => write!(f, "failed reading template: {}", kind),
            ExtractError::InvalidOptions(details) => write!(f, "invalid options: {}", details),
            ExtractError::UnknownEncoding(encoding) => {
                write!(f, "unknown encoding '{}'", encoding)
            }
            ExtractError::Undecodable(encoding) => {
                write!(f, "template is not valid {}", encoding)
            }
            ExtractError::UnknownExtension(name) => write!(f, "unknown extension '{}'", name),
            ExtractError::Template(error) => write!(f, "{}", error),
        }
    }
}

/// Options recognized by [`babel_extract`]. Keys not listed here are
/// ignored; missing ones take the usual defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Options {
    pub encoding: String,
    pub block_start_string: String,
    pub block_end_string: String,
    pub variable_start_string: String,
    pub variable_end_string: String,
    pub comment_start_string: String,
    pub comment_end_string: String,
    pub line_statement_prefix: String,
    #[serde(deserialize_with = "truthy")]
    pub trim_blocks: bool,
    pub extensions: String,
}

impl Default for Options {
    fn default() -> Self {
        let syntax = Syntax::default();
        Options {
            encoding: "utf-8".to_string(),
            block_start_string: syntax.block_start,
            block_end_string: syntax.block_end,
            variable_start_string: syntax.variable_start,
            variable_end_string: syntax.variable_end,
            comment_start_string: syntax.comment_start,
            comment_end_string: syntax.comment_end,
            line_statement_prefix: String::new(),
            trim_blocks: false,
            extensions: String::new(),
        }
    }
}

fn truthy<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    Ok(matches!(
        value
            .to_lowercase()
            .as_str(),
        "1" | "on" | "yes" | "true"
    ))
}

impl Options {
    pub fn from_map(map: &HashMap<String, String>) -> Result<Options, ExtractError> {
        let deserializer: MapDeserializer<_, serde::de::value::Error> = MapDeserializer::new(
            map.iter()
                .map(|(key, value)| (key.as_str(), value.as_str())),
        );
        Options::deserialize(deserializer)
            .map_err(|error| ExtractError::InvalidOptions(error.to_string()))
    }

    /// Extension names listed in the options, blanks dropped.
    pub fn extension_names(&self) -> Vec<&str> {
        self.extensions
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .collect()
    }

    /// An environment configured per these options, with the translation
    /// extension always loaded.
    pub fn environment(&self) -> Result<Environment, ExtractError> {
        let syntax = Syntax {
            block_start: self
                .block_start_string
                .clone(),
            block_end: self
                .block_end_string
                .clone(),
            variable_start: self
                .variable_start_string
                .clone(),
            variable_end: self
                .variable_end_string
                .clone(),
            comment_start: self
                .comment_start_string
                .clone(),
            comment_end: self
                .comment_end_string
                .clone(),
        };

        if let Some(name) = syntax.empty_delimiter() {
            return Err(ExtractError::InvalidOptions(format!(
                "{}_string must not be empty",
                name
            )));
        }

        let mut environment = Environment::new()
            .with_syntax(syntax)
            .with_trim_blocks(self.trim_blocks)
            .with_line_statement_prefix(Some(self.line_statement_prefix.as_str()));

        for name in self.extension_names() {
            let extension =
                load_extension(name).ok_or_else(|| ExtractError::UnknownExtension(name.to_string()))?;
            environment.add_extension(extension);
        }
        environment.add_extension(Box::new(TransExtension));

        Ok(environment)
    }

    pub fn decode(&self, bytes: &[u8]) -> Result<String, ExtractError> {
        let encoding = self
            .encoding
            .to_lowercase()
            .replace('_', "-");

        match encoding.as_str() {
            "utf-8" | "utf8" => String::from_utf8(bytes.to_vec())
                .map_err(|_| ExtractError::Undecodable(self.encoding.clone())),
            "latin-1" | "latin1" | "iso-8859-1" => Ok(bytes
                .iter()
                .map(|&b| b as char)
                .collect()),
            "ascii" | "us-ascii" => {
                if bytes.is_ascii() {
                    Ok(bytes
                        .iter()
                        .map(|&b| b as char)
                        .collect())
                } else {
                    Err(ExtractError::Undecodable(self.encoding.clone()))
                }
            }
            _ => Err(ExtractError::UnknownEncoding(self.encoding.clone())),
        }
    }
}

/// One message found for a catalog. Translator comments are not yet
/// collected, so `comments` is always empty.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CatalogEntry<'a> {
    pub line: usize,
    pub function: &'a str,
    pub message: Message<'a>,
    pub comments: Vec<String>,
}

/// A parsed template ready to have its messages listed.
#[derive(Debug)]
pub struct Catalog {
    template: Node,
    keywords: Vec<String>,
    comment_tags: Vec<String>,
}

impl Catalog {
    // TODO collect comments starting with one of these tags into
    // CatalogEntry::comments.
    pub fn comment_tags(&self) -> &[String] {
        &self.comment_tags
    }

    pub fn entries(&self) -> impl Iterator<Item = CatalogEntry<'_>> + '_ {
        extract_from_ast(&self.template, self.keywords.as_slice()).map(|extracted| CatalogEntry {
            line: extracted.line,
            function: extracted.function,
            message: extracted.message,
            comments: Vec::new(),
        })
    }
}

/// Read a template and prepare it for extraction of calls to any of the
/// given keywords (function names).
pub fn babel_extract<R>(
    mut source: R,
    keywords: &[&str],
    comment_tags: &[&str],
    options: &HashMap<String, String>,
) -> Result<Catalog, ExtractError>
where
    R: Read,
{
    let options = Options::from_map(options)?;
    debug!(?options);

    let environment = options.environment()?;

    let mut bytes = Vec::new();
    source
        .read_to_end(&mut bytes)
        .map_err(|error| ExtractError::Unreadable(error.kind()))?;
    let text = options.decode(&bytes)?;

    let template = environment
        .parse(&text, None)
        .map_err(ExtractError::Template)?;
    info!("Extracting calls to {}", keywords.join(", "));

    Ok(Catalog {
        template,
        keywords: keywords
            .iter()
            .map(|keyword| keyword.to_string())
            .collect(),
        comment_tags: comment_tags
            .iter()
            .map(|tag| tag.to_string())
            .collect(),
    })
}

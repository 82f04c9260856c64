//! Parser for templates, dispatching statement tags to extensions

use std::path::Path;
use tracing::debug;

use crate::environment::Environment;
use crate::language::{LoadingError, Node};
use crate::lexing::TokenStream;

mod parser;

pub use parser::{ErrorKind, Parser, ParsingError};

/// Read a file and return its raw bytes; decoding is left to the caller
/// since templates may be in encodings other than UTF-8.
pub fn load(filename: &Path) -> Result<Vec<u8>, LoadingError<'_>> {
    match std::fs::read(filename) {
        Ok(content) => Ok(content),
        Err(error) => {
            debug!(?error);
            match error.kind() {
                std::io::ErrorKind::NotFound => Err(LoadingError {
                    problem: "File not found".to_string(),
                    details: String::new(),
                    filename,
                }),
                _ => Err(LoadingError {
                    problem: "Failed reading".to_string(),
                    details: error
                        .kind()
                        .to_string(),
                    filename,
                }),
            }
        }
    }
}

/// Lex and parse template source into a tree rooted at a Template node,
/// or return the first error encountered.
pub fn parse(
    environment: &Environment,
    source: &str,
    filename: Option<&str>,
) -> Result<Node, ParsingError> {
    let tokens = environment.tokenize(source)?;
    let mut parser = Parser::new(environment, TokenStream::new(tokens));

    let template = parser.parse()?;
    let count = template
        .children()
        .len();
    debug!(
        "Parsed {} top level node{} from {}",
        count,
        if count == 1 { "" } else { "s" },
        filename.unwrap_or("<template>")
    );

    Ok(template)
}

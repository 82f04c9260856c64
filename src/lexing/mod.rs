//! Turning template source into a stream of tokens

mod lexer;
mod stream;
mod token;

// Re-export all public symbols
pub use lexer::*;
pub use stream::*;
pub use token::*;

//! Internationalization: the translation block tag and extraction of
//! translatable messages.

mod babel;
mod extract;
mod trans;

// Re-export all public symbols
pub use babel::*;
pub use extract::*;
pub use trans::*;

//! Translatable sections for block-structured templates. The `trans` tag
//! compiles marked text into calls to `gettext` and `ngettext`, and
//! extraction walks parsed templates to list the messages needing
//! translation.

pub mod environment;
pub mod error;
pub mod i18n;
pub mod language;
pub mod lexing;
pub mod parsing;
mod patterns;
pub mod problem;
pub mod runtime;

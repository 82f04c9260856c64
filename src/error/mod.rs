// Program wide error reporting

mod display;

// Re-export all public symbols
pub use display::*;

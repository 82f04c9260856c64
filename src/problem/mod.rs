// Explanations of parsing errors for people reading them

mod messages;

// Re-export all public symbols
pub use messages::*;

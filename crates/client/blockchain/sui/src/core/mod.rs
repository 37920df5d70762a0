//! Core error types for Sui integration.

pub mod error;

// Re-export commonly used items
pub use error::{Result, SuiError};

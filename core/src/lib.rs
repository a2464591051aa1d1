// Core client functionality for the Funland assistant:
// - HTTP client for the assistant backend
// - Wire and transcript data structures
// - Configuration loading
// - Shared error types

// Export client module - HTTP client for the assistant API
pub mod client;
pub use client::*;

// Export types module - wire and transcript data structures
pub mod types;
pub use types::*;

// Export config module - configuration loading
pub mod config;
pub use config::*;

// Export errors module - shared error types
pub mod errors;
pub use errors::*;

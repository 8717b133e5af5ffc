//! xpost - Category-driven autoposting for X
//!
//! This library provides the core functionality for publishing pre-authored
//! posts to X (Twitter), either immediately or on a recurring daily schedule
//! that rotates through content categories.

pub mod config;
pub mod content;
pub mod error;
pub mod logging;
pub mod platforms;
pub mod publisher;
pub mod rotation;
pub mod scheduling;

// Re-export commonly used types
pub use config::Credentials;
pub use content::ContentDb;
pub use error::{Result, XpostError};
pub use publisher::{Outcome, Publisher};
pub use rotation::{RotationState, Tick};

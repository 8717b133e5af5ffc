//! Platform abstraction and implementations
//!
//! A platform is anything a post can be published to. The production
//! implementation is the X client in [`x`]; [`mock`] provides a
//! configurable stand-in for tests so posting logic can be exercised
//! without credentials or network access.

use async_trait::async_trait;

use crate::error::Result;

pub mod x;

// Mock platform is available for all builds (not just tests) to support
// integration tests
pub mod mock;

/// Unified interface to a posting platform
///
/// Async operations cover the network-facing calls; the rest is
/// introspection used by the publisher and the CLI.
#[async_trait]
pub trait Platform: Send + Sync {
    /// Authenticate with the platform
    ///
    /// Must be called before posting.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Authentication` if the credentials are
    /// rejected or the verification call fails.
    async fn authenticate(&mut self) -> Result<()>;

    /// Publish `text` and return the platform-specific post ID
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Posting`, `Network`, `RateLimit` or
    /// `Authentication` depending on how the remote call fails.
    async fn post(&self, text: &str) -> Result<String>;

    /// Check content against platform rules (length, emptiness)
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Validation` if the content cannot be posted.
    fn validate_content(&self, content: &str) -> Result<()>;

    /// Lowercase platform identifier (e.g., "x", "mock")
    fn name(&self) -> &str;

    /// Maximum post length in characters, if the platform has one
    fn character_limit(&self) -> Option<usize>;

    /// Whether the platform has everything it needs to authenticate
    fn is_configured(&self) -> bool;
}

//! Mock platform implementation for testing
//!
//! A configurable stand-in that records calls and can be told to fail
//! authentication or posting, so publishing logic can be tested without
//! credentials or network access.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::error::{PlatformError, Result};
use crate::platforms::Platform;

/// Configuration for mock platform behavior
#[derive(Debug, Clone)]
pub struct MockConfig {
    pub name: String,
    pub auth_succeeds: bool,
    pub post_succeeds: bool,
    pub auth_error: Option<String>,
    pub post_error: Option<String>,
    pub character_limit: Option<usize>,

    /// Number of times authenticate has been called
    pub auth_call_count: Arc<Mutex<usize>>,

    /// Number of times post has been called
    pub post_call_count: Arc<Mutex<usize>>,

    /// Posts that have been made (for verification)
    pub posted_content: Arc<Mutex<Vec<String>>>,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            name: "mock".to_string(),
            auth_succeeds: true,
            post_succeeds: true,
            auth_error: None,
            post_error: None,
            character_limit: None,
            auth_call_count: Arc::new(Mutex::new(0)),
            post_call_count: Arc::new(Mutex::new(0)),
            posted_content: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

/// Mock platform for testing
pub struct MockPlatform {
    config: MockConfig,
    authenticated: bool,
}

impl MockPlatform {
    pub fn new(config: MockConfig) -> Self {
        Self {
            config,
            authenticated: false,
        }
    }

    /// Create a mock platform that always succeeds, pre-authenticated
    pub fn success(name: &str) -> Self {
        let mut platform = Self::new(MockConfig {
            name: name.to_string(),
            ..Default::default()
        });
        platform.authenticated = true;
        platform
    }

    /// Create a mock platform that fails authentication
    pub fn auth_failure(name: &str, error: &str) -> Self {
        Self::new(MockConfig {
            name: name.to_string(),
            auth_succeeds: false,
            auth_error: Some(error.to_string()),
            ..Default::default()
        })
    }

    /// Create a mock platform that fails posting
    pub fn post_failure(name: &str, error: &str) -> Self {
        let mut platform = Self::new(MockConfig {
            name: name.to_string(),
            post_succeeds: false,
            post_error: Some(error.to_string()),
            ..Default::default()
        });
        platform.authenticated = true;
        platform
    }

    /// Handle to the shared call/content recorders, so callers can keep
    /// observing after the platform is boxed
    pub fn recorder(&self) -> MockConfig {
        self.config.clone()
    }

    pub fn auth_call_count(&self) -> usize {
        *self.config.auth_call_count.lock().unwrap()
    }

    pub fn post_call_count(&self) -> usize {
        *self.config.post_call_count.lock().unwrap()
    }

    pub fn posted_content(&self) -> Vec<String> {
        self.config.posted_content.lock().unwrap().clone()
    }
}

impl MockConfig {
    pub fn post_call_count(&self) -> usize {
        *self.post_call_count.lock().unwrap()
    }

    pub fn posted_content_list(&self) -> Vec<String> {
        self.posted_content.lock().unwrap().clone()
    }
}

#[async_trait]
impl Platform for MockPlatform {
    async fn authenticate(&mut self) -> Result<()> {
        *self.config.auth_call_count.lock().unwrap() += 1;

        if self.config.auth_succeeds {
            self.authenticated = true;
            Ok(())
        } else {
            let error_msg = self
                .config
                .auth_error
                .clone()
                .unwrap_or_else(|| "Mock authentication failed".to_string());
            Err(PlatformError::Authentication(error_msg).into())
        }
    }

    async fn post(&self, text: &str) -> Result<String> {
        *self.config.post_call_count.lock().unwrap() += 1;

        if !self.authenticated {
            return Err(PlatformError::Authentication("Not authenticated".to_string()).into());
        }

        if self.config.post_succeeds {
            self.config
                .posted_content
                .lock()
                .unwrap()
                .push(text.to_string());

            let count = *self.config.post_call_count.lock().unwrap();
            Ok(format!("{}:mock-{}", self.config.name, count))
        } else {
            let error_msg = self
                .config
                .post_error
                .clone()
                .unwrap_or_else(|| "Mock posting failed".to_string());
            Err(PlatformError::Posting(error_msg).into())
        }
    }

    fn validate_content(&self, content: &str) -> Result<()> {
        if content.is_empty() {
            return Err(PlatformError::Validation("Content cannot be empty".to_string()).into());
        }

        if let Some(limit) = self.config.character_limit {
            if content.chars().count() > limit {
                return Err(PlatformError::Validation(format!(
                    "Content exceeds {} character limit",
                    limit
                ))
                .into());
            }
        }

        Ok(())
    }

    fn name(&self) -> &str {
        &self.config.name
    }

    fn character_limit(&self) -> Option<usize> {
        self.config.character_limit
    }

    fn is_configured(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_success() {
        let platform = MockPlatform::success("test");

        assert_eq!(platform.name(), "test");
        assert_eq!(platform.character_limit(), None);

        let post_id = platform.post("Test content").await.unwrap();
        assert!(post_id.starts_with("test:mock-"));
        assert_eq!(platform.post_call_count(), 1);

        let posted = platform.posted_content();
        assert_eq!(posted, vec!["Test content"]);
    }

    #[tokio::test]
    async fn test_mock_auth_failure() {
        let mut platform = MockPlatform::auth_failure("test", "Invalid credentials");

        let result = platform.authenticate().await;
        assert!(result.is_err());
        assert_eq!(platform.auth_call_count(), 1);
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Invalid credentials"));
    }

    #[tokio::test]
    async fn test_mock_post_failure() {
        let platform = MockPlatform::post_failure("test", "Network error");

        let result = platform.post("Test content").await;
        assert!(result.is_err());
        assert_eq!(platform.post_call_count(), 1);
        assert!(result.unwrap_err().to_string().contains("Network error"));

        // Nothing is recorded as posted on failure
        assert!(platform.posted_content().is_empty());
    }

    #[tokio::test]
    async fn test_mock_requires_authentication() {
        let platform = MockPlatform::new(MockConfig::default());

        let result = platform.post("Test").await;
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Not authenticated"));
    }

    #[tokio::test]
    async fn test_mock_recorder_survives_boxing() {
        let platform = MockPlatform::success("test");
        let recorder = platform.recorder();
        let boxed: Box<dyn Platform> = Box::new(platform);

        boxed.post("via box").await.unwrap();
        assert_eq!(recorder.post_call_count(), 1);
        assert_eq!(recorder.posted_content_list(), vec!["via box"]);
    }

    #[test]
    fn test_mock_validation() {
        let platform = MockPlatform::new(MockConfig {
            character_limit: Some(10),
            ..Default::default()
        });

        assert!(platform.validate_content("Short").is_ok());
        assert!(platform.validate_content("").is_err());
        assert!(platform.validate_content("This is way too long").is_err());
    }
}

//! Publishing with dry-run support and non-fatal failure reporting
//!
//! The publisher is the single point where a selected post meets the
//! platform. A remote failure here is terminal for that one attempt only:
//! it is logged and surfaced in the outcome, never raised, so a scheduled
//! loop keeps running through bad slots. There is no retry.

use tracing::{info, warn};

use crate::platforms::Platform;

/// What happened to a single publish attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The platform accepted the post
    Posted { id: String },
    /// Dry-run: no network call was made
    DryRun,
    /// The platform rejected the post or was unreachable
    Failed { message: String },
}

/// Sends posts to a platform, or simulates sending
pub struct Publisher {
    platform: Box<dyn Platform>,
    dry_run: bool,
}

impl Publisher {
    pub fn new(platform: Box<dyn Platform>, dry_run: bool) -> Self {
        Self { platform, dry_run }
    }

    pub fn dry_run(&self) -> bool {
        self.dry_run
    }

    pub fn platform_name(&self) -> &str {
        self.platform.name()
    }

    /// Publish one post
    ///
    /// In dry-run mode the platform is never touched. Otherwise the
    /// platform call's failure is reported in the outcome rather than
    /// propagated.
    pub async fn publish(&self, text: &str) -> Outcome {
        if self.dry_run {
            info!(platform = self.platform.name(), "Dry run, not posting");
            return Outcome::DryRun;
        }

        match self.platform.post(text).await {
            Ok(id) => {
                info!(platform = self.platform.name(), id = %id, "Posted");
                Outcome::Posted { id }
            }
            Err(e) => {
                warn!(platform = self.platform.name(), "Posting failed: {}", e);
                Outcome::Failed {
                    message: e.to_string(),
                }
            }
        }
    }
}

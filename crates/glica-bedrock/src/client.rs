//! AWS configuration and model tier selection.
//!
//! Two tiers are exposed: a fast, low-latency model for time-constrained
//! settings and a thorough one for the full evaluation path. The Converse
//! API requires inference profile IDs (bare foundation model IDs fail with
//! "on-demand throughput isn't supported"), so both tiers pin `us.`
//! profiles.

use aws_config::SdkConfig;

/// Which model answers a request. Threaded through every reasoning call
/// via the session's fast-mode flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelTier {
    Fast,
    Thorough,
}

impl ModelTier {
    pub fn from_fast_mode(fast_mode: bool) -> Self {
        if fast_mode {
            ModelTier::Fast
        } else {
            ModelTier::Thorough
        }
    }

    /// The pinned inference profile for this tier.
    pub fn model_id(self) -> &'static str {
        match self {
            ModelTier::Fast => "us.anthropic.claude-haiku-4-5-20251001-v1:0",
            ModelTier::Thorough => "us.anthropic.claude-sonnet-4-5-20250929-v1:0",
        }
    }
}

/// Load the SDK configuration for the given region using the default
/// credential chain (the single service credential chosen at startup).
pub async fn load_sdk_config(region: &str) -> SdkConfig {
    aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(region.to_string()))
        .load()
        .await
}

pub fn runtime_client(config: &SdkConfig) -> aws_sdk_bedrockruntime::Client {
    aws_sdk_bedrockruntime::Client::new(config)
}

//! Composio connection configuration
//!
//! ## Priority Order (highest to lowest)
//!
//! 1. Values set on the node (api key, entity id)
//! 2. Environment variables (`COMPOSIO_API_KEY`, `COMPOSIO_BASE_URL`,
//!    `COMPOSIO_ENTITY_ID`, `COMPOSIO_TIMEOUT_SECS`)
//! 3. Defaults

use std::time::Duration;

use crate::error::{Result, SharePointError};

pub const DEFAULT_BASE_URL: &str = "https://backend.composio.dev";
pub const DEFAULT_ENTITY_ID: &str = "default";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Hostnames where plain http is accepted (local mocks and proxies)
const LOCALHOST_HOSTS: &[&str] = &["localhost", "127.0.0.1", "::1", "[::1]"];

/// Endpoint settings for the Composio toolset
#[derive(Debug, Clone, PartialEq)]
pub struct ComposioConfig {
    pub base_url: String,
    pub timeout: Duration,
    /// Fallback key used when the node does not carry one
    pub api_key: Option<String>,
    pub entity_id: String,
}

impl Default for ComposioConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            api_key: None,
            entity_id: DEFAULT_ENTITY_ID.to_string(),
        }
    }
}

impl ComposioConfig {
    /// Defaults overlaid with environment variables
    pub fn from_env() -> Result<Self> {
        Self::default().with_env()
    }

    /// Merge environment variables over the current values
    pub fn with_env(mut self) -> Result<Self> {
        if let Some(key) = non_empty_var("COMPOSIO_API_KEY") {
            self.api_key = Some(key);
        }
        if let Some(base_url) = non_empty_var("COMPOSIO_BASE_URL") {
            self.base_url = base_url;
        }
        if let Some(entity_id) = non_empty_var("COMPOSIO_ENTITY_ID") {
            self.entity_id = entity_id;
        }
        if let Some(secs) = non_empty_var("COMPOSIO_TIMEOUT_SECS") {
            let secs = secs.parse::<u64>().map_err(|e| SharePointError::Config {
                reason: format!("COMPOSIO_TIMEOUT_SECS '{}' is not a number: {}", secs, e),
            })?;
            self.timeout = Duration::from_secs(secs);
        }
        self.validate()?;
        Ok(self)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Base URL without a trailing slash
    pub fn api_base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    pub fn validate(&self) -> Result<()> {
        validate_base_url(&self.base_url)
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

/// Reject anything but https, except for localhost hosts
fn validate_base_url(base: &str) -> Result<()> {
    let parsed = url::Url::parse(base).map_err(|e| SharePointError::Config {
        reason: format!("Invalid COMPOSIO_BASE_URL '{}': {}", base, e),
    })?;

    let host = parsed.host_str().ok_or_else(|| SharePointError::Config {
        reason: "COMPOSIO_BASE_URL must include a host".to_string(),
    })?;

    if LOCALHOST_HOSTS
        .iter()
        .any(|allowed| host.eq_ignore_ascii_case(allowed))
    {
        return match parsed.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(SharePointError::Config {
                reason: format!("Unsupported scheme '{}://'", scheme),
            }),
        };
    }

    if parsed.scheme() != "https" {
        return Err(SharePointError::Config {
            reason: format!(
                "COMPOSIO_BASE_URL must use https for non-localhost hosts; got '{}://'",
                parsed.scheme()
            ),
        });
    }

    Ok(())
}

//! Composio toolset over the Composio REST API
//!
//! Executes actions via `POST {base}/api/v2/actions/{ACTION}/execute`.
//! Authentication uses the `x-api-key` header; the connected account is
//! selected by entity id.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

use super::{ActionHandle, Credentials, Params, Toolset, ToolsetFactory, ToolsetResponse};
use crate::config::ComposioConfig;
use crate::error::{Result, SharePointError};

const USER_AGENT: &str = concat!("composio-sharepoint/", env!("CARGO_PKG_VERSION"));

/// Toolset bound to one API key and entity
pub struct ComposioToolset {
    /// HTTP client
    client: reqwest::Client,
    api_base: String,
    api_key: String,
    entity_id: String,
    app_name: String,
}

impl ComposioToolset {
    pub fn new(config: &ComposioConfig, credentials: &Credentials, app_name: &str) -> Result<Self> {
        config.validate()?;

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| SharePointError::Transport(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_base: config.api_base().to_string(),
            api_key: credentials.api_key.clone(),
            entity_id: credentials.entity_id.clone(),
            app_name: app_name.to_string(),
        })
    }

    fn execute_url(&self, action: &ActionHandle) -> String {
        format!("{}/api/v2/actions/{}/execute", self.api_base, action.name())
    }
}

#[async_trait]
impl Toolset for ComposioToolset {
    fn app_name(&self) -> &str {
        &self.app_name
    }

    async fn execute(&self, action: &ActionHandle, params: Params) -> Result<ToolsetResponse> {
        let payload = ExecuteRequest {
            entity_id: &self.entity_id,
            app_name: &self.app_name,
            input: params,
        };

        tracing::debug!(
            toolset = "composio",
            action = %action,
            entity_id = %self.entity_id,
            param_count = payload.input.len(),
            "Sending action to Composio"
        );

        let response = self
            .client
            .post(self.execute_url(action))
            .header("x-api-key", &self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| SharePointError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                toolset = "composio",
                action = %action,
                status = %status,
                error = %body,
                "Composio API error"
            );
            return Err(SharePointError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ToolsetResponse = response
            .json()
            .await
            .map_err(|e| SharePointError::InvalidResponse(e.to_string()))?;

        tracing::debug!(
            toolset = "composio",
            action = %action,
            successful = ?parsed.successful,
            "Composio response received"
        );

        Ok(parsed)
    }
}

/// Factory producing [`ComposioToolset`]s from a shared config
#[derive(Debug, Clone)]
pub struct ComposioToolsetFactory {
    config: ComposioConfig,
    app_name: String,
}

impl ComposioToolsetFactory {
    pub fn new(config: ComposioConfig, app_name: impl Into<String>) -> Self {
        Self {
            config,
            app_name: app_name.into(),
        }
    }
}

impl ToolsetFactory for ComposioToolsetFactory {
    fn build(&self, credentials: &Credentials) -> Result<Arc<dyn Toolset>> {
        Ok(Arc::new(ComposioToolset::new(
            &self.config,
            credentials,
            &self.app_name,
        )?))
    }
}

// ============================================================================
// API TYPES
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExecuteRequest<'a> {
    entity_id: &'a str,
    app_name: &'a str,
    input: Params,
}

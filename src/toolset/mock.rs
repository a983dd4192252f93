//! Mock toolset for testing
//!
//! Returns configurable responses without making real API calls and records
//! every call for assertions. Clones share their queues and recordings, so
//! the instance handed to a component can be inspected from the test.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::json;

use super::{
    ActionHandle, Credentials, Params, Toolset, ToolsetFactory, ToolsetResponse,
    SHAREPOINT_ACTION_ENUM,
};
use crate::error::{Result, SharePointError};

/// One recorded `execute` call
#[derive(Debug, Clone, PartialEq)]
pub struct MockCall {
    pub action: ActionHandle,
    pub params: Params,
}

/// Mock toolset that returns predefined responses
#[derive(Debug, Clone)]
pub struct MockToolset {
    /// Queue of responses to return (FIFO)
    responses: Arc<Mutex<VecDeque<ToolsetResponse>>>,
    /// Response when the queue is empty
    default_response: ToolsetResponse,
    /// Members of the simulated action enumeration
    action_enum: Vec<&'static str>,
    /// Transport error returned instead of a response
    failure: Option<String>,
    calls: Arc<Mutex<Vec<MockCall>>>,
    credentials: Arc<Mutex<Vec<Credentials>>>,
}

impl MockToolset {
    /// Mock answering every call with `{"result": "mocked response"}`
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            default_response: ToolsetResponse::success(json!({"result": "mocked response"})),
            action_enum: SHAREPOINT_ACTION_ENUM.to_vec(),
            failure: None,
            calls: Arc::new(Mutex::new(Vec::new())),
            credentials: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create with a queue of responses
    pub fn with_responses(responses: Vec<ToolsetResponse>) -> Self {
        let mock = Self::new();
        mock.responses.lock().extend(responses);
        mock
    }

    /// Set the response used once the queue is empty
    pub fn with_default(mut self, response: ToolsetResponse) -> Self {
        self.default_response = response;
        self
    }

    /// Replace the simulated action enumeration
    pub fn with_action_enum(mut self, members: &[&'static str]) -> Self {
        self.action_enum = members.to_vec();
        self
    }

    /// Fail every call with a transport error
    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }

    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().clone()
    }

    pub fn last_call(&self) -> Option<MockCall> {
        self.calls.lock().last().cloned()
    }

    /// Credentials this mock was built with, one entry per `build`
    pub fn credentials(&self) -> Vec<Credentials> {
        self.credentials.lock().clone()
    }
}

impl Default for MockToolset {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Toolset for MockToolset {
    fn app_name(&self) -> &str {
        "sharepoint"
    }

    fn action_enum(&self) -> &[&str] {
        &self.action_enum
    }

    async fn execute(&self, action: &ActionHandle, params: Params) -> Result<ToolsetResponse> {
        self.calls.lock().push(MockCall {
            action: action.clone(),
            params,
        });

        if let Some(message) = &self.failure {
            return Err(SharePointError::Transport(message.clone()));
        }

        let queued = self.responses.lock().pop_front();
        Ok(queued.unwrap_or_else(|| self.default_response.clone()))
    }
}

impl ToolsetFactory for MockToolset {
    fn build(&self, credentials: &Credentials) -> Result<Arc<dyn Toolset>> {
        self.credentials.lock().push(credentials.clone());
        Ok(Arc::new(self.clone()))
    }
}

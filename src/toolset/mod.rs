//! # Toolset Abstraction Layer
//!
//! The toolset is the authenticated collaborator that performs the actual
//! Composio call. The component only needs two things from it:
//!
//! - [`Toolset::action`] - resolve an identifier to a symbolic [`ActionHandle`]
//! - [`Toolset::execute`] - run one action with a parameter set
//!
//! ## Available Toolsets
//!
//! | Toolset | Use Case |
//! |---------|----------|
//! | [`ComposioToolset`] | Production, Composio REST API |
//! | [`MockToolset`] | Testing, canned responses and call recording |
//!
//! Toolsets are created per execution through a [`ToolsetFactory`], which
//! receives the node's [`Credentials`].

mod composio;
mod mock;

pub use composio::{ComposioToolset, ComposioToolsetFactory};
pub use mock::{MockCall, MockToolset};

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::actions;
use crate::error::{Result, SharePointError};

/// Parameter set sent with an action
pub type Params = Map<String, Value>;

/// SharePoint members of the Composio action enumeration
pub const SHAREPOINT_ACTION_ENUM: &[&str] = &[
    actions::CREATE_FOLDER,
    actions::CREATE_LIST,
    actions::CREATE_LIST_ITEM,
    actions::CREATE_USER,
    actions::FIND_USER,
    actions::REMOVE_USER,
];

// ============================================================================
// ACTION HANDLE
// ============================================================================

/// Symbolic handle for one member of the toolset's action enumeration
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActionHandle {
    app: String,
    name: String,
}

impl ActionHandle {
    pub fn new(app: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            app: app.into(),
            name: name.into(),
        }
    }

    pub fn app(&self) -> &str {
        &self.app
    }

    /// Enum member name, also the slug used on the wire
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for ActionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

// ============================================================================
// RESPONSE
// ============================================================================

/// Raw result of one toolset call
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolsetResponse {
    /// The REST API historically spells this `successfull`
    #[serde(default, alias = "successfull")]
    pub successful: Option<bool>,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub error: Option<Value>,
}

impl ToolsetResponse {
    pub fn success(data: Value) -> Self {
        Self {
            successful: Some(true),
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(error: Value) -> Self {
        Self {
            successful: Some(false),
            data: None,
            error: Some(error),
        }
    }
}

// ============================================================================
// CREDENTIALS
// ============================================================================

/// Credentials handed to a [`ToolsetFactory`]
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub api_key: String,
    pub entity_id: String,
}

impl Credentials {
    pub fn new(api_key: impl Into<String>, entity_id: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            entity_id: entity_id.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"***")
            .field("entity_id", &self.entity_id)
            .finish()
    }
}

// ============================================================================
// TRAITS
// ============================================================================

/// Authenticated client that performs Composio calls
#[async_trait]
pub trait Toolset: Send + Sync {
    /// Composio app this toolset talks to (e.g., "sharepoint")
    fn app_name(&self) -> &str;

    /// Identifiers present in the action enumeration
    fn action_enum(&self) -> &[&str] {
        SHAREPOINT_ACTION_ENUM
    }

    /// Resolve an identifier to its enum member
    fn action(&self, identifier: &str) -> Result<ActionHandle> {
        if self.action_enum().contains(&identifier) {
            Ok(ActionHandle::new(self.app_name(), identifier))
        } else {
            Err(SharePointError::UnknownActionHandle {
                identifier: identifier.to_string(),
                app: self.app_name().to_string(),
            })
        }
    }

    /// Run one action. Not retried.
    async fn execute(&self, action: &ActionHandle, params: Params) -> Result<ToolsetResponse>;
}

/// Builds an authenticated toolset for one execution
pub trait ToolsetFactory: Send + Sync {
    fn build(&self, credentials: &Credentials) -> Result<Arc<dyn Toolset>>;
}

//! Shared behaviour of every Composio-backed node
//!
//! Concrete nodes supply their metadata, action table and credentials;
//! credential acquisition, action maps and the base build-config update are
//! provided here.

use std::collections::BTreeSet;
use std::sync::Arc;

use serde_json::{json, Value};
use tracing::debug;

use crate::actions::{ActionDescriptor, ActionMaps};
use crate::build_config::BuildConfig;
use crate::error::{Result, SharePointError};
use crate::fields::{FieldSpec, InputKind};
use crate::selection::ActionSelection;
use crate::toolset::{Credentials, Toolset, ToolsetFactory};

pub const MISSING_API_KEY_TOOLTIP: &str = "Please provide a valid Composio API Key.";

/// Inputs every Composio node carries ahead of its own fields
pub const BASE_INPUTS: &[FieldSpec] = &[
    FieldSpec {
        name: "entity_id",
        display_name: "Entity ID",
        info: "The entity ID for Composio. Usually 'default'.",
        kind: InputKind::MessageText,
        show: true,
        required: false,
        advanced: true,
    },
    FieldSpec {
        name: "api_key",
        display_name: "Composio API Key",
        info: "Refer to https://docs.composio.dev/faq/api_key/api_key",
        kind: InputKind::SecretText,
        show: true,
        required: true,
        advanced: false,
    },
    FieldSpec {
        name: "auth_link",
        display_name: "Authentication Link",
        info: "Click to authenticate with OAuth2",
        kind: InputKind::Link,
        show: false,
        required: false,
        advanced: false,
    },
    FieldSpec {
        name: "action",
        display_name: "Action",
        info: "Select action to pass to the agent",
        kind: InputKind::Dropdown,
        show: true,
        required: true,
        advanced: false,
    },
];

/// Contract between a concrete node and the shared Composio plumbing
pub trait ComposioComponent: Send + Sync {
    /// Composio app slug (e.g., "sharepoint")
    fn app_name(&self) -> &'static str;

    /// The node's action table
    fn actions_data(&self) -> &'static [ActionDescriptor];

    fn api_key(&self) -> &str;

    fn entity_id(&self) -> &str;

    fn action(&self) -> &ActionSelection;

    fn toolset_factory(&self) -> &dyn ToolsetFactory;

    /// Authenticated toolset for one execution
    fn build_wrapper(&self) -> Result<Arc<dyn Toolset>> {
        if self.api_key().is_empty() {
            return Err(SharePointError::MissingApiKey);
        }
        let credentials = Credentials::new(self.api_key(), self.entity_id());
        debug!(app = self.app_name(), ?credentials, "Building toolset");
        self.toolset_factory().build(&credentials)
    }

    fn build_action_maps(&self) -> ActionMaps {
        ActionMaps::from_table(self.actions_data())
    }

    /// Every field referenced by the node's actions
    fn all_fields(&self) -> BTreeSet<&'static str> {
        self.actions_data()
            .iter()
            .flat_map(|action| action.required_fields.iter().copied())
            .collect()
    }

    fn update_build_config(
        &self,
        build_config: BuildConfig,
        field_value: &Value,
        field_name: Option<&str>,
    ) -> BuildConfig {
        update_build_config(self, build_config, field_value, field_name)
    }
}

/// Base build-config update, shared by every node.
///
/// - no API key: clear the auth link, show the missing-key tooltip, empty the
///   action options and hide every action field
/// - API key present: list every action in the dropdown
/// - `action` changed: show exactly the selected action's fields
pub fn update_build_config<C: ComposioComponent + ?Sized>(
    component: &C,
    mut build_config: BuildConfig,
    field_value: &Value,
    field_name: Option<&str>,
) -> BuildConfig {
    let api_key = match field_name {
        Some("api_key") => field_value.as_str().unwrap_or_default(),
        _ => component.api_key(),
    };

    if api_key.is_empty() {
        build_config.set("auth_link", "value", "");
        build_config.set("auth_link", "auth_tooltip", MISSING_API_KEY_TOOLTIP);
        build_config.set("action", "options", json!([]));
        for field in component.all_fields() {
            build_config.set(field, "show", false);
        }
        return build_config;
    }

    let options: Vec<Value> = component
        .actions_data()
        .iter()
        .map(|action| json!({ "name": action.display_name }))
        .collect();
    build_config.set("action", "options", options);
    build_config.set("auth_link", "auth_tooltip", "");

    if field_name == Some("action") {
        let selection = ActionSelection::from_value(field_value);
        let maps = component.build_action_maps();
        let identifier = maps.resolve(&selection);
        let selected = identifier
            .and_then(|key| component.actions_data().iter().find(|a| a.identifier == key));

        for field in component.all_fields() {
            let show = selected.is_some_and(|action| action.required_fields.contains(&field));
            build_config.set(field, "show", show);
        }
        build_config.set(
            "action",
            "helper_text",
            identifier
                .and_then(|key| maps.display_name_for(key))
                .unwrap_or_default(),
        );
    }

    build_config
}

//! Node state files
//!
//! Saved field state of one SharePoint node, as the host binary reads it:
//!
//! ```yaml
//! entity_id: default
//! action:
//!   - name: Create Folder
//! fields:
//!   folder_name: Reports
//!   relative_path: 2024/Q3
//! ```
//!
//! `api_key` may be set here but usually comes from `COMPOSIO_API_KEY`.
//! A field left blank (`email:`) is unset and never reaches the node.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::component::SharePointComponent;
use crate::error::{Result, SharePointError};
use crate::fields::FieldValue;
use crate::selection::ActionSelection;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NodeFile {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub entity_id: Option<String>,
    #[serde(default)]
    pub action: ActionSelection,
    #[serde(default)]
    pub fields: BTreeMap<String, Option<FieldValue>>,
}

impl NodeFile {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Fields that hold a value (blank and empty entries excluded)
    pub fn set_fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().filter_map(|(name, value)| match value {
            Some(value) if !value.is_unset() => Some((name.as_str(), value)),
            _ => None,
        })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content).map_err(|e| SharePointError::NodeFile {
            reason: format!("{}: {}", path.display(), e),
        })
    }

    /// Copy this state onto a node. Empty keys leave the node's own key.
    pub fn apply(&self, component: &mut SharePointComponent) -> Result<()> {
        if let Some(key) = self.api_key.as_deref().filter(|k| !k.is_empty()) {
            component.api_key = key.to_string();
        }
        if let Some(entity_id) = &self.entity_id {
            component.entity_id = entity_id.clone();
        }
        component.action = self.action.clone();
        for (name, value) in &self.fields {
            match value {
                Some(value) => component.set_field(name, value.clone())?,
                None => component.field(name).map(|_| ())?,
            }
        }
        Ok(())
    }
}

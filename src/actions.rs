//! SharePoint action table
//!
//! Static mapping from Composio action identifier to its display name and the
//! ordered list of fields the action reads. Everything else (reverse lookup,
//! the aggregate field set, default tools) is derived from [`ACTIONS`].

use std::collections::{BTreeSet, HashMap};

use once_cell::sync::Lazy;
use serde::Serialize;

use crate::selection::ActionSelection;

pub const CREATE_FOLDER: &str = "SHARE_POINT_SHAREPOINT_CREATE_FOLDER";
pub const CREATE_LIST: &str = "SHARE_POINT_SHAREPOINT_CREATE_LIST";
pub const CREATE_LIST_ITEM: &str = "SHARE_POINT_SHAREPOINT_CREATE_LIST_ITEM";
pub const CREATE_USER: &str = "SHARE_POINT_SHAREPOINT_CREATE_USER";
pub const FIND_USER: &str = "SHARE_POINT_SHAREPOINT_FIND_USER";
pub const REMOVE_USER: &str = "SHARE_POINT_SHAREPOINT_REMOVE_USER";

/// One external API operation exposed by the node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActionDescriptor {
    /// Stable machine key (matches the Composio action enum)
    pub identifier: &'static str,
    /// Human-readable name shown in the action dropdown
    pub display_name: &'static str,
    /// Fields marshalled into the request, in declaration order
    pub required_fields: &'static [&'static str],
}

/// All SharePoint actions, in dropdown order
pub static ACTIONS: &[ActionDescriptor] = &[
    ActionDescriptor {
        identifier: CREATE_FOLDER,
        display_name: "Create Folder",
        required_fields: &["document_library", "folder_name", "relative_path"],
    },
    ActionDescriptor {
        identifier: CREATE_LIST,
        display_name: "Create List",
        required_fields: &["description", "name", "template"],
    },
    ActionDescriptor {
        identifier: CREATE_LIST_ITEM,
        display_name: "Create List Item",
        required_fields: &["item_properties", "list_name"],
    },
    ActionDescriptor {
        identifier: CREATE_USER,
        display_name: "Create User",
        required_fields: &["email", "login_name", "title"],
    },
    ActionDescriptor {
        identifier: FIND_USER,
        display_name: "Find User",
        required_fields: &["email"],
    },
    ActionDescriptor {
        identifier: REMOVE_USER,
        display_name: "Remove User",
        required_fields: &["email"],
    },
];

/// Identifiers offered when the node runs in "default tools" mode
pub const DEFAULT_TOOLS: &[&str] = &[CREATE_USER, FIND_USER];

static ALL_FIELDS: Lazy<BTreeSet<&'static str>> = Lazy::new(|| {
    ACTIONS
        .iter()
        .flat_map(|action| action.required_fields.iter().copied())
        .collect()
});

/// Look up an action by identifier
pub fn find(identifier: &str) -> Option<&'static ActionDescriptor> {
    ACTIONS.iter().find(|action| action.identifier == identifier)
}

/// Every field referenced by at least one action
pub fn all_fields() -> &'static BTreeSet<&'static str> {
    &ALL_FIELDS
}

/// Reverse and forward lookups between display names and identifiers.
///
/// Later entries win on duplicate keys, same as inserting into a dict.
#[derive(Debug, Clone, Default)]
pub struct ActionMaps {
    pub display_to_key: HashMap<&'static str, &'static str>,
    pub key_to_display: HashMap<&'static str, &'static str>,
}

impl ActionMaps {
    pub fn from_table(table: &[ActionDescriptor]) -> Self {
        let mut maps = Self::default();
        for action in table {
            maps.display_to_key
                .insert(action.display_name, action.identifier);
            maps.key_to_display
                .insert(action.identifier, action.display_name);
        }
        maps
    }

    pub fn identifier_for(&self, display_name: &str) -> Option<&'static str> {
        self.display_to_key.get(display_name).copied()
    }

    pub fn display_name_for(&self, identifier: &str) -> Option<&'static str> {
        self.key_to_display.get(identifier).copied()
    }

    /// Identifier of the selected action, if the selection names one
    pub fn resolve(&self, selection: &ActionSelection) -> Option<&'static str> {
        selection
            .display_name()
            .and_then(|name| self.identifier_for(name))
    }
}

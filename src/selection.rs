//! Action selection normalization
//!
//! The action dropdown reports its value either as `[{"name": "..."}]` or as
//! the bare display name. [`ActionSelection`] folds both into one value at the
//! boundary so the executor never sees the raw shapes.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Normalized action selection
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ActionSelection {
    Named(String),
    #[default]
    Unset,
}

impl ActionSelection {
    pub fn named(display_name: impl Into<String>) -> Self {
        ActionSelection::Named(display_name.into())
    }

    /// Normalize a raw dropdown value.
    ///
    /// A list is read through its first element; the dropdown is
    /// single-select, so any further entries are ignored.
    pub fn from_value(raw: &Value) -> Self {
        match raw {
            Value::String(name) => ActionSelection::Named(name.clone()),
            Value::Array(items) => match items.first().and_then(|item| item.get("name")) {
                Some(Value::String(name)) => ActionSelection::Named(name.clone()),
                _ => ActionSelection::Unset,
            },
            _ => ActionSelection::Unset,
        }
    }

    pub fn display_name(&self) -> Option<&str> {
        match self {
            ActionSelection::Named(name) => Some(name),
            ActionSelection::Unset => None,
        }
    }

    /// Value in the shape the dropdown emits
    pub fn to_value(&self) -> Value {
        match self {
            ActionSelection::Named(name) => serde_json::json!([{ "name": name }]),
            ActionSelection::Unset => Value::Null,
        }
    }
}

impl fmt::Display for ActionSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionSelection::Named(name) => f.write_str(name),
            ActionSelection::Unset => f.write_str("None"),
        }
    }
}

impl<'de> Deserialize<'de> for ActionSelection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<Value>::deserialize(deserializer)?;
        Ok(raw.map_or(ActionSelection::Unset, |v| ActionSelection::from_value(&v)))
    }
}

impl Serialize for ActionSelection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

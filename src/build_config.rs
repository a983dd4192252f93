//! Build config: the hosting platform's per-node UI schema
//!
//! A JSON object keyed by field name, each entry an object of UI attributes
//! (`show`, `options`, `value`, `auth_tooltip`, ...). The build-config hook
//! edits it in place and hands it back.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::fields::FieldSpec;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BuildConfig(Map<String, Value>);

impl BuildConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed one entry per field from a schema
    pub fn from_fields(fields: &[FieldSpec]) -> Self {
        let mut config = Self::new();
        for field in fields {
            let entry = config.entry(field.name);
            entry.insert("display_name".to_string(), Value::from(field.display_name));
            entry.insert("info".to_string(), Value::from(field.info));
            entry.insert("show".to_string(), Value::Bool(field.show));
            entry.insert("required".to_string(), Value::Bool(field.required));
            entry.insert("advanced".to_string(), Value::Bool(field.advanced));
        }
        config
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Attribute of one field, e.g. `attr("action", "options")`
    pub fn attr(&self, field: &str, key: &str) -> Option<&Value> {
        self.0.get(field).and_then(|entry| entry.get(key))
    }

    /// Entry for a field, created (or replaced if not an object) on demand
    pub fn entry(&mut self, field: &str) -> &mut Map<String, Value> {
        let slot = self
            .0
            .entry(field.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !slot.is_object() {
            *slot = Value::Object(Map::new());
        }
        match slot {
            Value::Object(map) => map,
            _ => unreachable!("slot was just made an object"),
        }
    }

    pub fn set(&mut self, field: &str, key: &str, value: impl Into<Value>) {
        self.entry(field).insert(key.to_string(), value.into());
    }
}

impl From<Map<String, Value>> for BuildConfig {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

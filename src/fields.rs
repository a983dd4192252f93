//! Input field declarations and values
//!
//! [`FieldSpec`] is what the hosting platform renders; [`FieldValue`] is what
//! the user typed into it.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Widget kind backing an input field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    /// Single-line text (accepts upstream message output)
    MessageText,
    /// Free-form nested key/value map
    NestedDict,
    /// Masked credential
    SecretText,
    /// Option list populated by the build-config hook
    Dropdown,
    /// Clickable auth link
    Link,
}

/// Declaration of one UI-exposed input
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    pub display_name: &'static str,
    pub info: &'static str,
    pub kind: InputKind,
    pub show: bool,
    pub required: bool,
    pub advanced: bool,
}

impl FieldSpec {
    /// Hidden, non-advanced text field (the shape of every action field)
    pub const fn text(
        name: &'static str,
        display_name: &'static str,
        info: &'static str,
        required: bool,
    ) -> Self {
        Self {
            name,
            display_name,
            info,
            kind: InputKind::MessageText,
            show: false,
            required,
            advanced: false,
        }
    }

    pub const fn nested_dict(
        name: &'static str,
        display_name: &'static str,
        info: &'static str,
        required: bool,
    ) -> Self {
        Self {
            name,
            display_name,
            info,
            kind: InputKind::NestedDict,
            show: false,
            required,
            advanced: false,
        }
    }
}

/// A value entered for one field
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Dict(Map<String, Value>),
}

impl FieldValue {
    /// Empty text counts as unset; an empty dict is still a value.
    pub fn is_unset(&self) -> bool {
        matches!(self, FieldValue::Text(text) if text.is_empty())
    }

    pub fn into_json(self) -> Value {
        match self {
            FieldValue::Text(text) => Value::String(text),
            FieldValue::Dict(map) => Value::Object(map),
        }
    }
}

/// Scalars are read the way the text input would show them, so
/// `template: 100` and `template: "100"` are the same value.
impl<'de> Deserialize<'de> for FieldValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::String(text) => Ok(FieldValue::Text(text)),
            Value::Number(number) => Ok(FieldValue::Text(number.to_string())),
            Value::Bool(flag) => Ok(FieldValue::Text(flag.to_string())),
            Value::Object(map) => Ok(FieldValue::Dict(map)),
            Value::Null => Err(D::Error::custom("expected text or a mapping, found null")),
            Value::Array(_) => Err(D::Error::custom("expected text or a mapping, found a list")),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(text: &str) -> Self {
        FieldValue::Text(text.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(text: String) -> Self {
        FieldValue::Text(text)
    }
}

impl From<Map<String, Value>> for FieldValue {
    fn from(map: Map<String, Value>) -> Self {
        FieldValue::Dict(map)
    }
}

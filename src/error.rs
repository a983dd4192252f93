//! Error types with fix suggestions
//!
//! Error code ranges:
//! - CSP-001-009: Execution wrapper
//! - CSP-010-019: Action resolution errors
//! - CSP-020-029: Credential errors
//! - CSP-030-039: Toolset transport errors
//! - CSP-040-049: Configuration errors
//! - CSP-050-059: Node file errors

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SharePointError>;

/// Trait for errors that provide fix suggestions
pub trait FixSuggestion {
    fn fix_suggestion(&self) -> Option<&str>;
}

#[derive(Error, Debug)]
pub enum SharePointError {
    // ═══════════════════════════════════════════
    // EXECUTION (001-009)
    // ═══════════════════════════════════════════
    /// Every failure raised while executing an action is surfaced through this
    /// variant so the host always sees which action was attempted.
    #[error("Failed to execute {display_name}: {source}")]
    ActionFailed {
        display_name: String,
        #[source]
        source: Box<SharePointError>,
    },

    // ═══════════════════════════════════════════
    // ACTION RESOLUTION (010-019)
    // ═══════════════════════════════════════════
    #[error("Invalid action: {display_name}")]
    InvalidAction { display_name: String },

    #[error("CSP-011: Action '{identifier}' is not known to the {app} toolset")]
    UnknownActionHandle { identifier: String, app: String },

    #[error("CSP-012: Unknown field '{field}'")]
    UnknownField { field: String },

    #[error("CSP-013: Field '{field}' expects {expected}")]
    FieldType { field: String, expected: &'static str },

    // ═══════════════════════════════════════════
    // CREDENTIALS (020-029)
    // ═══════════════════════════════════════════
    #[error("CSP-020: Composio API key is missing")]
    MissingApiKey,

    // ═══════════════════════════════════════════
    // TOOLSET TRANSPORT (030-039)
    // ═══════════════════════════════════════════
    #[error("CSP-030: Composio request failed: {0}")]
    Transport(String),

    #[error("CSP-031: Composio returned HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("CSP-032: Invalid Composio response: {0}")]
    InvalidResponse(String),

    // ═══════════════════════════════════════════
    // CONFIGURATION (040-049)
    // ═══════════════════════════════════════════
    #[error("CSP-040: Configuration error: {reason}")]
    Config { reason: String },

    // ═══════════════════════════════════════════
    // NODE FILES (050-059)
    // ═══════════════════════════════════════════
    #[error("CSP-050: Invalid node file: {reason}")]
    NodeFile { reason: String },

    #[error("CSP-051: YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("CSP-052: IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SharePointError {
    /// Stable error code for logs and host-side display.
    pub fn code(&self) -> &'static str {
        match self {
            Self::ActionFailed { .. } => "CSP-001",
            Self::InvalidAction { .. } => "CSP-010",
            Self::UnknownActionHandle { .. } => "CSP-011",
            Self::UnknownField { .. } => "CSP-012",
            Self::FieldType { .. } => "CSP-013",
            Self::MissingApiKey => "CSP-020",
            Self::Transport(_) => "CSP-030",
            Self::HttpStatus { .. } => "CSP-031",
            Self::InvalidResponse(_) => "CSP-032",
            Self::Config { .. } => "CSP-040",
            Self::NodeFile { .. } => "CSP-050",
            Self::Yaml(_) => "CSP-051",
            Self::Io(_) => "CSP-052",
        }
    }

    /// Innermost error, skipping the `ActionFailed` wrapper.
    pub fn root(&self) -> &SharePointError {
        match self {
            Self::ActionFailed { source, .. } => source.root(),
            other => other,
        }
    }
}

impl FixSuggestion for SharePointError {
    fn fix_suggestion(&self) -> Option<&str> {
        match self {
            SharePointError::ActionFailed { source, .. } => source.fix_suggestion(),
            SharePointError::InvalidAction { .. } => {
                Some("Pick one of the actions listed by `composio-sharepoint actions`")
            }
            SharePointError::UnknownActionHandle { .. } => {
                Some("Upgrade the toolset or check that the SharePoint app is enabled in Composio")
            }
            SharePointError::UnknownField { .. } => {
                Some("Use a field name from `composio-sharepoint schema`")
            }
            SharePointError::FieldType { .. } => {
                Some("item_properties takes a mapping, every other field takes text")
            }
            SharePointError::MissingApiKey => {
                Some("Set api_key in the node file or the COMPOSIO_API_KEY env var")
            }
            SharePointError::Transport(_) => Some("Check network access to the Composio API"),
            SharePointError::HttpStatus { .. } => {
                Some("Check the API key and that the SharePoint account is connected")
            }
            SharePointError::InvalidResponse(_) => None,
            SharePointError::Config { .. } => {
                Some("COMPOSIO_BASE_URL must be an https URL (http is only allowed for localhost)")
            }
            SharePointError::NodeFile { .. } => Some("Check the node file layout"),
            SharePointError::Yaml(_) => Some("Check YAML syntax: indentation and quoting"),
            SharePointError::Io(_) => Some("Check file path and permissions"),
        }
    }
}

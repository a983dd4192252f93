//! composio-sharepoint - SharePoint workflow node backed by Composio

pub mod actions;
pub mod build_config;
pub mod component;
pub mod config;
pub mod error;
pub mod fields;
pub mod node_file;
pub mod result;
pub mod selection;
pub mod toolset;

pub use actions::{ActionDescriptor, ActionMaps, ACTIONS, DEFAULT_TOOLS};
pub use build_config::BuildConfig;
pub use component::{ComposioComponent, SharePointComponent};
pub use config::ComposioConfig;
pub use error::{FixSuggestion, Result, SharePointError};
pub use fields::{FieldSpec, FieldValue, InputKind};
pub use node_file::NodeFile;
pub use result::{ErrorRecord, ExecutionResult};
pub use selection::ActionSelection;
pub use toolset::{
    ActionHandle, ComposioToolset, ComposioToolsetFactory, Credentials, MockToolset, Toolset,
    ToolsetFactory, ToolsetResponse,
};

//! Workflow nodes backed by Composio
//!
//! - [`base`] - credential acquisition, action maps, base build-config update
//! - [`sharepoint`] - the SharePoint node

pub mod base;
pub mod sharepoint;

pub use base::{ComposioComponent, BASE_INPUTS, MISSING_API_KEY_TOOLTIP};
pub use sharepoint::{SharePointComponent, SHAREPOINT_INPUTS};

//! SharePoint node
//!
//! Declares the SharePoint inputs and dispatches the selected action through
//! the Composio toolset.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use serde_json::{json, Map, Value};
use tracing::{error, info, instrument};

use super::base::{ComposioComponent, BASE_INPUTS};
use crate::actions::{self, ActionDescriptor};
use crate::build_config::BuildConfig;
use crate::config::{ComposioConfig, DEFAULT_ENTITY_ID};
use crate::error::{Result, SharePointError};
use crate::fields::{FieldSpec, FieldValue};
use crate::result::ExecutionResult;
use crate::selection::ActionSelection;
use crate::toolset::{ComposioToolsetFactory, Params, ToolsetFactory};

pub const DISPLAY_NAME: &str = "SharePoint";
pub const NAME: &str = "SharePointAPI";
pub const ICON: &str = "SharePoint";
pub const DOCUMENTATION: &str = "https://docs.composio.dev/tools/share-point";
pub const APP_NAME: &str = "sharepoint";

/// Action fields, grouped by the action that introduces them
pub const SHAREPOINT_INPUTS: &[FieldSpec] = &[
    // Folder creation
    FieldSpec::text(
        "document_library",
        "Document Library",
        "Name of the document library (default: 'Shared Documents')",
        false,
    ),
    FieldSpec::text("folder_name", "Folder Name", "Name of the folder to create", true),
    FieldSpec::text(
        "relative_path",
        "Relative Path",
        "Relative path where the folder should be created",
        false,
    ),
    // List creation
    FieldSpec::text("description", "Description", "Description for the new list", false),
    FieldSpec::text("name", "List Name", "Name of the list to create", true),
    FieldSpec::text("template", "Template", "Template type for the list", true),
    // List item creation
    FieldSpec::nested_dict(
        "item_properties",
        "Item Properties",
        "Properties for the item to be created",
        true,
    ),
    FieldSpec::text("list_name", "List Name", "Name of the list to add the item to", true),
    // User management
    FieldSpec::text("email", "Email", "Email address of the user", true),
    FieldSpec::text("login_name", "Login Name", "Login name of the user", true),
    FieldSpec::text("title", "Title", "Title of the user", true),
];

type FieldGetter = fn(&SharePointComponent) -> Option<FieldValue>;

fn text(value: &Option<String>) -> Option<FieldValue> {
    value.clone().map(FieldValue::Text)
}

/// Name -> accessor for every action field
fn field_getters() -> HashMap<&'static str, FieldGetter> {
    let mut getters: HashMap<&'static str, FieldGetter> = HashMap::new();
    getters.insert("document_library", |c| text(&c.document_library));
    getters.insert("folder_name", |c| text(&c.folder_name));
    getters.insert("relative_path", |c| text(&c.relative_path));
    getters.insert("description", |c| text(&c.description));
    getters.insert("name", |c| text(&c.name));
    getters.insert("template", |c| text(&c.template));
    getters.insert("item_properties", |c| {
        c.item_properties.clone().map(FieldValue::Dict)
    });
    getters.insert("list_name", |c| text(&c.list_name));
    getters.insert("email", |c| text(&c.email));
    getters.insert("login_name", |c| text(&c.login_name));
    getters.insert("title", |c| text(&c.title));
    getters
}

/// SharePoint node state.
///
/// Public fields are written by the UI layer between executions and only read
/// during [`SharePointComponent::execute_action`].
pub struct SharePointComponent {
    pub api_key: String,
    pub entity_id: String,
    pub action: ActionSelection,

    pub document_library: Option<String>,
    pub folder_name: Option<String>,
    pub relative_path: Option<String>,
    pub description: Option<String>,
    pub name: Option<String>,
    pub template: Option<String>,
    pub item_properties: Option<Map<String, Value>>,
    pub list_name: Option<String>,
    pub email: Option<String>,
    pub login_name: Option<String>,
    pub title: Option<String>,

    toolset_factory: Arc<dyn ToolsetFactory>,
    getters: HashMap<&'static str, FieldGetter>,
    default_tools: BTreeSet<&'static str>,
}

impl SharePointComponent {
    /// Node talking to the Composio API described by `config`
    pub fn new(config: ComposioConfig) -> Self {
        let mut component =
            Self::with_toolset_factory(Arc::new(ComposioToolsetFactory::new(config.clone(), APP_NAME)));
        component.api_key = config.api_key.unwrap_or_default();
        component.entity_id = config.entity_id;
        component
    }

    /// Node using a caller-supplied toolset factory (mocks, proxies)
    pub fn with_toolset_factory(toolset_factory: Arc<dyn ToolsetFactory>) -> Self {
        let mut component = Self {
            api_key: String::new(),
            entity_id: DEFAULT_ENTITY_ID.to_string(),
            action: ActionSelection::Unset,
            document_library: None,
            folder_name: None,
            relative_path: None,
            description: None,
            name: None,
            template: None,
            item_properties: None,
            list_name: None,
            email: None,
            login_name: None,
            title: None,
            toolset_factory,
            getters: field_getters(),
            default_tools: BTreeSet::new(),
        };
        component.set_default_tools();
        component
    }

    /// Base inputs followed by the SharePoint action fields
    pub fn inputs() -> Vec<FieldSpec> {
        BASE_INPUTS
            .iter()
            .chain(SHAREPOINT_INPUTS.iter())
            .cloned()
            .collect()
    }

    /// Read one action field by name
    pub fn field(&self, name: &str) -> Result<Option<FieldValue>> {
        let getter = self
            .getters
            .get(name)
            .ok_or_else(|| SharePointError::UnknownField {
                field: name.to_string(),
            })?;
        Ok(getter(self))
    }

    /// Write one action field by name (UI layer / node files)
    pub fn set_field(&mut self, name: &str, value: FieldValue) -> Result<()> {
        if name == "item_properties" {
            return match value {
                FieldValue::Dict(map) => {
                    self.item_properties = Some(map);
                    Ok(())
                }
                FieldValue::Text(_) => Err(SharePointError::FieldType {
                    field: name.to_string(),
                    expected: "a mapping",
                }),
            };
        }

        let slot = match name {
            "document_library" => &mut self.document_library,
            "folder_name" => &mut self.folder_name,
            "relative_path" => &mut self.relative_path,
            "description" => &mut self.description,
            "name" => &mut self.name,
            "template" => &mut self.template,
            "list_name" => &mut self.list_name,
            "email" => &mut self.email,
            "login_name" => &mut self.login_name,
            "title" => &mut self.title,
            _ => {
                return Err(SharePointError::UnknownField {
                    field: name.to_string(),
                })
            }
        };

        match value {
            FieldValue::Text(text) => {
                *slot = Some(text);
                Ok(())
            }
            FieldValue::Dict(_) => Err(SharePointError::FieldType {
                field: name.to_string(),
                expected: "text",
            }),
        }
    }

    /// Parameters for `action`: every declared field that holds a value
    pub fn build_params(&self, action: &ActionDescriptor) -> Result<Params> {
        let mut params = Params::new();
        for &field in action.required_fields {
            match self.field(field)? {
                Some(value) if !value.is_unset() => {
                    params.insert(field.to_string(), value.into_json());
                }
                _ => {}
            }
        }
        Ok(params)
    }

    /// Run the selected action once.
    ///
    /// Flagged failures come back as [`ExecutionResult::Failure`]; everything
    /// else that goes wrong is raised as [`SharePointError::ActionFailed`].
    #[instrument(skip(self), fields(app = APP_NAME, action = %self.action))]
    pub async fn execute_action(&self) -> Result<ExecutionResult> {
        match self.dispatch().await {
            Ok(result) => Ok(result),
            Err(e) => {
                error!(code = e.code(), "Error executing action: {}", e);
                Err(SharePointError::ActionFailed {
                    display_name: self.action.to_string(),
                    source: Box::new(e),
                })
            }
        }
    }

    async fn dispatch(&self) -> Result<ExecutionResult> {
        let toolset = self.build_wrapper()?;
        let maps = self.build_action_maps();

        let display_name = self.action.to_string();
        let identifier = maps
            .resolve(&self.action)
            .ok_or_else(|| SharePointError::InvalidAction {
                display_name: display_name.clone(),
            })?;

        let handle = toolset.action(identifier)?;

        let descriptor = self
            .actions_data()
            .iter()
            .find(|action| action.identifier == identifier);
        let params = match descriptor {
            Some(descriptor) => self.build_params(descriptor)?,
            None => Params::new(),
        };

        info!(
            identifier,
            param_count = params.len(),
            "Executing SharePoint action"
        );

        let response = toolset.execute(&handle, params).await?;
        let result = ExecutionResult::from_response(response);

        if !result.is_success() {
            tracing::warn!(identifier, "SharePoint action reported failure");
        }

        Ok(result)
    }

    pub fn set_default_tools(&mut self) {
        self.default_tools = actions::DEFAULT_TOOLS.iter().copied().collect();
    }

    /// Identifiers used when the node runs without an explicit action
    pub fn default_tools(&self) -> &BTreeSet<&'static str> {
        &self.default_tools
    }

    /// Node description handed to the hosting platform
    pub fn schema() -> Value {
        json!({
            "display_name": DISPLAY_NAME,
            "name": NAME,
            "icon": ICON,
            "documentation": DOCUMENTATION,
            "app_name": APP_NAME,
            "inputs": Self::inputs(),
            "actions": actions::ACTIONS,
        })
    }

    /// Fresh build config seeded from [`Self::inputs`]
    pub fn initial_build_config() -> BuildConfig {
        BuildConfig::from_fields(&Self::inputs())
    }
}

impl ComposioComponent for SharePointComponent {
    fn app_name(&self) -> &'static str {
        APP_NAME
    }

    fn actions_data(&self) -> &'static [ActionDescriptor] {
        actions::ACTIONS
    }

    fn api_key(&self) -> &str {
        &self.api_key
    }

    fn entity_id(&self) -> &str {
        &self.entity_id
    }

    fn action(&self) -> &ActionSelection {
        &self.action
    }

    fn toolset_factory(&self) -> &dyn ToolsetFactory {
        self.toolset_factory.as_ref()
    }

    fn update_build_config(
        &self,
        build_config: BuildConfig,
        field_value: &Value,
        field_name: Option<&str>,
    ) -> BuildConfig {
        super::base::update_build_config(self, build_config, field_value, field_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toolset::MockToolset;
    use pretty_assertions::assert_eq;

    fn component() -> (SharePointComponent, MockToolset) {
        let mock = MockToolset::new();
        let mut component = SharePointComponent::with_toolset_factory(Arc::new(mock.clone()));
        component.api_key = "test_key".to_string();
        (component, mock)
    }

    #[test]
    fn test_every_action_field_has_an_input_and_getter() {
        let (component, _) = component();
        let input_names: Vec<_> = SHAREPOINT_INPUTS.iter().map(|f| f.name).collect();
        for field in actions::all_fields() {
            assert!(input_names.contains(field), "no input declared for {field}");
            assert!(component.field(field).is_ok(), "no getter for {field}");
        }
    }

    #[test]
    fn test_set_field_type_checks() {
        let (mut component, _) = component();
        component.set_field("email", "a@b.c".into()).unwrap();
        assert_eq!(component.email.as_deref(), Some("a@b.c"));

        let err = component.set_field("email", Map::new().into()).unwrap_err();
        assert_eq!(err.code(), "CSP-013");

        let err = component
            .set_field("item_properties", "not a map".into())
            .unwrap_err();
        assert_eq!(err.code(), "CSP-013");

        let err = component.set_field("site_id", "x".into()).unwrap_err();
        assert_eq!(err.code(), "CSP-012");
    }

    #[test]
    fn test_build_params_skips_unset_and_empty() {
        let (mut component, _) = component();
        component.document_library = Some(String::new());
        component.folder_name = Some("TestFolder".to_string());

        let params = component
            .build_params(actions::find(actions::CREATE_FOLDER).unwrap())
            .unwrap();
        assert_eq!(params.len(), 1);
        assert_eq!(params["folder_name"], json!("TestFolder"));
    }

    #[test]
    fn test_build_params_keeps_empty_dict() {
        let (mut component, _) = component();
        component.item_properties = Some(Map::new());

        let params = component
            .build_params(actions::find(actions::CREATE_LIST_ITEM).unwrap())
            .unwrap();
        assert_eq!(params["item_properties"], json!({}));
    }

    #[test]
    fn test_default_tools_set_at_construction() {
        let (component, _) = component();
        let tools: Vec<_> = component.default_tools().iter().copied().collect();
        assert_eq!(tools, vec![actions::CREATE_USER, actions::FIND_USER]);
    }

    #[tokio::test]
    async fn test_unset_selection_is_invalid_action() {
        let (component, mock) = component();
        let err = component.execute_action().await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to execute None: Invalid action: None"
        );
        assert!(mock.calls().is_empty());
    }

    #[test]
    fn test_schema_metadata() {
        let schema = SharePointComponent::schema();
        assert_eq!(schema["display_name"], "SharePoint");
        assert_eq!(schema["app_name"], "sharepoint");
        assert_eq!(schema["inputs"].as_array().unwrap().len(), 15);
        assert_eq!(schema["actions"].as_array().unwrap().len(), 6);
    }
}

//! Component document schema
//!
//! Data-only model of a DSC component description. Optional values are omitted when unset
//! and empty blocks (services, operations, parameters, faults) are never serialized.

use serde::{Deserialize, Serialize};

/// Maximum length of a configuration parameter name
pub const MAX_CONFIG_PARAM_NAME_LEN: usize = 100;

/// Root of a component description
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bootstrap_class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lifecycle_class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_path: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub services: Vec<Service>,
}

impl Component {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the component-level scalars, without any services
    pub fn scalars_only(&self) -> Self {
        Self {
            services: Vec::new(),
            ..self.clone()
        }
    }

    pub fn service(&self, name: &str) -> Option<&Service> {
        self.services.iter().find(|s| s.name == name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub name: String,
    pub implementation_class: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub small_icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub large_icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub factory_method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_processing_strategy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_deploy: Option<AutoDeploy>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub operations: Vec<Operation>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub config_params: Vec<ConfigParam>,
}

impl Service {
    pub fn operation(&self, name: &str) -> Option<&Operation> {
        self.operations.iter().find(|o| o.name == name)
    }

    pub fn config_param(&self, name: &str) -> Option<&ConfigParam> {
        self.config_params.iter().find(|c| c.name == name)
    }
}

/// Default deployment category and version of a service
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoDeploy {
    pub service_id: String,
    pub category_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub major_version: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minor_version: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    pub name: String,
    /// Dispatch method, only present when it differs from `name`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub small_icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub large_icon: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub inputs: Vec<Parameter>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub outputs: Vec<Parameter>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub faults: Vec<Fault>,
}

impl Operation {
    /// Method invoked for this operation
    pub fn dispatch_method(&self) -> &str {
        self.method.as_deref().unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigParam {
    pub name: String,
    /// Untruncated property name, only set when `name` had to be truncated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property: Option<String>,
    #[serde(rename = "type")]
    pub type_name: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

impl ConfigParam {
    /// Sets `name` from a property name, truncating long names and keeping the original
    pub fn set_property_name(&mut self, property_name: &str) {
        if property_name.chars().count() > MAX_CONFIG_PARAM_NAME_LEN {
            self.property = Some(property_name.to_string());
            self.name = property_name
                .chars()
                .take(MAX_CONFIG_PARAM_NAME_LEN)
                .collect();
        } else {
            self.property = None;
            self.name = property_name.to_string();
        }
    }
}

/// Input or output parameter of an operation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fault {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncates_long_property_names() {
        let long = "a".repeat(105);
        let mut param = ConfigParam::default();
        param.set_property_name(&long);

        assert_eq!(param.name, "a".repeat(100));
        assert_eq!(param.property.as_deref(), Some(long.as_str()));
    }

    #[test]
    fn test_short_property_names_leave_property_unset() {
        let exact = "b".repeat(100);
        let mut param = ConfigParam::default();
        param.set_property_name(&exact);

        assert_eq!(param.name, exact);
        assert!(param.property.is_none());
    }

    #[test]
    fn test_empty_blocks_are_not_serialized() {
        let component = Component {
            id: Some("my.component".to_string()),
            services: vec![Service {
                name: "Svc".to_string(),
                implementation_class: "pckg.Svc".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        };

        let json = serde_json::to_value(&component).unwrap();
        assert!(json.get("version").is_none());
        let service = &json["services"][0];
        assert!(service.get("operations").is_none());
        assert!(service.get("configParams").is_none());
        assert_eq!(service["implementationClass"], "pckg.Svc");
    }

    #[test]
    fn test_component_without_services_omits_block() {
        let json = serde_json::to_value(Component::new()).unwrap();
        assert!(json.get("services").is_none());
    }

    #[test]
    fn test_scalars_only_drops_services() {
        let component = Component {
            id: Some("c".to_string()),
            version: Some("1.0".to_string()),
            services: vec![Service::default()],
            ..Default::default()
        };
        let scalars = component.scalars_only();
        assert_eq!(scalars.id.as_deref(), Some("c"));
        assert!(scalars.services.is_empty());
    }

    #[test]
    fn test_dispatch_method() {
        let mut op = Operation {
            name: "opWithParamAsInt".to_string(),
            ..Default::default()
        };
        assert_eq!(op.dispatch_method(), "opWithParamAsInt");
        op.method = Some("op".to_string());
        assert_eq!(op.dispatch_method(), "op");
    }
}

//! Typed views over annotation-like marker metadata
//!
//! Each marker is read once from a descriptor's metadata bag into a plain struct. Missing
//! attributes take the defaults the markers declare.

use crate::descriptor::{AnnotationValues, MetadataValue};
use std::fmt;
use std::str::FromStr;

pub const SERVICE_MARKER: &str = "Service";
pub const OPERATION_MARKER: &str = "Operation";
pub const CONFIG_PARAM_MARKER: &str = "ConfigParam";
pub const FACTORY_METHOD_MARKER: &str = "FactoryMethod";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestProcessingStrategy {
    None,
    SingleInstance,
    InstancePerRequest,
    PooledInstance,
}

impl RequestProcessingStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::SingleInstance => "SINGLE_INSTANCE",
            Self::InstancePerRequest => "INSTANCE_PER_REQUEST",
            Self::PooledInstance => "POOLED_INSTANCE",
        }
    }
}

impl FromStr for RequestProcessingStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Accept `RequestProcessingStrategy.POOLED_INSTANCE` as written in source
        let constant = s.trim().rsplit('.').next().unwrap_or_default();
        match constant {
            "NONE" => Ok(Self::None),
            "SINGLE_INSTANCE" => Ok(Self::SingleInstance),
            "INSTANCE_PER_REQUEST" => Ok(Self::InstancePerRequest),
            "POOLED_INSTANCE" => Ok(Self::PooledInstance),
            _ => Err(s.to_string()),
        }
    }
}

impl fmt::Display for RequestProcessingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One version number as written in metadata
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum VersionField {
    #[default]
    Unset,
    Value(i32),
    /// Raw text that is not an integer
    Malformed(String),
}

impl VersionField {
    /// Marker attribute semantics: negative numbers mean unset
    fn from_metadata(value: Option<&MetadataValue>) -> Self {
        match value {
            None => Self::Unset,
            Some(MetadataValue::Int(n)) => match i32::try_from(*n) {
                Ok(n) if n < 0 => Self::Unset,
                Ok(n) => Self::Value(n),
                Err(_) => Self::Malformed(n.to_string()),
            },
            Some(MetadataValue::Text(text)) => match text.trim().parse::<i32>() {
                Ok(n) if n < 0 => Self::Unset,
                Ok(n) => Self::Value(n),
                Err(_) => Self::Malformed(text.clone()),
            },
            Some(MetadataValue::Float(f)) => Self::Malformed(f.to_string()),
            Some(MetadataValue::Bool(b)) => Self::Malformed(b.to_string()),
            Some(MetadataValue::List(_)) => Self::Malformed("[...]".to_string()),
            Some(MetadataValue::Nested(_)) => Self::Malformed("{...}".to_string()),
        }
    }

    /// Doc tag semantics: any integer is taken as written
    pub fn from_tag_text(text: &str) -> Self {
        match text.trim().parse::<i32>() {
            Ok(n) => Self::Value(n),
            Err(_) => Self::Malformed(text.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VersionMarker {
    pub major: VersionField,
    pub minor: VersionField,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceMarker {
    pub small_icon: Option<String>,
    pub large_icon: Option<String>,
    pub auto_deploy: bool,
    pub version: VersionMarker,
    pub category_id: Option<String>,
    /// Raw strategy constant, parsed when the service is populated
    pub request_processing_strategy: Option<String>,
}

impl ServiceMarker {
    pub fn from_values(values: &AnnotationValues) -> Self {
        let version = values
            .get("version")
            .and_then(MetadataValue::as_nested)
            .map(|nested| VersionMarker {
                major: VersionField::from_metadata(nested.get("major")),
                minor: VersionField::from_metadata(nested.get("minor")),
            })
            .unwrap_or_default();

        Self {
            small_icon: text(values, "smallIcon"),
            large_icon: text(values, "largeIcon"),
            auto_deploy: flag(values, "autoDeploy", true),
            version,
            category_id: text(values, "categoryId"),
            request_processing_strategy: text(values, "requestProcessingStrategy"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OperationMarker {
    pub name: Option<String>,
    pub output_name: Option<String>,
    pub small_icon: Option<String>,
    pub large_icon: Option<String>,
}

impl OperationMarker {
    pub fn from_values(values: &AnnotationValues) -> Self {
        Self {
            name: text(values, "name"),
            output_name: text(values, "outputName"),
            small_icon: text(values, "smallIcon"),
            large_icon: text(values, "largeIcon"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConfigParamMarker {
    pub required: bool,
    pub default_value: Option<String>,
}

impl ConfigParamMarker {
    pub fn from_values(values: &AnnotationValues) -> Self {
        Self {
            required: flag(values, "required", false),
            default_value: text(values, "defaultValue"),
        }
    }
}

/// Non-blank text attribute
fn text(values: &AnnotationValues, key: &str) -> Option<String> {
    values
        .get(key)
        .and_then(MetadataValue::as_text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn flag(values: &AnnotationValues, key: &str, default: bool) -> bool {
    match values.get(key) {
        Some(MetadataValue::Bool(b)) => *b,
        Some(MetadataValue::Text(s)) => s.trim().parse().unwrap_or(default),
        _ => default,
    }
}

//! Extraction strategies
//!
//! A strategy decides which classes and members take part in a component and fills the
//! document nodes from their metadata. Two variants are built in: [`AnnotationStrategy`]
//! reads annotation-like markers, [`DocletStrategy`] reads doc tags and accepts every eligible
//! class. Every `populate_*` method returns whether the node should be kept.

mod annotation;
mod doclet;
pub mod markers;

pub use annotation::AnnotationStrategy;
pub use doclet::DocletStrategy;

use crate::config::ConfigError;
use crate::descriptor::{
    ClassDescriptor, DescriptorProvider, MemberDescriptor, ParameterDescriptor, Tagged, TypeRef,
};
use crate::error::GenerationError;
use crate::naming::{first_sentence_of, generate_title, tag_comment_map};
use crate::output::schema::{AutoDeploy, Component, ConfigParam, Fault, Operation, Parameter, Service};
use crate::pipeline::{Diagnostics, MetadataWarning};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Interface a class implements to bootstrap the component
pub const BOOTSTRAP_INTERFACE: &str = "com.adobe.idp.dsc.component.Bootstrap";

/// Interface a class implements to receive component lifecycle callbacks
pub const LIFECYCLE_INTERFACE: &str = "com.adobe.idp.dsc.component.LifeCycle";

/// Output parameter name used when none is specified
pub const DEFAULT_OUTPUT_PARAM_NAME: &str = "out";

pub const PARAM_TAG: &str = "param";
pub const RETURN_TAG: &str = "return";
pub const THROWS_TAG: &str = "throws";

pub trait ExtractionStrategy {
    /// Name used to select the strategy from configuration
    fn name(&self) -> &'static str;

    /// Whether the class becomes a service; fails when a marked class is not eligible
    fn is_service(&self, class: &ClassDescriptor) -> Result<bool, GenerationError>;

    fn is_operation(&self, member: &MemberDescriptor) -> bool;

    fn is_config_parameter(&self, member: &MemberDescriptor) -> bool {
        member.is_property_mutator()
    }

    /// Sets component-level scalars derived from the whole source tree
    fn populate_component(&self, component: &mut Component, provider: &dyn DescriptorProvider) {
        if let Some(class) = provider.lookup_type_implementing(BOOTSTRAP_INTERFACE) {
            debug!(class = %class.qualified_name, "Found bootstrap class");
            component.bootstrap_class = Some(class.qualified_name.clone());
        }
        if let Some(class) = provider.lookup_type_implementing(LIFECYCLE_INTERFACE) {
            debug!(class = %class.qualified_name, "Found lifecycle class");
            component.lifecycle_class = Some(class.qualified_name.clone());
        }
    }

    fn populate_service(
        &self,
        service: &mut Service,
        class: &ClassDescriptor,
        diagnostics: &mut Diagnostics,
    ) -> Result<bool, GenerationError>;

    fn populate_auto_deploy(
        &self,
        component: &Component,
        auto_deploy: &mut AutoDeploy,
        class: &ClassDescriptor,
        diagnostics: &mut Diagnostics,
    ) -> bool;

    /// Fills name, dispatch method and title, resolving overloads against `existing`
    fn populate_operation(
        &self,
        operation: &mut Operation,
        class: &ClassDescriptor,
        member: &MemberDescriptor,
        existing: &[String],
        diagnostics: &mut Diagnostics,
    ) -> Result<bool, GenerationError>;

    fn populate_input_parameter(
        &self,
        parameter: &mut Parameter,
        member: &MemberDescriptor,
        input: &ParameterDescriptor,
    ) -> bool {
        let comment = tag_comment_map(member, PARAM_TAG)
            .get(&input.name)
            .map(str::to_string);
        parameter.name = input.name.clone();
        parameter.type_name = input.type_ref.qualified_name().to_string();
        parameter.title = generate_title(&input.name);
        parameter.hint = first_sentence_of(comment.as_deref());
        parameter.description = comment;
        true
    }

    /// Returns false for void members
    fn populate_output_parameter(&self, parameter: &mut Parameter, member: &MemberDescriptor) -> bool;

    fn populate_fault(&self, fault: &mut Fault, member: &MemberDescriptor, fault_type: &TypeRef) -> bool {
        let name = fault_type.simple_name().to_string();
        let comment = tag_comment_map(member, THROWS_TAG)
            .get(&name)
            .map(str::to_string);
        fault.type_name = fault_type.qualified_name().to_string();
        fault.title = generate_title(&name);
        fault.hint = first_sentence_of(comment.as_deref());
        fault.description = comment;
        fault.name = name;
        true
    }

    fn populate_config_parameter(&self, config: &mut ConfigParam, member: &MemberDescriptor) -> bool;
}

/// Validates the factory method among `candidates` and returns its name
///
/// The first candidate in declaration order wins; the rest are reported and ignored.
pub(crate) fn resolve_factory_method(
    class: &ClassDescriptor,
    candidates: &[&MemberDescriptor],
    diagnostics: &mut Diagnostics,
) -> Result<Option<String>, GenerationError> {
    let Some((factory, ignored)) = candidates.split_first() else {
        return Ok(None);
    };

    for other in ignored {
        diagnostics.record(MetadataWarning::MultipleFactoryMethods {
            class: class.qualified_name.clone(),
            used: factory.name.clone(),
            ignored: other.name.clone(),
        });
    }

    let violation = if !factory.is_public() {
        Some("method is not public")
    } else if !factory.is_static {
        Some("method is not static")
    } else if factory.is_abstract {
        Some("method is abstract")
    } else if factory.is_constructor {
        Some("method is a constructor")
    } else if factory.is_property_accessor() || factory.is_property_mutator() {
        Some("method is a property accessor or mutator")
    } else {
        None
    };

    match violation {
        Some(reason) => Err(GenerationError::InvalidFactoryMethod {
            method: factory.name.clone(),
            class: class.qualified_name.clone(),
            reason: reason.to_string(),
        }),
        None => Ok(Some(factory.name.clone())),
    }
}

/// Operation eligibility shared by both strategies, minus the factory-method check
pub(crate) fn is_operation_shape(member: &MemberDescriptor) -> bool {
    member.is_public()
        && !member.is_constructor
        && !member.is_property_accessor()
        && !member.is_property_mutator()
}

/// Name, implementation class, hint and description of a service
pub(crate) fn fill_service_identity(service: &mut Service, class: &ClassDescriptor) {
    service.name = class.simple_name().to_string();
    service.implementation_class = class.qualified_name.clone();
    service.hint = first_sentence_of(class.doc_comment());
    service.description = class.doc_comment().map(str::to_string);
}

/// Name, property, type and title of a configuration parameter
pub(crate) fn fill_config_identity(config: &mut ConfigParam, member: &MemberDescriptor) -> bool {
    let (Some(property_name), Some(property_type)) = (member.property_name(), member.property_type())
    else {
        return false;
    };
    config.set_property_name(&property_name);
    config.type_name = property_type.qualified_name().to_string();
    config.title = generate_title(&config.name);
    true
}

/// Reports `@param` and `@throws` values that cannot be split into key and comment
pub(crate) fn report_malformed_tag_comments(
    class: &ClassDescriptor,
    member: &MemberDescriptor,
    diagnostics: &mut Diagnostics,
) {
    for tag in [PARAM_TAG, THROWS_TAG] {
        for value in tag_comment_map(member, tag).malformed() {
            diagnostics.record(MetadataWarning::MalformedTagComment {
                class: class.qualified_name.clone(),
                member: member.name.clone(),
                tag: tag.to_string(),
                value: value.clone(),
            });
        }
    }
}

/// Category of an auto-deployed service: explicit, then configured, then the component id
pub(crate) fn category_for(
    explicit: Option<&str>,
    configured: Option<&str>,
    component: &Component,
) -> String {
    explicit
        .or(configured)
        .or(component.id.as_deref())
        .unwrap_or_default()
        .to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StrategyKind {
    #[default]
    Annotations,
    Doclets,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 2] = [StrategyKind::Annotations, StrategyKind::Doclets];

    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyKind::Annotations => "annotations",
            StrategyKind::Doclets => "doclets",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            StrategyKind::Annotations => {
                "Services, operations and config parameters declared with @Service/@Operation/@ConfigParam markers"
            }
            StrategyKind::Doclets => {
                "Every public concrete class is a service; metadata comes from javadoc tags"
            }
        }
    }

    /// Builds the strategy; `category` is the configured auto-deploy category
    pub fn create(&self, category: Option<String>) -> Box<dyn ExtractionStrategy> {
        match self {
            StrategyKind::Annotations => Box::new(AnnotationStrategy::new(category)),
            StrategyKind::Doclets => Box::new(DocletStrategy::new(category)),
        }
    }
}

impl FromStr for StrategyKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "annotations" => Ok(StrategyKind::Annotations),
            "doclets" => Ok(StrategyKind::Doclets),
            _ => Err(ConfigError::InvalidStrategy(s.to_string())),
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

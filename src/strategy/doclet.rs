use super::markers::VersionField;
use super::{
    category_for, fill_config_identity, fill_service_identity, is_operation_shape,
    report_malformed_tag_comments, resolve_factory_method, ExtractionStrategy,
    DEFAULT_OUTPUT_PARAM_NAME, RETURN_TAG,
};
use crate::descriptor::{ClassDescriptor, MemberDescriptor, Tagged};
use crate::disambiguation;
use crate::error::GenerationError;
use crate::output::schema::{AutoDeploy, Component, ConfigParam, Operation, Parameter, Service};
use crate::pipeline::{Diagnostics, MetadataWarning};

const MAJOR_TAG: &str = "major";
const MINOR_TAG: &str = "minor";
const SMALL_ICON_TAG: &str = "smallIcon";
const LARGE_ICON_TAG: &str = "largeIcon";
const FACTORY_METHOD_TAG: &str = "factoryMethod";
const OUTPUT_PARAM_NAME_TAG: &str = "outputParamName";
const DEFAULT_TAG: &str = "default";
const REQUIRED_TAG: &str = "required";
const OPERATION_NAME_TAG: &str = "operationName";

/// Extraction driven by javadoc tags
///
/// Every public, concrete, non-throwable class is taken as a service. Hints are the full doc
/// text rather than its first sentence.
#[derive(Debug, Clone, Default)]
pub struct DocletStrategy {
    category: Option<String>,
}

impl DocletStrategy {
    pub fn new(category: Option<String>) -> Self {
        Self { category }
    }

    fn version(
        class: &ClassDescriptor,
        tag: &str,
        diagnostics: &mut Diagnostics,
    ) -> Option<i32> {
        let raw = &class.tag(tag)?.value;
        match VersionField::from_tag_text(raw) {
            VersionField::Value(n) => Some(n),
            VersionField::Unset => None,
            VersionField::Malformed(value) => {
                diagnostics.record(MetadataWarning::MalformedVersion {
                    class: class.qualified_name.clone(),
                    field: tag.to_string(),
                    value,
                });
                None
            }
        }
    }
}

impl ExtractionStrategy for DocletStrategy {
    fn name(&self) -> &'static str {
        "doclets"
    }

    fn is_service(&self, class: &ClassDescriptor) -> Result<bool, GenerationError> {
        Ok(class.eligibility_violation().is_none())
    }

    fn is_operation(&self, member: &MemberDescriptor) -> bool {
        is_operation_shape(member) && member.tag(FACTORY_METHOD_TAG).is_none()
    }

    fn populate_service(
        &self,
        service: &mut Service,
        class: &ClassDescriptor,
        diagnostics: &mut Diagnostics,
    ) -> Result<bool, GenerationError> {
        fill_service_identity(service, class);
        service.small_icon = class.tag_value(SMALL_ICON_TAG).map(str::to_string);
        service.large_icon = class.tag_value(LARGE_ICON_TAG).map(str::to_string);

        let candidates: Vec<&MemberDescriptor> = class
            .members
            .iter()
            .filter(|m| m.tag(FACTORY_METHOD_TAG).is_some())
            .collect();
        service.factory_method = resolve_factory_method(class, &candidates, diagnostics)?;
        Ok(true)
    }

    fn populate_auto_deploy(
        &self,
        component: &Component,
        auto_deploy: &mut AutoDeploy,
        class: &ClassDescriptor,
        diagnostics: &mut Diagnostics,
    ) -> bool {
        auto_deploy.service_id = class.simple_name().to_string();
        auto_deploy.category_id = category_for(None, self.category.as_deref(), component);
        auto_deploy.major_version = Self::version(class, MAJOR_TAG, diagnostics);
        auto_deploy.minor_version = Self::version(class, MINOR_TAG, diagnostics);
        true
    }

    fn populate_operation(
        &self,
        operation: &mut Operation,
        class: &ClassDescriptor,
        member: &MemberDescriptor,
        existing: &[String],
        diagnostics: &mut Diagnostics,
    ) -> Result<bool, GenerationError> {
        let resolved = disambiguation::resolve(
            existing,
            &class.qualified_name,
            member,
            member.tag_value(OPERATION_NAME_TAG),
        )?;
        operation.name = resolved.name;
        operation.method = resolved.method;
        operation.title = resolved.title;
        operation.small_icon = member.tag_value(SMALL_ICON_TAG).map(str::to_string);
        operation.large_icon = member.tag_value(LARGE_ICON_TAG).map(str::to_string);
        operation.hint = member.doc_comment().map(str::to_string);

        report_malformed_tag_comments(class, member, diagnostics);
        Ok(true)
    }

    fn populate_output_parameter(&self, parameter: &mut Parameter, member: &MemberDescriptor) -> bool {
        let Some(return_type) = &member.return_type else {
            return false;
        };
        let name = member
            .tag_value(OUTPUT_PARAM_NAME_TAG)
            .unwrap_or(DEFAULT_OUTPUT_PARAM_NAME)
            .to_string();

        parameter.type_name = return_type.qualified_name().to_string();
        parameter.title = name.clone();
        parameter.name = name;
        parameter.hint = member.tag(RETURN_TAG).map(|t| t.value.clone());
        true
    }

    fn populate_config_parameter(&self, config: &mut ConfigParam, member: &MemberDescriptor) -> bool {
        if !fill_config_identity(config, member) {
            return false;
        }
        config.hint = member.doc_comment().map(str::to_string);
        if member.tag(REQUIRED_TAG).is_some() {
            config.required = Some(true);
        }
        config.default_value = member.tag_value(DEFAULT_TAG).map(str::to_string);
        true
    }
}

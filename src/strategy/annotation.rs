use super::markers::{
    ConfigParamMarker, OperationMarker, RequestProcessingStrategy, ServiceMarker, VersionField,
    CONFIG_PARAM_MARKER, FACTORY_METHOD_MARKER, OPERATION_MARKER, SERVICE_MARKER,
};
use super::{
    category_for, fill_config_identity, fill_service_identity, is_operation_shape,
    report_malformed_tag_comments, resolve_factory_method, ExtractionStrategy,
    DEFAULT_OUTPUT_PARAM_NAME, RETURN_TAG,
};
use crate::descriptor::{ClassDescriptor, MemberDescriptor, Tagged};
use crate::disambiguation;
use crate::error::GenerationError;
use crate::naming::first_sentence_of;
use crate::output::schema::{AutoDeploy, Component, ConfigParam, Operation, Parameter, Service};
use crate::pipeline::{Diagnostics, MetadataWarning};

/// Extraction driven by `@Service`, `@Operation`, `@ConfigParam` and `@FactoryMethod` markers
#[derive(Debug, Clone, Default)]
pub struct AnnotationStrategy {
    category: Option<String>,
}

impl AnnotationStrategy {
    pub fn new(category: Option<String>) -> Self {
        Self { category }
    }

    fn service_marker(class: &ClassDescriptor) -> ServiceMarker {
        class
            .annotation(SERVICE_MARKER)
            .map(ServiceMarker::from_values)
            .unwrap_or_else(|| ServiceMarker::from_values(&Default::default()))
    }

    fn operation_marker(member: &MemberDescriptor) -> Option<OperationMarker> {
        member
            .annotation(OPERATION_MARKER)
            .map(OperationMarker::from_values)
    }
}

fn record_version(
    field: &VersionField,
    name: &str,
    class: &ClassDescriptor,
    diagnostics: &mut Diagnostics,
) -> Option<i32> {
    match field {
        VersionField::Unset => None,
        VersionField::Value(n) => Some(*n),
        VersionField::Malformed(value) => {
            diagnostics.record(MetadataWarning::MalformedVersion {
                class: class.qualified_name.clone(),
                field: name.to_string(),
                value: value.clone(),
            });
            None
        }
    }
}

impl ExtractionStrategy for AnnotationStrategy {
    fn name(&self) -> &'static str {
        "annotations"
    }

    fn is_service(&self, class: &ClassDescriptor) -> Result<bool, GenerationError> {
        if class.annotation(SERVICE_MARKER).is_none() {
            return Ok(false);
        }
        match class.eligibility_violation() {
            Some(reason) => Err(GenerationError::ServiceEligibility {
                class: class.qualified_name.clone(),
                reason: reason.to_string(),
            }),
            None => Ok(true),
        }
    }

    fn is_operation(&self, member: &MemberDescriptor) -> bool {
        is_operation_shape(member) && member.annotation(FACTORY_METHOD_MARKER).is_none()
    }

    fn populate_service(
        &self,
        service: &mut Service,
        class: &ClassDescriptor,
        diagnostics: &mut Diagnostics,
    ) -> Result<bool, GenerationError> {
        let marker = Self::service_marker(class);
        fill_service_identity(service, class);
        service.small_icon = marker.small_icon.clone();
        service.large_icon = marker.large_icon.clone();

        let candidates: Vec<&MemberDescriptor> = class
            .members
            .iter()
            .filter(|m| m.annotation(FACTORY_METHOD_MARKER).is_some())
            .collect();
        service.factory_method = resolve_factory_method(class, &candidates, diagnostics)?;

        service.request_processing_strategy = match marker.request_processing_strategy.as_deref() {
            None => None,
            Some(raw) => match raw.parse::<RequestProcessingStrategy>() {
                Ok(RequestProcessingStrategy::None) => None,
                Ok(strategy) => Some(strategy.to_string()),
                Err(value) => {
                    diagnostics.record(MetadataWarning::UnknownRequestStrategy {
                        class: class.qualified_name.clone(),
                        value,
                    });
                    None
                }
            },
        };
        Ok(true)
    }

    fn populate_auto_deploy(
        &self,
        component: &Component,
        auto_deploy: &mut AutoDeploy,
        class: &ClassDescriptor,
        diagnostics: &mut Diagnostics,
    ) -> bool {
        let marker = Self::service_marker(class);
        if !marker.auto_deploy {
            return false;
        }
        auto_deploy.service_id = class.simple_name().to_string();
        auto_deploy.category_id = category_for(
            marker.category_id.as_deref(),
            self.category.as_deref(),
            component,
        );
        auto_deploy.major_version = record_version(&marker.version.major, "major", class, diagnostics);
        auto_deploy.minor_version = record_version(&marker.version.minor, "minor", class, diagnostics);
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
        let marker = Self::operation_marker(member).unwrap_or_default();
        let resolved = disambiguation::resolve(
            existing,
            &class.qualified_name,
            member,
            marker.name.as_deref(),
        )?;
        operation.name = resolved.name;
        operation.method = resolved.method;
        operation.title = resolved.title;
        operation.small_icon = marker.small_icon;
        operation.large_icon = marker.large_icon;
        operation.hint = first_sentence_of(member.doc_comment());
        operation.description = member.doc_comment().map(str::to_string);

        report_malformed_tag_comments(class, member, diagnostics);
        Ok(true)
    }

    fn populate_output_parameter(&self, parameter: &mut Parameter, member: &MemberDescriptor) -> bool {
        let Some(return_type) = &member.return_type else {
            return false;
        };
        let name = Self::operation_marker(member)
            .and_then(|m| m.output_name)
            .unwrap_or_else(|| DEFAULT_OUTPUT_PARAM_NAME.to_string());

        parameter.type_name = return_type.qualified_name().to_string();
        parameter.title = name.clone();
        parameter.name = name;
        if let Some(tag) = member.tag(RETURN_TAG) {
            parameter.hint = first_sentence_of(Some(tag.value.as_str()));
            parameter.description = Some(tag.value.clone());
        }
        true
    }

    fn populate_config_parameter(&self, config: &mut ConfigParam, member: &MemberDescriptor) -> bool {
        if !fill_config_identity(config, member) {
            return false;
        }
        config.hint = first_sentence_of(member.doc_comment());
        config.description = member.doc_comment().map(str::to_string);

        if let Some(values) = member.annotation(CONFIG_PARAM_MARKER) {
            let marker = ConfigParamMarker::from_values(values);
            config.required = Some(marker.required);
            config.default_value = marker.default_value;
        }
        true
    }
}

use super::diagnostics::{Diagnostics, MetadataWarning};
use crate::descriptor::{ClassDescriptor, DescriptorProvider};
use crate::error::GenerationError;
use crate::output::schema::{AutoDeploy, Component, ConfigParam, Fault, Operation, Parameter, Service};
use crate::progress::{LoggingHandler, ProgressEvent, ProgressHandler};
use crate::strategy::ExtractionStrategy;
use std::time::Instant;
use tracing::{debug, info};

/// Outcome of a successful run: the assembled component and every warning raised on the way
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    pub component: Component,
    pub warnings: Vec<MetadataWarning>,
}

/// Builds a component document from source descriptors with one extraction strategy
///
/// Services are always rebuilt from scratch; only the component-level scalars of a prior
/// document survive. A fatal error aborts the run without returning a partial document.
pub struct ComponentAssembler {
    progress_handler: Option<LoggingHandler>,
}

impl ComponentAssembler {
    pub fn new(progress_handler: Option<LoggingHandler>) -> Self {
        Self { progress_handler }
    }

    pub fn generate(
        &self,
        prior: Option<&Component>,
        strategy: &dyn ExtractionStrategy,
        provider: &dyn DescriptorProvider,
    ) -> Result<GenerationReport, GenerationError> {
        let start = Instant::now();
        let candidates = provider.list_service_candidates().len();
        info!(
            strategy = strategy.name(),
            candidates, "Starting component assembly"
        );
        self.emit(&ProgressEvent::Started {
            strategy: strategy.name().to_string(),
            candidates,
        });

        let mut diagnostics = Diagnostics::new();
        let component = match self.assemble(prior, strategy, provider, &mut diagnostics) {
            Ok(component) => component,
            Err(e) => {
                self.emit(&ProgressEvent::Failed {
                    error: e.to_string(),
                });
                return Err(e);
            }
        };

        info!(
            services = component.services.len(),
            warnings = diagnostics.len(),
            "Component assembly complete"
        );
        self.emit(&ProgressEvent::Completed {
            services: component.services.len(),
            warnings: diagnostics.len(),
            total_time: start.elapsed(),
        });

        Ok(GenerationReport {
            component,
            warnings: diagnostics.into_warnings(),
        })
    }

    fn assemble(
        &self,
        prior: Option<&Component>,
        strategy: &dyn ExtractionStrategy,
        provider: &dyn DescriptorProvider,
        diagnostics: &mut Diagnostics,
    ) -> Result<Component, GenerationError> {
        let mut component = prior.map(Component::scalars_only).unwrap_or_default();
        strategy.populate_component(&mut component, provider);

        let mut services = Vec::new();
        for class in provider.list_service_candidates() {
            if !strategy.is_service(class)? {
                continue;
            }

            let warnings_before = diagnostics.len();
            let service = self.build_service(&component, class, strategy, provider, diagnostics)?;
            for warning in &diagnostics.warnings()[warnings_before..] {
                self.emit(&ProgressEvent::Warning {
                    message: warning.to_string(),
                });
            }

            if let Some(service) = service {
                services.push(service);
            }
        }

        component.services = services;
        Ok(component)
    }

    fn build_service(
        &self,
        component: &Component,
        class: &ClassDescriptor,
        strategy: &dyn ExtractionStrategy,
        provider: &dyn DescriptorProvider,
        diagnostics: &mut Diagnostics,
    ) -> Result<Option<Service>, GenerationError> {
        self.emit(&ProgressEvent::ServiceStarted {
            class: class.qualified_name.clone(),
        });

        let mut service = Service::default();
        if !strategy.populate_service(&mut service, class, diagnostics)? {
            self.emit(&ProgressEvent::ServiceSkipped {
                class: class.qualified_name.clone(),
            });
            return Ok(None);
        }

        let mut auto_deploy = AutoDeploy::default();
        if strategy.populate_auto_deploy(component, &mut auto_deploy, class, diagnostics) {
            service.auto_deploy = Some(auto_deploy);
        }

        let members = provider.list_members(class);
        let mut operation_names: Vec<String> = Vec::new();
        for member in members.iter().filter(|m| strategy.is_operation(m)) {
            let mut operation = Operation::default();
            if !strategy.populate_operation(&mut operation, class, member, &operation_names, diagnostics)? {
                continue;
            }
            operation_names.push(operation.name.clone());

            for input in &member.parameters {
                let mut parameter = Parameter::default();
                if strategy.populate_input_parameter(&mut parameter, member, input) {
                    operation.inputs.push(parameter);
                }
            }
            for fault_type in &member.declared_fault_types {
                let mut fault = Fault::default();
                if strategy.populate_fault(&mut fault, member, fault_type) {
                    operation.faults.push(fault);
                }
            }
            let mut output = Parameter::default();
            if strategy.populate_output_parameter(&mut output, member) {
                operation.outputs.push(output);
            }

            debug!(
                service = %service.name,
                operation = %operation.name,
                method = operation.dispatch_method(),
                "Operation assembled"
            );
            service.operations.push(operation);
        }

        for member in members.iter().filter(|m| strategy.is_config_parameter(m)) {
            let mut config = ConfigParam::default();
            if strategy.populate_config_parameter(&mut config, member) {
                service.config_params.push(config);
            }
        }

        self.emit(&ProgressEvent::ServiceComplete {
            service: service.name.clone(),
            operations: service.operations.len(),
            config_params: service.config_params.len(),
        });
        Ok(Some(service))
    }

    fn emit(&self, event: &ProgressEvent) {
        if let Some(handler) = &self.progress_handler {
            handler.on_progress(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{AnnotationValues, MemberDescriptor, SourceTree, TypeRef};
    use crate::strategy::{AnnotationStrategy, DocletStrategy};

    fn overloaded_service() -> ClassDescriptor {
        ClassDescriptor::new("pckg.Overloads")
            .with_member(MemberDescriptor::new("op"))
            .with_member(
                MemberDescriptor::new("op")
                    .returning(TypeRef::new("java.lang.String"))
                    .with_parameter("param", TypeRef::new("java.lang.String")),
            )
            .with_member(
                MemberDescriptor::new("op")
                    .returning(TypeRef::new("java.lang.String"))
                    .with_parameter("param", TypeRef::new("int"))
                    .with_fault(TypeRef::new("java.io.IOException")),
            )
            .with_member(MemberDescriptor::new("setMode").with_parameter("mode", TypeRef::new("java.lang.String")))
            .with_member(MemberDescriptor::new("getMode").returning(TypeRef::new("java.lang.String")))
    }

    #[test]
    fn test_orchestrator_creation() {
        let assembler = ComponentAssembler::new(None);
        assert!(assembler.progress_handler.is_none());

        let assembler = ComponentAssembler::new(Some(LoggingHandler));
        assert!(assembler.progress_handler.is_some());
    }

    #[test]
    fn test_generate_overloads() {
        let tree = SourceTree::new(vec![overloaded_service()]);
        let report = ComponentAssembler::new(None)
            .generate(None, &DocletStrategy::default(), &tree)
            .unwrap();

        let service = &report.component.services[0];
        let names: Vec<_> = service.operations.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["op", "opWithParamAsString", "opWithParamAsInt"]);
        assert!(service.operations[0].outputs.is_empty());
        assert_eq!(service.operations[1].outputs.len(), 1);
        assert_eq!(service.operations[2].faults[0].name, "IOException");
        assert_eq!(service.config_params.len(), 1);
        assert_eq!(service.config_params[0].name, "mode");
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_generate_is_idempotent() {
        let tree = SourceTree::new(vec![
            overloaded_service(),
            ClassDescriptor::new("pckg.Another").with_member(MemberDescriptor::new("run")),
        ]);
        let assembler = ComponentAssembler::new(None);
        let strategy = DocletStrategy::default();

        let first = assembler.generate(None, &strategy, &tree).unwrap();
        let second = assembler.generate(None, &strategy, &tree).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.component.services[0].name, "Another");
    }

    #[test]
    fn test_prior_services_are_discarded() {
        let prior = Component {
            id: Some("prior.id".to_string()),
            version: Some("2.0".to_string()),
            services: vec![Service {
                name: "Stale".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        };
        let tree = SourceTree::new(vec![]);
        let report = ComponentAssembler::new(None)
            .generate(Some(&prior), &AnnotationStrategy::default(), &tree)
            .unwrap();

        assert_eq!(report.component.id.as_deref(), Some("prior.id"));
        assert_eq!(report.component.version.as_deref(), Some("2.0"));
        assert!(report.component.services.is_empty());
    }

    #[test]
    fn test_fatal_error_aborts_run() {
        let mut broken = ClassDescriptor::new("pckg.Broken")
            .with_annotation("Service", AnnotationValues::new());
        broken.is_interface = true;
        let tree = SourceTree::new(vec![
            ClassDescriptor::new("pckg.Alpha").with_annotation("Service", AnnotationValues::new()),
            broken,
        ]);

        let result = ComponentAssembler::new(Some(LoggingHandler)).generate(
            None,
            &AnnotationStrategy::default(),
            &tree,
        );
        assert!(matches!(result, Err(GenerationError::ServiceEligibility { .. })));
    }

    #[test]
    fn test_ambiguous_overload_aborts_run() {
        let service = overloaded_service().with_member(
            MemberDescriptor::new("op")
                .returning(TypeRef::new("long"))
                .with_parameter("param", TypeRef::new("java.lang.String")),
        );
        let tree = SourceTree::new(vec![service]);
        let result = ComponentAssembler::new(None).generate(None, &DocletStrategy::default(), &tree);
        assert!(matches!(result, Err(GenerationError::AmbiguousName { .. })));
    }

    #[test]
    fn test_operation_names_are_scoped_per_service() {
        let tree = SourceTree::new(vec![
            ClassDescriptor::new("pckg.A").with_member(MemberDescriptor::new("run")),
            ClassDescriptor::new("pckg.B").with_member(MemberDescriptor::new("run")),
        ]);
        let report = ComponentAssembler::new(None)
            .generate(None, &DocletStrategy::default(), &tree)
            .unwrap();
        for service in &report.component.services {
            assert_eq!(service.operations[0].name, "run");
            assert!(service.operations[0].method.is_none());
        }
    }
}

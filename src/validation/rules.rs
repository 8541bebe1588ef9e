use crate::output::schema::{Component, MAX_CONFIG_PARAM_NAME_LEN};
use anyhow::Result;
use std::collections::HashSet;

pub trait ValidationRule: Send + Sync {
    fn name(&self) -> &'static str;
    fn validate(&self, component: &Component) -> Result<()>;
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

pub struct RequiredFieldsRule;

impl ValidationRule for RequiredFieldsRule {
    fn name(&self) -> &'static str {
        "RequiredFields"
    }

    fn validate(&self, component: &Component) -> Result<()> {
        if is_blank(component.id.as_deref()) {
            anyhow::bail!("Component id cannot be empty");
        }
        if is_blank(component.version.as_deref()) {
            anyhow::bail!("Component version cannot be empty");
        }
        Ok(())
    }
}

pub struct ServiceImplementationRule;

impl ValidationRule for ServiceImplementationRule {
    fn name(&self) -> &'static str {
        "ServiceImplementation"
    }

    fn validate(&self, component: &Component) -> Result<()> {
        for (i, service) in component.services.iter().enumerate() {
            if service.name.trim().is_empty() {
                anyhow::bail!("Service[{}] name cannot be empty", i);
            }
            if service.implementation_class.trim().is_empty() {
                anyhow::bail!(
                    "Service '{}' implementation class cannot be empty",
                    service.name
                );
            }
        }
        Ok(())
    }
}

pub struct UniqueOperationNamesRule;

impl ValidationRule for UniqueOperationNamesRule {
    fn name(&self) -> &'static str {
        "UniqueOperationNames"
    }

    fn validate(&self, component: &Component) -> Result<()> {
        for service in &component.services {
            let mut seen = HashSet::new();
            for operation in &service.operations {
                if !seen.insert(operation.name.as_str()) {
                    anyhow::bail!(
                        "Service '{}' declares operation '{}' more than once",
                        service.name,
                        operation.name
                    );
                }
            }
        }
        Ok(())
    }
}

pub struct ConfigParamNameLengthRule;

impl ValidationRule for ConfigParamNameLengthRule {
    fn name(&self) -> &'static str {
        "ConfigParamNameLength"
    }

    fn validate(&self, component: &Component) -> Result<()> {
        for service in &component.services {
            for config in &service.config_params {
                let length = config.name.chars().count();
                if length > MAX_CONFIG_PARAM_NAME_LEN {
                    anyhow::bail!(
                        "Config parameter name in service '{}' is {} characters long, maximum is {}",
                        service.name,
                        length,
                        MAX_CONFIG_PARAM_NAME_LEN
                    );
                }
            }
        }
        Ok(())
    }
}

pub struct TitlesPresentRule;

impl ValidationRule for TitlesPresentRule {
    fn name(&self) -> &'static str {
        "TitlesPresent"
    }

    fn validate(&self, component: &Component) -> Result<()> {
        for service in &component.services {
            for operation in &service.operations {
                if operation.title.trim().is_empty() {
                    anyhow::bail!(
                        "Operation '{}' in service '{}' has no title",
                        operation.name,
                        service.name
                    );
                }
                let parameters = operation.inputs.iter().chain(&operation.outputs);
                for parameter in parameters {
                    if parameter.title.trim().is_empty() {
                        anyhow::bail!(
                            "Parameter '{}' of operation '{}' has no title",
                            parameter.name,
                            operation.name
                        );
                    }
                }
                for fault in &operation.faults {
                    if fault.title.trim().is_empty() {
                        anyhow::bail!(
                            "Fault '{}' of operation '{}' has no title",
                            fault.name,
                            operation.name
                        );
                    }
                }
            }
            for config in &service.config_params {
                if config.title.trim().is_empty() {
                    anyhow::bail!(
                        "Config parameter '{}' in service '{}' has no title",
                        config.name,
                        service.name
                    );
                }
            }
        }
        Ok(())
    }
}

use crate::output::schema::Component;
use crate::validation::rules::{
    ConfigParamNameLengthRule, RequiredFieldsRule, ServiceImplementationRule, TitlesPresentRule,
    UniqueOperationNamesRule, ValidationRule,
};
use anyhow::Result;

pub struct Validator {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rules(rules: Vec<Box<dyn ValidationRule>>) -> Self {
        Self { rules }
    }

    pub fn validate(&self, component: &Component) -> Result<()> {
        for rule in &self.rules {
            if let Err(e) = rule.validate(component) {
                anyhow::bail!("[{}] {}", rule.name(), e);
            }
        }
        Ok(())
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self {
            rules: vec![
                Box::new(RequiredFieldsRule),
                Box::new(ServiceImplementationRule),
                Box::new(UniqueOperationNamesRule),
                Box::new(ConfigParamNameLengthRule),
                Box::new(TitlesPresentRule),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::schema::{Operation, Service};

    fn create_minimal_valid_component() -> Component {
        Component {
            id: Some("my.component".to_string()),
            version: Some("1.0".to_string()),
            services: vec![Service {
                name: "Svc".to_string(),
                implementation_class: "pckg.Svc".to_string(),
                operations: vec![Operation {
                    name: "run".to_string(),
                    title: "Run".to_string(),
                    ..Default::default()
                }],
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_validator_valid_component() {
        let validator = Validator::new();
        assert!(validator.validate(&create_minimal_valid_component()).is_ok());
    }

    #[test]
    fn test_validator_missing_id() {
        let mut component = create_minimal_valid_component();
        component.id = None;
        let result = Validator::new().validate(&component);
        assert!(result.unwrap_err().to_string().contains("RequiredFields"));
    }

    #[test]
    fn test_validator_missing_title() {
        let mut component = create_minimal_valid_component();
        component.services[0].operations[0].title.clear();
        let result = Validator::new().validate(&component);
        assert!(result.unwrap_err().to_string().contains("TitlesPresent"));
    }

    #[test]
    fn test_validator_with_custom_rules() {
        let mut component = create_minimal_valid_component();
        component.version = None;
        let validator = Validator::with_rules(vec![Box::new(ServiceImplementationRule)]);
        assert!(validator.validate(&component).is_ok());
    }
}

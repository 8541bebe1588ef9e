//! Human-readable run summaries
//!
//! The generated document itself is rendered by [`crate::output::OutputFormat`]; this module
//! only formats what the command line prints around it. Summaries go to stderr so a document
//! printed with `--stdout` can be piped.

use crate::pipeline::GenerationReport;
use crate::strategy::StrategyKind;

const RULE: &str = "\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}";

/// Formats the outcome of a generation run
///
/// `destination` is the written file, or `None` when the document went to stdout.
pub fn format_summary(report: &GenerationReport, destination: Option<&str>) -> String {
    let component = &report.component;
    let mut output = String::new();

    if report.warnings.is_empty() {
        output.push_str("\u{2713} Component Generated\n");
    } else {
        output.push_str("\u{26A0} Component Generated (with warnings)\n");
    }
    output.push_str(RULE);
    output.push_str("\n\n");

    output.push_str(&format!(
        "Component:  {}\n",
        component.id.as_deref().unwrap_or("(no id)")
    ));
    output.push_str(&format!(
        "Version:    {}\n",
        component.version.as_deref().unwrap_or("(no version)")
    ));
    if let Some(destination) = destination {
        output.push_str(&format!("Written to: {}\n", destination));
    }
    output.push('\n');

    if component.services.is_empty() {
        output.push_str("Services: (none found)\n");
    } else {
        output.push_str("Services:\n");
        for (i, service) in component.services.iter().enumerate() {
            let is_last = i == component.services.len() - 1;
            let connector = if is_last { "\u{2514}" } else { "\u{251C}" };
            output.push_str(&format!(
                "{}\u{2500} {} ({} operations, {} config parameters)\n",
                connector,
                service.name,
                service.operations.len(),
                service.config_params.len()
            ));
        }
    }

    if !report.warnings.is_empty() {
        output.push_str(&format!("\n\u{26A0} Warnings ({}):\n", report.warnings.len()));
        for warning in &report.warnings {
            output.push_str(&format!("  - {}\n", warning));
        }
    }

    output
}

pub fn format_strategies() -> String {
    let mut output = String::new();
    output.push_str("Extraction Strategies\n");
    output.push_str(RULE);
    output.push_str("\n\n");
    for kind in StrategyKind::ALL {
        let marker = if kind == StrategyKind::default() {
            " (default)"
        } else {
            ""
        };
        output.push_str(&format!("{:<12} {}{}\n", kind.as_str(), kind.description(), marker));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::schema::{Component, Operation, Service};
    use crate::pipeline::MetadataWarning;

    fn report(warnings: Vec<MetadataWarning>) -> GenerationReport {
        GenerationReport {
            component: Component {
                id: Some("be.example.component".to_string()),
                version: Some("1.0".to_string()),
                services: vec![
                    Service {
                        name: "First".to_string(),
                        operations: vec![Operation::default(), Operation::default()],
                        ..Default::default()
                    },
                    Service {
                        name: "Second".to_string(),
                        ..Default::default()
                    },
                ],
                ..Default::default()
            },
            warnings,
        }
    }

    #[test]
    fn test_summary_lists_services() {
        let summary = format_summary(&report(vec![]), Some("component.xml"));
        assert!(summary.starts_with("\u{2713} Component Generated"));
        assert!(summary.contains("Component:  be.example.component"));
        assert!(summary.contains("Written to: component.xml"));
        assert!(summary.contains("\u{251C}\u{2500} First (2 operations, 0 config parameters)"));
        assert!(summary.contains("\u{2514}\u{2500} Second (0 operations, 0 config parameters)"));
        assert!(!summary.contains("Warnings"));
    }

    #[test]
    fn test_summary_lists_warnings() {
        let warning = MetadataWarning::MalformedVersion {
            class: "pckg.Svc".to_string(),
            field: "major".to_string(),
            value: "one".to_string(),
        };
        let summary = format_summary(&report(vec![warning.clone()]), None);
        assert!(summary.contains("with warnings"));
        assert!(summary.contains("Warnings (1)"));
        assert!(summary.contains(&warning.to_string()));
        assert!(!summary.contains("Written to"));
    }

    #[test]
    fn test_summary_without_services() {
        let summary = format_summary(
            &GenerationReport {
                component: Component::default(),
                warnings: vec![],
            },
            None,
        );
        assert!(summary.contains("Component:  (no id)"));
        assert!(summary.contains("Services: (none found)"));
    }

    #[test]
    fn test_strategies_listing() {
        let listing = format_strategies();
        assert!(listing.contains("annotations"));
        assert!(listing.contains("doclets"));
        assert!(listing.contains("(default)"));
    }
}

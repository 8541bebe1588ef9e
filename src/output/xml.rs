//! `component.xml` rendering
//!
//! Writes the document model in the layout of a LiveCycle DSC component descriptor. Empty
//! blocks and unset optional values are left out.

use super::schema::{AutoDeploy, Component, ConfigParam, Fault, Operation, Parameter, Service};

pub const COMPONENT_NAMESPACE: &str = "http://adobe.com/idp/dsc/component/document";

const INDENT: &str = "  ";

pub fn render_component(component: &Component) -> String {
    let mut writer = XmlWriter::new();
    writer.declaration();
    writer.open("component", &[("xmlns", Some(COMPONENT_NAMESPACE.to_string()))]);
    writer.text_element("component-id", component.id.as_deref());
    writer.text_element("version", component.version.as_deref());
    writer.text_element("bootstrap-class", component.bootstrap_class.as_deref());
    writer.text_element("lifecycle-class", component.lifecycle_class.as_deref());
    writer.text_element("class-path", component.class_path.as_deref());

    if !component.services.is_empty() {
        writer.open("services", &[]);
        for service in &component.services {
            write_service(&mut writer, service);
        }
        writer.close("services");
    }

    writer.close("component");
    writer.finish()
}

fn write_service(writer: &mut XmlWriter, service: &Service) {
    writer.open("service", &[("name", Some(service.name.clone()))]);
    writer.text_element("implementation-class", Some(&service.implementation_class));
    writer.text_element("factory-method", service.factory_method.as_deref());
    if let Some(auto_deploy) = &service.auto_deploy {
        write_auto_deploy(writer, auto_deploy);
    }
    writer.text_element("small-icon", service.small_icon.as_deref());
    writer.text_element("large-icon", service.large_icon.as_deref());
    writer.text_element("hint", service.hint.as_deref());
    writer.text_element("description", service.description.as_deref());
    writer.text_element(
        "request-processing-strategy",
        service.request_processing_strategy.as_deref(),
    );

    for config in &service.config_params {
        write_config_param(writer, config);
    }

    if !service.operations.is_empty() {
        writer.open("operations", &[]);
        for operation in &service.operations {
            write_operation(writer, operation);
        }
        writer.close("operations");
    }
    writer.close("service");
}

fn write_auto_deploy(writer: &mut XmlWriter, auto_deploy: &AutoDeploy) {
    writer.empty(
        "auto-deploy",
        &[
            ("service-id", Some(auto_deploy.service_id.clone())),
            ("category-id", Some(auto_deploy.category_id.clone())),
            ("major-version", auto_deploy.major_version.map(|v| v.to_string())),
            ("minor-version", auto_deploy.minor_version.map(|v| v.to_string())),
        ],
    );
}

fn write_config_param(writer: &mut XmlWriter, config: &ConfigParam) {
    writer.open(
        "config-parameter",
        &[
            ("name", Some(config.name.clone())),
            ("type", Some(config.type_name.clone())),
            ("title", Some(config.title.clone())),
            ("required", config.required.map(|r| r.to_string())),
            ("property", config.property.clone()),
        ],
    );
    writer.text_element("default-value", config.default_value.as_deref());
    writer.text_element("hint", config.hint.as_deref());
    writer.text_element("description", config.description.as_deref());
    writer.close("config-parameter");
}

fn write_operation(writer: &mut XmlWriter, operation: &Operation) {
    writer.open(
        "operation",
        &[
            ("name", Some(operation.name.clone())),
            ("method", operation.method.clone()),
            ("title", Some(operation.title.clone())),
        ],
    );
    writer.text_element("small-icon", operation.small_icon.as_deref());
    writer.text_element("large-icon", operation.large_icon.as_deref());
    writer.text_element("hint", operation.hint.as_deref());
    writer.text_element("description", operation.description.as_deref());

    for input in &operation.inputs {
        write_parameter(writer, "input-parameter", input);
    }
    for output in &operation.outputs {
        write_parameter(writer, "output-parameter", output);
    }
    if !operation.faults.is_empty() {
        writer.open("faults", &[]);
        for fault in &operation.faults {
            write_fault(writer, fault);
        }
        writer.close("faults");
    }
    writer.close("operation");
}

fn write_parameter(writer: &mut XmlWriter, element: &str, parameter: &Parameter) {
    writer.open(
        element,
        &[
            ("name", Some(parameter.name.clone())),
            ("title", Some(parameter.title.clone())),
            ("type", Some(parameter.type_name.clone())),
        ],
    );
    writer.text_element("hint", parameter.hint.as_deref());
    writer.text_element("description", parameter.description.as_deref());
    writer.close(element);
}

fn write_fault(writer: &mut XmlWriter, fault: &Fault) {
    writer.open(
        "fault",
        &[
            ("name", Some(fault.name.clone())),
            ("type", Some(fault.type_name.clone())),
            ("title", Some(fault.title.clone())),
        ],
    );
    writer.text_element("hint", fault.hint.as_deref());
    writer.text_element("description", fault.description.as_deref());
    writer.close("fault");
}

/// Minimal indenting XML writer
struct XmlWriter {
    buf: String,
    depth: usize,
}

impl XmlWriter {
    fn new() -> Self {
        Self {
            buf: String::new(),
            depth: 0,
        }
    }

    fn declaration(&mut self) {
        self.buf.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    }

    fn indent(&mut self) {
        for _ in 0..self.depth {
            self.buf.push_str(INDENT);
        }
    }

    fn start_tag(&mut self, name: &str, attributes: &[(&str, Option<String>)]) {
        self.indent();
        self.buf.push('<');
        self.buf.push_str(name);
        for (key, value) in attributes {
            if let Some(value) = value {
                self.buf.push(' ');
                self.buf.push_str(key);
                self.buf.push_str("=\"");
                self.buf.push_str(&escape(value));
                self.buf.push('"');
            }
        }
    }

    fn open(&mut self, name: &str, attributes: &[(&str, Option<String>)]) {
        self.start_tag(name, attributes);
        self.buf.push_str(">\n");
        self.depth += 1;
    }

    fn empty(&mut self, name: &str, attributes: &[(&str, Option<String>)]) {
        self.start_tag(name, attributes);
        self.buf.push_str("/>\n");
    }

    fn close(&mut self, name: &str) {
        self.depth = self.depth.saturating_sub(1);
        self.indent();
        self.buf.push_str("</");
        self.buf.push_str(name);
        self.buf.push_str(">\n");
    }

    fn text_element(&mut self, name: &str, text: Option<&str>) {
        let Some(text) = text else {
            return;
        };
        self.indent();
        self.buf.push('<');
        self.buf.push_str(name);
        self.buf.push('>');
        self.buf.push_str(&escape(text));
        self.buf.push_str("</");
        self.buf.push_str(name);
        self.buf.push_str(">\n");
    }

    fn finish(self) -> String {
        self.buf
    }
}

fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            '\t' | '\n' | '\r' => escaped.push(c),
            // Not allowed anywhere in an XML 1.0 document
            c if c < '\u{20}' || c == '\u{FFFE}' || c == '\u{FFFF}' => {}
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Component {
        Component {
            id: Some("my.component".to_string()),
            version: Some("1.0".to_string()),
            services: vec![Service {
                name: "Svc".to_string(),
                implementation_class: "pckg.Svc".to_string(),
                auto_deploy: Some(AutoDeploy {
                    service_id: "Svc".to_string(),
                    category_id: "my.component".to_string(),
                    major_version: Some(1),
                    minor_version: None,
                }),
                operations: vec![Operation {
                    name: "opWithParamAsInt".to_string(),
                    method: Some("op".to_string()),
                    title: "Op with param as int".to_string(),
                    hint: Some("Uses <b> & \"quotes\"".to_string()),
                    inputs: vec![Parameter {
                        name: "param".to_string(),
                        type_name: "int".to_string(),
                        title: "Param".to_string(),
                        ..Default::default()
                    }],
                    ..Default::default()
                }],
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_render_component() {
        let xml = render_component(&sample());
        assert!(xml.starts_with("<?xml"));
        assert!(xml.contains("<component-id>my.component</component-id>"));
        assert!(xml.contains("<service name=\"Svc\">"));
        assert!(xml.contains(
            "<auto-deploy service-id=\"Svc\" category-id=\"my.component\" major-version=\"1\"/>"
        ));
        assert!(xml.contains("<operation name=\"opWithParamAsInt\" method=\"op\" title=\"Op with param as int\">"));
        assert!(xml.contains("<input-parameter name=\"param\" title=\"Param\" type=\"int\">"));
        assert!(!xml.contains("output-parameter"));
        assert!(!xml.contains("<faults>"));
        assert!(!xml.contains("bootstrap-class"));
    }

    #[test]
    fn test_render_escapes_text() {
        let xml = render_component(&sample());
        assert!(xml.contains("<hint>Uses &lt;b&gt; &amp; &quot;quotes&quot;</hint>"));
    }

    #[test]
    fn test_render_without_services() {
        let xml = render_component(&Component {
            id: Some("empty".to_string()),
            ..Default::default()
        });
        assert!(!xml.contains("<services>"));
        assert!(xml.trim_end().ends_with("</component>"));
    }

    #[test]
    fn test_rendered_xml_is_well_formed() {
        let xml = render_component(&sample());
        let doc = roxmltree::Document::parse(&xml).unwrap();
        assert!(doc.root_element().has_tag_name("component"));
    }

    #[test]
    fn test_render_drops_control_characters() {
        let mut component = sample();
        component.services[0].operations[0].hint = Some("Line\u{1}one\u{1b}[0m\tand\ntwo".to_string());
        component.services[0].operations[0].inputs[0].title = "Pa\u{0}ram".to_string();

        let xml = render_component(&component);
        assert!(!xml.contains('\u{1}'));
        assert!(!xml.contains('\u{0}'));
        assert!(xml.contains("<hint>Lineone[0m\tand\ntwo</hint>"));
        assert!(xml.contains("title=\"Param\""));

        let doc = roxmltree::Document::parse(&xml).unwrap();
        assert!(doc.descendants().any(|n| n.has_tag_name("hint")));
    }
}

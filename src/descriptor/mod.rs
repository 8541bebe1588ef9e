//! Read-only source descriptors
//!
//! Descriptors are structural snapshots of classes and their members, produced up front by a
//! [`DescriptorProvider`] and never mutated by the generator. Doc tags and annotation-like
//! metadata are exposed as typed bags queried through the [`Tagged`] accessors.

pub mod provider;

pub use provider::{DescriptorProvider, SourceTree};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Type marker used when a type could not be resolved (generics, missing imports)
pub const GENERIC_OBJECT_TYPE: &str = "java.lang.Object";

/// Root of the platform's throwable hierarchy; subtypes are never services
pub const THROWABLE_ROOT: &str = "java.lang.Throwable";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Visibility {
    #[default]
    Public,
    #[serde(alias = "private", alias = "protected", alias = "package")]
    NonPublic,
}

/// Reference to a type as written in the source
///
/// Deserializes either from a plain string (`"java.lang.String"`) or from
/// `{ "name": ..., "resolved": false }` for types the provider could not resolve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "TypeRefRepr")]
pub struct TypeRef {
    pub name: String,
    pub resolved: bool,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TypeRefRepr {
    Name(String),
    Full {
        name: String,
        #[serde(default = "resolved_by_default")]
        resolved: bool,
    },
}

fn resolved_by_default() -> bool {
    true
}

impl From<TypeRefRepr> for TypeRef {
    fn from(repr: TypeRefRepr) -> Self {
        match repr {
            TypeRefRepr::Name(name) => Self {
                name,
                resolved: true,
            },
            TypeRefRepr::Full { name, resolved } => Self { name, resolved },
        }
    }
}

impl TypeRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            resolved: true,
        }
    }

    pub fn unresolved(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            resolved: false,
        }
    }

    /// Fully qualified name, normalized to [`GENERIC_OBJECT_TYPE`] when unresolved
    pub fn qualified_name(&self) -> &str {
        if self.resolved && !self.name.trim().is_empty() {
            &self.name
        } else {
            GENERIC_OBJECT_TYPE
        }
    }

    /// Last segment of the qualified name with generic arguments stripped
    pub fn simple_name(&self) -> &str {
        let qualified = self.qualified_name();
        let raw = qualified.split('<').next().unwrap_or(qualified);
        raw.rsplit('.').next().unwrap_or(raw)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    #[serde(default)]
    pub value: String,
}

impl Tag {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A single annotation attribute value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetadataValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<MetadataValue>),
    Nested(BTreeMap<String, MetadataValue>),
}

impl MetadataValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            MetadataValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_nested(&self) -> Option<&BTreeMap<String, MetadataValue>> {
        match self {
            MetadataValue::Nested(map) => Some(map),
            _ => None,
        }
    }
}

impl From<&str> for MetadataValue {
    fn from(value: &str) -> Self {
        MetadataValue::Text(value.to_string())
    }
}

impl From<bool> for MetadataValue {
    fn from(value: bool) -> Self {
        MetadataValue::Bool(value)
    }
}

impl From<i64> for MetadataValue {
    fn from(value: i64) -> Self {
        MetadataValue::Int(value)
    }
}

pub type AnnotationValues = BTreeMap<String, MetadataValue>;

/// Package of the qualified marker annotations
pub const MARKER_PACKAGE: &str = "be.idamediafoundry.sofa.livecycle.dsc.annotations";

/// Annotation-like metadata keyed by marker name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Annotations(pub BTreeMap<String, AnnotationValues>);

impl Annotations {
    /// Finds a marker by simple name or by its name in [`MARKER_PACKAGE`]
    pub fn find(&self, marker: &str) -> Option<&AnnotationValues> {
        self.0.iter().find_map(|(key, values)| {
            let matches = key == marker
                || key
                    .strip_prefix(MARKER_PACKAGE)
                    .and_then(|rest| rest.strip_prefix('.'))
                    .is_some_and(|simple| simple == marker);
            matches.then_some(values)
        })
    }

    pub fn insert(&mut self, marker: impl Into<String>, values: AnnotationValues) {
        self.0.insert(marker.into(), values);
    }
}

/// Shared accessors for descriptors carrying doc tags and annotations
pub trait Tagged {
    fn tags(&self) -> &[Tag];
    fn annotations(&self) -> &Annotations;
    fn doc_comment(&self) -> Option<&str>;

    /// First tag with the given name
    fn tag(&self, name: &str) -> Option<&Tag> {
        self.tags().iter().find(|t| t.name == name)
    }

    fn tags_named<'a>(&'a self, name: &'a str) -> Box<dyn Iterator<Item = &'a Tag> + 'a> {
        Box::new(self.tags().iter().filter(move |t| t.name == name))
    }

    /// Value of the first tag with the given name, if it is not blank
    fn tag_value(&self, name: &str) -> Option<&str> {
        self.tag(name)
            .map(|t| t.value.trim())
            .filter(|v| !v.is_empty())
    }

    fn annotation(&self, marker: &str) -> Option<&AnnotationValues> {
        self.annotations().find(marker)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub type_ref: TypeRef,
}

impl ParameterDescriptor {
    pub fn new(name: impl Into<String>, type_ref: TypeRef) -> Self {
        Self {
            name: name.into(),
            type_ref,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberDescriptor {
    pub name: String,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub is_abstract: bool,
    #[serde(default)]
    pub is_constructor: bool,
    #[serde(default)]
    pub parameters: Vec<ParameterDescriptor>,
    /// Absent means void
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_type: Option<TypeRef>,
    #[serde(default, alias = "faults")]
    pub declared_fault_types: Vec<TypeRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_comment: Option<String>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub annotations: Annotations,
}

impl MemberDescriptor {
    /// A public, non-static, void method without parameters
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            visibility: Visibility::Public,
            is_static: false,
            is_abstract: false,
            is_constructor: false,
            parameters: Vec::new(),
            return_type: None,
            declared_fault_types: Vec::new(),
            doc_comment: None,
            tags: Vec::new(),
            annotations: Annotations::default(),
        }
    }

    pub fn returning(mut self, type_ref: TypeRef) -> Self {
        self.return_type = Some(type_ref);
        self
    }

    pub fn with_parameter(mut self, name: &str, type_ref: TypeRef) -> Self {
        self.parameters.push(ParameterDescriptor::new(name, type_ref));
        self
    }

    pub fn with_fault(mut self, type_ref: TypeRef) -> Self {
        self.declared_fault_types.push(type_ref);
        self
    }

    pub fn with_doc(mut self, comment: &str) -> Self {
        self.doc_comment = Some(comment.to_string());
        self
    }

    pub fn with_tag(mut self, name: &str, value: &str) -> Self {
        self.tags.push(Tag::new(name, value));
        self
    }

    pub fn with_annotation(mut self, marker: &str, values: AnnotationValues) -> Self {
        self.annotations.insert(marker, values);
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn as_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }

    pub fn is_void(&self) -> bool {
        self.return_type.is_none()
    }

    /// Zero-arg, non-void, non-static `getXxx()` / `isXxx()`
    pub fn is_property_accessor(&self) -> bool {
        if self.is_static || self.is_constructor || !self.parameters.is_empty() || self.is_void()
        {
            return false;
        }
        accessor_suffix(&self.name).is_some()
    }

    /// Single-arg, void, non-static `setXxx(value)`
    pub fn is_property_mutator(&self) -> bool {
        if self.is_static || self.is_constructor || self.parameters.len() != 1 || !self.is_void() {
            return false;
        }
        property_suffix(&self.name, "set").is_some()
    }

    pub fn property_name(&self) -> Option<String> {
        let suffix = if self.is_property_accessor() {
            accessor_suffix(&self.name)?
        } else if self.is_property_mutator() {
            property_suffix(&self.name, "set")?
        } else {
            return None;
        };
        Some(decapitalize(suffix))
    }

    pub fn property_type(&self) -> Option<&TypeRef> {
        if self.is_property_accessor() {
            self.return_type.as_ref()
        } else if self.is_property_mutator() {
            self.parameters.first().map(|p| &p.type_ref)
        } else {
            None
        }
    }
}

impl Tagged for MemberDescriptor {
    fn tags(&self) -> &[Tag] {
        &self.tags
    }

    fn annotations(&self) -> &Annotations {
        &self.annotations
    }

    fn doc_comment(&self) -> Option<&str> {
        self.doc_comment.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassDescriptor {
    pub qualified_name: String,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default)]
    pub is_abstract: bool,
    #[serde(default)]
    pub is_interface: bool,
    #[serde(default, rename = "implements")]
    pub implements_list: Vec<String>,
    /// Every known ancestor class, nearest first
    #[serde(default)]
    pub supertypes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_comment: Option<String>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub annotations: Annotations,
    #[serde(default)]
    pub members: Vec<MemberDescriptor>,
}

impl ClassDescriptor {
    /// A public, concrete class without members
    pub fn new(qualified_name: impl Into<String>) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            visibility: Visibility::Public,
            is_abstract: false,
            is_interface: false,
            implements_list: Vec::new(),
            supertypes: Vec::new(),
            doc_comment: None,
            tags: Vec::new(),
            annotations: Annotations::default(),
            members: Vec::new(),
        }
    }

    pub fn with_member(mut self, member: MemberDescriptor) -> Self {
        self.members.push(member);
        self
    }

    pub fn with_doc(mut self, comment: &str) -> Self {
        self.doc_comment = Some(comment.to_string());
        self
    }

    pub fn with_tag(mut self, name: &str, value: &str) -> Self {
        self.tags.push(Tag::new(name, value));
        self
    }

    pub fn with_annotation(mut self, marker: &str, values: AnnotationValues) -> Self {
        self.annotations.insert(marker, values);
        self
    }

    pub fn implementing(mut self, interface: &str) -> Self {
        self.implements_list.push(interface.to_string());
        self
    }

    pub fn extending(mut self, supertype: &str) -> Self {
        self.supertypes.push(supertype.to_string());
        self
    }

    pub fn simple_name(&self) -> &str {
        self.qualified_name
            .rsplit('.')
            .next()
            .unwrap_or(&self.qualified_name)
    }

    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }

    pub fn is_a(&self, type_name: &str) -> bool {
        self.qualified_name == type_name
            || self.supertypes.iter().any(|s| s == type_name)
            || self.implements_list.iter().any(|i| i == type_name)
    }

    pub fn implements(&self, interface: &str) -> bool {
        self.implements_list.iter().any(|i| i == interface)
    }

    /// Public, concrete, non-interface and not throwable
    pub fn eligibility_violation(&self) -> Option<&'static str> {
        if !self.is_public() {
            Some("class is not public")
        } else if self.is_abstract {
            Some("class is abstract")
        } else if self.is_interface {
            Some("type is an interface")
        } else if self.is_a(THROWABLE_ROOT) {
            Some("class is a throwable")
        } else {
            None
        }
    }
}

impl Tagged for ClassDescriptor {
    fn tags(&self) -> &[Tag] {
        &self.tags
    }

    fn annotations(&self) -> &Annotations {
        &self.annotations
    }

    fn doc_comment(&self) -> Option<&str> {
        self.doc_comment.as_deref()
    }
}

fn accessor_suffix(name: &str) -> Option<&str> {
    property_suffix(name, "get").or_else(|| property_suffix(name, "is"))
}

fn property_suffix<'a>(name: &'a str, prefix: &str) -> Option<&'a str> {
    let suffix = name.strip_prefix(prefix)?;
    suffix
        .chars()
        .next()
        .filter(|c| c.is_ascii_uppercase())
        .map(|_| suffix)
}

/// `Name` -> `name`, but `URL` stays `URL`
fn decapitalize(name: &str) -> String {
    let mut chars = name.chars();
    match (chars.next(), chars.next()) {
        (Some(first), Some(second)) if first.is_uppercase() && second.is_uppercase() => {
            name.to_string()
        }
        (Some(first), _) => {
            let mut result = first.to_lowercase().collect::<String>();
            result.push_str(&name[first.len_utf8()..]);
            result
        }
        (None, _) => String::new(),
    }
}

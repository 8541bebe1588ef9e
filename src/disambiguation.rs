//! Operation name disambiguation
//!
//! Overloaded methods cannot share the flat operation namespace of a service. The first
//! member carrying a method name keeps it; later overloads take the author's suggested name
//! or a name synthesized from their parameter shape. Anything still colliding is an error.

use crate::descriptor::MemberDescriptor;
use crate::error::GenerationError;
use crate::naming::{capitalize, generate_title};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedName {
    pub name: String,
    /// Dispatch key, only set when `name` differs from the method identifier
    pub method: Option<String>,
    pub title: String,
}

/// Resolves the operation name for `member` against the names already assigned in its service
///
/// Does not record the result; the caller appends `name` to `existing` once the operation is
/// accepted.
pub fn resolve(
    existing: &[String],
    declaring_class: &str,
    member: &MemberDescriptor,
    suggested: Option<&str>,
) -> Result<ResolvedName, GenerationError> {
    let suggested = suggested.map(str::trim).filter(|s| !s.is_empty());
    let taken = |candidate: &str| existing.iter().any(|n| n == candidate);

    let (name, method) = if !taken(&member.name) {
        let name = suggested.unwrap_or(&member.name).to_string();
        (name, None)
    } else {
        let name = match suggested {
            Some(name) => name.to_string(),
            None => synthesize_name(member),
        };
        (name, Some(member.name.clone()))
    };

    // Suggested names must be unique too
    if taken(&name) {
        return Err(GenerationError::AmbiguousName {
            method: member.name.clone(),
            class: declaring_class.to_string(),
        });
    }

    let title = generate_title(&name);
    Ok(ResolvedName {
        name,
        method,
        title,
    })
}

/// `op(String param)` -> `opWithParamAsString`
pub fn synthesize_name(member: &MemberDescriptor) -> String {
    let mut generated = format!("{}With", member.name);
    for parameter in &member.parameters {
        generated.push_str(&capitalize(&parameter.name));
        generated.push_str("As");
        generated.push_str(&capitalize(parameter.type_ref.simple_name()));
    }
    generated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::TypeRef;

    const CLASS: &str = "pckg.Sample";

    fn op(param_type: &str) -> MemberDescriptor {
        MemberDescriptor::new("op")
            .returning(TypeRef::new("java.lang.String"))
            .with_parameter("param", TypeRef::new(param_type))
    }

    fn resolve_all(members: &[(MemberDescriptor, Option<&str>)]) -> Result<Vec<ResolvedName>, GenerationError> {
        let mut existing = Vec::new();
        let mut resolved = Vec::new();
        for (member, suggested) in members {
            let result = resolve(&existing, CLASS, member, *suggested)?;
            existing.push(result.name.clone());
            resolved.push(result);
        }
        Ok(resolved)
    }

    #[test]
    fn test_first_occurrence_keeps_method_name() {
        let resolved = resolve(&[], CLASS, &op("java.lang.String"), None).unwrap();
        assert_eq!(resolved.name, "op");
        assert_eq!(resolved.method, None);
        assert_eq!(resolved.title, "Op");
    }

    #[test]
    fn test_first_occurrence_uses_suggestion() {
        let resolved = resolve(&[], CLASS, &op("java.lang.String"), Some("convert")).unwrap();
        assert_eq!(resolved.name, "convert");
        assert_eq!(resolved.method, None);
        assert_eq!(resolved.title, "Convert");
    }

    #[test]
    fn test_blank_suggestion_is_ignored() {
        let resolved = resolve(&[], CLASS, &op("java.lang.String"), Some("   ")).unwrap();
        assert_eq!(resolved.name, "op");
    }

    #[test]
    fn test_overloads_get_synthesized_names() {
        let resolved = resolve_all(&[
            (MemberDescriptor::new("op"), None),
            (op("java.lang.String"), None),
            (op("int"), None),
        ])
        .unwrap();

        let names: Vec<_> = resolved.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["op", "opWithParamAsString", "opWithParamAsInt"]);
        assert_eq!(resolved[1].method.as_deref(), Some("op"));
        assert_eq!(resolved[2].method.as_deref(), Some("op"));
        assert_eq!(resolved[1].title, "Op with param as string");
    }

    #[test]
    fn test_overload_reusing_synthesized_name_fails() {
        let result = resolve_all(&[
            (MemberDescriptor::new("op"), None),
            (op("java.lang.String"), None),
            (op("int"), None),
            (op("java.lang.String"), None),
        ]);

        match result {
            Err(GenerationError::AmbiguousName { method, class }) => {
                assert_eq!(method, "op");
                assert_eq!(class, CLASS);
            }
            other => panic!("Expected AmbiguousName error, got {:?}", other),
        }
    }

    #[test]
    fn test_overload_with_suggested_name() {
        let resolved = resolve_all(&[(op("java.lang.String"), None), (op("int"), Some("opFromInt"))]).unwrap();
        assert_eq!(resolved[1].name, "opFromInt");
        assert_eq!(resolved[1].method.as_deref(), Some("op"));
    }

    #[test]
    fn test_overload_with_colliding_suggestion_fails() {
        let result = resolve_all(&[
            (MemberDescriptor::new("other"), None),
            (op("java.lang.String"), None),
            (op("int"), Some("other")),
        ]);
        assert!(matches!(result, Err(GenerationError::AmbiguousName { .. })));
    }

    #[test]
    fn test_suggestion_taken_by_earlier_method_fails() {
        let result = resolve_all(&[
            (MemberDescriptor::new("convert"), None),
            (MemberDescriptor::new("transform"), Some("convert")),
        ]);

        match result {
            Err(GenerationError::AmbiguousName { method, class }) => {
                assert_eq!(method, "transform");
                assert_eq!(class, CLASS);
            }
            other => panic!("Expected AmbiguousName error, got {:?}", other),
        }
    }

    #[test]
    fn test_suggestion_taken_by_earlier_suggestion_fails() {
        let result = resolve_all(&[
            (MemberDescriptor::new("first"), Some("run")),
            (MemberDescriptor::new("second"), Some("run")),
        ]);
        assert!(matches!(result, Err(GenerationError::AmbiguousName { .. })));
    }

    #[test]
    fn test_unresolved_parameter_types_use_object() {
        let member = MemberDescriptor::new("op").with_parameter("value", TypeRef::unresolved("T"));
        assert_eq!(synthesize_name(&member), "opWithValueAsObject");
    }

    #[test]
    fn test_resolved_names_are_unique_across_overload_sets() {
        let types = ["java.lang.String", "int", "long", "java.util.Date", "boolean"];
        let mut members = vec![(MemberDescriptor::new("op"), None)];
        for t in types {
            members.push((op(t), None));
        }
        members.push((MemberDescriptor::new("run"), None));
        members.push((MemberDescriptor::new("run").with_parameter("times", TypeRef::new("int")), None));

        let resolved = resolve_all(&members).unwrap();
        let mut names: Vec<_> = resolved.iter().map(|r| r.name.clone()).collect();
        let total = names.len();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), total);
    }
}

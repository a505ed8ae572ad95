//! Structure tree node types and document root resolution.

use crate::error::BuildError;
use serde_json::Value;

/// A node in the declarative structure tree.
///
/// Values of this type only exist for trees that passed validation, so the
/// materializer never sees an illegal name or a malformed node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructureNode {
    /// Subdirectory: insertion-ordered children with pairwise-unique names.
    Directory(Vec<(String, StructureNode)>),
    /// File leaf: UTF-8 text content, or `None` for an empty file.
    FileLeaf(Option<String>),
}

impl StructureNode {
    pub fn is_directory(&self) -> bool {
        matches!(self, StructureNode::Directory(_))
    }
}

/// Resolve the root entry of a structure document.
///
/// With an explicit base name the document must contain a top-level key of
/// that name. Without one, the document must contain exactly one top-level
/// key, which is used as both the base name and the root.
pub fn resolve_root<'a>(
    document: &'a Value,
    base_name: Option<&str>,
) -> Result<(String, &'a Value), BuildError> {
    let map = document.as_object().ok_or_else(|| {
        BuildError::Input(format!(
            "structure document must be an object at the top level, got {}",
            value_type_name(document)
        ))
    })?;

    match base_name {
        Some(base) => {
            let value = map.get(base).ok_or_else(|| {
                BuildError::Input(format!(
                    "structure document has no top-level key {:?}",
                    base
                ))
            })?;
            Ok((base.to_string(), value))
        }
        None => {
            let mut entries = map.iter();
            let (name, value) = entries.next().ok_or_else(|| {
                BuildError::Input(
                    "structure document is empty; expected one top-level key".to_string(),
                )
            })?;
            if entries.next().is_some() {
                return Err(BuildError::Input(format!(
                    "structure document has {} top-level keys; pass a base name to choose one",
                    map.len()
                )));
            }
            Ok((name.clone(), value))
        }
    }
}

/// JSON type name used in error messages.
pub(crate) fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resolve_root_single_key() {
        let doc = json!({"Proj": {}});
        let (name, value) = resolve_root(&doc, None).unwrap();
        assert_eq!(name, "Proj");
        assert!(value.is_object());
    }

    #[test]
    fn test_resolve_root_by_base_name() {
        let doc = json!({"A": {}, "B": {"f.txt": "x"}});
        let (name, value) = resolve_root(&doc, Some("B")).unwrap();
        assert_eq!(name, "B");
        assert!(value.get("f.txt").is_some());
    }

    #[test]
    fn test_resolve_root_missing_key_is_input_error() {
        let doc = json!({"A": {}});
        let err = resolve_root(&doc, Some("B")).unwrap_err();
        assert!(matches!(err, BuildError::Input(_)));
    }

    #[test]
    fn test_resolve_root_ambiguous_without_base_name() {
        let doc = json!({"A": {}, "B": {}});
        let err = resolve_root(&doc, None).unwrap_err();
        assert!(err.to_string().contains("2 top-level keys"));
    }

    #[test]
    fn test_resolve_root_rejects_non_object_document() {
        let doc = json!(["not", "a", "tree"]);
        let err = resolve_root(&doc, None).unwrap_err();
        assert!(err.to_string().contains("got array"));
    }
}

//! Name rules and the validating decoder for structure trees.
//!
//! Validation is exhaustive rather than fail-fast: the walk collects every
//! problem in the tree before reporting. The one exception is the depth
//! cutoff, which short-circuits the offending subtree.

use crate::error::{BuildError, ProblemKind, ValidationProblem, ValidationReport};
use crate::tree::node::{value_type_name, StructureNode};
use crate::types::TreeCounts;
use serde_json::{Map, Value};

/// Maximum number of nested directory levels below the root.
pub const MAX_DEPTH: usize = 20;

/// Maximum length of a single path segment, in characters.
pub const MAX_NAME_LEN: usize = 100;

/// Path separators, rejected on every host OS so a single key can never
/// traverse into a different directory.
const SEPARATORS: [char; 2] = ['/', '\\'];

/// Reserved characters rejected under the strict policy.
const RESERVED: [char; 7] = [':', '*', '?', '"', '<', '>', '|'];

/// Segment-name policy.
///
/// The separator, emptiness, and length rules always apply. The
/// reserved-character list is a stricter policy some builds relax; names
/// are flagged, never silently stripped.
#[derive(Debug, Clone, Copy)]
pub struct NamePolicy {
    pub reject_reserved_characters: bool,
}

impl Default for NamePolicy {
    fn default() -> Self {
        Self {
            reject_reserved_characters: true,
        }
    }
}

/// Check a single path segment, appending any problems found.
pub fn validate_name(
    name: &str,
    path: &str,
    policy: &NamePolicy,
    problems: &mut Vec<ValidationProblem>,
) {
    if name.trim().is_empty() {
        problems.push(ValidationProblem {
            path: path.to_string(),
            kind: ProblemKind::EmptyName,
        });
        return;
    }

    let mut found = Vec::new();
    for ch in name.chars() {
        let illegal = SEPARATORS.contains(&ch)
            || (policy.reject_reserved_characters && RESERVED.contains(&ch));
        if illegal && !found.contains(&ch) {
            found.push(ch);
        }
    }
    if !found.is_empty() {
        problems.push(ValidationProblem {
            path: path.to_string(),
            kind: ProblemKind::IllegalCharacter { found },
        });
    }

    let length = name.chars().count();
    if length > MAX_NAME_LEN {
        problems.push(ValidationProblem {
            path: path.to_string(),
            kind: ProblemKind::NameTooLong { length },
        });
    }
}

/// Validate a named root value and decode it into a typed tree.
///
/// The root name is checked like any other segment (it becomes the release
/// directory's base name) and the root value must be an object. On success
/// the returned counts cover every directory and file below the root (the
/// root itself is not counted), matching what materialization will create.
pub fn validate_tree(
    root_name: &str,
    root: &Value,
    policy: &NamePolicy,
) -> Result<(StructureNode, TreeCounts), BuildError> {
    let mut problems = Vec::new();
    let mut counts = TreeCounts::default();
    validate_name(root_name, root_name, policy, &mut problems);

    match root {
        Value::Object(map) => {
            let node = walk_directory(map, root_name, 0, policy, &mut problems, &mut counts);
            if !problems.is_empty() {
                return Err(BuildError::Validation(ValidationReport { problems }));
            }
            Ok((node, counts))
        }
        other => {
            problems.push(ValidationProblem {
                path: root_name.to_string(),
                kind: ProblemKind::WrongNodeType {
                    found: value_type_name(other),
                },
            });
            Err(BuildError::Validation(ValidationReport { problems }))
        }
    }
}

fn walk_directory(
    map: &Map<String, Value>,
    prefix: &str,
    depth: usize,
    policy: &NamePolicy,
    problems: &mut Vec<ValidationProblem>,
    counts: &mut TreeCounts,
) -> StructureNode {
    if depth > MAX_DEPTH {
        problems.push(ValidationProblem {
            path: prefix.to_string(),
            kind: ProblemKind::TreeTooDeep,
        });
        return StructureNode::Directory(Vec::new());
    }

    let mut children = Vec::with_capacity(map.len());
    for (name, value) in map {
        let path = format!("{}/{}", prefix, name);
        validate_name(name, &path, policy, problems);

        match value {
            Value::Object(child) => {
                counts.folders += 1;
                children.push((
                    name.clone(),
                    walk_directory(child, &path, depth + 1, policy, problems, counts),
                ));
            }
            Value::String(text) => {
                counts.files += 1;
                children.push((name.clone(), StructureNode::FileLeaf(Some(text.clone()))));
            }
            Value::Null => {
                counts.files += 1;
                children.push((name.clone(), StructureNode::FileLeaf(None)));
            }
            other => {
                problems.push(ValidationProblem {
                    path,
                    kind: ProblemKind::WrongNodeType {
                        found: value_type_name(other),
                    },
                });
            }
        }
    }
    StructureNode::Directory(children)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn problems_of(root_name: &str, root: &Value) -> Vec<ValidationProblem> {
        match validate_tree(root_name, root, &NamePolicy::default()) {
            Err(BuildError::Validation(report)) => report.problems,
            other => panic!("expected a validation failure, got {:?}", other.is_ok()),
        }
    }

    #[test]
    fn test_counts_nested_folders_and_files() {
        let root = json!({
            "src": {"main.txt": "hello", "lib": {"a.txt": null}},
            "README.md": "hi"
        });
        let (node, counts) = validate_tree("Proj", &root, &NamePolicy::default()).unwrap();
        assert_eq!(counts, TreeCounts { folders: 2, files: 3 });
        assert!(node.is_directory());
    }

    #[test]
    fn test_empty_name_points_at_offending_node() {
        let root = json!({"src": {"": "content"}});
        let problems = problems_of("Proj", &root);
        assert_eq!(problems.len(), 1);
        assert_eq!(problems[0].path, "Proj/src/");
        assert_eq!(problems[0].kind, ProblemKind::EmptyName);
    }

    #[test]
    fn test_whitespace_only_name_is_empty() {
        let root = json!({"   ": null});
        let problems = problems_of("Proj", &root);
        assert_eq!(problems[0].kind, ProblemKind::EmptyName);
    }

    #[test]
    fn test_separator_in_name_rejected_on_any_host() {
        for name in ["a/b", "a\\b"] {
            let root = json!({ name: "content" });
            let problems = problems_of("Proj", &root);
            assert_eq!(problems.len(), 1, "name {:?}", name);
            assert_eq!(problems[0].path, format!("Proj/{}", name));
            assert!(matches!(
                problems[0].kind,
                ProblemKind::IllegalCharacter { .. }
            ));
        }
    }

    #[test]
    fn test_reserved_characters_relaxed_by_policy() {
        let policy = NamePolicy {
            reject_reserved_characters: false,
        };
        let root = json!({"a:b": "content"});
        assert!(validate_tree("Proj", &root, &policy).is_ok());
        // separators stay illegal regardless of policy
        let root = json!({"a/b": "content"});
        assert!(validate_tree("Proj", &root, &policy).is_err());
    }

    #[test]
    fn test_name_over_100_chars_rejected() {
        let long = "x".repeat(101);
        let root = json!({ long.clone(): null });
        let problems = problems_of("Proj", &root);
        assert_eq!(
            problems[0].kind,
            ProblemKind::NameTooLong { length: 101 }
        );
        let ok = "x".repeat(100);
        assert!(validate_tree("Proj", &json!({ ok: null }), &NamePolicy::default()).is_ok());
    }

    #[test]
    fn test_root_name_obeys_segment_rules() {
        let root = json!({"f.txt": "x"});
        let problems = problems_of("bad/base", &root);
        assert_eq!(problems.len(), 1);
        assert_eq!(problems[0].path, "bad/base");
        assert!(matches!(
            problems[0].kind,
            ProblemKind::IllegalCharacter { .. }
        ));
    }

    #[test]
    fn test_non_object_root_is_top_level_type_error() {
        let root = json!("just a string");
        let problems = problems_of("Proj", &root);
        assert_eq!(problems.len(), 1);
        assert_eq!(problems[0].path, "Proj");
        assert_eq!(
            problems[0].kind,
            ProblemKind::WrongNodeType { found: "string" }
        );
    }

    #[test]
    fn test_list_and_number_values_are_type_errors() {
        let root = json!({"files": ["a", "b"], "count": 3});
        let mut problems = problems_of("Proj", &root);
        problems.sort_by(|a, b| a.path.cmp(&b.path));
        assert_eq!(problems.len(), 2);
        assert_eq!(
            problems[0].kind,
            ProblemKind::WrongNodeType { found: "number" }
        );
        assert_eq!(
            problems[1].kind,
            ProblemKind::WrongNodeType { found: "array" }
        );
    }

    #[test]
    fn test_all_problems_collected_in_one_pass() {
        let root = json!({
            "a/b": {"": null},
            "data": 42
        });
        let problems = problems_of("Proj", &root);
        assert_eq!(problems.len(), 3);
    }

    #[test]
    fn test_depth_cutoff_short_circuits_subtree() {
        let mut tree = json!({"leaf.txt": "end"});
        for i in 0..25 {
            tree = json!({ format!("d{}", i): tree });
        }
        let problems = problems_of("Proj", &tree);
        assert!(problems
            .iter()
            .any(|p| p.kind == ProblemKind::TreeTooDeep));
        // the cutoff fires once per too-deep subtree, not per level
        assert_eq!(
            problems
                .iter()
                .filter(|p| p.kind == ProblemKind::TreeTooDeep)
                .count(),
            1
        );
    }

    #[test]
    fn test_depth_twenty_is_still_valid() {
        let mut tree = json!({"leaf.txt": "end"});
        for i in 0..20 {
            tree = json!({ format!("d{}", i): tree });
        }
        assert!(validate_tree("Proj", &tree, &NamePolicy::default()).is_ok());
    }

    #[test]
    fn test_validation_is_idempotent() {
        let root = json!({"bad/name": {"": 1}});
        let first = problems_of("Proj", &root);
        let second = problems_of("Proj", &root);
        assert_eq!(first, second);
    }
}

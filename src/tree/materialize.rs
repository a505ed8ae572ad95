//! Materialize a validated structure tree onto the filesystem.

use crate::error::BuildError;
use crate::tree::node::StructureNode;
use crate::types::TreeCounts;
use std::fs;
use std::path::Path;

/// Recursively create every directory and write every file leaf below `base`.
///
/// Directory creation is idempotent and missing intermediates are created
/// implicitly. File contents are written as UTF-8 text; absent content
/// produces a zero-byte file. Returns the created counts, which match the
/// counts reported by validation for the same tree.
pub fn materialize_tree(node: &StructureNode, base: &Path) -> Result<TreeCounts, BuildError> {
    match node {
        StructureNode::Directory(children) => {
            let mut counts = TreeCounts::default();
            write_children(children, base, &mut counts)?;
            Ok(counts)
        }
        StructureNode::FileLeaf(_) => Err(BuildError::Input(
            "materialization requires a directory node at the root".to_string(),
        )),
    }
}

fn write_children(
    children: &[(String, StructureNode)],
    dir: &Path,
    counts: &mut TreeCounts,
) -> Result<(), BuildError> {
    for (name, node) in children {
        let path = dir.join(name);
        match node {
            StructureNode::Directory(grandchildren) => {
                fs::create_dir_all(&path).map_err(|e| {
                    BuildError::io(format!("creating directory {}", path.display()), e)
                })?;
                counts.folders += 1;
                write_children(grandchildren, &path, counts)?;
            }
            StructureNode::FileLeaf(content) => {
                if let Some(parent) = path.parent() {
                    fs::create_dir_all(parent).map_err(|e| {
                        BuildError::io(format!("creating directory {}", parent.display()), e)
                    })?;
                }
                fs::write(&path, content.as_deref().unwrap_or("")).map_err(|e| {
                    BuildError::io(format!("writing file {}", path.display()), e)
                })?;
                counts.files += 1;
            }
        }
    }
    Ok(())
}

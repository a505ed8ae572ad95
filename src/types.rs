//! Core types shared across the build pipeline.

/// BuildVersion: positive release number, recomputed per run from directory state
pub type BuildVersion = u32;

/// Folder/file totals produced by validation and materialization.
///
/// Both walks count every directory node below the release root (the root
/// itself is not counted) and every file leaf.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeCounts {
    pub folders: u64,
    pub files: u64,
}

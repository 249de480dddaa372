use std::path::{Component, Path, PathBuf};

use crate::domain::{DomainError, DomainResult};

/// Resolve `.` and `..` components without touching the filesystem.
///
/// `..` at the start of a relative path is kept; `..` directly below the
/// root is dropped.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => normalized.push(".."),
            },
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

/// Check that `path` lies strictly inside `parent` after lexical
/// normalization and return the normalized path.
pub fn ensure_within(path: &Path, parent: &Path) -> DomainResult<PathBuf> {
    let normalized = normalize_lexically(path);
    let normalized_parent = normalize_lexically(parent);

    let contained = match normalized.strip_prefix(&normalized_parent) {
        Ok(rest) => {
            rest.components().next().is_some()
                && rest.components().all(|c| matches!(c, Component::Normal(_)))
        }
        Err(_) => false,
    };
    if contained {
        Ok(normalized)
    } else {
        Err(DomainError::PathTraversal {
            path: normalized,
            parent: normalized_parent,
        })
    }
}

// Helper function for cross-platform path comparison
pub fn normalize_path_separator(s: &str) -> String {
    s.replace('\\', "/")
}

//! Content-addressed node identity
//!
//! Ids are SHA-256 digests of `(indent, content, line_number)`. They are only
//! stable within one run: editing an earlier line shifts line numbers and
//! therefore changes every id below it.

use std::fmt;

use sha2::{Digest, Sha256};

/// Length of the collision suffix taken from the front of an id.
pub const SHORT_ID_LEN: usize = 6;

const ROOT_ID: &str = "root";

/// Identifier of an outline node.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(String);

impl NodeId {
    /// Sentinel id of the synthetic root node.
    pub fn root() -> Self {
        Self(ROOT_ID.to_string())
    }

    pub fn is_root(&self) -> bool {
        self.0 == ROOT_ID
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First six hex characters, used to disambiguate colliding names.
    pub fn short(&self) -> &str {
        let end = self.0.len().min(SHORT_ID_LEN);
        &self.0[..end]
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Derive the id of a structural node.
///
/// # Examples
/// ```
/// use outline_docs::domain::node_id;
///
/// let id = node_id(2, "Intro", 2);
/// assert_eq!(id.as_str().len(), 64);
/// assert_eq!(id.short().len(), 6);
/// assert_eq!(id, node_id(2, "Intro", 2));
/// ```
pub fn node_id(indent: usize, content: &str, line_number: usize) -> NodeId {
    let mut hasher = Sha256::new();
    hasher.update(format!("{}_{}_{}", indent, content, line_number).as_bytes());
    NodeId(hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id_deterministic() {
        assert_eq!(node_id(0, "Guide", 1), node_id(0, "Guide", 1));
    }

    #[test]
    fn test_node_id_depends_on_line_number() {
        assert_ne!(node_id(0, "Guide", 1), node_id(0, "Guide", 2));
    }

    #[test]
    fn test_node_id_depends_on_indent() {
        assert_ne!(node_id(0, "Guide", 1), node_id(2, "Guide", 1));
    }

    #[test]
    fn test_short_is_hex_prefix() {
        let id = node_id(4, "Advanced", 4);
        assert_eq!(id.short(), &id.as_str()[..6]);
        assert!(id.short().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_root_sentinel() {
        assert!(NodeId::root().is_root());
        assert!(!node_id(0, "root", 1).is_root());
        assert_eq!(NodeId::root().to_string(), "root");
    }
}

//! Domain-level errors (no external dependencies)

use std::path::PathBuf;
use thiserror::Error;

/// Domain errors represent violations of the outline and naming rules.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("malformed outline: body line {line} has no structural parent: {content}")]
    MalformedOutline { line: usize, content: String },

    #[error("path escapes its parent directory: {} is not within {}", path.display(), parent.display())]
    PathTraversal { path: PathBuf, parent: PathBuf },

    #[error("name sanitizes to nothing: {name:?}")]
    SanitizationDegenerate { name: String },
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

//! Resource graph and backend error types

use thiserror::Error;

/// Errors raised while assembling or resolving a resource graph
#[derive(Error, Debug)]
pub enum CloudError {
    #[error("Resource already exists in graph: {0}")]
    DuplicateResource(String),

    #[error("Resource {resource} references {target}, which has not been declared yet")]
    UnresolvedReference { resource: String, target: String },

    #[error("Attribute has no resolved value: {0}")]
    UnresolvedAttribute(String),

    #[error("Unknown attribute {attribute} for {kind} resource {resource}")]
    UnknownAttribute {
        resource: String,
        kind: String,
        attribute: String,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CloudError>;

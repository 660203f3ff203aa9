use thiserror::Error;

use crate::DType;

/// Errors raised by typed reads on a [`Node`](crate::Node).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NodeError {
    #[error("no child named {0:?}")]
    NoSuchChild(String),
    #[error("node is not an object")]
    NotAnObject,
    #[error("expected a {expected} leaf, found {actual}")]
    TypeMismatch { expected: DType, actual: DType },
    #[error("leaf payload is not valid UTF-8")]
    InvalidUtf8,
}

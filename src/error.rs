/// Errors returned when building a [`LinkedTree`](crate::LinkedTree) or configuring props.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("The items contain duplicate values: {0}")]
    DuplicateValue(String),

    #[error("The item {value} references the unknown parent {parent}")]
    UnknownParent { value: String, parent: String },

    /// The item can not reach a root by following its parents.
    #[error("The item {0} is part of a parent cycle")]
    Cycle(String),

    #[error("Inconsistent parent and children links at {0}")]
    Inconsistent(String),

    /// The attribute name is handled by the tree itself and can not be passed through.
    #[error("The attribute {0} is reserved by the tree")]
    ReservedAttribute(String),

    #[cfg(feature = "json")]
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Crate-wide result alias.
pub type Result<T, E = QueryError> = std::result::Result<T, E>;

/// Errors raised while building or mutating a query tree.
///
/// There are no I/O or parse failures at this layer; every variant is a
/// construction mistake, a handle that could not be resolved, or a tree too
/// deep to write.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// A builder was given an impossible combination of inputs
    /// (for example a script with both an inline source and a stored id).
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// No node in the tree is bound to the handle.
    #[error("Handle not found: {handle}")]
    HandleNotFound { handle: String },

    /// More than one live node is bound to the same handle.
    #[error("Handle {handle} is bound to {count} nodes")]
    DuplicateHandle { handle: String, count: usize },

    /// The reduced tree nests deeper than the compiler will write.
    #[error("Query nesting depth {depth} exceeds the limit of {limit}")]
    DepthLimitExceeded { depth: usize, limit: usize },
}

impl QueryError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        QueryError::InvalidArgument {
            message: message.into(),
        }
    }
}

//! Error types for scheme-router.

use thiserror::Error;

/// Main error type for all routing and dispatch operations.
#[derive(Debug, Error)]
pub enum SchemeError {
    /// Malformed scheme URI (missing `://` separator or empty action).
    #[error("Parse error in '{origin}': {reason}")]
    Parse {
        /// The original input string.
        origin: String,
        /// What the grammar check rejected.
        reason: String,
    },

    /// Raw query value cannot be coerced to the declared argument type.
    #[error("Cannot coerce argument '{name}' from '{raw}' to {expected}")]
    Coercion {
        /// Declared argument name.
        name: String,
        /// Raw string value from the query.
        raw: String,
        /// Expected type name (e.g. "bool", "i32").
        expected: &'static str,
    },

    /// No registered route satisfies the parsed scheme.
    #[error("No matching route for action '{0}'")]
    NoMatchingRoute(String),

    /// Payload encoding through the query codec failed.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A scheme in a batch failed to execute.
    #[error("Transaction failed at scheme '{0}'")]
    Transaction(String),

    /// Batch dispatch was called with an empty scheme list.
    #[error("Batch dispatch requires at least one scheme")]
    EmptyBatch,

    /// Route id is already taken by another definition.
    #[error("Route id {0} is already registered")]
    DuplicateRouteId(u32),

    /// Route id 0 is reserved, and argument names must be unique per route.
    #[error("Invalid route definition: {0}")]
    InvalidRoute(String),

    /// Route table JSON could not be deserialized.
    #[error("Route table error: {0}")]
    RouteTable(#[from] serde_json::Error),
}

/// Result type alias using SchemeError.
pub type Result<T> = std::result::Result<T, SchemeError>;

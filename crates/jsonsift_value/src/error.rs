//! Value graph error types.

use thiserror::Error;

/// Errors raised at the boundary between the value graph and plain JSON.
#[derive(Debug, Error)]
pub enum ValueError {
    /// The graph re-enters one of its own ancestors, so it has no finite
    /// JSON rendering.
    #[error("cyclic reference at '{path}': graph cannot be converted to JSON")]
    Cycle {
        /// Dot-joined path of the re-entrant position.
        path: String,
    },

    /// JSON text failed to parse.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ValueError {
    /// Creates a cycle error for the given position.
    pub fn cycle(path: impl Into<String>) -> Self {
        Self::Cycle { path: path.into() }
    }
}

//! Type classification for graph values.

use std::fmt;

use serde::Serialize;

/// The runtime classification of a [`Value`](crate::Value).
///
/// Computed once per node when the traversal layer constructs it, so
/// callbacks never re-inspect the underlying variant ad hoc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    /// Key/value container with insertion-ordered entries.
    Object,
    /// Index-ordered sequence.
    Array,
    /// UTF-8 string.
    String,
    /// Integer or floating-point number.
    Number,
    /// `true` or `false`.
    Boolean,
    /// Present-but-null.
    Null,
    /// Present-but-undefined. Distinct from a missing entry and from
    /// [`ValueType::Null`].
    Undefined,
}

impl ValueType {
    /// Returns the lowercase name of this type.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ValueType::Object => "object",
            ValueType::Array => "array",
            ValueType::String => "string",
            ValueType::Number => "number",
            ValueType::Boolean => "boolean",
            ValueType::Null => "null",
            ValueType::Undefined => "undefined",
        }
    }

    /// Returns true for the two container types.
    pub const fn is_container(&self) -> bool {
        matches!(self, ValueType::Object | ValueType::Array)
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

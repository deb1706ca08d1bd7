//! Node keys and key matchers.
//!
//! A [`Key`] is how a node is reachable from its parent: an entry name in
//! an object, or an index in an array. Keys display without adornment
//! (`departments`, `0`), so joining a node's key chain with `.` yields its
//! path string.

use std::fmt;

use regex::Regex;
use serde::Serialize;

/// A single step from a parent value to one of its children.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum Key {
    /// Object entry name.
    Name(String),
    /// Array element index.
    Index(usize),
}

impl Key {
    /// Creates a name key.
    #[inline]
    pub fn name(name: impl Into<String>) -> Self {
        Key::Name(name.into())
    }

    /// Creates an index key.
    #[inline]
    pub fn index(index: usize) -> Self {
        Key::Index(index)
    }

    /// The entry name, if this is a name key.
    #[inline]
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Key::Name(name) => Some(name),
            Key::Index(_) => None,
        }
    }

    /// The element index, if this is an index key.
    #[inline]
    pub fn as_index(&self) -> Option<usize> {
        match self {
            Key::Name(_) => None,
            Key::Index(index) => Some(*index),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Name(name) => f.write_str(name),
            Key::Index(index) => write!(f, "{index}"),
        }
    }
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        Key::Name(name.to_owned())
    }
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        Key::Name(name)
    }
}

impl From<usize> for Key {
    fn from(index: usize) -> Self {
        Key::Index(index)
    }
}

/// Matches key names for [`Node::has`](crate::Node::has).
///
/// Built from an exact string or from a [`Regex`], so call sites can pass
/// either directly:
///
/// ```rust
/// use jsonsift_core::KeyMatcher;
/// use regex::Regex;
///
/// let exact = KeyMatcher::from("manager");
/// assert!(exact.matches("manager"));
/// assert!(!exact.matches("managers"));
///
/// let pattern = KeyMatcher::from(Regex::new("^(phone|email)$").unwrap());
/// assert!(pattern.matches("email"));
/// ```
#[derive(Debug, Clone)]
pub enum KeyMatcher {
    /// Whole-string comparison.
    Exact(String),
    /// Regular-expression match against the key name.
    Pattern(Regex),
}

impl KeyMatcher {
    /// Returns true if the key name matches.
    pub fn matches(&self, key: &str) -> bool {
        match self {
            KeyMatcher::Exact(name) => name == key,
            KeyMatcher::Pattern(pattern) => pattern.is_match(key),
        }
    }
}

impl From<&str> for KeyMatcher {
    fn from(name: &str) -> Self {
        KeyMatcher::Exact(name.to_owned())
    }
}

impl From<String> for KeyMatcher {
    fn from(name: String) -> Self {
        KeyMatcher::Exact(name)
    }
}

impl From<Regex> for KeyMatcher {
    fn from(pattern: Regex) -> Self {
        KeyMatcher::Pattern(pattern)
    }
}

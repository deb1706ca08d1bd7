//! The wrap handle.

use jsonsift_value::ValueRef;

use crate::{KeyMatcher, Node};

/// A navigable tree over an arbitrary JSON-compatible value.
///
/// `Tree` is the entry point: wrap a value once, then query it with the
/// operators or resolve into it by path. Every operator call walks the
/// current state of the underlying graph, so edits made by
/// [`remove`](Tree::remove) are visible to later calls on the same tree.
///
/// # Example
///
/// ```rust
/// use jsonsift_core::Tree;
/// use serde_json::json;
///
/// let tree = Tree::new(json!({
///     "departments": {
///         "admin": {"manager": "john"},
///         "hr": {}
///     }
/// }));
///
/// // Which departments have no manager?
/// let missing = tree.filter(|node| {
///     (node.level() == 2 && !node.has("manager")).then(|| node.path())
/// });
/// assert_eq!(missing, vec!["departments.hr"]);
/// ```
pub struct Tree {
    root: ValueRef,
}

impl Tree {
    /// Wraps a value. Anything convertible to a [`ValueRef`] is accepted,
    /// including a plain `serde_json::Value`.
    pub fn new(value: impl Into<ValueRef>) -> Self {
        Self { root: value.into() }
    }

    /// The wrapped root value.
    pub fn value(&self) -> &ValueRef {
        &self.root
    }

    /// A fresh node over the root value. Each call builds its own arena;
    /// nodes from different calls are not shared.
    pub fn root(&self) -> Node {
        Node::new_root(self.root.clone())
    }

    /// Resolves a dot-separated path from the root. See [`Node::get`].
    pub fn get(&self, path: &str) -> Option<Node> {
        self.root().get(path)
    }

    /// Whether any own key of the root object matches. See [`Node::has`].
    pub fn has(&self, matcher: impl Into<KeyMatcher>) -> bool {
        self.root().has(matcher)
    }

    /// Pre-order filter over the whole tree. See [`Node::filter`].
    pub fn filter<T>(&self, visit: impl FnMut(&Node) -> Option<T>) -> Vec<T> {
        self.root().filter(visit)
    }

    /// Fallible filter. See [`Node::try_filter`].
    pub fn try_filter<T, E>(
        &self,
        visit: impl FnMut(&Node) -> Result<Option<T>, E>,
    ) -> Result<Vec<T>, E> {
        self.root().try_filter(visit)
    }

    /// Whole-tree validation. See [`Node::validate`].
    pub fn validate(&self, visit: impl FnMut(&Node) -> Option<bool>) -> bool {
        self.root().validate(visit)
    }

    /// Fallible validation. See [`Node::try_validate`].
    pub fn try_validate<E>(
        &self,
        visit: impl FnMut(&Node) -> Result<Option<bool>, E>,
    ) -> Result<bool, E> {
        self.root().try_validate(visit)
    }

    /// In-place pruning of the wrapped value graph. See [`Node::remove`].
    pub fn remove(&self, visit: impl FnMut(&Node) -> bool) -> bool {
        self.root().remove(visit)
    }

    /// Fallible pruning. See [`Node::try_remove`].
    pub fn try_remove<E>(&self, visit: impl FnMut(&Node) -> Result<bool, E>) -> Result<(), E> {
        self.root().try_remove(visit)
    }
}

impl From<serde_json::Value> for Tree {
    fn from(value: serde_json::Value) -> Self {
        Tree::new(ValueRef::from(value))
    }
}

//! Node handles.
//!
//! A [`Node`] is the traversal-time view of one position in the value
//! graph: its key, value, parent, path, depth, and type. Handles are cheap
//! to clone (an `Rc` plus an index) and may be kept after the operator call
//! that produced them; the backing arena lives as long as any handle into
//! it.

use std::convert::Infallible;
use std::rc::Rc;

use jsonsift_value::{Value, ValueRef, ValueType};

use crate::arena::{NodeArena, NodeData};
use crate::walk::{self, Step};
use crate::{Key, KeyMatcher, path};

/// One visited position in a value graph.
///
/// Nodes are produced by the operators ([`filter`](Node::filter),
/// [`validate`](Node::validate), [`remove`](Node::remove)) and by path
/// lookup ([`get`](Node::get)); they are never constructed directly.
///
/// # Example
///
/// ```rust
/// use jsonsift_core::Tree;
/// use serde_json::json;
///
/// let tree = Tree::new(json!({"a": {"b": 1, "c": 2}}));
/// let leaves = tree.filter(|node| node.is_leaf().then(|| node.path()));
/// assert_eq!(leaves, vec!["a.b", "a.c"]);
/// ```
#[derive(Clone)]
pub struct Node {
    arena: Rc<NodeArena>,
    index: usize,
}

impl Node {
    pub(crate) fn from_arena(arena: Rc<NodeArena>, index: usize) -> Self {
        Self { arena, index }
    }

    /// Builds a fresh single-node arena around `value`. Entry point used by
    /// [`Tree::root`](crate::Tree::root).
    pub(crate) fn new_root(value: ValueRef) -> Self {
        let arena = NodeArena::new();
        let value_type = value.value_type();
        let index = arena.push(NodeData {
            key: None,
            value,
            parent: None,
            level: 0,
            value_type,
            circular: false,
        });
        Self { arena, index }
    }

    /// The key under which this node hangs off its parent; `None` at the
    /// traversal root.
    pub fn key(&self) -> Option<Key> {
        self.arena.with(self.index, |data| data.key.clone())
    }

    /// The wrapped value. Cloning the handle is cheap and shares the slot.
    pub fn value(&self) -> ValueRef {
        self.arena.with(self.index, |data| data.value.clone())
    }

    /// The enclosing node, or `None` at the traversal root.
    pub fn parent(&self) -> Option<Node> {
        self.arena
            .with(self.index, |data| data.parent)
            .map(|parent| Node::from_arena(Rc::clone(&self.arena), parent))
    }

    /// Depth from the traversal root; the root is level 0.
    pub fn level(&self) -> usize {
        self.arena.with(self.index, |data| data.level)
    }

    /// Type classification, computed once when the node was built.
    pub fn value_type(&self) -> ValueType {
        self.arena.with(self.index, |data| data.value_type)
    }

    /// True iff this node has no parent.
    pub fn is_root(&self) -> bool {
        self.arena.with(self.index, |data| data.parent.is_none())
    }

    /// True iff the value re-enters the active ancestor chain of the walk
    /// that built this node. Circular nodes are visited but never descended
    /// into. Always false for nodes produced by path lookup.
    pub fn is_circular(&self) -> bool {
        self.arena.with(self.index, |data| data.circular)
    }

    /// True iff the value has no traversable children: any primitive,
    /// `null`, `undefined`, or an empty container.
    pub fn is_leaf(&self) -> bool {
        self.count() == 0
    }

    /// Number of direct children; zero for non-containers.
    pub fn count(&self) -> usize {
        self.value().child_count()
    }

    /// True iff [`count`](Node::count) is zero.
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// The keys from the traversal root down to this node. Empty at the
    /// root; always exactly [`level`](Node::level) entries.
    pub fn path_array(&self) -> Vec<Key> {
        let mut keys = Vec::with_capacity(self.level());
        let mut current = self.index;
        loop {
            let (key, parent) = self
                .arena
                .with(current, |data| (data.key.clone(), data.parent));
            if let Some(key) = key {
                keys.push(key);
            }
            match parent {
                Some(parent) => current = parent,
                None => break,
            }
        }
        keys.reverse();
        keys
    }

    /// The `.`-joined form of [`path_array`](Node::path_array); empty at
    /// the root.
    pub fn path(&self) -> String {
        let keys = self.path_array();
        let mut rendered = String::new();
        for (position, key) in keys.iter().enumerate() {
            if position > 0 {
                rendered.push('.');
            }
            rendered.push_str(&key.to_string());
        }
        rendered
    }

    /// Whether any own key of an object value matches. Accepts an exact
    /// name or a `regex::Regex`; matching is against key names, never
    /// values. Non-objects (arrays included) have no named keys and
    /// return false.
    pub fn has(&self, matcher: impl Into<KeyMatcher>) -> bool {
        let matcher = matcher.into();
        match &*self.value().borrow() {
            Value::Object(entries) => entries.iter().any(|(name, _)| matcher.matches(name)),
            _ => false,
        }
    }

    /// Resolves a dot-separated relative path against this node's value by
    /// direct lookups, without a traversal or cycle detection. Returns the
    /// node at the end of the chain, or `None` if any step is missing.
    ///
    /// The resolved node's `parent` chain runs back through this node, and
    /// its `path`/`level` extend this node's position.
    pub fn get(&self, relative_path: &str) -> Option<Node> {
        let chain = path::resolve(&self.value(), relative_path)?;
        let mut index = self.index;
        let mut level = self.level();
        for (key, value) in chain {
            level += 1;
            let value_type = value.value_type();
            index = self.arena.push(NodeData {
                key: Some(key),
                value,
                parent: Some(index),
                level,
                value_type,
                circular: false,
            });
        }
        Some(Node::from_arena(Rc::clone(&self.arena), index))
    }

    /// Pre-order filter over this node's subtree (this node's value becomes
    /// the traversal root). Every `Some` the visitor returns is appended to
    /// the result in visitation order, verbatim.
    pub fn filter<T>(&self, mut visit: impl FnMut(&Node) -> Option<T>) -> Vec<T> {
        match self.try_filter(|node| Ok::<_, Infallible>(visit(node))) {
            Ok(results) => results,
            Err(never) => match never {},
        }
    }

    /// Fallible form of [`filter`](Node::filter): the first `Err` aborts
    /// the walk and propagates with no partial result.
    pub fn try_filter<T, E>(
        &self,
        mut visit: impl FnMut(&Node) -> Result<Option<T>, E>,
    ) -> Result<Vec<T>, E> {
        let mut results = Vec::new();
        walk::walk_tree(&self.value(), &mut |node| {
            if let Some(item) = visit(node)? {
                results.push(item);
            }
            Ok(Step::Continue)
        })?;
        Ok(results)
    }

    /// Logical AND over every boolean the visitor returns across the whole
    /// subtree; `None` means "no opinion". The walk always runs to
    /// completion instead of short-circuiting, so the visitor can collect
    /// diagnostics as a side effect. True on a tree where every answer was
    /// `Some(true)` or `None`.
    pub fn validate(&self, mut visit: impl FnMut(&Node) -> Option<bool>) -> bool {
        match self.try_validate(|node| Ok::<_, Infallible>(visit(node))) {
            Ok(valid) => valid,
            Err(never) => match never {},
        }
    }

    /// Fallible form of [`validate`](Node::validate).
    pub fn try_validate<E>(
        &self,
        mut visit: impl FnMut(&Node) -> Result<Option<bool>, E>,
    ) -> Result<bool, E> {
        let mut valid = true;
        walk::walk_tree(&self.value(), &mut |node| {
            if visit(node)? == Some(false) {
                valid = false;
            }
            Ok(Step::Continue)
        })?;
        Ok(valid)
    }

    /// Prunes this node's subtree in place: every node for which the
    /// visitor returns true is detached from its parent container (entries
    /// by key, elements by index with later siblings shifting down), and
    /// the detached subtree is not traversed further. A true on the
    /// traversal root itself is ignored; there is no enclosing container.
    ///
    /// Returns true meaning the traversal completed; completion is
    /// deliberately decoupled from whether anything was removed.
    pub fn remove(&self, mut visit: impl FnMut(&Node) -> bool) -> bool {
        match self.try_remove(|node| Ok::<_, Infallible>(visit(node))) {
            Ok(()) => true,
            Err(never) => match never {},
        }
    }

    /// Fallible form of [`remove`](Node::remove); `Ok(())` is the
    /// completion flag.
    pub fn try_remove<E>(&self, mut visit: impl FnMut(&Node) -> Result<bool, E>) -> Result<(), E> {
        walk::walk_tree(&self.value(), &mut |node| {
            Ok(if visit(node)? {
                Step::Remove
            } else {
                Step::Continue
            })
        })
    }
}

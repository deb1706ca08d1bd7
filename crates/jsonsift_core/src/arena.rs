//! Per-traversal arena of node records.
//!
//! Every operator call (and every `Tree::root`) builds its own arena. Node
//! records hold their parent as an index into the same arena, never as an
//! owning pointer, so the node tree cannot form a reference cycle even when
//! the underlying value graph does. The arena is shared behind `Rc` because
//! [`Node`](crate::Node) handles returned by path lookup outlive the call
//! that resolved them; it is dropped with the last handle into it.

use std::cell::RefCell;
use std::rc::Rc;

use jsonsift_value::{ValueRef, ValueType};

use crate::Key;

/// One node record, keyed by traversal position.
pub(crate) struct NodeData {
    /// Key under which the value hangs off its parent; `None` at the root.
    pub key: Option<Key>,
    /// The wrapped value.
    pub value: ValueRef,
    /// Arena index of the enclosing node.
    pub parent: Option<usize>,
    /// Depth from the traversal root.
    pub level: usize,
    /// Classification computed once at construction.
    pub value_type: ValueType,
    /// Whether the value re-enters the active ancestor chain.
    pub circular: bool,
}

pub(crate) struct NodeArena {
    nodes: RefCell<Vec<NodeData>>,
}

impl NodeArena {
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            nodes: RefCell::new(Vec::new()),
        })
    }

    /// Appends a record, returning its index.
    pub fn push(&self, data: NodeData) -> usize {
        let mut nodes = self.nodes.borrow_mut();
        nodes.push(data);
        nodes.len() - 1
    }

    /// Reads one record. The borrow lasts only for the closure, so callers
    /// can hold `Node` handles while the walk keeps appending.
    pub fn with<R>(&self, index: usize, read: impl FnOnce(&NodeData) -> R) -> R {
        read(&self.nodes.borrow()[index])
    }
}

//! The traversal engine.
//!
//! One depth-first, pre-order walk over a value graph: the root is visited
//! first, then each child in the host container's own order (insertion
//! order for objects, index order for arrays). Every visited position gets
//! exactly one arena record, and the visitor runs against a [`Node`] handle
//! over that record.
//!
//! Cycle detection is an ancestor stack of value identities, pushed on
//! descent and popped on return. Only re-entry into the *active* chain is
//! circular; a value revisited after leaving the chain (a shared diamond
//! reference) is walked again normally. Circular nodes are visited but
//! never descended into.
//!
//! Removal is decided by the visitor while the child list is iterated from
//! a pre-descent snapshot. The engine counts how many earlier siblings were
//! detached and adjusts the edit position explicitly rather than iterating
//! the container while it mutates; a removed subtree is never entered.

use std::rc::Rc;

use jsonsift_value::{Value, ValueRef};
use tracing::{debug, trace};

use crate::Key;
use crate::arena::{NodeArena, NodeData};
use crate::node::Node;

/// What the operator asks the engine to do with a visited node.
pub(crate) enum Step {
    /// Keep the node and descend into its children.
    Continue,
    /// Detach the node from its parent container and skip its subtree.
    Remove,
}

/// Runs one walk from `root`. The visitor's error aborts the walk
/// immediately and propagates unchanged.
pub(crate) fn walk_tree<E>(
    root: &ValueRef,
    visit: &mut dyn FnMut(&Node) -> Result<Step, E>,
) -> Result<(), E> {
    let mut walker = Walker {
        arena: NodeArena::new(),
        ancestors: Vec::new(),
        visit,
    };
    if walker.walk(None, root.clone(), None, 0)? {
        debug!("removal requested for the root node; no enclosing container, ignored");
    }
    Ok(())
}

struct Walker<'v, E> {
    arena: Rc<NodeArena>,
    ancestors: Vec<ValueRef>,
    visit: &'v mut dyn FnMut(&Node) -> Result<Step, E>,
}

impl<E> Walker<'_, E> {
    /// Visits one node and, unless it is circular or removed, its subtree.
    /// Returns whether the visitor asked for this node to be detached; the
    /// caller owns the parent container and performs the edit.
    fn walk(
        &mut self,
        key: Option<Key>,
        value: ValueRef,
        parent: Option<usize>,
        level: usize,
    ) -> Result<bool, E> {
        let circular = self.ancestors.iter().any(|a| a.ptr_eq(&value));
        let index = self.arena.push(NodeData {
            key,
            value: value.clone(),
            parent,
            level,
            value_type: value.value_type(),
            circular,
        });
        let node = Node::from_arena(Rc::clone(&self.arena), index);
        if circular {
            debug!("circular reference at '{}'", node.path());
        } else {
            trace!("visiting '{}'", node.path());
        }

        if let Step::Remove = (self.visit)(&node)? {
            return Ok(true);
        }
        if circular {
            // Descending would re-enter an ancestor.
            return Ok(false);
        }

        let children = snapshot_children(&value);
        if children.is_empty() {
            return Ok(false);
        }

        self.ancestors.push(value.clone());
        let mut removed = 0usize;
        for (position, (child_key, child)) in children.into_iter().enumerate() {
            if self.walk(Some(child_key.clone()), child, Some(index), level + 1)? {
                detach(&value, &child_key, position - removed);
                removed += 1;
            }
        }
        self.ancestors.pop();
        Ok(false)
    }
}

/// Child (key, value) pairs captured before any visitor runs on them, so
/// the iteration below survives the container edits `detach` makes.
fn snapshot_children(value: &ValueRef) -> Vec<(Key, ValueRef)> {
    match &*value.borrow() {
        Value::Object(entries) => entries
            .iter()
            .map(|(name, child)| (Key::Name(name.clone()), child.clone()))
            .collect(),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(index, child)| (Key::Index(index), child.clone()))
            .collect(),
        _ => Vec::new(),
    }
}

/// Edits one child out of its parent container. `position` is the child's
/// snapshot index already adjusted for earlier removals in this sibling
/// pass; objects are edited by name, which earlier removals cannot shift.
fn detach(parent: &ValueRef, key: &Key, position: usize) {
    let mut parent = parent.borrow_mut();
    match (&mut *parent, key) {
        (Value::Object(entries), Key::Name(name)) => {
            if let Some(at) = entries.iter().position(|(entry, _)| entry == name) {
                debug!("removing entry '{}'", name);
                entries.remove(at);
            }
        }
        (Value::Array(items), Key::Index(snapshot)) => {
            if position < items.len() {
                debug!("removing element {} (snapshot index {})", position, snapshot);
                items.remove(position);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;

    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn collect_paths(root: &ValueRef) -> Vec<String> {
        let mut paths = Vec::new();
        let result: Result<(), Infallible> = walk_tree(root, &mut |node| {
            paths.push(node.path());
            Ok(Step::Continue)
        });
        result.unwrap();
        paths
    }

    #[test]
    fn walk_is_preorder_in_container_order() {
        let root = ValueRef::from(json!({
            "a": {"b": 1, "c": [true, false]},
            "d": null
        }));
        assert_eq!(
            collect_paths(&root),
            vec!["", "a", "a.b", "a.c", "a.c.0", "a.c.1", "d"]
        );
    }

    #[test]
    fn every_node_is_visited_exactly_once() {
        let root = ValueRef::from(json!({"a": {"b": 1}, "c": [2, 3]}));
        assert_eq!(collect_paths(&root).len(), 6);
    }

    #[test]
    fn path_array_length_equals_level() {
        let root = ValueRef::from(json!({"a": {"b": [{"c": 1}]}}));
        let result: Result<(), Infallible> = walk_tree(&root, &mut |node| {
            assert_eq!(node.path_array().len(), node.level());
            if let Some(parent) = node.parent() {
                let mut expected = parent.path_array();
                expected.push(node.key().unwrap());
                assert_eq!(node.path_array(), expected);
            }
            Ok(Step::Continue)
        });
        result.unwrap();
    }

    #[test]
    fn self_reference_is_circular_and_terminal() {
        let root = ValueRef::from(json!({"x": {"y": null}}));
        let x = root.borrow().get("x").unwrap();
        x.borrow_mut().insert("y", x.clone());

        let mut seen = Vec::new();
        let result: Result<(), Infallible> = walk_tree(&root, &mut |node| {
            seen.push((node.path(), node.is_circular()));
            Ok(Step::Continue)
        });
        result.unwrap();
        assert_eq!(
            seen,
            vec![
                ("".to_string(), false),
                ("x".to_string(), false),
                ("x.y".to_string(), true),
            ]
        );
    }

    #[test]
    fn shared_diamond_references_are_not_circular() {
        // The same object hangs under two siblings; it leaves the active
        // chain before the second visit, so both walks are ordinary.
        let shared = ValueRef::from(json!({"v": 1}));
        let root = ValueRef::from(json!({}));
        root.borrow_mut().insert("a", shared.clone());
        root.borrow_mut().insert("b", shared);

        let mut circular_flags = Vec::new();
        let result: Result<(), Infallible> = walk_tree(&root, &mut |node| {
            circular_flags.push(node.is_circular());
            Ok(Step::Continue)
        });
        result.unwrap();
        assert_eq!(circular_flags, vec![false; 5]);
    }

    #[test]
    fn alias_into_active_chain_is_circular_even_from_an_array() {
        let root = ValueRef::from(json!({"x": {"arr": ["d", null]}}));
        let x = root.borrow().get("x").unwrap();
        let arr = x.borrow().get("arr").unwrap();
        arr.borrow_mut().replace(1, x.clone());

        let mut seen = Vec::new();
        let result: Result<(), Infallible> = walk_tree(&root, &mut |node| {
            seen.push((node.path(), node.is_circular()));
            Ok(Step::Continue)
        });
        result.unwrap();
        assert_eq!(
            seen,
            vec![
                ("".to_string(), false),
                ("x".to_string(), false),
                ("x.arr".to_string(), false),
                ("x.arr.0".to_string(), false),
                ("x.arr.1".to_string(), true),
            ]
        );
    }

    #[test]
    fn no_node_exists_for_children_of_a_circular_node() {
        let root = ValueRef::from(json!({"x": {"payload": {"deep": 1}, "y": null}}));
        let x = root.borrow().get("x").unwrap();
        x.borrow_mut().insert("y", x.clone());

        let paths = collect_paths(&root);
        // x.y is visited as a circular node, but nothing below it is.
        assert!(paths.contains(&"x.y".to_string()));
        assert!(!paths.contains(&"x.y.payload".to_string()));
        assert_eq!(
            paths,
            vec!["", "x", "x.payload", "x.payload.deep", "x.y"]
        );
    }

    #[test]
    fn removal_skips_the_subtree_and_adjusts_later_indices() {
        let root = ValueRef::from(json!([
            {"drop": true, "inner": {"never": 1}},
            {"keep": 1},
            {"drop": true},
            {"keep": 2}
        ]));

        let mut visited = Vec::new();
        let result: Result<(), Infallible> = walk_tree(&root, &mut |node| {
            visited.push(node.path());
            Ok(if node.has("drop") {
                Step::Remove
            } else {
                Step::Continue
            })
        });
        result.unwrap();

        assert_eq!(root.to_json().unwrap(), json!([{"keep": 1}, {"keep": 2}]));
        // Siblings keep their snapshot indices while the walk runs.
        assert!(visited.contains(&"3".to_string()));
        // The removed subtree was never entered.
        assert!(!visited.iter().any(|p| p.starts_with("0.")));
    }

    #[test]
    fn removing_every_element_empties_the_array() {
        let root = ValueRef::from(json!({"items": [1, 2, 3]}));
        let result: Result<(), Infallible> = walk_tree(&root, &mut |node| {
            Ok(if node.parent().is_some_and(|p| p.key() == Some(Key::name("items"))) {
                Step::Remove
            } else {
                Step::Continue
            })
        });
        result.unwrap();
        assert_eq!(root.to_json().unwrap(), json!({"items": []}));
    }

    #[test]
    fn visitor_error_aborts_the_walk() {
        let root = ValueRef::from(json!({"a": 1, "b": 2, "c": 3}));
        let mut visited = Vec::new();
        let result = walk_tree(&root, &mut |node| {
            visited.push(node.path());
            if node.key() == Some(Key::name("b")) {
                Err("boom")
            } else {
                Ok(Step::Continue)
            }
        });
        assert_eq!(result, Err("boom"));
        assert_eq!(visited, vec!["", "a", "b"]);
    }

    #[test]
    fn undefined_and_null_are_visited_as_leaves() {
        use jsonsift_value::Value;

        let root = ValueRef::from(json!({"n": null}));
        root.borrow_mut().insert("u", Value::Undefined);

        let mut seen = Vec::new();
        let result: Result<(), Infallible> = walk_tree(&root, &mut |node| {
            seen.push((node.path(), node.value_type(), node.is_leaf()));
            Ok(Step::Continue)
        });
        result.unwrap();
        assert_eq!(seen[1], ("n".to_string(), jsonsift_value::ValueType::Null, true));
        assert_eq!(
            seen[2],
            ("u".to_string(), jsonsift_value::ValueType::Undefined, true)
        );
    }
}

//! Literal resolution of dot-separated relative paths.
//!
//! Path lookup is not a traversal: each segment is a direct lookup on the
//! current value (an entry name on objects, a parsed index on arrays) and
//! any miss resolves the whole path to absence. No ancestor bookkeeping
//! runs here; the path string is finite, so the chain walk terminates even
//! through a cyclic graph.

use jsonsift_value::{Value, ValueRef};

use crate::Key;

/// Walks `path` from `start`, returning the (key, value) chain of every
/// step, or `None` if any segment fails to resolve. An empty or malformed
/// segment (leading/trailing/doubled dots) is a miss, not an error.
pub(crate) fn resolve(start: &ValueRef, path: &str) -> Option<Vec<(Key, ValueRef)>> {
    let mut chain = Vec::new();
    let mut current = start.clone();
    for segment in path.split('.') {
        let (key, next) = lookup(&current, segment)?;
        current = next.clone();
        chain.push((key, next));
    }
    Some(chain)
}

fn lookup(value: &ValueRef, segment: &str) -> Option<(Key, ValueRef)> {
    match &*value.borrow() {
        Value::Object(entries) => entries
            .iter()
            .find(|(name, _)| name == segment)
            .map(|(name, child)| (Key::Name(name.clone()), child.clone())),
        Value::Array(items) => {
            let index = segment.parse::<usize>().ok()?;
            items.get(index).map(|child| (Key::Index(index), child.clone()))
        }
        _ => None,
    }
}

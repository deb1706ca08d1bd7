//! # jsonsift_core
//!
//! Node tree, traversal engine, and operators for jsonsift.
//!
//! This crate provides:
//! - [`Tree`], the wrap handle over a JSON-compatible value graph
//! - [`Node`], the traversal-time view of one position (key, path, level,
//!   type, circularity), with relative path lookup
//! - The `filter`, `validate` and `remove` operators, all thin reducers
//!   over one shared depth-first, pre-order walk with ancestor-stack cycle
//!   detection
//!
//! ## Example
//!
//! ```rust
//! use jsonsift_core::Tree;
//! use serde_json::json;
//!
//! let tree = Tree::new(json!({
//!     "employees": [
//!         {"username": "john", "salary": 100},
//!         {"username": "lee", "salary": 300}
//!     ]
//! }));
//!
//! let well_paid = tree.filter(|node| {
//!     let salary = node.get("salary")?;
//!     let name = node.get("username")?;
//!     let salary = salary.value().to_json().ok()?;
//!     (salary.as_i64()? > 200).then(|| name.value().to_json().ok()).flatten()
//! });
//! assert_eq!(well_paid, vec![json!("lee")]);
//! ```
//!
//! The wrapped graph may be cyclic; circular positions are visited once,
//! flagged, and never descended into:
//!
//! ```rust
//! use jsonsift_core::Tree;
//! use jsonsift_value::ValueRef;
//! use serde_json::json;
//!
//! let data = ValueRef::from(json!({"x": {"y": null}}));
//! let x = data.borrow().get("x").unwrap();
//! x.borrow_mut().insert("y", x.clone());
//!
//! let labels = Tree::new(data).filter(|node| {
//!     Some(if node.is_root() {
//!         "root".to_string()
//!     } else if node.is_circular() {
//!         format!("circular key: {}, path: {}", node.key().unwrap(), node.path())
//!     } else {
//!         format!("key: {}, path: {}", node.key().unwrap(), node.path())
//!     })
//! });
//! assert_eq!(labels, vec!["root", "key: x, path: x", "circular key: y, path: x.y"]);
//! ```

mod arena;
mod key;
mod node;
mod path;
mod tree;
mod walk;

pub use key::{Key, KeyMatcher};
pub use node::Node;
pub use tree::Tree;

pub use jsonsift_value::{Value, ValueError, ValueRef, ValueType};

//! # jsonsift_value
//!
//! The value graph wrapped and traversed by jsonsift.
//!
//! This crate provides the JSON-compatible value representation the rest of
//! jsonsift operates on. Unlike `serde_json::Value` it is a *graph*, not a
//! tree: every position holds a [`ValueRef`] (a shared, interiorly mutable
//! handle), so the same value may appear under several keys and a container
//! may contain itself, directly or through intermediaries.
//!
//! ## Architecture
//!
//! - [`Value`] is a closed tagged variant (`Object | Array | String |
//!   Number | Bool | Null | Undefined`); object entries preserve insertion
//!   order
//! - [`ValueRef`] is the shared handle; reference identity (`ptr_eq`) is
//!   what the traversal layer uses to detect cycles
//! - `Undefined` is a first-class leaf value, distinct from `Null` and from
//!   "entry does not exist"
//! - Conversions to and from `serde_json::Value` live in this crate;
//!   converting a cyclic graph back to JSON fails with
//!   [`ValueError::Cycle`]
//!
//! ## Example
//!
//! ```rust
//! use jsonsift_value::{ValueRef, ValueType};
//! use serde_json::json;
//!
//! let data = ValueRef::from(json!({"x": {"y": 1}}));
//! assert_eq!(data.value_type(), ValueType::Object);
//!
//! // Wire a cycle: x.y now points back at x.
//! let x = data.borrow().get("x").unwrap();
//! x.borrow_mut().insert("y", x.clone());
//! assert!(x.to_json().is_err());
//! ```

mod convert;
mod error;
mod value;
mod value_type;

pub use error::ValueError;
pub use value::{Value, ValueRef};
pub use value_type::ValueType;

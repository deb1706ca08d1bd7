//! The shared value graph.
//!
//! [`Value`] is the closed variant of JSON-compatible values; [`ValueRef`]
//! is the shared handle every container slot holds. Sharing handles is what
//! allows a graph to alias subtrees or contain itself, and interior
//! mutability is what lets the remove operator edit the original graph in
//! place while a traversal is in flight.

use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

use serde_json::Number;

use crate::ValueType;

/// A JSON-compatible value.
///
/// Object entries are kept in insertion order, which is also the traversal
/// order guaranteed for object children. `Undefined` is a present leaf
/// value distinct from `Null`; neither is ever silently skipped by a
/// traversal.
#[derive(Debug, Clone)]
pub enum Value {
    /// Insertion-ordered key/value entries.
    Object(Vec<(String, ValueRef)>),
    /// Index-ordered elements.
    Array(Vec<ValueRef>),
    /// UTF-8 string.
    String(String),
    /// Integer or floating-point number.
    Number(Number),
    /// Boolean.
    Bool(bool),
    /// Present-but-null.
    Null,
    /// Present-but-undefined.
    Undefined,
}

impl Value {
    /// Returns the type classification of this value.
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Object(_) => ValueType::Object,
            Value::Array(_) => ValueType::Array,
            Value::String(_) => ValueType::String,
            Value::Number(_) => ValueType::Number,
            Value::Bool(_) => ValueType::Boolean,
            Value::Null => ValueType::Null,
            Value::Undefined => ValueType::Undefined,
        }
    }

    /// Number of direct children. Zero for every non-container.
    pub fn child_count(&self) -> usize {
        match self {
            Value::Object(entries) => entries.len(),
            Value::Array(items) => items.len(),
            _ => 0,
        }
    }

    /// Looks up an object entry by key. `None` for missing keys and for
    /// non-object values.
    pub fn get(&self, key: &str) -> Option<ValueRef> {
        match self {
            Value::Object(entries) => entries
                .iter()
                .find(|(name, _)| name == key)
                .map(|(_, value)| value.clone()),
            _ => None,
        }
    }

    /// Looks up an array element by index. `None` out of bounds and for
    /// non-array values.
    pub fn at(&self, index: usize) -> Option<ValueRef> {
        match self {
            Value::Array(items) => items.get(index).cloned(),
            _ => None,
        }
    }

    /// Inserts or replaces an object entry, preserving the position of an
    /// existing key. Returns the replaced handle, if any. Has no effect on
    /// non-object values.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ValueRef>) -> Option<ValueRef> {
        let Value::Object(entries) = self else {
            return None;
        };
        let key = key.into();
        let value = value.into();
        match entries.iter_mut().find(|(name, _)| *name == key) {
            Some(entry) => Some(std::mem::replace(&mut entry.1, value)),
            None => {
                entries.push((key, value));
                None
            }
        }
    }

    /// Removes an object entry by key, returning the detached handle.
    pub fn remove(&mut self, key: &str) -> Option<ValueRef> {
        let Value::Object(entries) = self else {
            return None;
        };
        let at = entries.iter().position(|(name, _)| name == key)?;
        Some(entries.remove(at).1)
    }

    /// Appends an element to an array. Has no effect on non-array values.
    pub fn push(&mut self, value: impl Into<ValueRef>) {
        if let Value::Array(items) = self {
            items.push(value.into());
        }
    }

    /// Replaces the element at `index`, returning the previous handle.
    /// `None` out of bounds and for non-array values.
    pub fn replace(&mut self, index: usize, value: impl Into<ValueRef>) -> Option<ValueRef> {
        let Value::Array(items) = self else {
            return None;
        };
        let slot = items.get_mut(index)?;
        Some(std::mem::replace(slot, value.into()))
    }
}

/// Structural equality.
///
/// Recurses through shared handles, so comparing a cyclic graph does not
/// terminate; convert with [`ValueRef::to_json`] first when cycles are
/// possible.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Object(a), Value::Object(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Null, Value::Null) => true,
            (Value::Undefined, Value::Undefined) => true,
            _ => false,
        }
    }
}

/// Shared handle to a [`Value`].
///
/// Cloning a `ValueRef` clones the handle, not the value: both clones point
/// at the same slot, and [`ValueRef::ptr_eq`] reports them identical. This
/// identity, not structural equality, is what the traversal layer's cycle
/// detection compares.
#[derive(Clone)]
pub struct ValueRef(Rc<RefCell<Value>>);

impl ValueRef {
    /// Wraps a value in a fresh shared handle.
    pub fn new(value: Value) -> Self {
        Self(Rc::new(RefCell::new(value)))
    }

    /// Immutably borrows the value.
    ///
    /// # Panics
    ///
    /// Panics if the value is currently mutably borrowed.
    pub fn borrow(&self) -> Ref<'_, Value> {
        self.0.borrow()
    }

    /// Mutably borrows the value.
    ///
    /// # Panics
    ///
    /// Panics if the value is currently borrowed.
    pub fn borrow_mut(&self) -> RefMut<'_, Value> {
        self.0.borrow_mut()
    }

    /// Returns true if both handles point at the same slot.
    pub fn ptr_eq(&self, other: &ValueRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Type classification of the held value.
    pub fn value_type(&self) -> ValueType {
        self.borrow().value_type()
    }

    /// Number of direct children of the held value.
    pub fn child_count(&self) -> usize {
        self.borrow().child_count()
    }
}

impl From<Value> for ValueRef {
    fn from(value: Value) -> Self {
        ValueRef::new(value)
    }
}

impl fmt::Debug for ValueRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.borrow().fmt(f)
    }
}

/// Structural equality through the handles; see [`Value`]'s `PartialEq`
/// for the cyclic-graph caveat.
impl PartialEq for ValueRef {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || *self.borrow() == *other.borrow()
    }
}

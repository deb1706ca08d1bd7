//! Conversions between the value graph and `serde_json::Value`.
//!
//! Plain JSON is always a finite tree, so `From<serde_json::Value>` cannot
//! fail and never produces `Undefined` or a cycle. The reverse direction
//! walks the graph with an ancestor stack and fails with
//! [`ValueError::Cycle`] on re-entry. `Undefined` follows `JSON.stringify`
//! semantics on the way out: object entries holding it are dropped, array
//! elements holding it become `null`.

use crate::{Value, ValueError, ValueRef};

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(ValueRef::from).collect())
            }
            serde_json::Value::Object(map) => Value::Object(
                map.into_iter()
                    .map(|(key, value)| (key, ValueRef::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<serde_json::Value> for ValueRef {
    fn from(value: serde_json::Value) -> Self {
        ValueRef::new(Value::from(value))
    }
}

impl ValueRef {
    /// Parses JSON text into a fresh graph.
    pub fn from_json_str(text: &str) -> Result<Self, ValueError> {
        let parsed: serde_json::Value = serde_json::from_str(text)?;
        Ok(ValueRef::from(parsed))
    }

    /// Renders the graph as a `serde_json::Value`.
    ///
    /// Fails with [`ValueError::Cycle`] if the graph re-enters an ancestor.
    /// A top-level `Undefined` renders as `null`.
    pub fn to_json(&self) -> Result<serde_json::Value, ValueError> {
        let mut encoder = Encoder::default();
        encoder.encode(self)
    }
}

#[derive(Default)]
struct Encoder {
    ancestors: Vec<ValueRef>,
    path: Vec<String>,
}

impl Encoder {
    fn encode(&mut self, value: &ValueRef) -> Result<serde_json::Value, ValueError> {
        if self.ancestors.iter().any(|a| a.ptr_eq(value)) {
            return Err(ValueError::cycle(self.path.join(".")));
        }
        let rendered = match &*value.borrow() {
            Value::Null | Value::Undefined => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Number(n) => serde_json::Value::Number(n.clone()),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Array(items) => {
                self.ancestors.push(value.clone());
                let mut rendered = Vec::with_capacity(items.len());
                for (index, item) in items.iter().enumerate() {
                    self.path.push(index.to_string());
                    rendered.push(self.encode(item)?);
                    self.path.pop();
                }
                self.ancestors.pop();
                serde_json::Value::Array(rendered)
            }
            Value::Object(entries) => {
                self.ancestors.push(value.clone());
                let mut rendered = serde_json::Map::new();
                for (key, entry) in entries {
                    // JSON.stringify drops undefined object entries.
                    if matches!(&*entry.borrow(), Value::Undefined) {
                        continue;
                    }
                    self.path.push(key.clone());
                    rendered.insert(key.clone(), self.encode(entry)?);
                    self.path.pop();
                }
                self.ancestors.pop();
                serde_json::Value::Object(rendered)
            }
        };
        Ok(rendered)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::ValueType;

    #[test]
    fn round_trips_plain_json() {
        let doc = json!({
            "name": "admin",
            "ids": [1, 2, 3],
            "nested": {"flag": true, "nothing": null},
            "rate": 0.5
        });
        let graph = ValueRef::from(doc.clone());
        assert_eq!(graph.to_json().unwrap(), doc);
    }

    #[test]
    fn parses_json_text() {
        let graph = ValueRef::from_json_str(r#"{"a": [1, null]}"#).unwrap();
        assert_eq!(graph.value_type(), ValueType::Object);
        assert_eq!(graph.to_json().unwrap(), json!({"a": [1, null]}));
    }

    #[test]
    fn rejects_malformed_json_text() {
        assert!(matches!(
            ValueRef::from_json_str("{not json"),
            Err(ValueError::Json(_))
        ));
    }

    #[test]
    fn undefined_entries_drop_and_elements_nullify() {
        let obj = ValueRef::from(json!({"keep": 1}));
        obj.borrow_mut().insert("gone", Value::Undefined);
        let arr = ValueRef::from(json!([1]));
        arr.borrow_mut().push(Value::Undefined);
        obj.borrow_mut().insert("arr", arr);

        assert_eq!(
            obj.to_json().unwrap(),
            json!({"keep": 1, "arr": [1, null]})
        );
    }

    #[test]
    fn top_level_undefined_renders_as_null() {
        let undef = ValueRef::new(Value::Undefined);
        assert_eq!(undef.to_json().unwrap(), json!(null));
    }

    #[test]
    fn cycle_is_reported_with_its_path() {
        let root = ValueRef::from(json!({"x": {"y": null}}));
        let x = root.borrow().get("x").unwrap();
        x.borrow_mut().insert("y", x.clone());

        match root.to_json() {
            Err(ValueError::Cycle { path }) => assert_eq!(path, "x.y"),
            other => panic!("expected cycle error, got {other:?}"),
        }
    }

    #[test]
    fn shared_but_acyclic_subtrees_render_twice() {
        let shared = ValueRef::from(json!({"v": 7}));
        let root = ValueRef::from(json!({}));
        root.borrow_mut().insert("a", shared.clone());
        root.borrow_mut().insert("b", shared);

        assert_eq!(
            root.to_json().unwrap(),
            json!({"a": {"v": 7}, "b": {"v": 7}})
        );
    }
}

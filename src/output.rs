//! JSON output for compiled expressions.
//!
//! This module implements the abstract sink traits on top of `serde_json`
//! so the compiler can build a [`serde_json::Value`] directly, and on top of
//! [`Parameters`] for an encoding-free value tree. Object keys keep the
//! order in which the compiler wrote them.
//!
//! # Features
//!
//! - **Value output** via [`to_value()`] - an in-memory JSON tree
//! - **Parameters output** via [`to_params()`] - the same tree as nested [`Parameters`]
//! - **Compact output** via [`to_json()`] - minimal whitespace for transmission
//! - **Pretty output** via [`to_json_pretty()`] - human-readable with 2-space indentation
//! - **Float handling** - non-finite floats are written as `null`
//!
//! Note that these helpers write an expression exactly as given, with no
//! depth check. Use [`crate::compiler::compile`] to reduce a query first
//! and to reject trees deeper than [`crate::compiler::MAX_DEPTH`].
//!
//! # Examples
//!
//! ```
//! use clove_search::{dsl::range, output::to_json, Query};
//!
//! let query: Query = range("Y").gt(4).into();
//! assert_eq!(to_json(&query), r#"{"range":{"Y":{"gt":4}}}"#);
//! ```

use serde_json::{Map, Number, Value as JsonValue};

use crate::{
    compiler::Expression,
    params::Parameters,
    sink::{ArraySink, ObjectSink, Scalar},
    value::Value,
};

fn scalar(value: Scalar<'_>) -> JsonValue {
    match value {
        Scalar::Null => JsonValue::Null,
        Scalar::Boolean(b) => JsonValue::Bool(b),
        Scalar::Integer(n) => JsonValue::Number(n.into()),
        Scalar::Float(n) => Number::from_f64(n)
            .map(JsonValue::Number)
            .unwrap_or(JsonValue::Null),
        Scalar::String(s) => JsonValue::String(s.to_string()),
    }
}

impl ObjectSink for Map<String, JsonValue> {
    fn field(&mut self, key: &str, value: Scalar<'_>) {
        self.insert(key.to_string(), scalar(value));
    }

    fn object(&mut self, key: &str, build: &mut dyn FnMut(&mut dyn ObjectSink)) {
        let mut inner = Map::new();
        build(&mut inner);
        self.insert(key.to_string(), JsonValue::Object(inner));
    }

    fn array(&mut self, key: &str, build: &mut dyn FnMut(&mut dyn ArraySink)) {
        let mut inner: Vec<JsonValue> = Vec::new();
        build(&mut inner);
        self.insert(key.to_string(), JsonValue::Array(inner));
    }
}

impl ArraySink for Vec<JsonValue> {
    fn value(&mut self, value: Scalar<'_>) {
        self.push(scalar(value));
    }

    fn object(&mut self, build: &mut dyn FnMut(&mut dyn ObjectSink)) {
        let mut inner = Map::new();
        build(&mut inner);
        self.push(JsonValue::Object(inner));
    }

    fn array(&mut self, build: &mut dyn FnMut(&mut dyn ArraySink)) {
        let mut inner: Vec<JsonValue> = Vec::new();
        build(&mut inner);
        self.push(JsonValue::Array(inner));
    }
}

fn scalar_value(value: Scalar<'_>) -> Value {
    match value {
        Scalar::Null => Value::Null,
        Scalar::Boolean(b) => Value::Boolean(b),
        Scalar::Integer(n) => Value::Integer(n),
        Scalar::Float(n) => Value::Float(n),
        Scalar::String(s) => Value::from(s),
    }
}

// In-memory sink. Null fields follow the container's null-drops-key rule.
impl ObjectSink for Parameters {
    fn field(&mut self, key: &str, value: Scalar<'_>) {
        self.set(key, scalar_value(value));
    }

    fn object(&mut self, key: &str, build: &mut dyn FnMut(&mut dyn ObjectSink)) {
        let mut inner = Parameters::new();
        build(&mut inner);
        self.set(key, inner);
    }

    fn array(&mut self, key: &str, build: &mut dyn FnMut(&mut dyn ArraySink)) {
        let mut inner: Vec<Value> = Vec::new();
        build(&mut inner);
        self.set(key, Value::Array(inner));
    }
}

impl ArraySink for Vec<Value> {
    fn value(&mut self, value: Scalar<'_>) {
        self.push(scalar_value(value));
    }

    fn object(&mut self, build: &mut dyn FnMut(&mut dyn ObjectSink)) {
        let mut inner = Parameters::new();
        build(&mut inner);
        self.push(Value::Object(inner));
    }

    fn array(&mut self, build: &mut dyn FnMut(&mut dyn ArraySink)) {
        let mut inner: Vec<Value> = Vec::new();
        build(&mut inner);
        self.push(Value::Array(inner));
    }
}

/// Writes `expr` into a fresh [`Parameters`] tree instead of JSON.
pub fn to_params(expr: &dyn Expression) -> Parameters {
    let mut params = Parameters::new();
    expr.write(&mut params);
    params
}

/// Writes `expr` into a fresh JSON object.
pub fn to_value(expr: &dyn Expression) -> JsonValue {
    let mut object = Map::new();
    expr.write(&mut object);
    JsonValue::Object(object)
}

/// Converts an expression to a compact JSON string.
pub fn to_json(expr: &dyn Expression) -> String {
    to_value(expr).to_string()
}

/// Converts an expression to a pretty-printed JSON string.
pub fn to_json_pretty(expr: &dyn Expression) -> String {
    // Serializing a `serde_json::Value` cannot fail.
    serde_json::to_string_pretty(&to_value(expr)).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nan_becomes_null() {
        let mut object = Map::new();
        object.field("x", Scalar::Float(f64::NAN));
        assert_eq!(object["x"], JsonValue::Null);
    }

    #[test]
    fn test_nested_order_preserved() {
        let mut object = Map::new();
        object.field("z", Scalar::Integer(1));
        object.array("a", &mut |arr| {
            arr.value(Scalar::String("x"));
            arr.object(&mut |o| o.field("k", Scalar::Boolean(true)));
        });

        assert_eq!(
            JsonValue::Object(object).to_string(),
            r#"{"z":1,"a":["x",{"k":true}]}"#
        );
    }
}

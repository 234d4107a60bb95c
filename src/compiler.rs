//! Serialization visitor.
//!
//! The compiler turns expression nodes into calls on an abstract
//! [`ObjectSink`]/[`ArraySink`]. It knows nothing about the concrete output
//! format; see [`crate::output`] for the JSON sink.
//!
//! Dispatch works by the kind of value being visited:
//!
//! - a [`NamedExpression`] opens an object under its wire name and fills it
//! - a mutable query node is materialized and dispatched again
//! - a slice of expressions becomes an array of objects
//! - a [`Parameters`] container writes one field per key
//! - a [`Value`] writes a scalar, or recurses for arrays, objects and fields
//!
//! Compilation itself (`reduce` then visit) is exposed as [`compile`].
//!
//! Writing follows the shape of the tree through nested sink calls, so
//! compilation refuses reduced trees deeper than [`MAX_DEPTH`] with
//! [`QueryError::DepthLimitExceeded`]. Reduction itself has no such limit.

use tracing::{debug, warn};

use crate::{
    ast::Query,
    error::{QueryError, Result},
    output,
    params::Parameters,
    sink::{ArraySink, ObjectSink, Scalar},
    value::Value,
};

/// Deepest reduced query tree that [`compile`] will write.
pub const MAX_DEPTH: usize = 128;

/// Anything that writes its own fields into an already-open object.
pub trait Expression {
    fn write(&self, out: &mut dyn ObjectSink);
}

/// An expression that appears on the wire as `{"<name>": {...}}`.
pub trait NamedExpression {
    /// Wire key of the wrapping object.
    fn name(&self) -> &'static str;

    /// Writes the contents of the wrapping object.
    fn write_body(&self, out: &mut dyn ObjectSink);
}

/// Opens `name` and lets the node fill it.
pub fn visit_named(out: &mut dyn ObjectSink, expr: &dyn NamedExpression) {
    out.object(expr.name(), &mut |body| expr.write_body(body));
}

/// Writes `key: {..}` holding a single expression.
pub fn visit_expression<E: Expression + ?Sized>(out: &mut dyn ObjectSink, key: &str, expr: &E) {
    out.object(key, &mut |inner| expr.write(inner));
}

/// Writes `key: [..]` with one object per expression, in list order.
pub fn visit_expressions<E: Expression>(out: &mut dyn ObjectSink, key: &str, items: &[E]) {
    out.array(key, &mut |arr| {
        for item in items {
            arr.object(&mut |inner| item.write(inner));
        }
    });
}

/// Same as [`visit_expressions`] but omits the key when `items` is empty.
pub fn visit_nonempty<E: Expression>(out: &mut dyn ObjectSink, key: &str, items: &[E]) {
    if !items.is_empty() {
        visit_expressions(out, key, items);
    }
}

/// Writes every present key of `params` as a field.
pub fn visit_params(out: &mut dyn ObjectSink, params: &Parameters) {
    for (key, value) in params.iter() {
        visit_value(out, key, value);
    }
}

/// Writes `key: value`.
pub fn visit_value(out: &mut dyn ObjectSink, key: &str, value: &Value) {
    match value {
        Value::Null => out.field(key, Scalar::Null),
        Value::Boolean(b) => out.field(key, Scalar::Boolean(*b)),
        Value::Integer(n) => out.field(key, Scalar::Integer(*n)),
        Value::Float(n) => out.field(key, Scalar::Float(*n)),
        Value::String(s) => out.field(key, Scalar::String(s)),
        Value::Field(f) => out.field(key, Scalar::String(f.name())),
        Value::Array(items) => out.array(key, &mut |arr| {
            for item in items {
                visit_item(arr, item);
            }
        }),
        Value::Object(params) => out.object(key, &mut |inner| visit_params(inner, params)),
    }
}

/// Appends `value` to an open array.
pub fn visit_item(out: &mut dyn ArraySink, value: &Value) {
    match value {
        Value::Null => out.value(Scalar::Null),
        Value::Boolean(b) => out.value(Scalar::Boolean(*b)),
        Value::Integer(n) => out.value(Scalar::Integer(*n)),
        Value::Float(n) => out.value(Scalar::Float(*n)),
        Value::String(s) => out.value(Scalar::String(s)),
        Value::Field(f) => out.value(Scalar::String(f.name())),
        Value::Array(items) => out.array(&mut |arr| {
            for item in items {
                visit_item(arr, item);
            }
        }),
        Value::Object(params) => out.object(&mut |inner| visit_params(inner, params)),
    }
}

/// Fails if `query` nests deeper than [`MAX_DEPTH`].
pub(crate) fn check_depth(query: &Query) -> Result<()> {
    let depth = query.depth();
    if depth > MAX_DEPTH {
        warn!(depth, limit = MAX_DEPTH, "query rejected: nested too deep");
        return Err(QueryError::DepthLimitExceeded {
            depth,
            limit: MAX_DEPTH,
        });
    }
    Ok(())
}

/// Reduces `query` and writes what is left into `out`.
///
/// Returns `Ok(false)` (and writes nothing) when the whole tree reduces
/// away.
pub fn compile_into(out: &mut dyn ObjectSink, query: &Query) -> Result<bool> {
    let Some(reduced) = query.reduce() else {
        return Ok(false);
    };
    check_depth(&reduced)?;
    reduced.write(out);
    Ok(true)
}

/// Reduces `query` and renders it as a JSON value.
///
/// `None` means the tree contributes nothing and the caller should omit it.
///
/// ```
/// use clove_search::{compiler::compile, dsl::*};
/// use serde_json::json;
///
/// let query = bool_query().should(term("X", 0));
/// assert_eq!(compile(&query.into()).unwrap(), Some(json!({"term": {"X": 0}})));
///
/// assert_eq!(compile(&bool_query().into()).unwrap(), None);
/// ```
pub fn compile(query: &Query) -> Result<Option<serde_json::Value>> {
    let reduced = query.reduce();
    debug!(
        nodes = query.count_nodes(),
        reduced_nodes = reduced.as_ref().map_or(0, Query::count_nodes),
        "compiled query"
    );
    let Some(reduced) = reduced else {
        return Ok(None);
    };
    check_depth(&reduced)?;
    Ok(Some(output::to_value(&reduced)))
}

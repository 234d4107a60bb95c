//! Abstract object/array builders the compiler writes into.
//!
//! Nesting is scoped: opening a nested object or array hands a fresh sink to
//! a callback, and the parent cannot be written again until the callback
//! returns. That gives every concrete encoding (JSON text, an in-memory
//! value tree, ...) strict stack discipline without any explicit `close`.
//!
//! The JSON implementation lives in [`crate::output`].

/// A scalar written as a field or array element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar<'a> {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(&'a str),
}

/// Builder for one open object.
pub trait ObjectSink {
    /// Writes `key: value`.
    fn field(&mut self, key: &str, value: Scalar<'_>);

    /// Writes `key: {..}`, filled by `build`.
    fn object(&mut self, key: &str, build: &mut dyn FnMut(&mut dyn ObjectSink));

    /// Writes `key: [..]`, filled by `build`.
    fn array(&mut self, key: &str, build: &mut dyn FnMut(&mut dyn ArraySink));
}

/// Builder for one open array.
pub trait ArraySink {
    /// Appends a scalar element.
    fn value(&mut self, value: Scalar<'_>);

    /// Appends an object element, filled by `build`.
    fn object(&mut self, build: &mut dyn FnMut(&mut dyn ObjectSink));

    /// Appends an array element, filled by `build`.
    fn array(&mut self, build: &mut dyn FnMut(&mut dyn ArraySink));
}

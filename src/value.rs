use crate::{field::Field, params::Parameters};

/// A value stored in a [`Parameters`] container.
///
/// Values are opaque to the container. The compiler knows how to write each
/// variant: scalars become wire scalars, arrays and nested parameters become
/// arrays and objects, and fields become their qualified name.
///
/// A query is never a value. Queries only sit in the typed slots of other
/// queries, where traversal and reduction reach them:
///
/// ```compile_fail
/// use clove_search::{dsl::term, Query, Value};
///
/// let query: Query = term("a", 1).into();
/// let _ = Value::from(query);
/// ```
///
/// # Null marker
///
/// [`Value::Null`] doubles as the "remove this key" marker when merging
/// parameters. `None` converts into it, so optional builder arguments can
/// be passed straight through.
///
/// # Examples
///
/// ```
/// use clove_search::Value;
///
/// assert_eq!(Value::from(2), Value::Integer(2));
/// assert_eq!(Value::from(2.0), Value::Float(2.0));
/// assert_eq!(Value::from(None::<i64>), Value::Null);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Null / absent marker
    Null,

    /// Boolean (true/false)
    Boolean(bool),

    /// Floating-point number, always written with a fractional part
    Float(f64),

    /// Integer number (kept apart from floats on the wire)
    Integer(i64),

    /// UTF-8 string
    String(String),

    /// Ordered sequence of values
    Array(Vec<Value>),

    /// Nested key-ordered object
    Object(Parameters),

    /// Field reference, written as its qualified name
    Field(Field),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Get as string slice (strings and field names)
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            Value::Field(f) => Some(f.name()),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

macro_rules! integer_values {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(n: $t) -> Self {
                    Value::Integer(n as i64)
                }
            }
        )*
    };
}

integer_values!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        match i64::try_from(n) {
            Ok(n) => Value::Integer(n),
            Err(_) => Value::Float(n as f64),
        }
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Value::from(n as u64)
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value::Float(n as f64)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Field> for Value {
    fn from(f: Field) -> Self {
        Value::Field(f)
    }
}

impl From<&Field> for Value {
    fn from(f: &Field) -> Self {
        Value::Field(f.clone())
    }
}

impl From<&Value> for Value {
    fn from(v: &Value) -> Self {
        v.clone()
    }
}

impl From<Parameters> for Value {
    fn from(p: Parameters) -> Self {
        Value::Object(p)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Array(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}

//! Key-ordered parameter container.
//!
//! [`Parameters`] is how optional wire fields are assembled throughout the
//! crate: every leaf query keeps one for its options, scripts keep one for
//! their payload, and the request keeps two (body extras and URL parameters).
//!
//! # Merge semantics
//!
//! - Keys keep the position at which they were first introduced.
//! - Setting an existing key overwrites it in place.
//! - Setting a key to the null marker removes it, even if a base container
//!   supplied it.
//!
//! ```
//! use clove_search::{params, Value};
//!
//! let base = params! { "a" => 1, "b" => 2 };
//! let merged = params! { base; "b" => Value::Null, "c" => 3 };
//!
//! let keys: Vec<&str> = merged.keys().collect();
//! assert_eq!(keys, ["a", "c"]);
//! ```

use indexmap::IndexMap;

use crate::value::Value;

/// Ordered mapping from string keys to [`Value`]s with override and
/// null-drops-key semantics.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Parameters {
    entries: IndexMap<String, Value>,
}

impl Parameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a container from an optional base followed by entries applied
    /// in order.
    pub fn merged<K, V, I>(base: Option<&Parameters>, entries: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut params = base.cloned().unwrap_or_default();
        params.extend(entries);
        params
    }

    /// Inserts, overwrites, or (for the null marker) removes `key`.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        match value.into() {
            Value::Null => {
                self.entries.shift_remove(&key);
            }
            value => {
                self.entries.insert(key, value);
            }
        }
    }

    /// Builder form of [`Parameters::set`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    /// Applies `entries` in order on top of this container.
    ///
    /// A null entry removes its key. Another [`Parameters`] can be passed
    /// through [`Parameters::iter`], but since a container never holds the
    /// null marker that only ever overrides.
    pub fn merge<K, V, I>(&mut self, entries: I)
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        for (key, value) in entries {
            self.set(key, value);
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_not_empty(&self) -> bool {
        !self.entries.is_empty()
    }
}

impl<K, V> Extend<(K, V)> for Parameters
where
    K: Into<String>,
    V: Into<Value>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.merge(iter);
    }
}

impl<K, V> FromIterator<(K, V)> for Parameters
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Parameters::merged(None, iter)
    }
}

/// Builds a [`Parameters`] container.
///
/// `params! { "k" => v, ... }` starts empty; `params! { base; "k" => v, ... }`
/// starts from a clone of `base`.
#[macro_export]
macro_rules! params {
    () => {
        $crate::Parameters::new()
    };
    ($base:expr; $($key:expr => $value:expr),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut params = ::core::clone::Clone::clone(&$base);
        $( params.set($key, $value); )*
        params
    }};
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut params = $crate::Parameters::new();
        $( params.set($key, $value); )+
        params
    }};
}

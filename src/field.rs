use std::{fmt, sync::Arc};

/// A qualified field name, as produced by the mapping layer.
///
/// Fields are shared leaf values: cloning is cheap and the name is never
/// parsed or mutated here. On the wire a field is just its name.
///
/// ```
/// use clove_search::Field;
///
/// let f = Field::new("user.address.city");
/// assert_eq!(f.name(), "user.address.city");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Field(Arc<str>);

impl Field {
    pub fn new(name: impl AsRef<str>) -> Self {
        Field(Arc::from(name.as_ref()))
    }

    /// The wire name of the field.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Field {
    fn from(name: &str) -> Self {
        Field::new(name)
    }
}

impl From<String> for Field {
    fn from(name: String) -> Self {
        Field(Arc::from(name))
    }
}

impl From<&Field> for Field {
    fn from(field: &Field) -> Self {
        field.clone()
    }
}

use std::{fmt, marker::PhantomData, sync::Arc};

#[derive(Debug)]
struct Token {
    label: Option<String>,
}

/// Opaque identity token for one mutable node of kind `T`.
///
/// A handle is a key, not a pointer: it is resolved by walking the tree at
/// mutation time, so the tree can be cloned or reduced between mutations
/// without invalidating it. Two handles are equal only if one is a clone of
/// the other; labels are for debugging and take no part in identity.
///
/// ```
/// use clove_search::{BoolNode, Handle};
///
/// let a: Handle<BoolNode> = Handle::labeled("filters");
/// let b: Handle<BoolNode> = Handle::labeled("filters");
///
/// assert_eq!(a, a.clone());
/// assert_ne!(a, b);
/// ```
pub struct Handle<T> {
    token: Arc<Token>,
    _kind: PhantomData<fn() -> T>,
}

impl<T> Handle<T> {
    pub fn new() -> Self {
        Handle {
            token: Arc::new(Token { label: None }),
            _kind: PhantomData,
        }
    }

    pub fn labeled(label: impl Into<String>) -> Self {
        Handle {
            token: Arc::new(Token {
                label: Some(label.into()),
            }),
            _kind: PhantomData,
        }
    }

    pub fn label(&self) -> Option<&str> {
        self.token.label.as_deref()
    }
}

impl<T> Default for Handle<T> {
    fn default() -> Self {
        Handle::new()
    }
}

impl<T> Clone for Handle<T> {
    fn clone(&self) -> Self {
        Handle {
            token: Arc::clone(&self.token),
            _kind: PhantomData,
        }
    }
}

impl<T> PartialEq for Handle<T> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.token, &other.token)
    }
}

impl<T> Eq for Handle<T> {}

impl<T> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handle({self})")
    }
}

impl<T> fmt::Display for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.label() {
            Some(label) => write!(f, "{label}"),
            None => write!(f, "{:p}", Arc::as_ptr(&self.token)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::BoolNode;

    #[test]
    fn test_label_is_shared_by_clones() {
        let handle = Handle::<BoolNode>::labeled("filters");

        assert_eq!(handle.label(), Some("filters"));
        assert_eq!(handle.clone().label(), Some("filters"));
        assert_eq!(handle.to_string(), "filters");
    }

    #[test]
    fn test_unlabeled_handle_displays_its_address() {
        let handle = Handle::<BoolNode>::new();

        assert_eq!(handle.label(), None);
        assert!(handle.to_string().starts_with("0x"));
        assert_eq!(format!("{handle:?}"), format!("Handle({handle})"));
    }
}

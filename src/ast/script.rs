use crate::{
    compiler::{Expression, visit_params},
    error::{QueryError, Result},
    params::Parameters,
    sink::{ObjectSink, Scalar},
    value::Value,
};

/// An inline or stored script.
///
/// Exactly one of `source` and `id` is set; [`Script::new`] enforces it.
///
/// ```
/// use clove_search::Script;
///
/// assert!(Script::new(Some("doc['x'].value"), None::<&str>).is_ok());
/// assert!(Script::new(None::<&str>, None::<&str>).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Script {
    source: Option<String>,
    id: Option<String>,
    lang: Option<String>,
    params: Parameters,
}

impl Script {
    pub fn new<S: Into<String>, I: Into<String>>(source: Option<S>, id: Option<I>) -> Result<Self> {
        match (source, id) {
            (Some(source), None) => Ok(Script::inline(source)),
            (None, Some(id)) => Ok(Script::stored(id)),
            (Some(_), Some(_)) => Err(QueryError::invalid(
                "script takes either an inline source or a stored id, not both",
            )),
            (None, None) => Err(QueryError::invalid(
                "script needs an inline source or a stored id",
            )),
        }
    }

    pub fn inline(source: impl Into<String>) -> Self {
        Script {
            source: Some(source.into()),
            id: None,
            lang: None,
            params: Parameters::new(),
        }
    }

    pub fn stored(id: impl Into<String>) -> Self {
        Script {
            source: None,
            id: Some(id.into()),
            lang: None,
            params: Parameters::new(),
        }
    }

    pub fn lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.set(key, value);
        self
    }

    /// Applies `entries` to the script parameters; a null entry removes
    /// its key.
    pub fn params<K, V, I>(mut self, entries: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        self.params.merge(entries);
        self
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

impl Expression for Script {
    fn write(&self, out: &mut dyn ObjectSink) {
        if let Some(source) = &self.source {
            out.field("source", Scalar::String(source));
        }
        if let Some(id) = &self.id {
            out.field("id", Scalar::String(id));
        }
        if let Some(lang) = &self.lang {
            out.field("lang", Scalar::String(lang));
        }
        if self.params.is_not_empty() {
            out.object("params", &mut |inner| visit_params(inner, &self.params));
        }
    }
}

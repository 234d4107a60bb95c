//! Top-level search request.
//!
//! [`SearchRequest`] owns the root query together with pagination, sorts
//! and rescorers, and turns all of it into a request body plus URL
//! parameters on demand. Mutable nodes anywhere in the root query or in a
//! rescore query can be edited through their handles between compiles.

use serde_json::Map;
use tracing::debug;

use crate::{
    ast::{Query, Rescore, Sort},
    compiler::{Expression, check_depth, visit_expression, visit_params, visit_value},
    config::SearchDefaults,
    error::Result,
    handle::Handle,
    node::MutableNode,
    params::Parameters,
    sink::ObjectSink,
    value::Value,
    walk,
    wire::SearchType,
};

/// Output of [`SearchRequest::compile`].
#[derive(Debug, Clone, PartialEq)]
pub struct Compiled {
    /// Request body, `{}` when nothing is set
    pub body: serde_json::Value,
    /// URL-level parameters (`routing`, `search_type`, ...)
    pub params: Parameters,
}

/// A search request under construction.
///
/// ```
/// use clove_search::{dsl::*, SearchRequest};
/// use serde_json::json;
///
/// let mut request = SearchRequest::new().query(term("status", "active")).size(10);
/// request.routing("tenant-7");
///
/// let compiled = request.compile().unwrap();
/// assert_eq!(compiled.body, json!({"query": {"term": {"status": "active"}}, "size": 10}));
/// assert!(compiled.params.contains_key("routing"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct SearchRequest {
    query: Option<Query>,
    from: Option<u64>,
    size: Option<u64>,
    track_total_hits: Option<Value>,
    sort: Vec<Sort>,
    rescore: Vec<Rescore>,
    body: Parameters,
    params: Parameters,
}

impl SearchRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(mut self, query: impl Into<Query>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn from(mut self, from: u64) -> Self {
        self.from = Some(from);
        self
    }

    pub fn size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    /// `true`, `false`, or a count threshold.
    pub fn track_total_hits(mut self, track: impl Into<Value>) -> Self {
        self.track_total_hits = Some(track.into()).filter(|v| !v.is_null());
        self
    }

    pub fn sort(mut self, sort: Sort) -> Self {
        self.sort.push(sort);
        self
    }

    pub fn rescore(mut self, rescore: Rescore) -> Self {
        self.rescore.push(rescore);
        self
    }

    pub fn root(&self) -> Option<&Query> {
        self.query.as_ref()
    }

    pub fn set_query(&mut self, query: impl Into<Query>) {
        self.query = Some(query.into());
    }

    /// Sets (or with the null marker, removes) an extra body field.
    pub fn body_param(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.body.set(key, value);
        self
    }

    /// Sets (or with the null marker, removes) a URL parameter.
    pub fn param(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.params.set(key, value);
        self
    }

    pub fn routing(&mut self, routing: impl Into<String>) -> &mut Self {
        self.param("routing", routing.into())
    }

    pub fn search_type(&mut self, search_type: SearchType) -> &mut Self {
        self.param("search_type", search_type)
    }

    pub fn preference(&mut self, preference: impl Into<String>) -> &mut Self {
        self.param("preference", preference.into())
    }

    pub fn timeout(&mut self, timeout: impl Into<String>) -> &mut Self {
        self.param("timeout", timeout.into())
    }

    /// Fills values left unset from `defaults`.
    pub fn with_defaults(mut self, defaults: &SearchDefaults) -> Self {
        if self.size.is_none() {
            self.size = defaults.size;
        }
        if self.track_total_hits.is_none() {
            self.track_total_hits = defaults.track_total_hits.map(Value::from);
        }
        let fallbacks = [
            ("search_type", defaults.search_type.map(Value::from)),
            ("timeout", defaults.timeout.clone().map(Value::from)),
            ("preference", defaults.preference.clone().map(Value::from)),
        ];
        for (key, value) in fallbacks {
            if !self.params.contains_key(key) {
                self.params.set(key, value);
            }
        }
        self
    }

    /// Applies `f` to the mutable node bound to `handle`.
    ///
    /// The root query is searched first, then each rescore query.
    pub fn mutate<T, F>(&mut self, handle: &Handle<T>, f: F) -> Result<()>
    where
        T: MutableNode,
        F: FnOnce(&mut T),
    {
        let roots: Vec<&mut Query> = self
            .query
            .iter_mut()
            .chain(self.rescore.iter_mut().map(|r| &mut r.query))
            .collect();
        walk::mutate_in(roots, handle, f)
    }

    /// The root query after reduction, `None` if it reduces away.
    pub fn reduced_query(&self) -> Option<Query> {
        self.query.as_ref().and_then(Query::reduce)
    }

    /// Writes the body fields into `out`.
    ///
    /// Order: query, from, size, track_total_hits, sort, rescore, then extra
    /// body fields. Empty items are left out.
    ///
    /// Fails before writing anything if the reduced root query or any
    /// reduced rescore query nests deeper than
    /// [`MAX_DEPTH`](crate::compiler::MAX_DEPTH).
    pub fn write_body(&self, out: &mut dyn ObjectSink) -> Result<()> {
        let query = self.reduced_query();
        if let Some(query) = &query {
            check_depth(query)?;
        }
        let rescore: Vec<Rescore> = self.rescore.iter().filter_map(Rescore::reduce).collect();
        for entry in &rescore {
            check_depth(&entry.query)?;
        }

        if let Some(query) = &query {
            visit_expression(out, "query", query);
        }
        if let Some(from) = self.from {
            visit_value(out, "from", &Value::from(from));
        }
        if let Some(size) = self.size {
            visit_value(out, "size", &Value::from(size));
        }
        if let Some(track) = &self.track_total_hits {
            visit_value(out, "track_total_hits", track);
        }
        if !self.sort.is_empty() {
            out.array("sort", &mut |arr| {
                for sort in &self.sort {
                    sort.write_item(arr);
                }
            });
        }
        if !rescore.is_empty() {
            out.array("rescore", &mut |arr| {
                for entry in &rescore {
                    arr.object(&mut |inner| entry.write(inner));
                }
            });
        }
        visit_params(out, &self.body);
        Ok(())
    }

    /// Reduces and serializes the request.
    pub fn compile(&self) -> Result<Compiled> {
        let mut body = Map::new();
        self.write_body(&mut body)?;
        debug!(
            fields = body.len(),
            has_query = body.contains_key("query"),
            params = self.params.len(),
            "compiled search request"
        );
        Ok(Compiled {
            body: serde_json::Value::Object(body),
            params: self.params.clone(),
        })
    }
}

impl Compiled {
    /// URL parameters rendered as strings, in insertion order.
    pub fn param_pairs(&self) -> Vec<(String, String)> {
        self.params
            .iter()
            .filter_map(|(key, value)| {
                let rendered = match value {
                    Value::Boolean(b) => b.to_string(),
                    Value::Integer(n) => n.to_string(),
                    Value::Float(n) => n.to_string(),
                    other => other.as_str()?.to_string(),
                };
                Some((key.to_string(), rendered))
            })
            .collect()
    }
}

//! # Clove Search - Query Expression Model
//!
//! This module defines the expression tree for search request bodies: the
//! leaf and compound queries, score functions, scripts, sorts and rescorers
//! that together describe what a caller wants the search engine to do.
//!
//! ## Architecture Overview
//!
//! The model is organized into focused submodules:
//!
//! - **[query]** - the [`Query`] sum type and child traversal
//! - **[leaves]** - leaf queries (term, terms, range, match, exists, ids, ...)
//! - **[compound]** - queries with children (bool, dis_max, function_score, nested)
//! - **[functions]** - function-score entries
//! - **[script]** - inline or stored scripts
//! - **[sort]** - field and script sorts
//! - **[rescore]** - query rescorers
//!
//! Mutable, handle-addressed nodes live in [`crate::node`].
//!
//! ## Quick Start
//!
//! ```
//! use clove_search::{compiler::compile, dsl::*};
//! use serde_json::json;
//!
//! let query = bool_query()
//!     .filter(term("status", "active"))
//!     .must(match_query("title", "rust"));
//!
//! assert_eq!(
//!     compile(&query.into()).unwrap(),
//!     Some(json!({
//!         "bool": {
//!             "filter": [{"term": {"status": "active"}}],
//!             "must": [{"match": {"title": "rust"}}]
//!         }
//!     }))
//! );
//! ```
//!
//! ## Core Concepts
//!
//! ### Named expressions
//!
//! Every query is written as a single named object, `{"<name>": {...}}`.
//! Score functions, scripts and rescorers are anonymous objects that live
//! inside a named one.
//!
//! ### Options
//!
//! Leaf queries carry an options [`Parameters`](crate::Parameters) container
//! for optional wire fields (`boost`, `analyzer`, `operator`, ...). Anything
//! the typed builders do not name can be set with `.option(key, value)`.
//!
//! ### Reduction
//!
//! Trees are simplified before they are written: empty compound queries
//! disappear and single-clause wrappers collapse to their clause. See
//! [`Query::reduce`].

/// Adds the shared `boost` / `option` builders to types with an `options`
/// container.
macro_rules! option_builders {
    ($($ty:ident),* $(,)?) => {
        $(
            impl $ty {
                pub fn boost(mut self, boost: f64) -> Self {
                    self.options.set("boost", boost);
                    self
                }

                /// Sets (or, with a null value, removes) an arbitrary wire option.
                pub fn option(
                    mut self,
                    key: impl Into<String>,
                    value: impl Into<$crate::value::Value>,
                ) -> Self {
                    self.options.set(key, value);
                    self
                }
            }
        )*
    };
}

pub mod compound;
pub mod functions;
pub mod leaves;
pub mod query;
pub mod rescore;
pub mod script;
pub mod sort;

pub use compound::{BoolQuery, DisMaxQuery, FunctionScoreQuery, NestedQuery};
pub use functions::{FieldValueFactor, FunctionKind, ScoreFunction};
pub use leaves::{
    ExistsQuery, IdsQuery, MatchAllQuery, MatchPhraseQuery, MatchQuery, MultiMatchQuery,
    RangeQuery, TermQuery, TermsQuery,
};
pub use query::{Children, ChildrenMut, Query};
pub use rescore::Rescore;
pub use script::Script;
pub use sort::{Sort, SortTarget};

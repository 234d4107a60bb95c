//! Short constructors for building query trees.
//!
//! Every function returns the concrete builder type, which converts into
//! [`Query`](crate::Query) wherever a query is expected.
//!
//! ```
//! use clove_search::{dsl::*, output::to_json, Query};
//!
//! let query: Query = bool_query()
//!     .filter(range("price").gte(10).lt(20))
//!     .must_not(exists("deleted_at"))
//!     .into();
//!
//! assert_eq!(
//!     to_json(&query),
//!     concat!(
//!         r#"{"bool":{"filter":[{"range":{"price":{"gte":10,"lt":20}}}],"#,
//!         r#""must_not":[{"exists":{"field":"deleted_at"}}]}}"#
//!     )
//! );
//! ```

use crate::{
    ast::{
        BoolQuery, DisMaxQuery, ExistsQuery, FunctionScoreQuery, IdsQuery, MatchAllQuery,
        MatchPhraseQuery, MatchQuery, MultiMatchQuery, NestedQuery, Query, RangeQuery, TermQuery,
        TermsQuery,
    },
    field::Field,
    value::Value,
};

pub fn match_all() -> MatchAllQuery {
    MatchAllQuery::new()
}

pub fn term(field: impl Into<Field>, value: impl Into<Value>) -> TermQuery {
    TermQuery::new(field, value)
}

pub fn terms<V: Into<Value>>(
    field: impl Into<Field>,
    values: impl IntoIterator<Item = V>,
) -> TermsQuery {
    TermsQuery::new(field, values)
}

pub fn range(field: impl Into<Field>) -> RangeQuery {
    RangeQuery::new(field)
}

/// `match` is a keyword, hence the suffix.
pub fn match_query(field: impl Into<Field>, query: impl Into<Value>) -> MatchQuery {
    MatchQuery::new(field, query)
}

pub fn match_phrase(field: impl Into<Field>, query: impl Into<Value>) -> MatchPhraseQuery {
    MatchPhraseQuery::new(field, query)
}

pub fn exists(field: impl Into<Field>) -> ExistsQuery {
    ExistsQuery::new(field)
}

pub fn multi_match<F: Into<Field>>(
    query: impl Into<Value>,
    fields: impl IntoIterator<Item = F>,
) -> MultiMatchQuery {
    MultiMatchQuery::new(query, fields)
}

pub fn ids<S: Into<String>>(values: impl IntoIterator<Item = S>) -> IdsQuery {
    IdsQuery::new(values)
}

pub fn nested(path: impl Into<Field>, query: impl Into<Query>) -> NestedQuery {
    NestedQuery::new(path, query)
}

pub fn bool_query() -> BoolQuery {
    BoolQuery::new()
}

pub fn dis_max() -> DisMaxQuery {
    DisMaxQuery::new()
}

pub fn function_score() -> FunctionScoreQuery {
    FunctionScoreQuery::new()
}

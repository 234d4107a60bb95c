use std::{iter, mem};

use crate::{
    ast::{
        BoolQuery, DisMaxQuery, ExistsQuery, FunctionScoreQuery, IdsQuery, MatchAllQuery,
        MatchPhraseQuery, MatchQuery, MultiMatchQuery, NestedQuery, RangeQuery, TermQuery,
        TermsQuery, functions::refilled,
    },
    compiler::{Expression, NamedExpression, visit_named},
    node::QueryNode,
    sink::ObjectSink,
    walk::fold,
};

/// Lazy sequence of a node's direct children.
pub type Children<'a> = Box<dyn Iterator<Item = &'a Query> + 'a>;

/// Mutable form of [`Children`].
pub type ChildrenMut<'a> = Box<dyn Iterator<Item = &'a mut Query> + 'a>;

enum Resolved<'a> {
    Named(&'a dyn NamedExpression),
    Node(&'a QueryNode),
}

/// A query expression: any node that can stand where the engine expects a
/// query.
///
/// The variant set is closed so that reduction and serialization are
/// checked for exhaustiveness.
///
/// Cloning and dropping walk the tree with an explicit stack, so both are
/// safe on trees of any depth.
#[derive(Debug, PartialEq)]
pub enum Query {
    // Leaves
    MatchAll(MatchAllQuery),
    Term(TermQuery),
    Terms(TermsQuery),
    Range(RangeQuery),
    Match(MatchQuery),
    MatchPhrase(MatchPhraseQuery),
    Exists(ExistsQuery),
    MultiMatch(MultiMatchQuery),
    Ids(IdsQuery),

    // Compound
    Nested(NestedQuery),
    Bool(BoolQuery),
    DisMax(DisMaxQuery),
    FunctionScore(FunctionScoreQuery),

    /// Mutable node bound to a handle
    Node(QueryNode),
}

impl Query {
    /// Wire name of the query (for a mutable node, of the query it mirrors).
    pub fn name(&self) -> &'static str {
        match self.resolve() {
            Resolved::Named(named) => named.name(),
            Resolved::Node(node) => node.name(),
        }
    }

    fn resolve(&self) -> Resolved<'_> {
        match self {
            Query::MatchAll(q) => Resolved::Named(q),
            Query::Term(q) => Resolved::Named(q),
            Query::Terms(q) => Resolved::Named(q),
            Query::Range(q) => Resolved::Named(q),
            Query::Match(q) => Resolved::Named(q),
            Query::MatchPhrase(q) => Resolved::Named(q),
            Query::Exists(q) => Resolved::Named(q),
            Query::MultiMatch(q) => Resolved::Named(q),
            Query::Ids(q) => Resolved::Named(q),
            Query::Nested(q) => Resolved::Named(q),
            Query::Bool(q) => Resolved::Named(q),
            Query::DisMax(q) => Resolved::Named(q),
            Query::FunctionScore(q) => Resolved::Named(q),
            Query::Node(node) => Resolved::Node(node),
        }
    }

    /// Direct children, in list order.
    ///
    /// Function-score children are the inner query followed by each
    /// function's filter. Mutable nodes yield their current child lists.
    pub fn children(&self) -> Children<'_> {
        match self {
            Query::MatchAll(_)
            | Query::Term(_)
            | Query::Terms(_)
            | Query::Range(_)
            | Query::Match(_)
            | Query::MatchPhrase(_)
            | Query::Exists(_)
            | Query::MultiMatch(_)
            | Query::Ids(_) => Box::new(iter::empty()),
            Query::Nested(q) => Box::new(iter::once(&*q.query)),
            Query::Bool(q) => Box::new(
                q.filter
                    .iter()
                    .chain(q.should.iter())
                    .chain(q.must.iter())
                    .chain(q.must_not.iter()),
            ),
            Query::DisMax(q) => Box::new(q.queries.iter()),
            Query::FunctionScore(q) => Box::new(
                q.query
                    .as_deref()
                    .into_iter()
                    .chain(q.functions.iter().filter_map(|f| f.filter.as_ref())),
            ),
            Query::Node(node) => node.children(),
        }
    }

    /// Mutable form of [`Query::children`], same order.
    pub fn children_mut(&mut self) -> ChildrenMut<'_> {
        match self {
            Query::MatchAll(_)
            | Query::Term(_)
            | Query::Terms(_)
            | Query::Range(_)
            | Query::Match(_)
            | Query::MatchPhrase(_)
            | Query::Exists(_)
            | Query::MultiMatch(_)
            | Query::Ids(_) => Box::new(iter::empty()),
            Query::Nested(q) => Box::new(iter::once(&mut *q.query)),
            Query::Bool(q) => Box::new(
                q.filter
                    .iter_mut()
                    .chain(q.should.iter_mut())
                    .chain(q.must.iter_mut())
                    .chain(q.must_not.iter_mut()),
            ),
            Query::DisMax(q) => Box::new(q.queries.iter_mut()),
            Query::FunctionScore(q) => Box::new(
                q.query
                    .as_deref_mut()
                    .into_iter()
                    .chain(q.functions.iter_mut().filter_map(|f| f.filter.as_mut())),
            ),
            Query::Node(node) => node.children_mut(),
        }
    }

    /// Copy of this node with its direct children taken from `children`,
    /// in [`Query::children`] order.
    pub(crate) fn with_children(&self, children: Vec<Query>) -> Query {
        let mut children = children.into_iter();
        match self {
            Query::MatchAll(q) => Query::MatchAll(q.clone()),
            Query::Term(q) => Query::Term(q.clone()),
            Query::Terms(q) => Query::Terms(q.clone()),
            Query::Range(q) => Query::Range(q.clone()),
            Query::Match(q) => Query::Match(q.clone()),
            Query::MatchPhrase(q) => Query::MatchPhrase(q.clone()),
            Query::Exists(q) => Query::Exists(q.clone()),
            Query::MultiMatch(q) => Query::MultiMatch(q.clone()),
            Query::Ids(q) => Query::Ids(q.clone()),
            Query::Nested(q) => Query::Nested(NestedQuery {
                path: q.path.clone(),
                query: Box::new(children.next().unwrap_or_default()),
                options: q.options.clone(),
            }),
            Query::Bool(q) => Query::Bool(BoolQuery {
                filter: children.by_ref().take(q.filter.len()).collect(),
                should: children.by_ref().take(q.should.len()).collect(),
                must: children.by_ref().take(q.must.len()).collect(),
                must_not: children.by_ref().take(q.must_not.len()).collect(),
                minimum_should_match: q.minimum_should_match.clone(),
                options: q.options.clone(),
            }),
            Query::DisMax(q) => Query::DisMax(DisMaxQuery {
                queries: children.collect(),
                tie_breaker: q.tie_breaker,
                options: q.options.clone(),
            }),
            Query::FunctionScore(q) => Query::FunctionScore(FunctionScoreQuery {
                query: q.query.as_ref().and_then(|_| children.next()).map(Box::new),
                functions: refilled(&q.functions, &mut children.map(Some)),
                score_mode: q.score_mode,
                boost_mode: q.boost_mode,
                min_score: q.min_score,
                options: q.options.clone(),
            }),
            Query::Node(node) => Query::Node(node.with_children(&mut children)),
        }
    }
}

impl Default for Query {
    fn default() -> Self {
        Query::MatchAll(MatchAllQuery::default())
    }
}

impl Clone for Query {
    fn clone(&self) -> Self {
        fold(self, |_| true, Query::with_children).unwrap_or_default()
    }
}

impl Drop for Query {
    fn drop(&mut self) {
        let mut stack: Vec<Query> = self.children_mut().map(mem::take).collect();
        while let Some(mut query) = stack.pop() {
            stack.extend(query.children_mut().map(mem::take));
        }
    }
}

impl Expression for Query {
    fn write(&self, out: &mut dyn ObjectSink) {
        match self.resolve() {
            Resolved::Named(named) => visit_named(out, named),
            // Only the materialized shape is ever written.
            Resolved::Node(node) => node.to_query().write(out),
        }
    }
}

macro_rules! query_from {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for Query {
                fn from(q: $ty) -> Self {
                    Query::$variant(q)
                }
            }
        )*
    };
}

query_from!(
    MatchAll(MatchAllQuery),
    Term(TermQuery),
    Terms(TermsQuery),
    Range(RangeQuery),
    Match(MatchQuery),
    MatchPhrase(MatchPhraseQuery),
    Exists(ExistsQuery),
    MultiMatch(MultiMatchQuery),
    Ids(IdsQuery),
    Nested(NestedQuery),
    Bool(BoolQuery),
    DisMax(DisMaxQuery),
    FunctionScore(FunctionScoreQuery),
    Node(QueryNode),
);

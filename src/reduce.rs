//! Structural simplification applied before compilation.
//!
//! Each query kind has its own rule. Children are reduced first, then the
//! node decides its own fate: keep itself, become one of its children, or
//! disappear (`None`), in which case the parent omits it.
//!
//! | Kind | Rule |
//! |---|---|
//! | bool | drop empty clauses; none left → `None`; lone `should`/`must` → that clause |
//! | dis_max | no queries → `None`; one query → that query |
//! | function_score | no functions and no `min_score` → the reduced inner query |
//! | leaves, nested | unchanged |
//! | mutable nodes | reduced as the query they mirror |
//!
//! The pass runs bottom-up over an explicit stack, so tree depth is not
//! bounded by the call stack. It never touches the input tree and is
//! idempotent: `reduce(reduce(t)) == reduce(t)`.

use crate::{
    ast::{BoolQuery, DisMaxQuery, FunctionScoreQuery, Query, ScoreFunction, functions::refilled},
    node::QueryNode,
    walk::fold,
};

impl Query {
    /// Returns the simplified form of this query, or `None` if it
    /// contributes nothing.
    pub fn reduce(&self) -> Option<Query> {
        // Nested queries are kept as written, children included.
        fold(self, |query| !matches!(query, Query::Nested(_)), reduce_node).flatten()
    }
}

/// Reduces one node whose children have already been reduced.
fn reduce_node(query: &Query, children: Vec<Option<Query>>) -> Option<Query> {
    let mut children = children.into_iter();
    match query {
        Query::MatchAll(_)
        | Query::Term(_)
        | Query::Terms(_)
        | Query::Range(_)
        | Query::Match(_)
        | Query::MatchPhrase(_)
        | Query::Exists(_)
        | Query::MultiMatch(_)
        | Query::Ids(_)
        | Query::Nested(_) => Some(query.clone()),
        Query::Bool(q) => {
            let shell = BoolQuery {
                minimum_should_match: q.minimum_should_match.clone(),
                options: q.options.clone(),
                ..BoolQuery::default()
            };
            let lens = [q.filter.len(), q.should.len(), q.must.len(), q.must_not.len()];
            reduce_bool(shell, lens, &mut children)
        }
        Query::DisMax(q) => {
            let shell = DisMaxQuery {
                queries: Vec::new(),
                tie_breaker: q.tie_breaker,
                options: q.options.clone(),
            };
            reduce_dis_max(shell, children)
        }
        Query::FunctionScore(q) => {
            let shell = FunctionScoreQuery {
                query: None,
                functions: Vec::new(),
                score_mode: q.score_mode,
                boost_mode: q.boost_mode,
                min_score: q.min_score,
                options: q.options.clone(),
            };
            reduce_function_score(shell, q.query.is_some(), &q.functions, &mut children)
        }
        Query::Node(QueryNode::Bool(b)) => {
            let n = &b.node;
            let shell = BoolQuery {
                minimum_should_match: n.minimum_should_match.clone(),
                options: n.options(),
                ..BoolQuery::default()
            };
            let lens = [n.filter.len(), n.should.len(), n.must.len(), n.must_not.len()];
            reduce_bool(shell, lens, &mut children)
        }
        Query::Node(QueryNode::DisMax(b)) => {
            let shell = DisMaxQuery {
                queries: Vec::new(),
                tie_breaker: b.node.tie_breaker,
                options: b.node.options(),
            };
            reduce_dis_max(shell, children)
        }
        Query::Node(QueryNode::FunctionScore(b)) => {
            let n = &b.node;
            let shell = FunctionScoreQuery {
                query: None,
                functions: Vec::new(),
                score_mode: n.score_mode,
                boost_mode: n.boost_mode,
                min_score: n.min_score,
                options: n.options(),
            };
            reduce_function_score(shell, n.query.is_some(), &n.functions, &mut children)
        }
    }
}

/// `lens` holds the original filter, should, must and must_not lengths.
fn reduce_bool(
    mut shell: BoolQuery,
    lens: [usize; 4],
    children: &mut impl Iterator<Item = Option<Query>>,
) -> Option<Query> {
    let [filter, should, must, must_not] = lens;
    shell.filter = children.by_ref().take(filter).flatten().collect();
    shell.should = children.by_ref().take(should).flatten().collect();
    shell.must = children.by_ref().take(must).flatten().collect();
    shell.must_not = children.by_ref().take(must_not).flatten().collect();

    match (shell.filter.len(), shell.should.len(), shell.must.len(), shell.must_not.len()) {
        (0, 0, 0, 0) => None,
        (0, 1, 0, 0) => shell.should.pop(),
        (0, 0, 1, 0) => shell.must.pop(),
        _ => Some(Query::Bool(shell)),
    }
}

fn reduce_dis_max(
    mut shell: DisMaxQuery,
    children: impl Iterator<Item = Option<Query>>,
) -> Option<Query> {
    shell.queries = children.flatten().collect();

    match shell.queries.len() {
        0 => None,
        1 => shell.queries.pop(),
        _ => Some(Query::DisMax(shell)),
    }
}

/// Function filters that reduce away leave their function unfiltered.
fn reduce_function_score(
    mut shell: FunctionScoreQuery,
    has_query: bool,
    functions: &[ScoreFunction],
    children: &mut impl Iterator<Item = Option<Query>>,
) -> Option<Query> {
    let query = if has_query { children.next().flatten() } else { None };

    if functions.is_empty() && shell.min_score.is_none() {
        return query;
    }

    shell.query = query.map(Box::new);
    shell.functions = refilled(functions, children);
    Some(Query::FunctionScore(shell))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsl::*;

    #[test]
    fn test_empty_clauses_are_dropped_before_counting() {
        // must: [empty bool], should: [term] → just the term
        let query: Query = bool_query()
            .must(bool_query())
            .should(term("x", 1))
            .into();

        assert_eq!(query.reduce(), Some(term("x", 1).into()));
    }

    #[test]
    fn test_lone_filter_is_kept_wrapped() {
        let query: Query = bool_query().filter(term("x", 1)).into();
        assert_eq!(query.reduce(), Some(query.clone()));
    }

    #[test]
    fn test_lone_must_not_is_kept_wrapped() {
        let query: Query = bool_query().must_not(term("x", 1)).into();
        assert_eq!(query.reduce(), Some(query.clone()));
    }

    #[test]
    fn test_function_filters_stay_with_their_functions() {
        // The first function has no filter, so the reduced filter belongs to
        // the second one.
        let query: Query = function_score()
            .function(ScoreFunction::weight(1.0))
            .function(ScoreFunction::weight(2.0).filter(bool_query().must(term("y", 1))))
            .into();

        let expected: Query = function_score()
            .function(ScoreFunction::weight(1.0))
            .function(ScoreFunction::weight(2.0).filter(term("y", 1)))
            .into();
        assert_eq!(query.reduce(), Some(expected));
    }
}

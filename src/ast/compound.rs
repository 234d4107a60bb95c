//! Queries that own child queries.

use crate::{
    ast::{Query, ScoreFunction},
    compiler::{NamedExpression, visit_expression, visit_nonempty, visit_params, visit_value},
    field::Field,
    params::Parameters,
    sink::{ObjectSink, Scalar},
    value::Value,
    wire::{BoostMode, NestedScoreMode, ScoreMode},
};

/// Boolean combination of clauses.
///
/// ```text
/// {"bool": {"filter": [..], "should": [..], "must": [..], "must_not": [..]}}
/// ```
///
/// Empty clause lists are omitted on the wire.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoolQuery {
    pub filter: Vec<Query>,
    pub should: Vec<Query>,
    pub must: Vec<Query>,
    pub must_not: Vec<Query>,
    pub minimum_should_match: Option<Value>,
    pub options: Parameters,
}

impl BoolQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, clause: impl Into<Query>) -> Self {
        self.filter.push(clause.into());
        self
    }

    pub fn should(mut self, clause: impl Into<Query>) -> Self {
        self.should.push(clause.into());
        self
    }

    pub fn must(mut self, clause: impl Into<Query>) -> Self {
        self.must.push(clause.into());
        self
    }

    pub fn must_not(mut self, clause: impl Into<Query>) -> Self {
        self.must_not.push(clause.into());
        self
    }

    /// Accepts a count (`1`) or a percentage string (`"75%"`).
    pub fn minimum_should_match(mut self, value: impl Into<Value>) -> Self {
        self.minimum_should_match = Some(value.into()).filter(|v| !v.is_null());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.filter.is_empty()
            && self.should.is_empty()
            && self.must.is_empty()
            && self.must_not.is_empty()
    }
}

impl NamedExpression for BoolQuery {
    fn name(&self) -> &'static str {
        "bool"
    }

    fn write_body(&self, out: &mut dyn ObjectSink) {
        visit_nonempty(out, "filter", &self.filter);
        visit_nonempty(out, "should", &self.should);
        visit_nonempty(out, "must", &self.must);
        visit_nonempty(out, "must_not", &self.must_not);
        if let Some(msm) = &self.minimum_should_match {
            visit_value(out, "minimum_should_match", msm);
        }
        visit_params(out, &self.options);
    }
}

/// Scores by the best matching sub-query, plus `tie_breaker` times the rest.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisMaxQuery {
    pub queries: Vec<Query>,
    pub tie_breaker: Option<f64>,
    pub options: Parameters,
}

impl DisMaxQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(mut self, query: impl Into<Query>) -> Self {
        self.queries.push(query.into());
        self
    }

    pub fn tie_breaker(mut self, tie_breaker: f64) -> Self {
        self.tie_breaker = Some(tie_breaker);
        self
    }
}

impl NamedExpression for DisMaxQuery {
    fn name(&self) -> &'static str {
        "dis_max"
    }

    fn write_body(&self, out: &mut dyn ObjectSink) {
        visit_nonempty(out, "queries", &self.queries);
        if let Some(tie_breaker) = self.tie_breaker {
            out.field("tie_breaker", Scalar::Float(tie_breaker));
        }
        visit_params(out, &self.options);
    }
}

/// Re-scores the documents matched by `query` with a list of functions.
///
/// `max_boost` and `boost` go through the options container; `min_score`
/// is kept apart because it decides whether the wrapper survives reduction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FunctionScoreQuery {
    pub query: Option<Box<Query>>,
    pub functions: Vec<ScoreFunction>,
    pub score_mode: Option<ScoreMode>,
    pub boost_mode: Option<BoostMode>,
    pub min_score: Option<f64>,
    pub options: Parameters,
}

impl FunctionScoreQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(mut self, query: impl Into<Query>) -> Self {
        self.query = Some(Box::new(query.into()));
        self
    }

    pub fn function(mut self, function: ScoreFunction) -> Self {
        self.functions.push(function);
        self
    }

    pub fn score_mode(mut self, mode: ScoreMode) -> Self {
        self.score_mode = Some(mode);
        self
    }

    pub fn boost_mode(mut self, mode: BoostMode) -> Self {
        self.boost_mode = Some(mode);
        self
    }

    pub fn min_score(mut self, min_score: f64) -> Self {
        self.min_score = Some(min_score);
        self
    }

    pub fn max_boost(mut self, max_boost: f64) -> Self {
        self.options.set("max_boost", max_boost);
        self
    }
}

impl NamedExpression for FunctionScoreQuery {
    fn name(&self) -> &'static str {
        "function_score"
    }

    fn write_body(&self, out: &mut dyn ObjectSink) {
        if let Some(query) = &self.query {
            visit_expression(out, "query", query.as_ref());
        }
        visit_nonempty(out, "functions", &self.functions);
        if let Some(mode) = self.score_mode {
            out.field("score_mode", Scalar::String(mode.as_wire()));
        }
        if let Some(mode) = self.boost_mode {
            out.field("boost_mode", Scalar::String(mode.as_wire()));
        }
        if let Some(min_score) = self.min_score {
            out.field("min_score", Scalar::Float(min_score));
        }
        visit_params(out, &self.options);
    }
}

/// Runs `query` against nested objects under `path`.
///
/// Reduction leaves a nested query exactly as written, inner query
/// included. A mutable node inside it is still found by its handle, and is
/// written as the query it mirrors without being reduced: an empty
/// [`BoolNode`](crate::BoolNode) inside comes out as
/// `{"nested":{"path":"p","query":{"bool":{}}}}`.
#[derive(Debug, Clone, PartialEq)]
pub struct NestedQuery {
    pub path: Field,
    pub query: Box<Query>,
    pub options: Parameters,
}

impl NestedQuery {
    pub fn new(path: impl Into<Field>, query: impl Into<Query>) -> Self {
        NestedQuery {
            path: path.into(),
            query: Box::new(query.into()),
            options: Parameters::new(),
        }
    }

    pub fn score_mode(mut self, mode: NestedScoreMode) -> Self {
        self.options.set("score_mode", mode);
        self
    }

    pub fn ignore_unmapped(mut self, ignore: bool) -> Self {
        self.options.set("ignore_unmapped", ignore);
        self
    }
}

impl NamedExpression for NestedQuery {
    fn name(&self) -> &'static str {
        "nested"
    }

    fn write_body(&self, out: &mut dyn ObjectSink) {
        out.field("path", Scalar::String(self.path.name()));
        visit_expression(out, "query", self.query.as_ref());
        visit_params(out, &self.options);
    }
}

option_builders!(BoolQuery, DisMaxQuery, FunctionScoreQuery, NestedQuery);

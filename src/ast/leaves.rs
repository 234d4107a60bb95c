//! Leaf queries. None of these have child expressions.

use crate::{
    compiler::{NamedExpression, visit_item, visit_params, visit_value},
    field::Field,
    params::Parameters,
    sink::{ObjectSink, Scalar},
    value::Value,
    wire::{MultiMatchType, Operator},
};

/// Matches every document.
///
/// ```text
/// {"match_all": {}}
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchAllQuery {
    pub options: Parameters,
}

impl MatchAllQuery {
    pub fn new() -> Self {
        Self::default()
    }
}

impl NamedExpression for MatchAllQuery {
    fn name(&self) -> &'static str {
        "match_all"
    }

    fn write_body(&self, out: &mut dyn ObjectSink) {
        visit_params(out, &self.options);
    }
}

/// Exact value match on an unanalyzed field.
///
/// Written in short form `{"term": {"f": v}}` unless options are set, in
/// which case it expands to `{"term": {"f": {"value": v, ...}}}`.
#[derive(Debug, Clone, PartialEq)]
pub struct TermQuery {
    pub field: Field,
    pub value: Value,
    pub options: Parameters,
}

impl TermQuery {
    pub fn new(field: impl Into<Field>, value: impl Into<Value>) -> Self {
        TermQuery {
            field: field.into(),
            value: value.into(),
            options: Parameters::new(),
        }
    }
}

impl NamedExpression for TermQuery {
    fn name(&self) -> &'static str {
        "term"
    }

    fn write_body(&self, out: &mut dyn ObjectSink) {
        write_short_or_long(out, &self.field, "value", &self.value, &self.options);
    }
}

/// Matches any of several exact values.
#[derive(Debug, Clone, PartialEq)]
pub struct TermsQuery {
    pub field: Field,
    pub values: Vec<Value>,
    pub options: Parameters,
}

impl TermsQuery {
    pub fn new<V: Into<Value>>(
        field: impl Into<Field>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        TermsQuery {
            field: field.into(),
            values: values.into_iter().map(Into::into).collect(),
            options: Parameters::new(),
        }
    }
}

impl NamedExpression for TermsQuery {
    fn name(&self) -> &'static str {
        "terms"
    }

    fn write_body(&self, out: &mut dyn ObjectSink) {
        out.array(self.field.name(), &mut |arr| {
            for value in &self.values {
                visit_item(arr, value);
            }
        });
        visit_params(out, &self.options);
    }
}

/// Bounded range on a field.
///
/// Bounds and options share one container since they are written into the
/// same object: `{"range": {"f": {"gt": 4, "boost": 2.0}}}`.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeQuery {
    pub field: Field,
    pub options: Parameters,
}

impl RangeQuery {
    pub fn new(field: impl Into<Field>) -> Self {
        RangeQuery {
            field: field.into(),
            options: Parameters::new(),
        }
    }

    pub fn gt(mut self, bound: impl Into<Value>) -> Self {
        self.options.set("gt", bound);
        self
    }

    pub fn gte(mut self, bound: impl Into<Value>) -> Self {
        self.options.set("gte", bound);
        self
    }

    pub fn lt(mut self, bound: impl Into<Value>) -> Self {
        self.options.set("lt", bound);
        self
    }

    pub fn lte(mut self, bound: impl Into<Value>) -> Self {
        self.options.set("lte", bound);
        self
    }

    /// Date format used to parse string bounds.
    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.options.set("format", format.into());
        self
    }
}

impl NamedExpression for RangeQuery {
    fn name(&self) -> &'static str {
        "range"
    }

    fn write_body(&self, out: &mut dyn ObjectSink) {
        out.object(self.field.name(), &mut |inner| visit_params(inner, &self.options));
    }
}

/// Full-text match on an analyzed field.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchQuery {
    pub field: Field,
    pub query: Value,
    pub options: Parameters,
}

impl MatchQuery {
    pub fn new(field: impl Into<Field>, query: impl Into<Value>) -> Self {
        MatchQuery {
            field: field.into(),
            query: query.into(),
            options: Parameters::new(),
        }
    }

    pub fn operator(mut self, operator: Operator) -> Self {
        self.options.set("operator", operator);
        self
    }

    pub fn analyzer(mut self, analyzer: impl Into<String>) -> Self {
        self.options.set("analyzer", analyzer.into());
        self
    }

    pub fn fuzziness(mut self, fuzziness: impl Into<Value>) -> Self {
        self.options.set("fuzziness", fuzziness);
        self
    }
}

impl NamedExpression for MatchQuery {
    fn name(&self) -> &'static str {
        "match"
    }

    fn write_body(&self, out: &mut dyn ObjectSink) {
        write_short_or_long(out, &self.field, "query", &self.query, &self.options);
    }
}

/// Phrase match on an analyzed field.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchPhraseQuery {
    pub field: Field,
    pub query: Value,
    pub options: Parameters,
}

impl MatchPhraseQuery {
    pub fn new(field: impl Into<Field>, query: impl Into<Value>) -> Self {
        MatchPhraseQuery {
            field: field.into(),
            query: query.into(),
            options: Parameters::new(),
        }
    }

    pub fn slop(mut self, slop: u32) -> Self {
        self.options.set("slop", slop);
        self
    }

    pub fn analyzer(mut self, analyzer: impl Into<String>) -> Self {
        self.options.set("analyzer", analyzer.into());
        self
    }
}

impl NamedExpression for MatchPhraseQuery {
    fn name(&self) -> &'static str {
        "match_phrase"
    }

    fn write_body(&self, out: &mut dyn ObjectSink) {
        write_short_or_long(out, &self.field, "query", &self.query, &self.options);
    }
}

/// Matches documents where the field has any indexed value.
#[derive(Debug, Clone, PartialEq)]
pub struct ExistsQuery {
    pub field: Field,
    pub options: Parameters,
}

impl ExistsQuery {
    pub fn new(field: impl Into<Field>) -> Self {
        ExistsQuery {
            field: field.into(),
            options: Parameters::new(),
        }
    }
}

impl NamedExpression for ExistsQuery {
    fn name(&self) -> &'static str {
        "exists"
    }

    fn write_body(&self, out: &mut dyn ObjectSink) {
        out.field("field", Scalar::String(self.field.name()));
        visit_params(out, &self.options);
    }
}

/// Full-text match across several fields.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiMatchQuery {
    pub query: Value,
    pub fields: Vec<Field>,
    pub options: Parameters,
}

impl MultiMatchQuery {
    pub fn new<F: Into<Field>>(
        query: impl Into<Value>,
        fields: impl IntoIterator<Item = F>,
    ) -> Self {
        MultiMatchQuery {
            query: query.into(),
            fields: fields.into_iter().map(Into::into).collect(),
            options: Parameters::new(),
        }
    }

    pub fn match_type(mut self, match_type: MultiMatchType) -> Self {
        self.options.set("type", match_type);
        self
    }

    pub fn operator(mut self, operator: Operator) -> Self {
        self.options.set("operator", operator);
        self
    }

    pub fn tie_breaker(mut self, tie_breaker: f64) -> Self {
        self.options.set("tie_breaker", tie_breaker);
        self
    }
}

impl NamedExpression for MultiMatchQuery {
    fn name(&self) -> &'static str {
        "multi_match"
    }

    fn write_body(&self, out: &mut dyn ObjectSink) {
        visit_value(out, "query", &self.query);
        out.array("fields", &mut |arr| {
            for field in &self.fields {
                arr.value(Scalar::String(field.name()));
            }
        });
        visit_params(out, &self.options);
    }
}

/// Matches documents by id.
#[derive(Debug, Clone, PartialEq)]
pub struct IdsQuery {
    pub values: Vec<String>,
    pub options: Parameters,
}

impl IdsQuery {
    pub fn new<S: Into<String>>(values: impl IntoIterator<Item = S>) -> Self {
        IdsQuery {
            values: values.into_iter().map(Into::into).collect(),
            options: Parameters::new(),
        }
    }
}

impl NamedExpression for IdsQuery {
    fn name(&self) -> &'static str {
        "ids"
    }

    fn write_body(&self, out: &mut dyn ObjectSink) {
        out.array("values", &mut |arr| {
            for id in &self.values {
                arr.value(Scalar::String(id));
            }
        });
        visit_params(out, &self.options);
    }
}

option_builders!(
    MatchAllQuery,
    TermQuery,
    TermsQuery,
    RangeQuery,
    MatchQuery,
    MatchPhraseQuery,
    ExistsQuery,
    MultiMatchQuery,
    IdsQuery,
);

/// `{"f": v}` without options, `{"f": {"<key>": v, ...options}}` with.
fn write_short_or_long(
    out: &mut dyn ObjectSink,
    field: &Field,
    key: &str,
    value: &Value,
    options: &Parameters,
) {
    if options.is_empty() {
        visit_value(out, field.name(), value);
    } else {
        out.object(field.name(), &mut |inner| {
            visit_value(inner, key, value);
            visit_params(inner, options);
        });
    }
}

use crate::{
    ast::{Query, Script},
    compiler::{Expression, visit_expression, visit_params},
    field::Field,
    params::Parameters,
    sink::{ObjectSink, Scalar},
    wire::Modifier,
};

/// What a score function computes.
#[derive(Debug, Clone, PartialEq)]
pub enum FunctionKind {
    /// Constant weight only (the weight itself lives on [`ScoreFunction`]).
    Weight,

    /// Score from a numeric document field.
    FieldValueFactor(FieldValueFactor),

    /// Score from a script.
    ScriptScore(Script),
}

/// One entry in a function-score `functions` list.
///
/// ```text
/// {"filter": {...}, "field_value_factor": {...}, "weight": 2.0}
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreFunction {
    /// Limits the function to documents matching this query.
    pub filter: Option<Query>,
    pub weight: Option<f64>,
    pub kind: FunctionKind,
}

impl ScoreFunction {
    pub fn weight(weight: f64) -> Self {
        ScoreFunction {
            filter: None,
            weight: Some(weight),
            kind: FunctionKind::Weight,
        }
    }

    pub fn field_value_factor(factor: FieldValueFactor) -> Self {
        ScoreFunction {
            filter: None,
            weight: None,
            kind: FunctionKind::FieldValueFactor(factor),
        }
    }

    pub fn script_score(script: Script) -> Self {
        ScoreFunction {
            filter: None,
            weight: None,
            kind: FunctionKind::ScriptScore(script),
        }
    }

    pub fn filter(mut self, filter: impl Into<Query>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Multiplies this function's score.
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    /// Copy of this function with `filter` in place of its own.
    pub(crate) fn with_filter(&self, filter: Option<Query>) -> ScoreFunction {
        ScoreFunction {
            filter,
            weight: self.weight,
            kind: self.kind.clone(),
        }
    }
}

/// Rebuilds `functions`, taking one entry from `filters` for each function
/// that has a filter. A `None` entry leaves that function unfiltered.
pub(crate) fn refilled(
    functions: &[ScoreFunction],
    filters: &mut impl Iterator<Item = Option<Query>>,
) -> Vec<ScoreFunction> {
    functions
        .iter()
        .map(|f| match f.filter {
            Some(_) => f.with_filter(filters.next().flatten()),
            None => f.with_filter(None),
        })
        .collect()
}

impl Expression for ScoreFunction {
    fn write(&self, out: &mut dyn ObjectSink) {
        if let Some(filter) = &self.filter {
            visit_expression(out, "filter", filter);
        }
        match &self.kind {
            FunctionKind::Weight => {}
            FunctionKind::FieldValueFactor(factor) => {
                visit_expression(out, "field_value_factor", factor)
            }
            FunctionKind::ScriptScore(script) => out.object("script_score", &mut |inner| {
                visit_expression(inner, "script", script);
            }),
        }
        if let Some(weight) = self.weight {
            out.field("weight", Scalar::Float(weight));
        }
    }
}

/// `field_value_factor` settings.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldValueFactor {
    pub field: Field,
    pub options: Parameters,
}

impl FieldValueFactor {
    pub fn new(field: impl Into<Field>) -> Self {
        FieldValueFactor {
            field: field.into(),
            options: Parameters::new(),
        }
    }

    pub fn factor(mut self, factor: f64) -> Self {
        self.options.set("factor", factor);
        self
    }

    pub fn modifier(mut self, modifier: Modifier) -> Self {
        self.options.set("modifier", modifier);
        self
    }

    /// Value used for documents without the field.
    pub fn missing(mut self, missing: f64) -> Self {
        self.options.set("missing", missing);
        self
    }
}

impl Expression for FieldValueFactor {
    fn write(&self, out: &mut dyn ObjectSink) {
        out.field("field", Scalar::String(self.field.name()));
        visit_params(out, &self.options);
    }
}

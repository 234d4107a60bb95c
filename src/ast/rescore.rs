use crate::{
    ast::Query,
    compiler::{Expression, visit_expression, visit_params},
    params::Parameters,
    sink::{ObjectSink, Scalar},
    wire::RescoreMode,
};

/// Query rescorer applied to the top `window_size` hits of each shard.
///
/// ```text
/// {"window_size": 50, "query": {"rescore_query": {...}, "query_weight": 0.7}}
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Rescore {
    pub window_size: Option<u32>,
    pub query: Query,
    pub options: Parameters,
}

impl Rescore {
    pub fn new(query: impl Into<Query>) -> Self {
        Rescore {
            window_size: None,
            query: query.into(),
            options: Parameters::new(),
        }
    }

    pub fn window_size(mut self, window_size: u32) -> Self {
        self.window_size = Some(window_size);
        self
    }

    pub fn query_weight(mut self, weight: f64) -> Self {
        self.options.set("query_weight", weight);
        self
    }

    pub fn rescore_query_weight(mut self, weight: f64) -> Self {
        self.options.set("rescore_query_weight", weight);
        self
    }

    pub fn score_mode(mut self, mode: RescoreMode) -> Self {
        self.options.set("score_mode", mode);
        self
    }

    /// Reduces the rescore query. A rescorer whose query reduces away is
    /// dropped.
    pub fn reduce(&self) -> Option<Rescore> {
        let query = self.query.reduce()?;
        Some(Rescore {
            window_size: self.window_size,
            query,
            options: self.options.clone(),
        })
    }
}

impl Expression for Rescore {
    fn write(&self, out: &mut dyn ObjectSink) {
        if let Some(window_size) = self.window_size {
            out.field("window_size", Scalar::Integer(i64::from(window_size)));
        }
        out.object("query", &mut |inner| {
            visit_expression(inner, "rescore_query", &self.query);
            visit_params(inner, &self.options);
        });
    }
}

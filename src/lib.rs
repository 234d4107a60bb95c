pub mod ast;
pub mod compiler;
pub mod config;
pub mod dsl;
pub mod error;
pub mod field;
pub mod handle;
pub mod node;
pub mod output;
pub mod params;
pub mod reduce;
pub mod request;
pub mod sink;
pub mod value;
pub mod walk;
pub mod wire;

pub use ast::{Query, Rescore, ScoreFunction, Script, Sort};
pub use compiler::{Expression, NamedExpression, compile};
pub use config::SearchDefaults;
pub use error::{QueryError, Result};
pub use field::Field;
pub use handle::Handle;
pub use node::{BoolNode, DisMaxNode, FunctionScoreNode, MutableNode, QueryNode};
pub use output::{to_json, to_json_pretty};
pub use params::Parameters;
pub use request::{Compiled, SearchRequest};
pub use sink::{ArraySink, ObjectSink, Scalar};
pub use value::Value;
pub use walk::mutate;

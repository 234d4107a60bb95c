use crate::{
    ast::Script,
    compiler::{visit_expression, visit_params},
    error::{QueryError, Result},
    field::Field,
    params::Parameters,
    sink::{ArraySink, Scalar},
    value::Value,
    wire::{ScriptSortType, SortMode, SortOrder},
};

/// What a sort orders by.
#[derive(Debug, Clone, PartialEq)]
pub enum SortTarget {
    Field(Field),
    Script {
        script: Script,
        sort_type: ScriptSortType,
    },
}

/// One entry of a request's `sort` list.
///
/// A field sort without options is written as the bare field name;
/// otherwise `{"<field>": {"order": ...}}`. Script sorts are written as
/// `{"_script": {"type": ..., "script": {...}, ...}}`.
#[derive(Debug, Clone, PartialEq)]
pub struct Sort {
    pub target: SortTarget,
    pub options: Parameters,
}

impl Sort {
    /// Sort by exactly one of a field or a script.
    pub fn new(field: Option<Field>, script: Option<Script>) -> Result<Self> {
        match (field, script) {
            (Some(field), None) => Ok(Sort::field(field)),
            (None, Some(script)) => Ok(Sort::script(script, ScriptSortType::Number)),
            (Some(_), Some(_)) => Err(QueryError::invalid(
                "sort takes either a field or a script, not both",
            )),
            (None, None) => Err(QueryError::invalid("sort needs a field or a script")),
        }
    }

    pub fn field(field: impl Into<Field>) -> Self {
        Sort {
            target: SortTarget::Field(field.into()),
            options: Parameters::new(),
        }
    }

    pub fn script(script: Script, sort_type: ScriptSortType) -> Self {
        Sort {
            target: SortTarget::Script { script, sort_type },
            options: Parameters::new(),
        }
    }

    pub fn order(mut self, order: SortOrder) -> Self {
        self.options.set("order", order);
        self
    }

    pub fn mode(mut self, mode: SortMode) -> Self {
        self.options.set("mode", mode);
        self
    }

    /// `"_last"`, `"_first"`, or a substitute value.
    pub fn missing(mut self, missing: impl Into<Value>) -> Self {
        self.options.set("missing", missing);
        self
    }

    pub fn unmapped_type(mut self, unmapped_type: impl Into<String>) -> Self {
        self.options.set("unmapped_type", unmapped_type.into());
        self
    }

    /// Appends this sort to an open `sort` array.
    pub fn write_item(&self, out: &mut dyn ArraySink) {
        match &self.target {
            SortTarget::Field(field) if self.options.is_empty() => {
                out.value(Scalar::String(field.name()));
            }
            SortTarget::Field(field) => out.object(&mut |entry| {
                entry.object(field.name(), &mut |inner| visit_params(inner, &self.options));
            }),
            SortTarget::Script { script, sort_type } => out.object(&mut |entry| {
                entry.object("_script", &mut |inner| {
                    inner.field("type", Scalar::String(sort_type.as_wire()));
                    visit_expression(inner, "script", script);
                    visit_params(inner, &self.options);
                });
            }),
        }
    }
}

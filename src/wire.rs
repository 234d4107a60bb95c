//! Enum-like option values with a fixed wire spelling.
//!
//! Each enum converts into [`Value::String`] holding its wire name, so it can
//! be stored in a [`Parameters`](crate::Parameters) container and written
//! like any other scalar.

use serde::Deserialize;

use crate::value::Value;

macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            /// The wire spelling of this value.
            pub fn as_wire(&self) -> &'static str {
                match self {
                    $( $name::$variant => $wire, )+
                }
            }
        }

        impl From<$name> for Value {
            fn from(v: $name) -> Self {
                Value::String(v.as_wire().to_string())
            }
        }
    };
}

wire_enum! {
    /// How function scores are combined with each other.
    pub enum ScoreMode {
        Multiply => "multiply",
        Sum => "sum",
        Avg => "avg",
        First => "first",
        Max => "max",
        Min => "min",
    }
}

wire_enum! {
    /// How the combined function score is merged with the query score.
    pub enum BoostMode {
        Multiply => "multiply",
        Replace => "replace",
        Sum => "sum",
        Avg => "avg",
        Max => "max",
        Min => "min",
    }
}

wire_enum! {
    /// Field-value-factor modifier.
    pub enum Modifier {
        None => "none",
        Log => "log",
        Log1p => "log1p",
        Log2p => "log2p",
        Ln => "ln",
        Ln1p => "ln1p",
        Ln2p => "ln2p",
        Square => "square",
        Sqrt => "sqrt",
        Reciprocal => "reciprocal",
    }
}

wire_enum! {
    /// Boolean operator for analyzed text queries.
    pub enum Operator {
        And => "and",
        Or => "or",
    }
}

wire_enum! {
    pub enum MultiMatchType {
        BestFields => "best_fields",
        MostFields => "most_fields",
        CrossFields => "cross_fields",
        Phrase => "phrase",
        PhrasePrefix => "phrase_prefix",
        BoolPrefix => "bool_prefix",
    }
}

wire_enum! {
    pub enum SortOrder {
        Asc => "asc",
        Desc => "desc",
    }
}

wire_enum! {
    /// Which value of a multi-valued field a sort uses.
    pub enum SortMode {
        Min => "min",
        Max => "max",
        Sum => "sum",
        Avg => "avg",
        Median => "median",
    }
}

wire_enum! {
    pub enum ScriptSortType {
        Number => "number",
        String => "string",
    }
}

wire_enum! {
    /// How the original and rescore scores are combined.
    pub enum RescoreMode {
        Total => "total",
        Multiply => "multiply",
        Avg => "avg",
        Max => "max",
        Min => "min",
    }
}

wire_enum! {
    pub enum NestedScoreMode {
        Avg => "avg",
        Sum => "sum",
        Min => "min",
        Max => "max",
        None => "none",
    }
}

wire_enum! {
    pub enum SearchType {
        QueryThenFetch => "query_then_fetch",
        DfsQueryThenFetch => "dfs_query_then_fetch",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_spelling() {
        assert_eq!(ScoreMode::First.as_wire(), "first");
        assert_eq!(MultiMatchType::PhrasePrefix.as_wire(), "phrase_prefix");
        assert_eq!(
            Value::from(SearchType::DfsQueryThenFetch),
            Value::String("dfs_query_then_fetch".into())
        );
    }
}

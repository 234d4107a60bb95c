use clove_search::{
    Parameters, Query, Value,
    dsl::term,
    output::to_params,
    params,
};

fn keys(params: &Parameters) -> Vec<&str> {
    params.keys().collect()
}

// ========================================================================
// Merge Semantics
// ========================================================================

#[test]
fn test_base_then_override_then_delete() {
    let base = params! { "a" => 1, "b" => 2 };
    let merged = Parameters::merged(
        Some(&base),
        [("b", Value::Null), ("c", Value::from(3))],
    );

    assert_eq!(keys(&merged), ["a", "c"]);
    assert_eq!(merged.get("a"), Some(&Value::Integer(1)));
    assert_eq!(merged.get("c"), Some(&Value::Integer(3)));
    assert_eq!(merged.get("b"), None);
}

#[test]
fn test_merged_compiles_in_key_order() {
    let merged = params! { params! { "a" => 1, "b" => 2 }; "b" => Value::Null, "c" => 3 };

    let mut body = serde_json::Map::new();
    clove_search::compiler::visit_params(&mut body, &merged);

    assert_eq!(serde_json::Value::Object(body).to_string(), r#"{"a":1,"c":3}"#);
}

#[test]
fn test_later_entry_overrides_in_place() {
    let base = params! { "x" => "first", "y" => true };
    let merged = params! { base; "x" => "second" };

    assert_eq!(keys(&merged), ["x", "y"]);
    assert_eq!(merged.get("x"), Some(&Value::String("second".into())));
}

#[test]
fn test_base_is_not_modified() {
    let base = params! { "a" => 1 };
    let _ = params! { base; "a" => Value::Null };

    assert_eq!(base.get("a"), Some(&Value::Integer(1)));
}

#[test]
fn test_none_is_the_null_marker() {
    let base = params! { "boost" => 2.0 };
    let merged = params! { base; "boost" => None::<f64> };

    assert!(merged.is_empty());
}

#[test]
fn test_merge_applies_every_entry() {
    let mut params = params! { "a" => 1, "b" => 2 };
    params.merge([("b", Value::Null), ("a", Value::from(9)), ("d", Value::from(4))]);

    assert_eq!(keys(&params), ["a", "d"]);
    assert_eq!(params.get("a"), Some(&Value::Integer(9)));
}

#[test]
fn test_collect_and_extend() {
    let mut params: Parameters = vec![("a", 1), ("b", 2)].into_iter().collect();
    params.extend([("c", 3)]);

    assert_eq!(keys(&params), ["a", "b", "c"]);
    assert_eq!(params.len(), 3);
    assert!(params.is_not_empty());
}

// ========================================================================
// Value Conversions
// ========================================================================

#[test]
fn test_integers_and_floats_stay_apart() {
    assert_eq!(Value::from(0), Value::Integer(0));
    assert_eq!(Value::from(2.0), Value::Float(2.0));
    assert_eq!(Value::from(7u64), Value::Integer(7));
    assert_eq!(Value::from(Some("x")), Value::String("x".into()));
    assert_eq!(Value::from(vec![1, 2]), Value::Array(vec![Value::Integer(1), Value::Integer(2)]));
}

// ========================================================================
// Parameters as a Sink
// ========================================================================

#[test]
fn test_expression_into_parameters_tree() {
    let query: Query = term("X", 0).into();
    let tree = to_params(&query);

    let Some(Value::Object(term)) = tree.get("term") else {
        panic!("expected a term object, got {tree:?}");
    };
    assert_eq!(term.get("X"), Some(&Value::Integer(0)));
}

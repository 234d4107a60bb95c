use clove_search::{
    BoolNode, Handle, MutableNode, Query, QueryError, Rescore, SearchDefaults, SearchRequest, Sort,
    Value,
    compiler::MAX_DEPTH,
    dsl::*,
    wire::{SearchType, SortOrder},
};
use serde_json::json;

fn defaults(source: &str) -> SearchDefaults {
    serde_json::from_str(source).expect("invalid defaults")
}

// ========================================================================
// Body Layout
// ========================================================================

#[test]
fn test_empty_request_compiles_to_empty_body() {
    let compiled = SearchRequest::new().compile().unwrap();

    assert_eq!(compiled.body, json!({}));
    assert!(compiled.params.is_empty());
}

#[test]
fn test_body_field_order() {
    let mut request = SearchRequest::new()
        .query(term("a", 1))
        .from(20)
        .size(10)
        .track_total_hits(true)
        .sort(Sort::field("price").order(SortOrder::Desc))
        .sort(Sort::field("_score"))
        .rescore(
            Rescore::new(match_phrase("title", "x").slop(2))
                .window_size(50)
                .query_weight(0.7),
        );
    request.body_param("_source", false);

    assert_eq!(
        request.compile().unwrap().body.to_string(),
        concat!(
            r#"{"query":{"term":{"a":1}},"from":20,"size":10,"track_total_hits":true,"#,
            r#""sort":[{"price":{"order":"desc"}},"_score"],"#,
            r#""rescore":[{"window_size":50,"query":{"rescore_query":"#,
            r#"{"match_phrase":{"title":{"query":"x","slop":2}}},"query_weight":0.7}}],"#,
            r#""_source":false}"#
        )
    );
}

#[test]
fn test_query_that_reduces_away_is_omitted() {
    let request = SearchRequest::new().query(bool_query().must(dis_max())).size(5);
    assert_eq!(request.compile().unwrap().body, json!({"size": 5}));
}

#[test]
fn test_rescore_that_reduces_away_is_omitted() {
    let request = SearchRequest::new()
        .query(match_all())
        .rescore(Rescore::new(bool_query()).window_size(10));

    assert_eq!(request.compile().unwrap().body, json!({"query": {"match_all": {}}}));
}

#[test]
fn test_track_total_hits_threshold() {
    let request = SearchRequest::new().track_total_hits(10_000);
    assert_eq!(request.compile().unwrap().body, json!({"track_total_hits": 10000}));
}

#[test]
fn test_body_param_can_be_removed() {
    let mut request = SearchRequest::new();
    request.body_param("_source", false);
    request.body_param("_source", Value::Null);

    assert_eq!(request.compile().unwrap().body, json!({}));
}

#[test]
fn test_set_query_replaces_root() {
    let mut request = SearchRequest::new().query(term("a", 1));
    request.set_query(term("b", 2));

    assert_eq!(request.root(), Some(&Query::from(term("b", 2))));
}

#[test]
fn test_compiling_does_not_change_request() {
    let handle = Handle::<BoolNode>::new();
    let request = SearchRequest::new().query(BoolNode::new().bind(&handle));

    let first = request.compile().unwrap();
    let second = request.compile().unwrap();

    assert_eq!(first, second);
    assert!(request.root().is_some());
}

#[test]
fn test_too_deep_rescore_query_fails_the_request() {
    let mut deep: Query = term("leaf", 0).into();
    for _ in 0..MAX_DEPTH {
        deep = bool_query().filter(exists("a")).must(deep).into();
    }
    let request = SearchRequest::new().query(match_all()).rescore(Rescore::new(deep));

    assert_eq!(
        request.compile(),
        Err(QueryError::DepthLimitExceeded {
            depth: MAX_DEPTH + 1,
            limit: MAX_DEPTH
        })
    );
}

#[test]
fn test_param_pairs_skip_structured_values() {
    let mut request = SearchRequest::new();
    request
        .param("stats", vec!["group-a", "group-b"])
        .param("max_concurrent_shard_requests", 5)
        .param("sort_field", clove_search::Field::new("price"));

    assert_eq!(
        request.compile().unwrap().param_pairs(),
        vec![
            ("max_concurrent_shard_requests".to_string(), "5".to_string()),
            ("sort_field".to_string(), "price".to_string()),
        ]
    );
}

// ========================================================================
// URL Parameters
// ========================================================================

#[test]
fn test_params_stay_out_of_body() {
    let mut request = SearchRequest::new().query(term("a", 1));
    request
        .routing("tenant-7")
        .search_type(SearchType::QueryThenFetch)
        .param("request_cache", true);

    let compiled = request.compile().unwrap();

    assert_eq!(compiled.body, json!({"query": {"term": {"a": 1}}}));
    assert_eq!(
        compiled.param_pairs(),
        vec![
            ("routing".to_string(), "tenant-7".to_string()),
            ("search_type".to_string(), "query_then_fetch".to_string()),
            ("request_cache".to_string(), "true".to_string()),
        ]
    );
}

// ========================================================================
// Defaults
// ========================================================================

#[test]
fn test_defaults_fill_unset_values() {
    let defaults = defaults(concat!(
        r#"{"size": 25, "track_total_hits": false, "#,
        r#""search_type": "dfs_query_then_fetch", "timeout": "2s"}"#
    ));
    let compiled = SearchRequest::new()
        .query(match_all())
        .with_defaults(&defaults)
        .compile()
        .unwrap();

    assert_eq!(
        compiled.body,
        json!({"query": {"match_all": {}}, "size": 25, "track_total_hits": false})
    );
    assert_eq!(
        compiled.param_pairs(),
        vec![
            ("search_type".to_string(), "dfs_query_then_fetch".to_string()),
            ("timeout".to_string(), "2s".to_string()),
        ]
    );
}

#[test]
fn test_explicit_values_win_over_defaults() {
    let defaults = defaults(r#"{"size": 25, "preference": "_local"}"#);

    let mut request = SearchRequest::new().size(5);
    request.preference("session-1");
    let compiled = request.with_defaults(&defaults).compile().unwrap();

    assert_eq!(compiled.body, json!({"size": 5}));
    assert_eq!(
        compiled.params.get("preference"),
        Some(&Value::String("session-1".to_string()))
    );
}

#[test]
fn test_empty_defaults_change_nothing() {
    let request = SearchRequest::new().query(term("a", 1));
    let with_defaults = request.clone().with_defaults(&SearchDefaults::default());

    assert_eq!(request.compile().unwrap(), with_defaults.compile().unwrap());
}

#[test]
fn test_defaults_reject_unknown_keys() {
    let result: Result<SearchDefaults, _> = serde_json::from_str(r#"{"sise": 10}"#);
    assert!(result.is_err());

    let result: Result<SearchDefaults, _> = serde_json::from_str(r#"{"search_type": "scan"}"#);
    assert!(result.is_err());
}

use clove_search::{
    BoolNode, DisMaxNode, FunctionScoreNode, Handle, MutableNode, Query, QueryError, QueryNode,
    Rescore, ScoreFunction, SearchRequest,
    compiler::compile,
    dsl::*,
    walk::{bound_count, find, mutate},
};
use serde_json::json;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn body(request: &SearchRequest) -> serde_json::Value {
    request.compile().expect("compile failed").body
}

fn compiled(tree: &Query) -> Option<serde_json::Value> {
    compile(tree).expect("compile failed")
}

// ========================================================================
// End-to-End
// ========================================================================

#[test]
fn test_grow_root_bool_between_compiles() {
    init_tracing();

    let handle = Handle::<BoolNode>::labeled("root");
    let mut request = SearchRequest::new().query(BoolNode::new().bind(&handle));

    assert_eq!(body(&request), json!({}));

    request
        .mutate(&handle, |node| {
            node.should(term("X", 0));
        })
        .unwrap();
    assert_eq!(body(&request), json!({"query": {"term": {"X": 0}}}));

    request
        .mutate(&handle, |node| {
            node.should(term("X", 1));
        })
        .unwrap();
    assert_eq!(
        body(&request),
        json!({"query": {"bool": {"should": [{"term": {"X": 0}}, {"term": {"X": 1}}]}}})
    );
}

#[test]
fn test_add_weight_function() {
    let handle = Handle::<FunctionScoreNode>::new();
    let mut tree = FunctionScoreNode::new().bind(&handle);

    assert_eq!(compiled(&tree), None);

    mutate(&mut tree, &handle, |node| {
        node.function(ScoreFunction::weight(2.0).filter(range("Y").gt(4)));
    })
    .unwrap();

    assert_eq!(
        compiled(&tree).map(|v| v.to_string()).as_deref(),
        Some(concat!(
            r#"{"function_score":{"functions":[{"filter":{"range":{"Y":{"gt":4}}},"#,
            r#""weight":2.0}]}}"#
        ))
    );
}

#[test]
fn test_same_mutations_compile_identically() {
    let build = || {
        let handle = Handle::<BoolNode>::new();
        let mut tree = q_bool_with(&handle);
        mutate(&mut tree, &handle, |node| {
            node.filter(term("a", 1)).must(match_query("title", "rust"));
        })
        .unwrap();
        compiled(&tree).map(|v| v.to_string())
    };

    assert_eq!(build(), build());
}

fn q_bool_with(handle: &Handle<BoolNode>) -> Query {
    bool_query()
        .filter(exists("id"))
        .must(BoolNode::new().bind(handle))
        .into()
}

// ========================================================================
// Handle Lookup
// ========================================================================

#[test]
fn test_node_inside_plain_bool_filter() {
    let handle = Handle::<FunctionScoreNode>::labeled("boosts");
    let mut tree: Query = bool_query()
        .filter(FunctionScoreNode::new().bind(&handle))
        .must(term("a", 1))
        .into();

    mutate(&mut tree, &handle, |node| {
        node.set_query(term("b", 2));
        node.min_score = Some(0.1);
    })
    .unwrap();

    assert_eq!(
        compiled(&tree),
        Some(json!({
            "bool": {
                "filter": [{"function_score": {"query": {"term": {"b": 2}}, "min_score": 0.1}}],
                "must": [{"term": {"a": 1}}]
            }
        }))
    );
}

#[test]
fn test_node_inside_function_filter() {
    let handle = Handle::<BoolNode>::new();
    let mut tree: Query = function_score()
        .function(ScoreFunction::weight(2.0).filter(BoolNode::new().bind(&handle)))
        .into();

    mutate(&mut tree, &handle, |node| {
        node.must(term("vip", true));
    })
    .unwrap();

    assert_eq!(
        compiled(&tree),
        Some(json!({
            "function_score": {"functions": [{"filter": {"term": {"vip": true}}, "weight": 2.0}]}
        }))
    );
}

#[test]
fn test_node_inside_nested_query() {
    let handle = Handle::<DisMaxNode>::new();
    let mut tree: Query = nested("comments", DisMaxNode::new().bind(&handle)).into();

    mutate(&mut tree, &handle, |node| {
        node.query(term("comments.author", "kim"));
    })
    .unwrap();

    assert_eq!(
        compiled(&tree),
        Some(json!({
            "nested": {
                "path": "comments",
                "query": {"dis_max": {"queries": [{"term": {"comments.author": "kim"}}]}}
            }
        }))
    );
}

#[test]
fn test_node_inside_another_node() {
    let outer = Handle::<BoolNode>::labeled("outer");
    let inner = Handle::<DisMaxNode>::labeled("inner");

    let mut tree = BoolNode::new().bind(&outer);
    mutate(&mut tree, &outer, |node| {
        node.must(DisMaxNode::new().bind(&inner));
        node.must(term("a", 1));
    })
    .unwrap();
    mutate(&mut tree, &inner, |node| {
        node.query(term("b", 2)).query(term("c", 3));
    })
    .unwrap();

    assert_eq!(find(&tree, &inner).map(|n| n.queries.len()), Some(2));
    assert_eq!(
        compiled(&tree),
        Some(json!({
            "bool": {
                "must": [
                    {"dis_max": {"queries": [{"term": {"b": 2}}, {"term": {"c": 3}}]}},
                    {"term": {"a": 1}}
                ]
            }
        }))
    );
}

#[test]
fn test_walked_nodes_expose_handle_and_contents() {
    let handle = Handle::<DisMaxNode>::labeled("picks");
    let mut node = DisMaxNode::new();
    node.query(term("a", 1));
    let tree: Query = bool_query().filter(node.bind(&handle)).must(term("b", 2)).into();

    let Some(QueryNode::DisMax(bound)) = tree.nodes().next() else {
        panic!("expected a dis_max node in {tree:?}");
    };
    assert_eq!(bound.handle(), &handle);
    assert_eq!(bound.node().queries.len(), 1);
}

#[test]
fn test_node_inside_rescore() {
    let handle = Handle::<BoolNode>::new();
    let mut request = SearchRequest::new()
        .query(match_all())
        .rescore(Rescore::new(BoolNode::new().bind(&handle)).window_size(20));

    assert_eq!(body(&request), json!({"query": {"match_all": {}}}));

    request
        .mutate(&handle, |node| {
            node.should(match_phrase("title", "rust book"));
        })
        .unwrap();

    assert_eq!(
        body(&request),
        json!({
            "query": {"match_all": {}},
            "rescore": [{
                "window_size": 20,
                "query": {"rescore_query": {"match_phrase": {"title": "rust book"}}}
            }]
        })
    );
}

#[test]
fn test_copied_tree_keeps_working_handles() {
    let handle = Handle::<BoolNode>::new();
    let mut tree = BoolNode::new().bind(&handle);
    let mut copy = tree.clone();

    mutate(&mut tree, &handle, |node| {
        node.must(term("a", 1));
    })
    .unwrap();
    assert_eq!(compiled(&copy), None);

    mutate(&mut copy, &handle, |node| {
        node.must(term("b", 2));
    })
    .unwrap();
    assert_eq!(compiled(&tree), Some(json!({"term": {"a": 1}})));
    assert_eq!(compiled(&copy), Some(json!({"term": {"b": 2}})));
}

// ========================================================================
// Errors
// ========================================================================

#[test]
fn test_unknown_handle_is_rejected() {
    init_tracing();

    let mut tree = BoolNode::new().bind(&Handle::new());
    let before = tree.clone();
    let stranger = Handle::<BoolNode>::labeled("stranger");
    let mut called = false;

    let result = mutate(&mut tree, &stranger, |_| called = true);

    assert_eq!(
        result,
        Err(QueryError::HandleNotFound {
            handle: "stranger".to_string()
        })
    );
    assert!(!called);
    assert_eq!(tree, before);
}

#[test]
fn test_handle_of_other_kind_is_not_found() {
    let dis_max_handle = Handle::<DisMaxNode>::new();
    let mut tree: Query = bool_query().must(BoolNode::new().bind(&Handle::new())).into();

    let result = mutate(&mut tree, &dis_max_handle, |node| {
        node.query(term("a", 1));
    });

    assert!(matches!(result, Err(QueryError::HandleNotFound { .. })));
}

#[test]
fn test_handle_on_leaf_only_tree_is_not_found() {
    let mut request = SearchRequest::new().query(term("a", 1));
    let result = request.mutate(&Handle::<BoolNode>::new(), |_| {});

    assert!(matches!(result, Err(QueryError::HandleNotFound { .. })));
}

#[test]
fn test_duplicate_handle_is_rejected() {
    let handle = Handle::<BoolNode>::labeled("twice");
    let mut tree: Query = bool_query()
        .should(BoolNode::new().bind(&handle))
        .should(BoolNode::new().bind(&handle))
        .into();
    let before = tree.clone();

    assert_eq!(bound_count(&tree, &handle), 2);

    let result = mutate(&mut tree, &handle, |node| {
        node.must(term("a", 1));
    });

    assert_eq!(
        result,
        Err(QueryError::DuplicateHandle {
            handle: "twice".to_string(),
            count: 2
        })
    );
    assert_eq!(tree, before);
}

#[test]
fn test_duplicate_across_query_and_rescore() {
    let handle = Handle::<BoolNode>::new();
    let mut request = SearchRequest::new()
        .query(BoolNode::new().bind(&handle))
        .rescore(Rescore::new(BoolNode::new().bind(&handle)));

    let result = request.mutate(&handle, |_| {});
    assert!(matches!(result, Err(QueryError::DuplicateHandle { count: 2, .. })));
}

#[test]
fn test_error_messages() {
    let not_found = QueryError::HandleNotFound {
        handle: "filters".to_string(),
    };
    assert_eq!(not_found.to_string(), "Handle not found: filters");

    let duplicate = QueryError::DuplicateHandle {
        handle: "filters".to_string(),
        count: 3,
    };
    assert_eq!(duplicate.to_string(), "Handle filters is bound to 3 nodes");
}

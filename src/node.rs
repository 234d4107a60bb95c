//! Mutable, handle-addressed query nodes.
//!
//! A mutable node sits in the tree like any other query but keeps its
//! child lists open for editing. It is bound to one [`Handle`] at
//! construction; later, [`crate::walk::mutate`] finds it by that handle and
//! hands the caller `&mut` access. Whenever the tree is reduced or
//! compiled, the node is materialized into the immutable query it mirrors
//! with [`MutableNode::to_query`], so edits show up on the next compile.
//!
//! ```
//! use clove_search::{compiler::compile, dsl::*, walk::mutate, BoolNode, Handle, MutableNode};
//! use serde_json::json;
//!
//! let handle = Handle::<BoolNode>::new();
//! let mut tree = BoolNode::new().bind(&handle);
//! assert_eq!(compile(&tree).unwrap(), None);
//!
//! mutate(&mut tree, &handle, |node| {
//!     node.should(term("X", 0));
//! })
//! .unwrap();
//! assert_eq!(compile(&tree).unwrap(), Some(json!({"term": {"X": 0}})));
//! ```

use crate::{
    ast::{
        BoolQuery, Children, ChildrenMut, DisMaxQuery, FunctionScoreQuery, Query, ScoreFunction,
        functions::refilled,
    },
    handle::Handle,
    params::Parameters,
    value::Value,
    wire::{BoostMode, ScoreMode},
};

/// A mutable node kind paired with the immutable query it mirrors.
pub trait MutableNode: Sized {
    /// Materializes the equivalent immutable query.
    fn to_query(&self) -> Query;

    /// Places this node in a tree under `handle`.
    fn bind(self, handle: &Handle<Self>) -> Query;

    /// Returns the handle and node if `node` is of this kind.
    fn project(node: &QueryNode) -> Option<(&Handle<Self>, &Self)>;

    /// Mutable form of [`MutableNode::project`].
    fn project_mut(node: &mut QueryNode) -> Option<(&Handle<Self>, &mut Self)>;
}

/// A node together with the handle it is bound to.
#[derive(Debug, Clone, PartialEq)]
pub struct Bound<T> {
    pub(crate) handle: Handle<T>,
    pub(crate) node: T,
}

impl<T> Bound<T> {
    pub fn handle(&self) -> &Handle<T> {
        &self.handle
    }

    pub fn node(&self) -> &T {
        &self.node
    }
}

/// The mutable node kinds that can appear in a query tree.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryNode {
    Bool(Bound<BoolNode>),
    DisMax(Bound<DisMaxNode>),
    FunctionScore(Bound<FunctionScoreNode>),
}

impl QueryNode {
    pub fn to_query(&self) -> Query {
        match self {
            QueryNode::Bool(b) => b.node.to_query(),
            QueryNode::DisMax(b) => b.node.to_query(),
            QueryNode::FunctionScore(b) => b.node.to_query(),
        }
    }

    /// Wire name of the materialized query.
    pub fn name(&self) -> &'static str {
        match self {
            QueryNode::Bool(_) => "bool",
            QueryNode::DisMax(_) => "dis_max",
            QueryNode::FunctionScore(_) => "function_score",
        }
    }

    /// Copy of this node, same handle, with its child lists taken from
    /// `children` in [`QueryNode::children`] order.
    pub(crate) fn with_children(&self, children: &mut impl Iterator<Item = Query>) -> QueryNode {
        match self {
            QueryNode::Bool(b) => QueryNode::Bool(Bound {
                handle: b.handle.clone(),
                node: BoolNode {
                    filter: children.by_ref().take(b.node.filter.len()).collect(),
                    should: children.by_ref().take(b.node.should.len()).collect(),
                    must: children.by_ref().take(b.node.must.len()).collect(),
                    must_not: children.by_ref().take(b.node.must_not.len()).collect(),
                    minimum_should_match: b.node.minimum_should_match.clone(),
                    boost: b.node.boost,
                },
            }),
            QueryNode::DisMax(b) => QueryNode::DisMax(Bound {
                handle: b.handle.clone(),
                node: DisMaxNode {
                    queries: children.collect(),
                    tie_breaker: b.node.tie_breaker,
                    boost: b.node.boost,
                },
            }),
            QueryNode::FunctionScore(b) => {
                let n = &b.node;
                QueryNode::FunctionScore(Bound {
                    handle: b.handle.clone(),
                    node: FunctionScoreNode {
                        query: n.query.as_ref().and_then(|_| children.next()).map(Box::new),
                        functions: refilled(&n.functions, &mut children.map(Some)),
                        score_mode: n.score_mode,
                        boost_mode: n.boost_mode,
                        min_score: n.min_score,
                        max_boost: n.max_boost,
                        boost: n.boost,
                    },
                })
            }
        }
    }

    pub fn children(&self) -> Children<'_> {
        match self {
            QueryNode::Bool(b) => {
                let n = &b.node;
                Box::new(
                    n.filter
                        .iter()
                        .chain(n.should.iter())
                        .chain(n.must.iter())
                        .chain(n.must_not.iter()),
                )
            }
            QueryNode::DisMax(b) => Box::new(b.node.queries.iter()),
            QueryNode::FunctionScore(b) => {
                let n = &b.node;
                Box::new(
                    n.query
                        .as_deref()
                        .into_iter()
                        .chain(n.functions.iter().filter_map(|f| f.filter.as_ref())),
                )
            }
        }
    }

    pub fn children_mut(&mut self) -> ChildrenMut<'_> {
        match self {
            QueryNode::Bool(b) => {
                let n = &mut b.node;
                Box::new(
                    n.filter
                        .iter_mut()
                        .chain(n.should.iter_mut())
                        .chain(n.must.iter_mut())
                        .chain(n.must_not.iter_mut()),
                )
            }
            QueryNode::DisMax(b) => Box::new(b.node.queries.iter_mut()),
            QueryNode::FunctionScore(b) => {
                let n = &mut b.node;
                Box::new(
                    n.query
                        .as_deref_mut()
                        .into_iter()
                        .chain(n.functions.iter_mut().filter_map(|f| f.filter.as_mut())),
                )
            }
        }
    }
}

/// Mutable mirror of [`BoolQuery`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoolNode {
    pub filter: Vec<Query>,
    pub should: Vec<Query>,
    pub must: Vec<Query>,
    pub must_not: Vec<Query>,
    pub minimum_should_match: Option<Value>,
    pub boost: Option<f64>,
}

impl BoolNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(&mut self, clause: impl Into<Query>) -> &mut Self {
        self.filter.push(clause.into());
        self
    }

    pub fn should(&mut self, clause: impl Into<Query>) -> &mut Self {
        self.should.push(clause.into());
        self
    }

    pub fn must(&mut self, clause: impl Into<Query>) -> &mut Self {
        self.must.push(clause.into());
        self
    }

    pub fn must_not(&mut self, clause: impl Into<Query>) -> &mut Self {
        self.must_not.push(clause.into());
        self
    }

    pub(crate) fn options(&self) -> Parameters {
        Parameters::new().with("boost", self.boost)
    }
}

impl MutableNode for BoolNode {
    fn to_query(&self) -> Query {
        Query::Bool(BoolQuery {
            filter: self.filter.clone(),
            should: self.should.clone(),
            must: self.must.clone(),
            must_not: self.must_not.clone(),
            minimum_should_match: self.minimum_should_match.clone(),
            options: self.options(),
        })
    }

    fn bind(self, handle: &Handle<Self>) -> Query {
        Query::Node(QueryNode::Bool(Bound {
            handle: handle.clone(),
            node: self,
        }))
    }

    fn project(node: &QueryNode) -> Option<(&Handle<Self>, &Self)> {
        match node {
            QueryNode::Bool(b) => Some((&b.handle, &b.node)),
            _ => None,
        }
    }

    fn project_mut(node: &mut QueryNode) -> Option<(&Handle<Self>, &mut Self)> {
        match node {
            QueryNode::Bool(b) => Some((&b.handle, &mut b.node)),
            _ => None,
        }
    }
}

/// Mutable mirror of [`DisMaxQuery`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisMaxNode {
    pub queries: Vec<Query>,
    pub tie_breaker: Option<f64>,
    pub boost: Option<f64>,
}

impl DisMaxNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&mut self, query: impl Into<Query>) -> &mut Self {
        self.queries.push(query.into());
        self
    }

    pub(crate) fn options(&self) -> Parameters {
        Parameters::new().with("boost", self.boost)
    }
}

impl MutableNode for DisMaxNode {
    fn to_query(&self) -> Query {
        Query::DisMax(DisMaxQuery {
            queries: self.queries.clone(),
            tie_breaker: self.tie_breaker,
            options: self.options(),
        })
    }

    fn bind(self, handle: &Handle<Self>) -> Query {
        Query::Node(QueryNode::DisMax(Bound {
            handle: handle.clone(),
            node: self,
        }))
    }

    fn project(node: &QueryNode) -> Option<(&Handle<Self>, &Self)> {
        match node {
            QueryNode::DisMax(b) => Some((&b.handle, &b.node)),
            _ => None,
        }
    }

    fn project_mut(node: &mut QueryNode) -> Option<(&Handle<Self>, &mut Self)> {
        match node {
            QueryNode::DisMax(b) => Some((&b.handle, &mut b.node)),
            _ => None,
        }
    }
}

/// Mutable mirror of [`FunctionScoreQuery`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FunctionScoreNode {
    pub query: Option<Box<Query>>,
    pub functions: Vec<ScoreFunction>,
    pub score_mode: Option<ScoreMode>,
    pub boost_mode: Option<BoostMode>,
    pub min_score: Option<f64>,
    pub max_boost: Option<f64>,
    pub boost: Option<f64>,
}

impl FunctionScoreNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_query(&mut self, query: impl Into<Query>) -> &mut Self {
        self.query = Some(Box::new(query.into()));
        self
    }

    pub fn function(&mut self, function: ScoreFunction) -> &mut Self {
        self.functions.push(function);
        self
    }

    pub(crate) fn options(&self) -> Parameters {
        Parameters::new()
            .with("max_boost", self.max_boost)
            .with("boost", self.boost)
    }
}

impl MutableNode for FunctionScoreNode {
    fn to_query(&self) -> Query {
        Query::FunctionScore(FunctionScoreQuery {
            query: self.query.clone(),
            functions: self.functions.clone(),
            score_mode: self.score_mode,
            boost_mode: self.boost_mode,
            min_score: self.min_score,
            options: self.options(),
        })
    }

    fn bind(self, handle: &Handle<Self>) -> Query {
        Query::Node(QueryNode::FunctionScore(Bound {
            handle: handle.clone(),
            node: self,
        }))
    }

    fn project(node: &QueryNode) -> Option<(&Handle<Self>, &Self)> {
        match node {
            QueryNode::FunctionScore(b) => Some((&b.handle, &b.node)),
            _ => None,
        }
    }

    fn project_mut(node: &mut QueryNode) -> Option<(&Handle<Self>, &mut Self)> {
        match node {
            QueryNode::FunctionScore(b) => Some((&b.handle, &mut b.node)),
            _ => None,
        }
    }
}

//! Whole-tree traversal and handle-based mutation.
//!
//! Trees can nest arbitrarily deep (a bool inside a function-score inside a
//! bool ...), so every whole-tree walk here uses an explicit LIFO work-list
//! instead of call-stack recursion.
//!
//! # Visiting order
//!
//! Pop a node, visit it, push its children in list order. The last child of
//! a node is therefore visited first. The order is deterministic for a
//! given tree and every reachable node is visited exactly once.
//!
//! ```text
//! bool { filter: [a], should: [b, c] }   visits: bool, c, b, a
//! ```
//!
//! Bottom-up passes (reduction, cloning, depth) go through [`fold`], which
//! keeps the same explicit stack but hands each node the results of its
//! children in list order.

use tracing::{trace, warn};

use crate::{
    ast::Query,
    error::{QueryError, Result},
    handle::Handle,
    node::{MutableNode, QueryNode},
};

/// Depth-first iterator over a query tree. See the module docs for order.
pub struct Walk<'a> {
    stack: Vec<&'a Query>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a Query;

    fn next(&mut self) -> Option<&'a Query> {
        let query = self.stack.pop()?;
        self.stack.extend(query.children());
        Some(query)
    }
}

enum Frame<'a> {
    Enter(&'a Query),
    Exit(&'a Query, usize),
}

/// Post-order fold over a query tree without call-stack recursion.
///
/// `combine` receives each node together with the results of its direct
/// children, in [`Query::children`] order. Nodes for which `descend`
/// returns `false` are combined with no child results.
///
/// Returns `None` only if `combine` was never called, which cannot happen
/// for a well-formed root.
pub(crate) fn fold<'a, R>(
    root: &'a Query,
    descend: impl Fn(&Query) -> bool,
    mut combine: impl FnMut(&'a Query, Vec<R>) -> R,
) -> Option<R> {
    let mut frames = vec![Frame::Enter(root)];
    let mut results: Vec<R> = Vec::new();

    while let Some(frame) = frames.pop() {
        match frame {
            Frame::Enter(query) if descend(query) => {
                let children: Vec<&'a Query> = query.children().collect();
                frames.push(Frame::Exit(query, children.len()));
                frames.extend(children.into_iter().rev().map(Frame::Enter));
            }
            Frame::Enter(query) => frames.push(Frame::Exit(query, 0)),
            Frame::Exit(query, count) => {
                let children = results.split_off(results.len() - count);
                results.push(combine(query, children));
            }
        }
    }

    results.pop()
}

impl Query {
    /// Number of nodes on the longest path from this node to a leaf, this
    /// node included.
    pub fn depth(&self) -> usize {
        fold(self, |_| true, |_, children: Vec<usize>| {
            1 + children.into_iter().max().unwrap_or(0)
        })
        .unwrap_or(1)
    }

    /// Iterates over this node and every node reachable from it.
    pub fn walk(&self) -> Walk<'_> {
        Walk { stack: vec![self] }
    }

    /// Number of nodes in the tree, this one included.
    pub fn count_nodes(&self) -> usize {
        self.walk().count()
    }

    /// Every mutable node in the tree, in walk order.
    pub fn nodes(&self) -> impl Iterator<Item = &QueryNode> {
        self.walk().filter_map(|query| match query {
            Query::Node(node) => Some(node),
            _ => None,
        })
    }
}

/// Finds the node bound to `handle`, if any.
pub fn find<'a, T: MutableNode>(tree: &'a Query, handle: &Handle<T>) -> Option<&'a T> {
    tree.nodes()
        .filter_map(T::project)
        .find(|(bound, _)| *bound == handle)
        .map(|(_, node)| node)
}

/// Number of live nodes in `tree` bound to `handle`.
pub fn bound_count<T: MutableNode>(tree: &Query, handle: &Handle<T>) -> usize {
    tree.nodes()
        .filter_map(T::project)
        .filter(|(bound, _)| *bound == handle)
        .count()
}

/// Looks up the node bound to `handle` and applies `f` to it in place.
///
/// Fails with [`QueryError::HandleNotFound`] if nothing in the tree is bound
/// to the handle, and with [`QueryError::DuplicateHandle`] if more than one
/// node is. In both cases the tree is left untouched.
pub fn mutate<T, F>(tree: &mut Query, handle: &Handle<T>, f: F) -> Result<()>
where
    T: MutableNode,
    F: FnOnce(&mut T),
{
    mutate_in(vec![tree], handle, f)
}

/// [`mutate`] over several roots that share one handle namespace.
///
/// Roots are searched in the order given.
pub fn mutate_in<T, F>(roots: Vec<&mut Query>, handle: &Handle<T>, f: F) -> Result<()>
where
    T: MutableNode,
    F: FnOnce(&mut T),
{
    let count: usize = roots.iter().map(|root| bound_count(root, handle)).sum();
    match count {
        0 => {
            warn!(handle = %handle, "mutation rejected: no node bound to handle");
            return Err(QueryError::HandleNotFound {
                handle: handle.to_string(),
            });
        }
        1 => {}
        count => {
            warn!(handle = %handle, count, "mutation rejected: handle bound more than once");
            return Err(QueryError::DuplicateHandle {
                handle: handle.to_string(),
                count,
            });
        }
    }

    let mut stack = roots;
    stack.reverse();

    while let Some(query) = stack.pop() {
        if let Query::Node(node) = &mut *query {
            if let Some((bound, target)) = T::project_mut(node) {
                if bound == handle {
                    trace!(handle = %handle, "mutating node");
                    f(target);
                    return Ok(());
                }
            }
        }
        stack.extend(query.children_mut());
    }

    Err(QueryError::HandleNotFound {
        handle: handle.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ast::ScoreFunction, dsl::*, node::BoolNode};

    #[test]
    fn test_walk_order_is_lifo() {
        let tree: Query = bool_query()
            .filter(term("a", 1))
            .should(term("b", 2))
            .should(term("c", 3))
            .into();

        let fields: Vec<String> = tree
            .walk()
            .map(|q| match q {
                Query::Term(t) => t.field.to_string(),
                other => other.name().to_string(),
            })
            .collect();

        assert_eq!(fields, ["bool", "c", "b", "a"]);
    }

    #[test]
    fn test_fold_sees_children_in_list_order() {
        let tree: Query = bool_query()
            .filter(term("a", 1))
            .should(dis_max().query(term("b", 2)).query(term("c", 3)))
            .into();

        let rendered = fold(&tree, |_| true, |query, children: Vec<String>| match query {
            Query::Term(t) => t.field.to_string(),
            other => format!("{}({})", other.name(), children.join(",")),
        });

        assert_eq!(rendered.as_deref(), Some("bool(a,dis_max(b,c))"));
    }

    #[test]
    fn test_depth() {
        assert_eq!(Query::from(term("a", 1)).depth(), 1);

        let tree: Query = bool_query()
            .filter(term("a", 1))
            .must(nested("p", bool_query().should(term("b", 2))))
            .into();
        assert_eq!(tree.depth(), 4);
    }

    #[test]
    fn test_nodes_in_every_query_slot_are_visited() {
        let handle = Handle::<BoolNode>::new();
        let node = || BoolNode::new().bind(&handle);

        let tree: Query = bool_query()
            .filter(node())
            .should(node())
            .must(node())
            .must_not(node())
            .must(dis_max().query(node()))
            .must(nested("p", node()))
            .must(
                function_score()
                    .query(node())
                    .function(ScoreFunction::weight(2.0).filter(node())),
            )
            .into();

        assert_eq!(bound_count(&tree, &handle), 8);
    }

    #[test]
    fn test_deep_tree_does_not_overflow() {
        let mut tree: Query = term("leaf", 0).into();
        for _ in 0..100_000 {
            tree = bool_query().must(tree).into();
        }

        assert_eq!(tree.count_nodes(), 100_001);
        assert_eq!(tree.depth(), 100_001);

        let copy = tree.clone();
        assert_eq!(copy.count_nodes(), 100_001);
    }
}

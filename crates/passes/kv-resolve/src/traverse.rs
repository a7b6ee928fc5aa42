//! Scope-aware depth-first traversal
//!
//! [`traverse`] walks a tree bottom-up, maintaining a [`ScopeChain`] with fixed
//! rules, and hands every node to a caller-supplied transform together with
//! the already transformed children and the chain as it stands at that node:
//!
//! - a block runs inside a fresh frame,
//! - a lambda runs inside a fresh frame holding its parameters, bound before
//!   the body is visited,
//! - an assignment binds its name in the current frame before its children
//!   are visited,
//! - every other kind leaves the chain alone.
//!
//! Block and lambda transforms see the frame they introduced; it is popped
//! right after.

use crate::error::ResolveError;
use crate::scope::{CoreScope, FrameKind, ScopeChain};
use kv_ast::{Module, Node, Symbol};

/// Walks `node` depth-first, transforming children left to right before
/// their parent
///
/// # Errors
///
/// Propagates the first error returned by `transform`, and
/// [`ResolveError::ExpectedSymbol`] for a binding position that holds
/// anything other than a symbol.
pub fn traverse<'ast, T, E, F>(
    node: &'ast Node,
    chain: &mut ScopeChain<'ast>,
    transform: &mut F,
) -> Result<T, E>
where
    F: FnMut(&'ast Node, Vec<T>, &ScopeChain<'ast>) -> Result<T, E>,
    E: From<ResolveError>,
{
    match node {
        Node::Block(_) => {
            chain.push(FrameKind::Block);
            let result = visit(node, chain, transform);
            chain.pop();
            result
        }
        Node::Lambda(lambda) => {
            chain.push(FrameKind::Lambda);
            let result = lambda
                .params()
                .iter()
                .try_for_each(|param| -> Result<(), E> {
                    chain.define(expect_symbol(param, "lambda parameter")?);
                    Ok(())
                })
                .and_then(|()| visit(node, chain, transform));
            chain.pop();
            result
        }
        Node::Assign(assign) => {
            chain.define(expect_symbol(assign.name(), "assignment target")?);
            visit(node, chain, transform)
        }
        Node::Module(_) | Node::Symbol(_) | Node::Integer(_) | Node::Apply(_) => {
            visit(node, chain, transform)
        }
    }
}

/// Traverses each top-level expression of `module` in order, sharing one
/// chain rooted at `core`
///
/// # Errors
///
/// Stops at the first error, see [`traverse`].
pub fn traverse_module<'ast, T, E, F>(
    module: &'ast Module,
    core: &'ast CoreScope,
    transform: &mut F,
) -> Result<Vec<T>, E>
where
    F: FnMut(&'ast Node, Vec<T>, &ScopeChain<'ast>) -> Result<T, E>,
    E: From<ResolveError>,
{
    let mut chain = ScopeChain::new(core);
    module
        .exprs()
        .iter()
        .map(|expr| traverse(expr, &mut chain, transform))
        .collect()
}

fn visit<'ast, T, E, F>(
    node: &'ast Node,
    chain: &mut ScopeChain<'ast>,
    transform: &mut F,
) -> Result<T, E>
where
    F: FnMut(&'ast Node, Vec<T>, &ScopeChain<'ast>) -> Result<T, E>,
    E: From<ResolveError>,
{
    let children = node
        .children()
        .iter()
        .map(|child| traverse(child, chain, transform))
        .collect::<Result<Vec<T>, E>>()?;
    transform(node, children, chain)
}

fn expect_symbol<'ast>(
    node: &'ast Node,
    context: &'static str,
) -> Result<&'ast Symbol, ResolveError> {
    node.as_symbol().ok_or(ResolveError::ExpectedSymbol {
        found: node.kind(),
        context,
    })
}

//! Raw tree → AST instantiation
//!
//! Dispatches on the textual kind tag of each raw node and builds the matching
//! AST variant, children first. The tag is the only thing validated: a lambda
//! parameter or assignment target that is not a symbol is accepted here and
//! rejected by the pass that needs it to be one.

pub mod error;

pub use error::InstantiateError;

use kv_ast::{Apply, Assign, Block, Integer, Lambda, Module, Node, NodeKind, Symbol};
use kv_syntax::{RawNode, kinds};

/// Instantiate a raw root `mod` node as a module called `name`
///
/// # Errors
///
/// Returns [`InstantiateError::NotAModule`] if the root is not a module, or
/// the first error raised while instantiating its expressions.
pub fn instantiate_module(name: &str, raw: &RawNode) -> Result<Module, InstantiateError> {
    if raw.kind != kinds::MODULE {
        return Err(InstantiateError::NotAModule {
            kind: raw.kind.clone(),
        });
    }

    let exprs = instantiate_all(&raw.children)?;
    tracing::trace!(module = name, exprs = exprs.len(), "instantiated module");
    Ok(Module::new(name, exprs))
}

/// Instantiate any raw node
///
/// A nested `mod` node takes its name from the raw node's text.
///
/// # Errors
///
/// Returns [`InstantiateError::UnsupportedNodeKind`] for unknown tags and the
/// shape errors described on [`InstantiateError`].
pub fn instantiate(raw: &RawNode) -> Result<Node, InstantiateError> {
    let node = match raw.kind.as_str() {
        kinds::MODULE => Module::new(raw.text.as_str(), instantiate_all(&raw.children)?).into(),
        kinds::SYMBOL => Symbol::new(raw.text.as_str()).into(),
        kinds::INTEGER => Integer::from_digits(&raw.text)
            .ok_or_else(|| InstantiateError::MalformedInteger {
                text: raw.text.clone(),
                span: raw.span,
            })?
            .into(),
        kinds::LAMBDA => {
            let (body, params) = split_head(raw, NodeKind::Lambda)?;
            Lambda::new(params, body).into()
        }
        kinds::APPLY => {
            let (callee, args) = split_head(raw, NodeKind::Apply)?;
            Apply::new(callee, args).into()
        }
        kinds::BLOCK => Block::new(instantiate_all(&raw.children)?).into(),
        kinds::ASSIGN => {
            let [name, value] = raw.children.as_slice() else {
                return Err(InstantiateError::MissingChild {
                    kind: NodeKind::Assign,
                    expected: "exactly 2",
                    found: raw.children.len(),
                    span: raw.span,
                });
            };
            Assign::new(instantiate(name)?, instantiate(value)?).into()
        }
        other => {
            return Err(InstantiateError::UnsupportedNodeKind {
                kind: other.to_string(),
                span: raw.span,
            });
        }
    };

    Ok(node)
}

fn instantiate_all(raw: &[RawNode]) -> Result<Vec<Node>, InstantiateError> {
    raw.iter().map(instantiate).collect()
}

/// Splits `[head, rest...]` children, instantiating both parts
fn split_head(raw: &RawNode, kind: NodeKind) -> Result<(Node, Vec<Node>), InstantiateError> {
    let Some((head, rest)) = raw.children.split_first() else {
        return Err(InstantiateError::MissingChild {
            kind,
            expected: "at least 1",
            found: 0,
            span: raw.span,
        });
    };

    Ok((instantiate(head)?, instantiate_all(rest)?))
}

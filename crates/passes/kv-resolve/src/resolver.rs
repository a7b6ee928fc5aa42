//! Lexical resolution pass
//!
//! Runs [`traverse_module`] with a transform that resolves every symbol
//! occurrence, binding occurrences included (a parameter or assignment target
//! resolves to itself).

use crate::error::ResolveError;
use crate::scope::{CoreScope, FrameKind, ScopeChain};
use crate::traverse::traverse_module;
use kv_ast::{Module, Node, Symbol};

/// A resolved symbol occurrence
#[derive(Debug, Clone, Copy)]
pub struct Resolution<'ast> {
    /// The occurrence
    pub site: &'ast Symbol,
    /// The symbol node that introduced the name
    pub binding: &'ast Symbol,
    /// Whether the binding is a built-in from the core scope
    pub builtin: bool,
    /// Whether the occurrence sits inside a lambda but is bound outside it
    pub captured: bool,
}

/// Result of name resolution
#[derive(Debug, Clone, Default)]
pub struct ResolutionResult<'ast> {
    /// Every symbol occurrence, in traversal order
    pub resolutions: Vec<Resolution<'ast>>,
}

impl<'ast> ResolutionResult<'ast> {
    /// Occurrences that reach across a lambda boundary
    ///
    /// Lifted functions only see their own parameters, so each of these will
    /// fail to lower.
    pub fn captures(&self) -> impl Iterator<Item = &Resolution<'ast>> {
        self.resolutions.iter().filter(|resolution| resolution.captured)
    }
}

/// Resolves every symbol in `module` against its lexical scopes and `core`
///
/// # Errors
///
/// Returns the first [`ResolveError`] met in traversal order.
pub fn resolve_module<'ast>(
    module: &'ast Module,
    core: &'ast CoreScope,
) -> Result<ResolutionResult<'ast>, ResolveError> {
    let mut resolutions = Vec::new();

    traverse_module(module, core, &mut |node, _: Vec<()>, chain| {
        if let Node::Symbol(site) = node {
            resolutions.push(resolve_symbol(site, chain)?);
        }
        Ok::<(), ResolveError>(())
    })?;

    tracing::debug!(
        module = module.name(),
        symbols = resolutions.len(),
        "resolved module"
    );
    Ok(ResolutionResult { resolutions })
}

fn resolve_symbol<'ast>(
    site: &'ast Symbol,
    chain: &ScopeChain<'ast>,
) -> Result<Resolution<'ast>, ResolveError> {
    let binding = chain.get(site.name())?;
    let frame = chain.lookup(site.name()).and_then(|found| found.frame);
    let captured = match (frame, chain.innermost(FrameKind::Lambda)) {
        (Some(bound_in), Some(lambda)) => bound_in < lambda,
        _ => false,
    };

    Ok(Resolution {
        site,
        binding,
        builtin: frame.is_none(),
        captured,
    })
}

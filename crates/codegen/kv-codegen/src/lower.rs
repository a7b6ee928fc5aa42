//! Lowering of the AST to C text
//!
//! Every lambda becomes a named top-level function whose body is a single
//! `return` of the lowered expression. Inner lambdas are lifted before the
//! function that contains them, so a function's number is only known once its
//! body has been lowered.

use crate::config::CodegenConfig;
use crate::context::RenamingContext;
use crate::error::LowerError;
use crate::unit::CompilationUnit;
use kv_ast::{Apply, Lambda, Module, Node};

/// Lowers `module` into a fresh compilation unit named after it
///
/// Top-level expressions share one empty renaming context and their values
/// are discarded; only the functions lifted out of them reach the unit.
///
/// # Errors
///
/// Returns the first [`LowerError`] met in expression order.
pub fn lower_module(
    module: &Module,
    config: &CodegenConfig,
) -> Result<CompilationUnit, LowerError> {
    let mut lowerer = Lowerer::new(module.name(), config);
    let mut ctx = RenamingContext::new();
    for expr in module.exprs() {
        lowerer.lower_expr(expr, &mut ctx)?;
    }
    Ok(lowerer.finish())
}

/// Lowering state for one module
pub struct Lowerer<'cfg> {
    config: &'cfg CodegenConfig,
    unit: CompilationUnit,
}

impl<'cfg> Lowerer<'cfg> {
    /// Starts lowering into an empty unit named `name`
    #[must_use]
    pub fn new(name: &str, config: &'cfg CodegenConfig) -> Self {
        Self {
            config,
            unit: CompilationUnit::new(name),
        }
    }

    /// The unit built so far
    #[must_use]
    pub fn finish(self) -> CompilationUnit {
        self.unit
    }

    /// Lowers one expression to its C text, lifting any lambdas inside it
    ///
    /// # Errors
    ///
    /// Fails on unbound symbols and on node kinds with no lowering rule.
    pub fn lower_expr(
        &mut self,
        node: &Node,
        ctx: &mut RenamingContext,
    ) -> Result<String, LowerError> {
        match node {
            Node::Symbol(symbol) => ctx.get(symbol.name()).map(str::to_string),
            Node::Integer(integer) => Ok(integer.value().to_string()),
            Node::Lambda(lambda) => self.lower_lambda(lambda),
            Node::Apply(apply) => self.lower_apply(apply, ctx),
            Node::Module(_) | Node::Block(_) | Node::Assign(_) => {
                Err(LowerError::Unsupported { kind: node.kind() })
            }
        }
    }

    fn lower_lambda(&mut self, lambda: &Lambda) -> Result<String, LowerError> {
        let mut ctx = RenamingContext::new();

        let params = lambda
            .params()
            .iter()
            .map(|param| -> Result<String, LowerError> {
                let symbol = param
                    .as_symbol()
                    .ok_or(LowerError::ExpectedSymbol { found: param.kind() })?;
                Ok(format!("{} {}", self.config.any_type, ctx.bind(symbol.name())))
            })
            .collect::<Result<Vec<_>, _>>()?
            .join(", ");

        let body = self.lower_expr(lambda.body(), &mut ctx)?;

        let name = self.config.function_name(self.unit.function_count());
        let any = &self.config.any_type;
        tracing::debug!(function = %name, params = lambda.params().len(), "lifted lambda");
        self.unit.push_function(
            format!("{any} {name}({params});"),
            format!("{any} {name}({params}) {{\n\treturn {body};\n}}"),
        );

        Ok(name)
    }

    fn lower_apply(
        &mut self,
        apply: &Apply,
        ctx: &mut RenamingContext,
    ) -> Result<String, LowerError> {
        let callee = self.lower_expr(apply.callee(), ctx)?;
        let args = apply
            .args()
            .iter()
            .map(|arg| self.lower_expr(arg, ctx))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(format!("{callee}({})", args.join(", ")))
    }
}

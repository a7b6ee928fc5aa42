//! Abstract syntax tree for kv
//!
//! The tree is a closed set of seven node kinds. Every node owns its children
//! in a single positional list; the named accessors on each variant are views
//! over that list and never a second copy of it.

use derive_more::{Display, From};

/// Kind of a [`Node`], with the textual tag used by raw parse trees
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum NodeKind {
    /// Module
    #[display("mod")]
    Module,
    /// Identifier
    #[display("sym")]
    Symbol,
    /// Integer literal
    #[display("int")]
    Integer,
    /// Lambda abstraction
    #[display("abs")]
    Lambda,
    /// Application
    #[display("app")]
    Apply,
    /// Block
    #[display("blk")]
    Block,
    /// Assignment
    #[display("let")]
    Assign,
}

/// AST node
#[derive(Debug, Clone, PartialEq, Eq, From)]
pub enum Node {
    /// Module (only meaningful at the root)
    Module(Module),
    /// Identifier
    Symbol(Symbol),
    /// Integer literal
    Integer(Integer),
    /// Lambda abstraction
    Lambda(Lambda),
    /// Application
    Apply(Apply),
    /// Block
    Block(Block),
    /// Assignment
    Assign(Assign),
}

impl Node {
    /// Kind of this node
    #[must_use]
    pub const fn kind(&self) -> NodeKind {
        match self {
            Self::Module(_) => NodeKind::Module,
            Self::Symbol(_) => NodeKind::Symbol,
            Self::Integer(_) => NodeKind::Integer,
            Self::Lambda(_) => NodeKind::Lambda,
            Self::Apply(_) => NodeKind::Apply,
            Self::Block(_) => NodeKind::Block,
            Self::Assign(_) => NodeKind::Assign,
        }
    }

    /// Positional children
    #[must_use]
    pub fn children(&self) -> &[Self] {
        match self {
            Self::Module(module) => &module.children,
            Self::Symbol(_) | Self::Integer(_) => &[],
            Self::Lambda(lambda) => &lambda.children,
            Self::Apply(apply) => &apply.children,
            Self::Block(block) => &block.children,
            Self::Assign(assign) => &assign.children,
        }
    }

    /// This node as a symbol, if it is one
    #[must_use]
    pub const fn as_symbol(&self) -> Option<&Symbol> {
        match self {
            Self::Symbol(symbol) => Some(symbol),
            _ => None,
        }
    }
}

/// Ordered top-level expressions plus the module name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    name: String,
    children: Vec<Node>,
}

impl Module {
    /// Creates a module
    #[must_use]
    pub fn new(name: impl Into<String>, exprs: Vec<Node>) -> Self {
        Self {
            name: name.into(),
            children: exprs,
        }
    }

    /// Module name, used to name output artifacts
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Top-level expressions in declaration order
    #[must_use]
    pub fn exprs(&self) -> &[Node] {
        &self.children
    }
}

/// Identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Symbol {
    name: String,
}

impl Symbol {
    /// Creates a symbol
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Identifier text
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Integer literal
///
/// Holds the decimal digits as written, so literals of any length survive to
/// the emitted code unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Integer {
    digits: String,
}

impl Integer {
    /// Creates an integer literal from its value
    #[must_use]
    pub fn new(value: u64) -> Self {
        Self {
            digits: value.to_string(),
        }
    }

    /// Creates an integer literal from decimal text, `None` unless `text` is a
    /// non-empty run of ASCII digits
    #[must_use]
    pub fn from_digits(text: &str) -> Option<Self> {
        (!text.is_empty() && text.bytes().all(|byte| byte.is_ascii_digit())).then(|| Self {
            digits: text.to_string(),
        })
    }

    /// Decimal digits of the literal
    #[must_use]
    pub fn value(&self) -> &str {
        &self.digits
    }
}

/// Lambda abstraction: `[body, params...]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lambda {
    children: Vec<Node>,
}

impl Lambda {
    /// Creates a lambda from its parameters (declaration order) and body
    #[must_use]
    pub fn new(params: Vec<Node>, body: Node) -> Self {
        let mut children = Vec::with_capacity(params.len() + 1);
        children.push(body);
        children.extend(params);
        Self { children }
    }

    /// Body expression
    #[must_use]
    pub fn body(&self) -> &Node {
        &self.children[0]
    }

    /// Formal parameters in declaration order
    #[must_use]
    pub fn params(&self) -> &[Node] {
        &self.children[1..]
    }
}

/// Application: `[callee, args...]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Apply {
    children: Vec<Node>,
}

impl Apply {
    /// Creates an application
    #[must_use]
    pub fn new(callee: Node, args: Vec<Node>) -> Self {
        let mut children = Vec::with_capacity(args.len() + 1);
        children.push(callee);
        children.extend(args);
        Self { children }
    }

    /// Callee expression
    #[must_use]
    pub fn callee(&self) -> &Node {
        &self.children[0]
    }

    /// Arguments, evaluated left to right
    #[must_use]
    pub fn args(&self) -> &[Node] {
        &self.children[1..]
    }
}

/// Block: a sequence of expressions in a fresh lexical scope
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    children: Vec<Node>,
}

impl Block {
    /// Creates a block
    #[must_use]
    pub const fn new(exprs: Vec<Node>) -> Self {
        Self { children: exprs }
    }

    /// Expressions in order
    #[must_use]
    pub fn exprs(&self) -> &[Node] {
        &self.children
    }

    /// Final expression, whose value is the block's value
    #[must_use]
    pub fn tail(&self) -> Option<&Node> {
        self.children.last()
    }
}

/// Assignment: `[name, value]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assign {
    children: Vec<Node>,
}

impl Assign {
    /// Creates an assignment. `name` is normally a [`Symbol`]; anything else is
    /// kept as-is and rejected by later passes.
    #[must_use]
    pub fn new(name: Node, value: Node) -> Self {
        Self {
            children: vec![name, value],
        }
    }

    /// Bound name
    #[must_use]
    pub fn name(&self) -> &Node {
        &self.children[0]
    }

    /// Value expression
    #[must_use]
    pub fn value(&self) -> &Node {
        &self.children[1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sym(name: &str) -> Node {
        Symbol::new(name).into()
    }

    #[test]
    fn test_lambda_children_are_body_then_params() {
        let lambda = Lambda::new(vec![sym("x"), sym("y")], sym("y"));
        let node = Node::from(lambda.clone());

        assert_eq!(node.kind(), NodeKind::Lambda);
        assert_eq!(node.children(), &[sym("y"), sym("x"), sym("y")]);
        assert_eq!(lambda.body(), &sym("y"));
        assert_eq!(lambda.params(), &[sym("x"), sym("y")]);
    }

    #[test]
    fn test_lambda_without_params() {
        let lambda = Lambda::new(Vec::new(), Integer::new(3).into());
        assert!(lambda.params().is_empty());
        assert_eq!(lambda.body(), &Node::Integer(Integer::new(3)));
    }

    #[test]
    fn test_apply_accessors() {
        let apply = Apply::new(sym("f"), vec![sym("a"), Integer::new(1).into()]);
        assert_eq!(apply.callee(), &sym("f"));
        assert_eq!(apply.args(), &[sym("a"), Node::Integer(Integer::new(1))]);
        assert_eq!(Node::from(apply).children().len(), 3);
    }

    #[test]
    fn test_assign_accessors() {
        let assign = Assign::new(sym("a"), Integer::new(7).into());
        assert_eq!(assign.name().as_symbol().map(Symbol::name), Some("a"));
        assert_eq!(assign.value(), &Node::Integer(Integer::new(7)));
    }

    #[test]
    fn test_block_tail() {
        assert_eq!(Block::new(Vec::new()).tail(), None);
        let block = Block::new(vec![sym("a"), sym("b")]);
        assert_eq!(block.tail(), Some(&sym("b")));
    }

    #[test]
    fn test_structural_equality_includes_module_name() {
        let left = Module::new("test", vec![sym("a")]);
        assert_eq!(left, Module::new("test", vec![sym("a")]));
        assert_ne!(left, Module::new("other", vec![sym("a")]));
    }

    #[test]
    fn test_kind_tags() {
        let tags: Vec<String> = [
            NodeKind::Module,
            NodeKind::Symbol,
            NodeKind::Integer,
            NodeKind::Lambda,
            NodeKind::Apply,
            NodeKind::Block,
            NodeKind::Assign,
        ]
        .iter()
        .map(ToString::to_string)
        .collect();
        assert_eq!(tags, ["mod", "sym", "int", "abs", "app", "blk", "let"]);
    }

    #[test]
    fn test_leaves_have_no_children() {
        assert!(sym("x").children().is_empty());
        assert!(Node::from(Integer::new(0)).children().is_empty());
        assert_eq!(sym("x").as_symbol().map(Symbol::name), Some("x"));
        assert!(Node::from(Integer::new(0)).as_symbol().is_none());
    }

    #[test]
    fn test_integer_digits() {
        assert_eq!(Integer::new(42).value(), "42");
        let wide = Integer::from_digits("123456789012345678901234567890").unwrap();
        assert_eq!(wide.value(), "123456789012345678901234567890");
        assert_eq!(Integer::from_digits("007").unwrap().value(), "007");
        assert!(Integer::from_digits("").is_none());
        assert!(Integer::from_digits("12x").is_none());
        assert!(Integer::from_digits("-1").is_none());
    }
}

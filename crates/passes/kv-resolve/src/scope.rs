//! Scope chain for lexical name resolution

use crate::error::ResolveError;
use kv_ast::Symbol;
use kv_suggest::suggest;
use rustc_hash::FxHashMap;

/// Index of a frame in a [`ScopeChain`]
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, PartialOrd, Ord)]
pub struct FrameId(pub u32);

/// Construct that introduced a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    /// Module-level (root) frame
    Module,
    /// Block frame
    Block,
    /// Lambda parameter frame
    Lambda,
}

/// A single frame of the chain
#[derive(Debug, Clone)]
struct Frame<'ast> {
    parent: Option<FrameId>,
    kind: FrameKind,
    bindings: FxHashMap<&'ast str, &'ast Symbol>,
}

/// Built-in bindings shared, read-only, by every compilation
#[derive(Debug, Clone, Default)]
pub struct CoreScope {
    bindings: FxHashMap<String, Symbol>,
}

impl CoreScope {
    /// A core scope with no bindings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A core scope binding each of `names`
    #[must_use]
    pub fn with_bindings<S: Into<String>>(names: impl IntoIterator<Item = S>) -> Self {
        let bindings = names
            .into_iter()
            .map(Into::into)
            .map(|name: String| (name.clone(), Symbol::new(name)))
            .collect();
        Self { bindings }
    }

    /// Looks up a built-in
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.bindings.get(name)
    }

    /// Names of all built-ins, in no particular order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.bindings.keys().map(String::as_str)
    }

    /// Number of built-ins
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether there are no built-ins
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// Where a name was found
#[derive(Debug, Clone, Copy)]
pub struct Binding<'ast> {
    /// The symbol node that introduced the name
    pub symbol: &'ast Symbol,
    /// Frame holding the binding; `None` for the core scope
    pub frame: Option<FrameId>,
}

/// Stack of lexical frames on top of a [`CoreScope`]
///
/// Frames are pushed and popped in strict LIFO order while a tree is walked.
/// Each frame links to its parent by index; the root frame's parent is the
/// core scope, which is never modified.
#[derive(Debug, Clone)]
pub struct ScopeChain<'ast> {
    core: &'ast CoreScope,
    frames: Vec<Frame<'ast>>,
}

impl<'ast> ScopeChain<'ast> {
    /// Creates a chain holding a single module frame
    #[must_use]
    pub fn new(core: &'ast CoreScope) -> Self {
        Self {
            core,
            frames: vec![Frame {
                parent: None,
                kind: FrameKind::Module,
                bindings: FxHashMap::default(),
            }],
        }
    }

    /// The innermost frame
    #[must_use]
    pub fn current(&self) -> FrameId {
        FrameId((self.frames.len() - 1) as u32)
    }

    /// Number of live frames, the module frame included
    #[must_use]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Kind of a live frame
    #[must_use]
    pub fn kind(&self, frame: FrameId) -> FrameKind {
        self.frames[frame.0 as usize].kind
    }

    /// Innermost live frame of the given kind
    #[must_use]
    pub fn innermost(&self, kind: FrameKind) -> Option<FrameId> {
        self.frames
            .iter()
            .rposition(|frame| frame.kind == kind)
            .map(|idx| FrameId(idx as u32))
    }

    /// Enters a new frame whose parent is the current one
    pub fn push(&mut self, kind: FrameKind) -> FrameId {
        let parent = self.current();
        self.frames.push(Frame {
            parent: Some(parent),
            kind,
            bindings: FxHashMap::default(),
        });
        tracing::trace!(?kind, depth = self.frames.len(), "push frame");
        self.current()
    }

    /// Leaves the current frame, dropping its bindings. The module frame stays.
    pub fn pop(&mut self) {
        if self.frames.len() > 1 {
            self.frames.pop();
            tracing::trace!(depth = self.frames.len(), "pop frame");
        }
    }

    /// Binds `symbol` in the current frame, shadowing any earlier binding
    pub fn define(&mut self, symbol: &'ast Symbol) {
        let frame = self.frames.len() - 1;
        self.frames[frame].bindings.insert(symbol.name(), symbol);
    }

    /// Finds the nearest binding of `name`: current frame, its ancestors, then
    /// the core scope
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<Binding<'ast>> {
        let mut current = Some(self.current());
        while let Some(frame_id) = current {
            let frame = &self.frames[frame_id.0 as usize];
            if let Some(&symbol) = frame.bindings.get(name) {
                return Some(Binding {
                    symbol,
                    frame: Some(frame_id),
                });
            }
            current = frame.parent;
        }

        self.core.get(name).map(|symbol| Binding {
            symbol,
            frame: None,
        })
    }

    /// Resolves `name` to the symbol that introduced it
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::Unresolved`] with suggestions drawn from the
    /// visible names when no frame and no built-in binds `name`.
    pub fn get(&self, name: &str) -> Result<&'ast Symbol, ResolveError> {
        self.lookup(name)
            .map(|binding| binding.symbol)
            .ok_or_else(|| ResolveError::Unresolved {
                name: name.to_string(),
                suggestions: suggest(name, self.visible_names()),
            })
    }

    /// Every name visible from the current frame (shadowed names included)
    pub fn visible_names(&self) -> impl Iterator<Item = &str> {
        self.frames
            .iter()
            .rev()
            .flat_map(|frame| frame.bindings.keys().copied())
            .chain(self.core.names())
    }
}

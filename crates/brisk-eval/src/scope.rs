//! Lexical scope chain for the Brisk evaluator.
//!
//! Frames live in an arena owned by [`ScopeChain`] and are addressed by
//! [`ScopeId`]. Each frame records its parent's id, so the chain is walked
//! child → parent without any frame owning another. Frames are released in
//! LIFO order, mirroring block nesting.

use crate::error::{EvalError, EvalResult};
use brisk_types::{Bindings, Value};
use tracing::trace;

/// Handle to a frame in a [`ScopeChain`].
///
/// An id is valid from `enter_block` until the matching `exit_block`;
/// using it afterwards is a logic error and panics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(usize);

#[derive(Debug, Clone, Default)]
struct Frame {
    bindings: Bindings,
    parent: Option<ScopeId>,
}

/// The stack of live scope frames for one program run.
#[derive(Debug, Clone)]
pub struct ScopeChain {
    frames: Vec<Frame>,
}

impl ScopeChain {
    /// Create a chain holding only an empty root scope.
    pub fn new() -> Self {
        Self {
            frames: vec![Frame::default()],
        }
    }

    /// Create a chain whose root scope starts with `bindings`.
    pub fn with_root(bindings: Bindings) -> Self {
        Self {
            frames: vec![Frame {
                bindings,
                parent: None,
            }],
        }
    }

    /// The root scope: no parent, lives as long as the chain.
    pub fn root(&self) -> ScopeId {
        ScopeId(0)
    }

    fn frame(&self, scope: ScopeId) -> &Frame {
        &self.frames[scope.0]
    }

    fn frame_mut(&mut self, scope: ScopeId) -> &mut Frame {
        &mut self.frames[scope.0]
    }

    /// Walk from `scope` outward to the first frame declaring `name`.
    fn resolve(&self, scope: ScopeId, name: &str) -> Option<ScopeId> {
        let mut current = Some(scope);
        while let Some(id) = current {
            let frame = self.frame(id);
            if frame.bindings.contains_key(name) {
                return Some(id);
            }
            current = frame.parent;
        }
        None
    }

    /// Look up a variable, searching from `scope` outward.
    pub fn lookup(&self, scope: ScopeId, name: &str) -> EvalResult<Value> {
        self.resolve(scope, name)
            .and_then(|id| self.frame(id).bindings.get(name).copied())
            .ok_or_else(|| EvalError::UnboundVariable(name.to_string()))
    }

    /// Declare `name` in exactly `scope`. Parent scopes are not consulted,
    /// so shadowing an outer binding is allowed.
    pub fn declare(&mut self, scope: ScopeId, name: &str, value: Value) -> EvalResult<()> {
        let depth = self.depth(scope);
        let frame = self.frame_mut(scope);
        if frame.bindings.contains_key(name) {
            return Err(EvalError::DuplicateDeclaration(name.to_string()));
        }
        trace!(name, depth, %value, "declare");
        frame.bindings.insert(name.to_string(), value);
        Ok(())
    }

    /// Overwrite `name` in the nearest scope that declares it.
    pub fn assign(&mut self, scope: ScopeId, name: &str, value: Value) -> EvalResult<()> {
        let target = self
            .resolve(scope, name)
            .ok_or_else(|| EvalError::UnboundVariable(name.to_string()))?;
        trace!(name, depth = self.depth(target), %value, "assign");
        self.frame_mut(target).bindings.insert(name.to_string(), value);
        Ok(())
    }

    /// Open an empty child scope of `scope`.
    pub fn enter_block(&mut self, scope: ScopeId) -> ScopeId {
        let child = ScopeId(self.frames.len());
        self.frames.push(Frame {
            bindings: Bindings::new(),
            parent: Some(scope),
        });
        child
    }

    /// Discard `child` (and anything opened after it) and return its parent.
    ///
    /// The child's bindings are dropped, never merged outward. Exiting the
    /// root is a no-op that returns `None`.
    pub fn exit_block(&mut self, child: ScopeId) -> Option<ScopeId> {
        let parent = self.frame(child).parent?;
        self.frames.truncate(child.0);
        Some(parent)
    }

    /// The parent link of `scope`.
    pub fn parent(&self, scope: ScopeId) -> Option<ScopeId> {
        self.frame(scope).parent
    }

    /// Number of links between `scope` and the root.
    pub fn depth(&self, scope: ScopeId) -> usize {
        std::iter::successors(self.parent(scope), |&id| self.parent(id)).count()
    }

    /// The bindings declared directly in `scope`.
    pub fn bindings(&self, scope: ScopeId) -> &Bindings {
        &self.frame(scope).bindings
    }

    /// Consume the chain, keeping the root scope's bindings.
    pub fn into_root_bindings(mut self) -> Bindings {
        self.frames.truncate(1);
        self.frames.pop().map(|f| f.bindings).unwrap_or_default()
    }
}

impl Default for ScopeChain {
    fn default() -> Self {
        Self::new()
    }
}

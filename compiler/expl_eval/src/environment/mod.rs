//! Lexical frames.
//!
//! An [`Environment`] is a handle to one frame: a name-to-value map plus an
//! optional link to its enclosing frame. Handles are shared, so a closure and
//! the block that created it see the same frame, and a frame lives as long as
//! anything still refers to it.

use std::cell::RefCell;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use expl_ir::Name;

use crate::value::Value;

/// Returned by the assignment operations when no frame binds the name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Undefined;

/// A single-threaded shared cell.
///
/// All frame allocations go through [`LocalScope::new`].
#[repr(transparent)]
pub struct LocalScope<T>(Rc<RefCell<T>>);

impl<T> LocalScope<T> {
    #[inline]
    pub fn new(value: T) -> Self {
        LocalScope(Rc::new(RefCell::new(value)))
    }

    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<T> Clone for LocalScope<T> {
    #[inline]
    fn clone(&self) -> Self {
        LocalScope(Rc::clone(&self.0))
    }
}

impl<T> Deref for LocalScope<T> {
    type Target = RefCell<T>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// One frame's bindings.
struct Scope {
    bindings: FxHashMap<Name, Value>,
    parent: Option<Environment>,
}

/// Handle to a frame and, through it, its chain of ancestors.
#[derive(Clone)]
pub struct Environment(LocalScope<Scope>);

impl Environment {
    /// A root frame with no parent.
    pub fn new() -> Self {
        Environment(LocalScope::new(Scope {
            bindings: FxHashMap::default(),
            parent: None,
        }))
    }

    /// A fresh empty frame whose parent is `self`.
    #[must_use]
    pub fn child(&self) -> Environment {
        Environment(LocalScope::new(Scope {
            bindings: FxHashMap::default(),
            parent: Some(self.clone()),
        }))
    }

    pub fn parent(&self) -> Option<Environment> {
        self.0.borrow().parent.clone()
    }

    /// Bind `name` in this frame, replacing any binding it already has here.
    pub fn put(&self, name: Name, value: Value) {
        self.0.borrow_mut().bindings.insert(name, value);
    }

    /// Nearest binding of `name`, searching outward from this frame.
    pub fn get(&self, name: &str) -> Option<Value> {
        let mut frame = self.clone();
        loop {
            if let Some(value) = frame.0.borrow().bindings.get(name) {
                return Some(value.clone());
            }
            let parent = frame.parent()?;
            frame = parent;
        }
    }

    /// Binding of `name` in the frame exactly `depth` parents up.
    pub fn get_at(&self, depth: usize, name: &str) -> Option<Value> {
        let frame = self.ancestor(depth)?;
        let scope = frame.0.borrow();
        scope.bindings.get(name).cloned()
    }

    /// Rebind the nearest existing binding of `name`.
    pub fn assign(&self, name: &str, value: Value) -> Result<(), Undefined> {
        let mut frame = self.clone();
        loop {
            if let Some(slot) = frame.0.borrow_mut().bindings.get_mut(name) {
                *slot = value;
                return Ok(());
            }
            frame = frame.parent().ok_or(Undefined)?;
        }
    }

    /// Rebind `name` in the frame exactly `depth` parents up.
    pub fn assign_at(&self, depth: usize, name: &str, value: Value) -> Result<(), Undefined> {
        let frame = self.ancestor(depth).ok_or(Undefined)?;
        let mut scope = frame.0.borrow_mut();
        let slot = scope.bindings.get_mut(name).ok_or(Undefined)?;
        *slot = value;
        Ok(())
    }

    /// The frame `depth` parents up; `ancestor(0)` is `self`.
    pub fn ancestor(&self, depth: usize) -> Option<Environment> {
        let mut frame = self.clone();
        for _ in 0..depth {
            frame = frame.parent()?;
        }
        Some(frame)
    }

    /// Number of parents between this frame and the root.
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut frame = self.parent();
        while let Some(current) = frame {
            depth += 1;
            frame = current.parent();
        }
        depth
    }

    /// Names bound directly in this frame, sorted.
    pub fn names(&self) -> Vec<Name> {
        let mut names: Vec<Name> = self.0.borrow().bindings.keys().cloned().collect();
        names.sort();
        names
    }

    /// Snapshot of this frame's bindings, sorted by name.
    pub fn bindings(&self) -> Vec<(Name, Value)> {
        let scope = self.0.borrow();
        let mut bindings: Vec<(Name, Value)> = scope
            .bindings
            .iter()
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();
        bindings.sort_by(|a, b| a.0.cmp(&b.0));
        bindings
    }

    /// This frame and all its ancestors, root first.
    pub fn frames(&self) -> Vec<Environment> {
        let mut frames = vec![self.clone()];
        let mut frame = self.parent();
        while let Some(current) = frame {
            frame = current.parent();
            frames.push(current);
        }
        frames.reverse();
        frames
    }

    /// Whether both handles refer to the same frame.
    pub fn ptr_eq(&self, other: &Environment) -> bool {
        self.0.ptr_eq(&other.0)
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Environment {
    // Only names: values may hold closures that capture this frame.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("depth", &self.depth())
            .field("names", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests;

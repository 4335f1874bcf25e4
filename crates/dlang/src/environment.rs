//! Lexical scope chain
//!
//! Each scope owns its bindings and points at the scope it was created in.
//! Lookups walk outward until the name is found or the chain ends. A
//! function call creates a child of the function's *defining* scope, so
//! free variables resolve lexically rather than through the caller.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::error::EnvironmentError;
use crate::value::{FunctionValue, Value};

/// Bindings in declaration order.
pub type Bindings = IndexMap<String, Value>;

struct Scope {
    bindings: Bindings,
    parent: Option<Environment>,
}

/// A handle to one scope in the chain.
///
/// Cloning the handle shares the scope; it does not copy bindings.
///
/// # Example
///
/// ```
/// use dlang::{Environment, Value};
///
/// let globals = Environment::new();
/// globals.define("x", Value::from(1));
///
/// let call_scope = Environment::new_enclosed(&globals);
/// call_scope.define("y", Value::from(2));
///
/// assert_eq!(call_scope.get("x"), Some(Value::from(1))); // found in parent
/// assert_eq!(globals.get("y"), None); // not visible outward
/// ```
#[derive(Clone)]
pub struct Environment {
    scope: Rc<RefCell<Scope>>,
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment {
    /// Create an empty root scope.
    pub fn new() -> Self {
        Self::with_parent(None)
    }

    /// Create an empty scope enclosed by `parent`.
    pub fn new_enclosed(parent: &Environment) -> Self {
        let env = Self::with_parent(Some(parent.clone()));
        tracing::trace!(depth = env.depth(), "enter scope");
        env
    }

    fn with_parent(parent: Option<Environment>) -> Self {
        Self {
            scope: Rc::new(RefCell::new(Scope {
                bindings: Bindings::new(),
                parent,
            })),
        }
    }

    /// The enclosing scope, if any.
    pub fn parent(&self) -> Option<Environment> {
        self.scope.borrow().parent.clone()
    }

    /// Number of scopes from here to the root, inclusive.
    pub fn depth(&self) -> usize {
        let mut depth = 1;
        let mut current = self.parent();
        while let Some(env) = current {
            depth += 1;
            current = env.parent();
        }
        depth
    }

    /// Check if this is a root scope.
    pub fn is_global_scope(&self) -> bool {
        self.scope.borrow().parent.is_none()
    }

    /// Check if two handles point at the same scope.
    pub fn same_scope(&self, other: &Environment) -> bool {
        Rc::ptr_eq(&self.scope, &other.scope)
    }

    // ═══════════════════════════════════════════════════════════════════
    // Definition and Lookup
    // ═══════════════════════════════════════════════════════════════════

    /// Bind `name` in this scope, replacing any existing binding here.
    pub fn define(&self, name: impl Into<String>, value: Value) {
        self.scope.borrow_mut().bindings.insert(name.into(), value);
    }

    /// Look `name` up through the chain.
    pub fn get(&self, name: &str) -> Option<Value> {
        let scope = self.owning_scope(name)?;
        let value = scope.borrow().bindings.get(name).cloned();
        value
    }

    /// Check if `name` is bound anywhere in the chain.
    pub fn contains(&self, name: &str) -> bool {
        self.owning_scope(name).is_some()
    }

    /// Check if `name` is bound in this scope only.
    pub fn contains_in_current_scope(&self, name: &str) -> bool {
        self.scope.borrow().bindings.contains_key(name)
    }

    /// Rebind `name` in the nearest scope that already binds it.
    ///
    /// # Errors
    ///
    /// `Unbound` if no scope in the chain binds `name`.
    pub fn assign(&self, name: &str, value: Value) -> Result<(), EnvironmentError> {
        match self.owning_scope(name) {
            Some(scope) => {
                scope.borrow_mut().bindings.insert(name.to_string(), value);
                Ok(())
            }
            None => Err(EnvironmentError::Unbound {
                name: name.to_string(),
            }),
        }
    }

    fn owning_scope(&self, name: &str) -> Option<Rc<RefCell<Scope>>> {
        let mut current = Some(Rc::clone(&self.scope));
        while let Some(scope) = current {
            if scope.borrow().bindings.contains_key(name) {
                return Some(scope);
            }
            current = scope
                .borrow()
                .parent
                .as_ref()
                .map(|parent| Rc::clone(&parent.scope));
        }
        None
    }

    // ═══════════════════════════════════════════════════════════════════
    // Inspection
    // ═══════════════════════════════════════════════════════════════════

    /// Names bound in this scope, in declaration order.
    pub fn names_in_current_scope(&self) -> Vec<String> {
        self.scope.borrow().bindings.keys().cloned().collect()
    }

    /// Number of bindings in this scope.
    pub fn len(&self) -> usize {
        self.scope.borrow().bindings.len()
    }

    /// Check if this scope has no bindings.
    pub fn is_empty(&self) -> bool {
        self.scope.borrow().bindings.is_empty()
    }

    /// Copy of this scope's bindings.
    pub fn bindings(&self) -> Bindings {
        self.scope.borrow().bindings.clone()
    }

    /// Move this scope's bindings out, leaving it empty.
    ///
    /// Functions stored in a root scope close over that same scope, so
    /// emptying it is also what releases them.
    pub fn take_bindings(&self) -> Bindings {
        std::mem::take(&mut self.scope.borrow_mut().bindings)
    }

    /// Remove every binding in this scope.
    pub fn clear(&self) {
        self.scope.borrow_mut().bindings.clear();
    }

    /// Empty this scope if nothing outside it can still reach it.
    ///
    /// A function declared here closes over this scope while the scope
    /// binds the function, so the pair keeps itself alive. When this handle
    /// and those functions are the only owners left, the bindings are
    /// dropped to break the cycle. Returns whether the scope was emptied.
    pub fn release_if_unshared(&self) -> bool {
        let self_refs = {
            let scope = self.scope.borrow();
            let mut local: Vec<(&Rc<FunctionValue>, usize)> = Vec::new();
            for value in scope.bindings.values() {
                if let Value::Function(func) = value {
                    if !func.closure.same_scope(self) {
                        continue;
                    }
                    match local.iter_mut().find(|entry| Rc::ptr_eq(entry.0, func)) {
                        Some((_, count)) => *count += 1,
                        None => local.push((func, 1)),
                    }
                }
            }

            // A declared function also held elsewhere has escaped
            if local
                .iter()
                .any(|(func, count)| Rc::strong_count(*func) > *count)
            {
                return false;
            }
            local.len()
        };

        if Rc::strong_count(&self.scope) != 1 + self_refs {
            return false;
        }
        tracing::trace!(depth = self.depth(), "release scope");
        self.clear();
        true
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("depth", &self.depth())
            .field("names", &self.names_in_current_scope())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Block;

    #[test]
    fn test_define_and_get() {
        let env = Environment::new();
        env.define("x", Value::from(42));
        assert_eq!(env.get("x"), Some(Value::from(42)));
        assert_eq!(env.get("y"), None);
    }

    #[test]
    fn test_redefine_rebinds_in_place() {
        let env = Environment::new();
        env.define("a", Value::from(1));
        env.define("b", Value::from(2));
        env.define("a", Value::from(3));
        assert_eq!(env.names_in_current_scope(), vec!["a", "b"]);
        assert_eq!(env.get("a"), Some(Value::from(3)));
    }

    #[test]
    fn test_child_shadows_parent() {
        let root = Environment::new();
        root.define("x", Value::from(1));
        let child = Environment::new_enclosed(&root);
        child.define("x", Value::from(2));

        assert_eq!(child.get("x"), Some(Value::from(2)));
        assert_eq!(root.get("x"), Some(Value::from(1)));
    }

    #[test]
    fn test_assign_updates_owning_scope() {
        let root = Environment::new();
        root.define("count", Value::from(0));
        let child = Environment::new_enclosed(&root);

        child.assign("count", Value::from(5)).unwrap();

        assert!(!child.contains_in_current_scope("count"));
        assert_eq!(root.get("count"), Some(Value::from(5)));
    }

    #[test]
    fn test_assign_unbound_fails() {
        let env = Environment::new();
        let err = env.assign("ghost", Value::Unit).unwrap_err();
        assert_eq!(
            err,
            EnvironmentError::Unbound {
                name: "ghost".to_string()
            }
        );
    }

    #[test]
    fn test_depth() {
        let root = Environment::new();
        let child = Environment::new_enclosed(&root);
        let grandchild = Environment::new_enclosed(&child);
        assert_eq!(root.depth(), 1);
        assert_eq!(grandchild.depth(), 3);
        assert!(root.is_global_scope());
        assert!(!grandchild.is_global_scope());
        assert!(grandchild.parent().unwrap().same_scope(&child));
    }

    #[test]
    fn test_take_bindings_empties_scope() {
        let env = Environment::new();
        env.define("x", Value::from(1));
        let taken = env.take_bindings();
        assert_eq!(taken.get("x"), Some(&Value::from(1)));
        assert!(env.is_empty());
    }

    fn declare_in(env: &Environment, name: &str) {
        let func = FunctionValue::new(name.to_string(), vec![], Block::default(), env.clone());
        env.define(name, Value::function(func));
    }

    #[test]
    fn test_release_breaks_self_cycle() {
        let root = Environment::new();
        let call = Environment::new_enclosed(&root);
        call.define("n", Value::from(1));
        declare_in(&call, "helper");

        let weak = Rc::downgrade(&call.scope);
        assert!(call.release_if_unshared());
        assert!(call.is_empty());

        drop(call);
        assert!(weak.upgrade().is_none());
    }

    #[test]
    fn test_release_keeps_escaped_closure() {
        let root = Environment::new();
        let call = Environment::new_enclosed(&root);
        declare_in(&call, "helper");

        let escaped = call.get("helper").unwrap();
        assert!(!call.release_if_unshared());
        assert!(call.contains_in_current_scope("helper"));
        drop(escaped);
    }

    #[test]
    fn test_release_keeps_scope_with_live_child() {
        let root = Environment::new();
        let call = Environment::new_enclosed(&root);
        call.define("x", Value::from(1));
        let child = Environment::new_enclosed(&call);

        assert!(!call.release_if_unshared());
        assert_eq!(child.get("x"), Some(Value::from(1)));
    }
}

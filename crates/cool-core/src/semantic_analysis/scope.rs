// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Scoped type environments for expression checking.
//!
//! A [`TypeEnvironment`] maps identifiers to their static types across nested
//! scopes: the method level holds `self` and the formals, and every `let`
//! binding and `case` branch pushes a level of its own. Lookup resolves
//! innermost-first, so inner bindings shadow outer ones.

use ecow::EcoString;
use std::collections::HashMap;

/// Tracks identifier types across nested scopes.
#[derive(Debug, Clone)]
pub struct TypeEnvironment {
    /// Stack of scope levels, innermost last.
    levels: Vec<ScopeLevel>,
}

#[derive(Debug, Clone)]
struct ScopeLevel {
    bindings: HashMap<EcoString, EcoString>,
}

impl TypeEnvironment {
    /// Creates an environment with a single base scope.
    #[must_use]
    pub fn new() -> Self {
        Self {
            levels: vec![ScopeLevel {
                bindings: HashMap::new(),
            }],
        }
    }

    /// Enters a new nested scope.
    pub fn push_scope(&mut self) {
        self.levels.push(ScopeLevel {
            bindings: HashMap::new(),
        });
    }

    /// Exits the current scope, dropping its bindings.
    ///
    /// Returns `true` if a scope was popped, `false` if already at the base
    /// level. This method will not panic; popping the base scope is a no-op.
    pub fn pop_scope(&mut self) -> bool {
        if self.levels.len() > 1 {
            self.levels.pop();
            true
        } else {
            false
        }
    }

    /// Binds an identifier to a type in the current scope.
    ///
    /// A binding with the same name already in the current scope is
    /// overwritten; bindings in outer scopes are shadowed, not touched.
    ///
    /// # Panics
    /// Never panics. The `expect` is for internal invariant checking only;
    /// `levels` always contains at least the base scope.
    pub fn define(&mut self, name: impl Into<EcoString>, ty: impl Into<EcoString>) {
        // INVARIANT: levels always contains at least the base scope
        self.levels
            .last_mut()
            .expect("levels should never be empty")
            .bindings
            .insert(name.into(), ty.into());
    }

    /// Looks up an identifier's type, searching from innermost to outermost
    /// scope.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&EcoString> {
        for level in self.levels.iter().rev() {
            if let Some(ty) = level.bindings.get(name) {
                return Some(ty);
            }
        }
        None
    }

    /// Returns the current nesting depth (0 = base scope).
    #[must_use]
    pub fn depth(&self) -> usize {
        self.levels.len() - 1
    }
}

impl Default for TypeEnvironment {
    fn default() -> Self {
        Self::new()
    }
}

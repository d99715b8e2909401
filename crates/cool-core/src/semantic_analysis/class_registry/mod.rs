// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Class registry: every class the checker can see, by name.
//!
//! The registry is built once per program: the five built-ins first, then the
//! user classes in source order. Duplicate names (built-ins included) are
//! rejected at registration and the first definition wins everywhere
//! downstream. After building, the registry is read-only; all inheritance,
//! subtype, and dispatch queries go through it.

use crate::ast::{ClassDef, Program};
use crate::diagnostics::{Diagnostic, DiagnosticKind};
use ecow::EcoString;
use std::collections::{HashMap, HashSet};

mod builtins;

/// Name-to-definition map over built-in and user classes.
///
/// Borrows the user [`ClassDef`]s from the input [`Program`]; the built-in
/// definitions are synthesized and owned here.
#[derive(Debug, Clone)]
pub struct ClassRegistry<'a> {
    builtins: HashMap<EcoString, ClassDef>,
    users: HashMap<EcoString, &'a ClassDef>,
    /// Registration order of user classes, for deterministic iteration.
    user_order: Vec<EcoString>,
}

impl<'a> ClassRegistry<'a> {
    /// Returns true if the given class name is a built-in class.
    #[must_use]
    pub fn is_builtin_class(name: &str) -> bool {
        builtins::is_builtin_class(name)
    }

    /// Returns true if the given class name is a primitive value class
    /// (`Int`, `Bool`, or `String`).
    #[must_use]
    pub fn is_primitive_class(name: &str) -> bool {
        builtins::is_primitive_class(name)
    }

    /// Creates a registry holding only the built-in classes.
    #[must_use]
    pub fn with_builtins() -> Self {
        Self {
            builtins: builtins::builtin_classes(),
            users: HashMap::new(),
            user_order: Vec::new(),
        }
    }

    /// Builds a registry from a parsed program.
    ///
    /// Returns the registry and one [`DiagnosticKind::DuplicateClass`] per
    /// redeclared name; the duplicates themselves are not registered.
    #[must_use]
    pub fn build(program: &'a Program) -> (Self, Vec<Diagnostic>) {
        let mut registry = Self::with_builtins();
        let mut diagnostics = Vec::new();
        for class in &program.classes {
            if let Err(diag) = registry.register(class) {
                diagnostics.push(diag);
            }
        }
        (registry, diagnostics)
    }

    /// Registers a user class.
    ///
    /// Fails with [`DiagnosticKind::DuplicateClass`] if the name is already
    /// taken, whether by a built-in or an earlier user class.
    pub fn register(&mut self, class: &'a ClassDef) -> Result<(), Diagnostic> {
        if self.builtins.contains_key(&class.name) || self.users.contains_key(&class.name) {
            return Err(Diagnostic::in_class(
                class,
                DiagnosticKind::DuplicateClass {
                    name: class.name.clone(),
                },
            ));
        }
        self.users.insert(class.name.clone(), class);
        self.user_order.push(class.name.clone());
        Ok(())
    }

    /// Looks up a class by name.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&ClassDef> {
        self.users
            .get(name)
            .copied()
            .or_else(|| self.builtins.get(name))
    }

    /// Checks whether a class with this name is registered.
    #[must_use]
    pub fn has_class(&self, name: &str) -> bool {
        self.users.contains_key(name) || self.builtins.contains_key(name)
    }

    /// Returns the declared parent of a class.
    ///
    /// `None` both for `Object` (which has no parent) and for names that are
    /// not registered; callers that care about the difference check
    /// [`Self::has_class`] first.
    #[must_use]
    pub fn parent_of(&self, name: &str) -> Option<&EcoString> {
        self.lookup(name).and_then(|class| class.parent.as_ref())
    }

    /// Returns the ordered ancestor chain for a class, excluding the class
    /// itself.
    ///
    /// Example: `superclass_chain("Int")` → `["Object"]`.
    ///
    /// The walk stops at `Object`, at the first unregistered name, and on
    /// revisiting a class, so it terminates even on a cyclic graph.
    #[must_use]
    pub fn superclass_chain(&self, class_name: &str) -> Vec<EcoString> {
        let mut chain = Vec::new();
        let mut current = EcoString::from(class_name);
        let mut visited = HashSet::new();
        visited.insert(current.clone());

        loop {
            let Some(parent) = self.parent_of(&current) else {
                break;
            };
            if !visited.insert(parent.clone()) {
                break; // Cycle detected
            }
            chain.push(parent.clone());
            current = parent.clone();
        }

        chain
    }

    /// Iterates the registered user classes in registration order.
    pub fn user_classes(&self) -> impl Iterator<Item = &'a ClassDef> + '_ {
        self.user_order
            .iter()
            .filter_map(|name| self.users.get(name).copied())
    }

    /// Iterates every registered class name, built-ins included.
    ///
    /// Order is unspecified; use [`Self::user_classes`] for deterministic
    /// iteration.
    pub fn class_names(&self) -> impl Iterator<Item = &EcoString> {
        self.builtins.keys().chain(self.users.keys())
    }
}

impl Default for ClassRegistry<'_> {
    fn default() -> Self {
        Self::with_builtins()
    }
}

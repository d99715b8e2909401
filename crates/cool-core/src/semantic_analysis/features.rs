// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Method lookup and override compatibility across the inheritance chain.
//!
//! Lookup resolves to the nearest definition, walking from the dispatching
//! class towards the root. Override checking compares a redefinition against
//! that nearest inherited signature only; an override that matches its direct
//! ancestor is accepted even if some further ancestor disagrees.

use std::collections::HashSet;

use ecow::EcoString;

use super::class_registry::ClassRegistry;
use crate::ast::{ClassDef, MethodDef};
use crate::diagnostics::{Diagnostic, DiagnosticKind, OverrideMismatch};

/// Resolves `method_name` on `class_name`, searching the class itself and
/// then each ancestor in turn.
///
/// Returns `None` when the method is nowhere on the chain, when `class_name`
/// itself is unknown, or when the chain runs into an unregistered ancestor
/// or a cycle before a definition is found.
#[must_use]
pub fn find_method<'r>(
    registry: &'r ClassRegistry<'_>,
    class_name: &str,
    method_name: &str,
) -> Option<&'r MethodDef> {
    let mut visited = HashSet::new();
    visited.insert(EcoString::from(class_name));

    let mut current = EcoString::from(class_name);
    loop {
        let class = registry.lookup(&current)?;
        if let Some(method) = class.methods().find(|m| m.name == method_name) {
            return Some(method);
        }
        let parent = class.parent.as_ref()?;
        if !visited.insert(parent.clone()) {
            // Cycle detected.
            return None;
        }
        current = parent.clone();
    }
}

/// Checks every method of `class` that redefines an inherited one.
///
/// The inherited signature is the nearest one in the ancestor chain. A
/// redefinition must keep the exact arity, parameter types, and return type;
/// the first mismatch in that order is reported, one diagnostic per method.
#[must_use]
pub fn check_overrides(registry: &ClassRegistry<'_>, class: &ClassDef) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    let Some(parent) = &class.parent else {
        return diagnostics;
    };

    for method in class.methods() {
        let Some(inherited) = find_method(registry, parent, &method.name) else {
            continue;
        };

        let mismatch = if method.formals.len() != inherited.formals.len() {
            Some(OverrideMismatch::Arity)
        } else if method
            .formals
            .iter()
            .zip(&inherited.formals)
            .any(|(ours, theirs)| ours.declared_type != theirs.declared_type)
        {
            Some(OverrideMismatch::ParameterTypes)
        } else if method.return_type != inherited.return_type {
            Some(OverrideMismatch::ReturnType)
        } else {
            None
        };

        if let Some(mismatch) = mismatch {
            diagnostics.push(Diagnostic::in_class(
                class,
                DiagnosticKind::IncompatibleOverride {
                    method: method.name.clone(),
                    mismatch,
                },
            ));
        }
    }

    diagnostics
}

// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Conformance and least-upper-bound queries over registered class types.
//!
//! Both operations treat `SELF_TYPE` and the internal bottom type specially,
//! and both stay total on malformed hierarchies: chain walks carry a visited
//! set and fail closed instead of looping.

use std::collections::HashSet;

use ecow::EcoString;

use super::class_registry::ClassRegistry;
use crate::ast;

/// Returns `true` when `child` conforms to `parent`.
///
/// The rules apply in order: every type conforms to itself; `SELF_TYPE`
/// conforms to every type but only `SELF_TYPE` conforms to it; the bottom
/// type conforms to every class type; otherwise `child`'s superclass chain
/// must reach `parent`. A chain that runs into an unknown class or a cycle
/// answers `false`.
#[must_use]
pub fn is_subtype(registry: &ClassRegistry<'_>, child: &str, parent: &str) -> bool {
    if child == parent {
        return true;
    }
    if child == ast::SELF_TYPE {
        return true;
    }
    if parent == ast::SELF_TYPE {
        return false;
    }
    if child == ast::NO_TYPE {
        return true;
    }

    let mut visited = HashSet::new();
    visited.insert(EcoString::from(child));

    let mut current = EcoString::from(child);
    loop {
        let Some(next) = registry.parent_of(&current) else {
            // Ran off the top of the chain without meeting `parent`.
            return false;
        };
        if next.as_str() == parent {
            return true;
        }
        // A declared parent of `SELF_TYPE` (or the bottom marker) subsumes anything.
        if matches!(next.as_str(), ast::SELF_TYPE | ast::NO_TYPE) {
            return true;
        }
        if !visited.insert(next.clone()) {
            // Cycle detected.
            return false;
        }
        current = next.clone();
    }
}

/// Computes the least upper bound (join) of two types.
///
/// The join of a type with itself is that type, and the bottom type is the
/// identity element. Joining `SELF_TYPE` with any other type generalises to
/// `Object`. For two registered classes the result is the nearest common
/// ancestor; anything unresolvable falls back to `Object`.
#[must_use]
pub fn lub(registry: &ClassRegistry<'_>, t1: &str, t2: &str) -> EcoString {
    if t1 == t2 {
        return t1.into();
    }
    if t1 == ast::NO_TYPE {
        return t2.into();
    }
    if t2 == ast::NO_TYPE {
        return t1.into();
    }
    if t1 == ast::SELF_TYPE || t2 == ast::SELF_TYPE {
        return ast::OBJECT.into();
    }
    if is_subtype(registry, t1, t2) {
        return t2.into();
    }
    if is_subtype(registry, t2, t1) {
        return t1.into();
    }
    if !registry.has_class(t1) || !registry.has_class(t2) {
        return ast::OBJECT.into();
    }

    let mut reachable_from_t2 = vec![EcoString::from(t2)];
    reachable_from_t2.extend(registry.superclass_chain(t2));

    // Nearest ancestor of t1 (itself included) that t2 can also reach.
    std::iter::once(EcoString::from(t1))
        .chain(registry.superclass_chain(t1))
        .find(|candidate| reachable_from_t2.contains(candidate))
        .unwrap_or_else(|| ast::OBJECT.into())
}

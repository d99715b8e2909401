// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Inheritance validation over a populated class registry.
//!
//! Two independent passes run over the user-defined classes: one rejects
//! classes whose declared parent is a primitive class or `SELF_TYPE`, the
//! other reports classes whose parent chain loops back on itself. The passes
//! do not short-circuit each other, so a program with both problems reports
//! both. A parent name that is not defined anywhere stops the cycle walk
//! without a report.

use std::collections::HashSet;

use ecow::EcoString;

use super::class_registry::ClassRegistry;
use crate::ast;
use crate::diagnostics::{Diagnostic, DiagnosticKind};

/// Validates the parent declarations of every user-defined class.
///
/// Emits one [`DiagnosticKind::IllegalInheritance`] per class that extends a
/// primitive class or `SELF_TYPE`, then one [`DiagnosticKind::InheritanceCycle`]
/// per class that can reach an already-seen class by following parent links.
/// Classes that merely inherit *through* a cycle are reported too; each class
/// is reported at most once.
#[must_use]
pub fn validate_inheritance(registry: &ClassRegistry<'_>) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    for class in registry.user_classes() {
        if let Some(parent) = &class.parent {
            let parent_is_primitive = ClassRegistry::is_primitive_class(parent);
            if parent_is_primitive || parent.as_str() == ast::SELF_TYPE {
                let mut diagnostic = Diagnostic::in_class(
                    class,
                    DiagnosticKind::IllegalInheritance {
                        class: class.name.clone(),
                        parent: parent.clone(),
                    },
                );
                if parent_is_primitive {
                    diagnostic =
                        diagnostic.with_hint("`Int`, `Bool`, and `String` cannot be extended");
                }
                diagnostics.push(diagnostic);
            }
        }
    }

    for class in registry.user_classes() {
        if walks_into_cycle(registry, &class.name) {
            diagnostics.push(Diagnostic::in_class(
                class,
                DiagnosticKind::InheritanceCycle {
                    class: class.name.clone(),
                },
            ));
        }
    }

    diagnostics
}

/// Follows parent links from `start` until a root, an unknown class, or a
/// repeated class is found. A repeat means `start` sits on or below a cycle.
fn walks_into_cycle(registry: &ClassRegistry<'_>, start: &str) -> bool {
    let mut visited = HashSet::new();
    visited.insert(EcoString::from(start));

    let mut current = EcoString::from(start);
    loop {
        let Some(parent) = registry.parent_of(&current) else {
            // Reached a root, or the chain left the registry.
            return false;
        };
        if !visited.insert(parent.clone()) {
            return true;
        }
        current = parent.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::ClassDef;

    fn make_class(name: &str, parent: Option<&str>) -> ClassDef {
        ClassDef {
            name: name.into(),
            parent: parent.map(EcoString::from),
            features: Vec::new(),
            filename: "test.cl".into(),
            line: 1,
        }
    }

    fn registry_over(classes: &[ClassDef]) -> ClassRegistry<'_> {
        let mut registry = ClassRegistry::with_builtins();
        for class in classes {
            registry.register(class).unwrap();
        }
        registry
    }

    // --- Restricted parents ---

    #[test]
    fn extending_each_primitive_class_is_rejected() {
        for primitive in ["Int", "Bool", "String"] {
            let classes = vec![make_class("Sub", Some(primitive))];
            let registry = registry_over(&classes);

            let diagnostics = validate_inheritance(&registry);
            assert_eq!(diagnostics.len(), 1, "extending {primitive}");
            assert!(matches!(
                diagnostics[0].kind,
                DiagnosticKind::IllegalInheritance { .. }
            ));
            assert!(diagnostics[0].hint.is_some());
        }
    }

    #[test]
    fn extending_self_type_is_rejected_without_a_cycle_report() {
        let classes = vec![make_class("Selfish", Some("SELF_TYPE"))];
        let registry = registry_over(&classes);

        let diagnostics = validate_inheritance(&registry);
        assert_eq!(diagnostics.len(), 1);
        assert!(matches!(
            diagnostics[0].kind,
            DiagnosticKind::IllegalInheritance { .. }
        ));
        assert!(diagnostics[0].hint.is_none());
    }

    #[test]
    fn object_io_and_user_parents_are_allowed() {
        let classes = vec![
            make_class("A", Some("Object")),
            make_class("B", Some("IO")),
            make_class("C", Some("A")),
        ];
        let registry = registry_over(&classes);

        assert!(validate_inheritance(&registry).is_empty());
    }

    // --- Cycles ---

    #[test]
    fn self_inheritance_reports_a_cycle() {
        let classes = vec![make_class("Loop", Some("Loop"))];
        let registry = registry_over(&classes);

        let diagnostics = validate_inheritance(&registry);
        assert_eq!(diagnostics.len(), 1);
        assert!(matches!(
            &diagnostics[0].kind,
            DiagnosticKind::InheritanceCycle { class } if class == "Loop"
        ));
    }

    #[test]
    fn three_class_cycle_reports_every_member() {
        let classes = vec![
            make_class("A", Some("B")),
            make_class("B", Some("C")),
            make_class("C", Some("A")),
        ];
        let registry = registry_over(&classes);

        let diagnostics = validate_inheritance(&registry);
        let cycled: Vec<_> = diagnostics
            .iter()
            .filter_map(|d| match &d.kind {
                DiagnosticKind::InheritanceCycle { class } => Some(class.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(cycled, ["A", "B", "C"]);
    }

    #[test]
    fn descendant_of_a_cycle_is_reported() {
        let classes = vec![
            make_class("A", Some("B")),
            make_class("B", Some("A")),
            make_class("D", Some("A")),
        ];
        let registry = registry_over(&classes);

        let diagnostics = validate_inheritance(&registry);
        let cycled: Vec<_> = diagnostics
            .iter()
            .filter_map(|d| match &d.kind {
                DiagnosticKind::InheritanceCycle { class } => Some(class.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(cycled, ["A", "B", "D"]);
    }

    #[test]
    fn unknown_ancestors_stop_the_walk_silently() {
        // Orphan's parent is never defined; B reaches the gap one hop later.
        let classes = vec![
            make_class("Orphan", Some("Missing")),
            make_class("B", Some("Orphan")),
        ];
        let registry = registry_over(&classes);

        assert!(validate_inheritance(&registry).is_empty());
    }

    #[test]
    fn restricted_parent_and_cycle_are_reported_together() {
        let classes = vec![
            make_class("BadString", Some("String")),
            make_class("Loop", Some("Loop")),
        ];
        let registry = registry_over(&classes);

        let diagnostics = validate_inheritance(&registry);
        assert_eq!(diagnostics.len(), 2);
        assert!(matches!(
            diagnostics[0].kind,
            DiagnosticKind::IllegalInheritance { .. }
        ));
        assert!(matches!(
            diagnostics[1].kind,
            DiagnosticKind::InheritanceCycle { .. }
        ));
    }

    #[test]
    fn diagnostics_carry_the_offending_class_position() {
        let bad = ClassDef {
            name: "BadInt".into(),
            parent: Some("Int".into()),
            features: Vec::new(),
            filename: "bad.cl".into(),
            line: 7,
        };
        let classes = vec![bad];
        let registry = registry_over(&classes);

        let diagnostics = validate_inheritance(&registry);
        assert_eq!(diagnostics[0].filename, "bad.cl");
        assert_eq!(diagnostics[0].line, 7);
        assert_eq!(diagnostics[0].class_context.as_deref(), Some("BadInt"));
    }
}

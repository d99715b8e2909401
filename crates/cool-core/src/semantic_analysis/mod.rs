// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Semantic analysis for Cool programs.
//!
//! Analysis runs in phases over a parsed [`Program`]: class registration,
//! inheritance validation, then per-class feature and expression checks.
//! Every phase appends to a single diagnostics list and checking always
//! continues past individual errors, with one exception: a cyclic hierarchy
//! halts the per-class phase, because every walk over a parent chain would
//! be meaningless inside a cycle.

pub mod class_registry;
pub mod features;
pub mod inheritance;
pub mod scope;
pub mod subtype;
pub mod type_checker;

#[cfg(test)]
mod property_tests;

pub use class_registry::ClassRegistry;
pub use inheritance::validate_inheritance;
pub use scope::TypeEnvironment;
pub use subtype::{is_subtype, lub};
pub use type_checker::CheckContext;

use crate::ast::{ClassDef, Program};
use crate::diagnostics::{Diagnostic, DiagnosticKind};

/// The outcome of analysing one program.
#[derive(Debug, Clone, Default)]
pub struct AnalysisResult {
    /// Every diagnostic produced, in phase order then source order.
    pub diagnostics: Vec<Diagnostic>,
}

impl AnalysisResult {
    /// An empty result, equivalent to analysing an empty program.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A program is accepted only when analysis produced no diagnostics.
    #[must_use]
    pub fn is_well_typed(&self) -> bool {
        self.diagnostics.is_empty()
    }

    #[must_use]
    pub fn error_count(&self) -> usize {
        self.diagnostics.len()
    }
}

/// Runs the full analysis pipeline over a parsed program.
///
/// # Examples
///
/// ```
/// use cool_core::ast::Program;
/// use cool_core::semantic_analysis::check_program;
///
/// let source = r#"{
///     "classes": [{
///         "name": "Main",
///         "parent": "Object",
///         "filename": "main.cl",
///         "line": 1,
///         "features": [{
///             "feature": "method",
///             "name": "main",
///             "formals": [],
///             "return_type": "Int",
///             "body": { "expr": "int_literal", "value": 0, "line": 2 }
///         }]
///     }]
/// }"#;
/// let program: Program = serde_json::from_str(source).unwrap();
/// assert!(check_program(&program).is_well_typed());
/// ```
#[must_use]
pub fn check_program(program: &Program) -> AnalysisResult {
    let (registry, mut diagnostics) = ClassRegistry::build(program);
    diagnostics.extend(validate_inheritance(&registry));

    // Parent-chain walks are unreliable inside a cycle, so the per-class
    // phase only runs on an acyclic hierarchy. Everything reported so far
    // still surfaces.
    let has_cycle = diagnostics
        .iter()
        .any(|diagnostic| matches!(diagnostic.kind, DiagnosticKind::InheritanceCycle { .. }));
    if !has_cycle {
        let classes: Vec<&ClassDef> = registry.user_classes().collect();
        let mut context = CheckContext::new(registry);
        for class in classes {
            context.check_class(class);
        }
        diagnostics.extend(context.into_diagnostics());
    }

    AnalysisResult { diagnostics }
}

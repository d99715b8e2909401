// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Beautiful error diagnostics using miette.
//!
//! Converts cool-core diagnostics into miette-formatted errors. Semantic
//! findings point into the original Cool source by file and line, not into
//! the JSON document the checker actually reads, so they render as located
//! messages with optional help text rather than annotated source snippets.

use cool_core::diagnostics::Diagnostic as CoreDiagnostic;
use miette::Diagnostic;

/// A semantic finding with rich formatting.
#[derive(Debug, Diagnostic, thiserror::Error)]
#[error("{message}")]
#[diagnostic(code(cool::semantic))]
pub struct CheckDiagnostic {
    /// Rendered location and message, e.g. ``main.cl:4: type `A` does not …``.
    pub message: String,
    /// Optional guidance shown beneath the error.
    #[help]
    pub hint: Option<String>,
}

impl CheckDiagnostic {
    /// Create a new diagnostic from a cool-core diagnostic.
    pub fn from_core_diagnostic(diagnostic: &CoreDiagnostic) -> Self {
        Self {
            message: diagnostic.to_string(),
            hint: diagnostic.hint.as_ref().map(ToString::to_string),
        }
    }
}

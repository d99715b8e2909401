// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Cool compiler core.
//!
//! This crate contains the analysis half of a Cool compiler:
//! - AST types for parsed programs (the frontend contract)
//! - Class registration and inheritance validation
//! - Type conformance and least-upper-bound computation
//! - Expression and feature type checking
//!
//! Analysis is diagnostic-oriented: every violation is collected rather
//! than failing fast, so a single run reports everything wrong with a
//! program.

#![doc = include_str!("../../../README.md")]

pub mod ast;
pub mod diagnostics;
pub mod semantic_analysis;

/// Re-export commonly used types.
pub mod prelude {
    pub use crate::ast::{ClassDef, Expression, Program};
    pub use crate::diagnostics::{Diagnostic, DiagnosticKind};
    pub use crate::semantic_analysis::{AnalysisResult, check_program};
}

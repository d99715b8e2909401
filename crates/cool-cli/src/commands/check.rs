// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Check parsed Cool programs for semantic errors.

use std::io::Read;

use camino::Utf8Path;
use cool_core::ast::Program;
use cool_core::semantic_analysis::check_program;
use miette::{Context, IntoDiagnostic, Result};
use tracing::{debug, info, instrument};

use crate::diagnostic::CheckDiagnostic;

/// Type-check a parsed program.
///
/// Reads a JSON-serialised program (the frontend's output) from `path`, or
/// from standard input when `path` is `-`, runs semantic analysis, and
/// reports every finding on stderr. Succeeds only when the program is
/// well-typed.
#[instrument(skip_all, fields(path = %path))]
pub fn check(path: &str) -> Result<()> {
    let source = read_program_source(path)?;
    let program: Program = serde_json::from_str(&source)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to parse program from '{path}'"))?;

    info!(classes = program.classes.len(), "Checking program");
    let result = check_program(&program);

    if result.is_well_typed() {
        debug!("Program accepted");
        return Ok(());
    }

    for diagnostic in &result.diagnostics {
        let report = miette::Report::new(CheckDiagnostic::from_core_diagnostic(diagnostic));
        eprintln!("{report:?}");
    }

    let count = result.error_count();
    if count == 1 {
        miette::bail!("1 semantic error");
    }
    miette::bail!("{count} semantic errors");
}

/// Read program JSON from a file, or from stdin when `path` is `-`.
fn read_program_source(path: &str) -> Result<String> {
    if path == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .into_diagnostic()
            .wrap_err("Failed to read program from stdin")?;
        return Ok(buffer);
    }

    let path = Utf8Path::new(path);
    std::fs::read_to_string(path)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to read '{path}'"))
}

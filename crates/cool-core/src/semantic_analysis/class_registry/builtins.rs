// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Built-in class definitions for the class registry.
//!
//! The five basic classes (`Object`, `IO`, `Int`, `Bool`, `String`) are
//! registered before any user-defined class. They are synthesized with empty
//! feature lists: their methods live in the runtime, so dispatch checking
//! treats them as opaque.

use crate::ast::{self, ClassDef};
use ecow::EcoString;
use std::collections::HashMap;

/// Source file name attached to synthesized built-in definitions.
const BUILTIN_FILENAME: &str = "<builtin>";

/// Returns all built-in class definitions.
///
/// `Object` is the only parentless class; the other four extend it directly.
pub(super) fn builtin_classes() -> HashMap<EcoString, ClassDef> {
    let mut classes = HashMap::new();
    for (name, parent) in [
        (ast::OBJECT, None),
        (ast::IO, Some(ast::OBJECT)),
        (ast::INT, Some(ast::OBJECT)),
        (ast::BOOL, Some(ast::OBJECT)),
        (ast::STRING, Some(ast::OBJECT)),
    ] {
        classes.insert(
            name.into(),
            ClassDef {
                name: name.into(),
                parent: parent.map(EcoString::from),
                features: vec![],
                filename: BUILTIN_FILENAME.into(),
                line: 0,
            },
        );
    }
    classes
}

/// Returns true if the given class name is a built-in class.
pub(super) fn is_builtin_class(name: &str) -> bool {
    matches!(
        name,
        ast::OBJECT | ast::IO | ast::INT | ast::BOOL | ast::STRING
    )
}

/// Returns true if the given class name is a primitive value class.
///
/// Primitives cannot be inherited from, and equality tests on them only
/// accept an operand of the same type.
pub(super) fn is_primitive_class(name: &str) -> bool {
    matches!(name, ast::INT | ast::BOOL | ast::STRING)
}

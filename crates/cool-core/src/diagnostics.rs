// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Semantic diagnostics for Cool programs.
//!
//! Every finding the analyzer can produce is a [`DiagnosticKind`] variant;
//! a [`Diagnostic`] pairs a kind with the source coordinates the parser
//! recorded. Findings about a declaration rather than an expression (illegal
//! inheritance, bad overrides, attribute and return-type violations) also
//! name the class they were found in.
//!
//! A program is well-typed exactly when analysis produces no diagnostics.

use std::fmt;

use ecow::EcoString;
use thiserror::Error;

use crate::ast::ClassDef;

/// A semantic error discovered during analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// What went wrong.
    pub kind: DiagnosticKind,
    /// Source file the finding points into.
    pub filename: EcoString,
    /// Source line of the offending node or declaration.
    pub line: u32,
    /// Name of the class the finding is attributed to, for declaration-level
    /// findings.
    pub class_context: Option<EcoString>,
    /// Optional hint for how to fix the issue.
    pub hint: Option<EcoString>,
}

impl Diagnostic {
    /// Creates a diagnostic at an expression's source position.
    #[must_use]
    pub fn at(filename: impl Into<EcoString>, line: u32, kind: DiagnosticKind) -> Self {
        Self {
            kind,
            filename: filename.into(),
            line,
            class_context: None,
            hint: None,
        }
    }

    /// Creates a diagnostic attributed to a class declaration.
    #[must_use]
    pub fn in_class(class: &ClassDef, kind: DiagnosticKind) -> Self {
        Self {
            kind,
            filename: class.filename.clone(),
            line: class.line,
            class_context: Some(class.name.clone()),
            hint: None,
        }
    }

    /// Attaches a fix-it hint.
    #[must_use]
    pub fn with_hint(mut self, hint: impl Into<EcoString>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: ", self.filename, self.line)?;
        if let Some(class) = &self.class_context {
            write!(f, "in class `{class}`: ")?;
        }
        write!(f, "{}", self.kind)
    }
}

/// The kinds of semantic errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiagnosticKind {
    /// A class name was declared more than once (built-ins included).
    #[error("class `{name}` was previously defined")]
    DuplicateClass {
        /// The redeclared class name.
        name: EcoString,
    },

    /// A class inherits from a primitive class or from `SELF_TYPE`.
    #[error("class `{class}` cannot inherit from `{parent}`")]
    IllegalInheritance {
        /// The inheriting class.
        class: EcoString,
        /// The forbidden parent.
        parent: EcoString,
    },

    /// A class participates in an inheritance cycle.
    #[error("class `{class}` is involved in an inheritance cycle")]
    InheritanceCycle {
        /// The class whose ancestor walk revisited a class.
        class: EcoString,
    },

    /// A method redefinition is incompatible with the inherited signature.
    #[error("method `{method}` overrides an inherited method with a different {mismatch}")]
    IncompatibleOverride {
        /// The overriding method.
        method: EcoString,
        /// Which part of the signature differs.
        mismatch: OverrideMismatch,
    },

    /// An identifier was referenced or assigned without a binding in scope.
    #[error("undeclared identifier `{name}`")]
    UndefinedVariable {
        /// The unresolved identifier.
        name: EcoString,
    },

    /// A dispatch named a method no class in the receiver's chain declares.
    #[error("dispatch to undefined method `{method}`")]
    UndefinedMethod {
        /// The unresolved method name.
        method: EcoString,
    },

    /// `new` named a class that is not defined.
    #[error("`new` used with undefined class `{name}`")]
    UndefinedType {
        /// The unresolved class name.
        name: EcoString,
    },

    /// An expression's type does not conform to the required type.
    #[error("type `{found}` does not conform to type `{expected}`")]
    TypeMismatch {
        /// The type the expression actually has.
        found: EcoString,
        /// The type the context requires.
        expected: EcoString,
    },

    /// A dispatch supplied the wrong number of arguments.
    #[error("method `{method}` called with {found} arguments but declares {expected}")]
    ArgCountMismatch {
        /// The dispatched method.
        method: EcoString,
        /// Arity of the declaration.
        expected: usize,
        /// Number of actuals at the call site.
        found: usize,
    },

    /// A dispatch argument does not conform to the formal parameter's type.
    #[error("actual argument type `{found}` does not conform to formal type `{expected}`")]
    ArgTypeMismatch {
        /// The actual argument's type.
        found: EcoString,
        /// The declared formal type.
        expected: EcoString,
    },

    /// An `if` or `while` condition is not `Bool`.
    #[error("condition of `{construct}` is not `Bool`")]
    NonBooleanPredicate {
        /// Which construct, `if` or `while`.
        construct: EcoString,
    },

    /// `SELF_TYPE` appeared as a declared type where it is not allowed.
    #[error("`SELF_TYPE` cannot be the declared type of {position} `{name}`")]
    IllegalSelfType {
        /// The declared identifier.
        name: EcoString,
        /// Where the declaration appeared.
        position: SelfTypePosition,
    },

    /// Two branches of a `case` declare the same type.
    #[error("duplicate branch type `{branch_type}` in case expression")]
    DuplicateBranchType {
        /// The repeated declared type.
        branch_type: EcoString,
    },

    /// An arithmetic operator was applied to non-`Int` operands.
    #[error("arithmetic on non-`Int` operands: `{left}` and `{right}`")]
    ArithmeticTypeError {
        /// Left operand type.
        left: EcoString,
        /// Right operand type.
        right: EcoString,
    },

    /// An ordering comparison was applied to non-`Int` operands.
    #[error("comparison on non-`Int` operands: `{left}` and `{right}`")]
    ComparisonTypeError {
        /// Left operand type.
        left: EcoString,
        /// Right operand type.
        right: EcoString,
    },

    /// An equality test mixed a primitive type with a different type.
    #[error("illegal comparison between `{left}` and `{right}`")]
    IncomparableTypes {
        /// Left operand type.
        left: EcoString,
        /// Right operand type.
        right: EcoString,
    },

    /// A method body's type does not conform to the declared return type.
    #[error("method `{method}` returns `{found}` but is declared to return `{declared}`")]
    ReturnTypeMismatch {
        /// The offending method.
        method: EcoString,
        /// The declared return type.
        declared: EcoString,
        /// The body's inferred type.
        found: EcoString,
    },
}

/// Which part of an overriding method's signature differs from the
/// inherited one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverrideMismatch {
    /// Different number of formal parameters.
    Arity,
    /// Same arity but differing formal parameter types.
    ParameterTypes,
    /// Differing declared return type.
    ReturnType,
}

impl fmt::Display for OverrideMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Arity => f.write_str("number of parameters"),
            Self::ParameterTypes => f.write_str("parameter list"),
            Self::ReturnType => f.write_str("return type"),
        }
    }
}

/// Where a forbidden `SELF_TYPE` declaration appeared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelfTypePosition {
    /// The declared type of a `let` binding.
    Let,
    /// The declared type of a class attribute.
    Attribute,
}

impl fmt::Display for SelfTypePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Let => f.write_str("let-bound identifier"),
            Self::Attribute => f.write_str("attribute"),
        }
    }
}

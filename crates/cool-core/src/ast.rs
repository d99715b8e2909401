// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Abstract Syntax Tree (AST) definitions for Cool.
//!
//! The AST represents the structure of a Cool program after parsing: a set of
//! classes, each holding attribute and method features, with expression trees
//! for initializers and method bodies. Every expression node carries the
//! source line it came from, and every class records its source file, so
//! diagnostics can point at real locations.
//!
//! The tree doubles as the wire format between the parser and the semantic
//! analyzer: all node types derive `Serialize`/`Deserialize`, and the parser
//! hands over one JSON document per program. Expression objects are tagged by
//! an `"expr"` field naming the variant in snake_case.
//!
//! # Example
//!
//! ```ignore
//! // Source: class Main { main() : Int { 1 + 2 } };
//! Program {
//!     classes: vec![ClassDef {
//!         name: "Main".into(),
//!         parent: Some("Object".into()),
//!         features: vec![Feature::Method(MethodDef {
//!             name: "main".into(),
//!             formals: vec![],
//!             return_type: "Int".into(),
//!             body: Expression::Arithmetic {
//!                 op: ArithmeticOp::Add,
//!                 left: Box::new(Expression::IntLiteral { value: 1, line: 1 }),
//!                 right: Box::new(Expression::IntLiteral { value: 2, line: 1 }),
//!                 line: 1,
//!             },
//!         })],
//!         filename: "main.cl".into(),
//!         line: 1,
//!     }],
//! }
//! ```

use ecow::EcoString;
use serde::{Deserialize, Serialize};

/// Name of the root class; every inheritance chain ends here.
pub const OBJECT: &str = "Object";
/// Name of the built-in I/O class.
pub const IO: &str = "IO";
/// Name of the built-in integer class.
pub const INT: &str = "Int";
/// Name of the built-in boolean class.
pub const BOOL: &str = "Bool";
/// Name of the built-in string class.
pub const STRING: &str = "String";
/// The "exact runtime class of the current instance" type marker.
pub const SELF_TYPE: &str = "SELF_TYPE";
/// Bottom type of valueless control flow (e.g. an empty block).
/// Subtype of every type; never written by programs.
pub const NO_TYPE: &str = "_no_type";
/// The receiver identifier implicitly bound in every method body.
pub const SELF: &str = "self";

/// Top-level container for a parsed Cool program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Program {
    /// The classes of the program, in source order.
    pub classes: Vec<ClassDef>,
}

/// A class declaration.
///
/// The parser fills in `parent` with `Object` when the source has no
/// `inherits` clause; only the synthesized `Object` built-in is parentless.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClassDef {
    /// The class name.
    pub name: EcoString,
    /// The declared superclass name.
    #[serde(default = "default_parent")]
    pub parent: Option<EcoString>,
    /// Attributes and methods, in declaration order.
    #[serde(default)]
    pub features: Vec<Feature>,
    /// Source file the class was parsed from.
    pub filename: EcoString,
    /// Line of the `class` keyword.
    pub line: u32,
}

fn default_parent() -> Option<EcoString> {
    Some(OBJECT.into())
}

impl ClassDef {
    /// Iterates the methods declared directly in this class.
    pub fn methods(&self) -> impl Iterator<Item = &MethodDef> {
        self.features.iter().filter_map(|f| match f {
            Feature::Method(m) => Some(m),
            Feature::Attribute(_) => None,
        })
    }

    /// Iterates the attributes declared directly in this class.
    pub fn attributes(&self) -> impl Iterator<Item = &AttributeDef> {
        self.features.iter().filter_map(|f| match f {
            Feature::Attribute(a) => Some(a),
            Feature::Method(_) => None,
        })
    }
}

/// A feature declared directly in a class body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "feature", rename_all = "snake_case")]
pub enum Feature {
    /// An attribute (instance variable) declaration.
    Attribute(AttributeDef),
    /// A method declaration.
    Method(MethodDef),
}

/// An attribute declaration: `name : Type [<- initializer]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeDef {
    /// The attribute name.
    pub name: EcoString,
    /// The declared type.
    pub declared_type: EcoString,
    /// The optional initializer expression.
    #[serde(default)]
    pub initializer: Option<Expression>,
}

/// A method declaration: `name(formals) : ReturnType { body }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDef {
    /// The method name.
    pub name: EcoString,
    /// The formal parameters, in declaration order.
    #[serde(default)]
    pub formals: Vec<Formal>,
    /// The declared return type (may be `SELF_TYPE`).
    pub return_type: EcoString,
    /// The method body expression.
    pub body: Expression,
}

/// A formal parameter of a method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Formal {
    /// The parameter name.
    pub name: EcoString,
    /// The declared parameter type.
    pub declared_type: EcoString,
}

/// A Cool expression.
///
/// The enum is closed: the semantic analyzer matches exhaustively, so a new
/// expression form is a compile error in every consumer until handled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "expr", rename_all = "snake_case")]
pub enum Expression {
    /// An integer literal, e.g. `42`.
    IntLiteral {
        /// The literal value.
        value: i64,
        /// Source line.
        line: u32,
    },

    /// A boolean literal, `true` or `false`.
    BoolLiteral {
        /// The literal value.
        value: bool,
        /// Source line.
        line: u32,
    },

    /// A string literal, e.g. `"hello"`.
    StringLiteral {
        /// The literal value (unescaped).
        value: EcoString,
        /// Source line.
        line: u32,
    },

    /// An identifier reference (variable, formal, or `self`).
    Identifier {
        /// The identifier name.
        name: EcoString,
        /// Source line.
        line: u32,
    },

    /// An assignment: `target <- value`.
    Assignment {
        /// The identifier being assigned to.
        target: EcoString,
        /// The value expression.
        value: Box<Expression>,
        /// Source line.
        line: u32,
    },

    /// A method dispatch: `receiver.method(arguments)` or `method(arguments)`.
    ///
    /// `receiver` is `None` for the implicit-`self` form.
    Dispatch {
        /// The receiver expression, absent for implicit `self`.
        #[serde(default)]
        receiver: Option<Box<Expression>>,
        /// The method name.
        method: EcoString,
        /// The actual arguments, in order.
        #[serde(default)]
        arguments: Vec<Expression>,
        /// Source line.
        line: u32,
    },

    /// A conditional: `if predicate then … else … fi`.
    If {
        /// The condition; must type to `Bool`.
        predicate: Box<Expression>,
        /// The `then` arm.
        then_branch: Box<Expression>,
        /// The `else` arm.
        else_branch: Box<Expression>,
        /// Source line.
        line: u32,
    },

    /// A loop: `while predicate loop body pool`.
    While {
        /// The condition; must type to `Bool`.
        predicate: Box<Expression>,
        /// The loop body; its type is discarded.
        body: Box<Expression>,
        /// Source line.
        line: u32,
    },

    /// A sequence: `{ e1; e2; …; en; }`.
    Block {
        /// The expressions, evaluated in order.
        body: Vec<Expression>,
        /// Source line.
        line: u32,
    },

    /// A let binding: `let name : Type [<- init] in body`.
    Let {
        /// The bound identifier.
        name: EcoString,
        /// The declared type of the binding.
        declared_type: EcoString,
        /// The optional initializer.
        #[serde(default)]
        initializer: Option<Box<Expression>>,
        /// The body in which the binding is visible.
        body: Box<Expression>,
        /// Source line.
        line: u32,
    },

    /// A case analysis: `case scrutinee of branches esac`.
    Case {
        /// The scrutinized expression.
        scrutinee: Box<Expression>,
        /// The branches, in source order.
        branches: Vec<CaseBranch>,
        /// Source line.
        line: u32,
    },

    /// An instantiation: `new ClassName`.
    New {
        /// The class to instantiate (may be `SELF_TYPE`).
        class_name: EcoString,
        /// Source line.
        line: u32,
    },

    /// A void test: `isvoid operand`.
    #[serde(rename = "isvoid")]
    IsVoid {
        /// The tested expression; its type is discarded.
        operand: Box<Expression>,
        /// Source line.
        line: u32,
    },

    /// An arithmetic operation on `Int` operands.
    Arithmetic {
        /// Which operator.
        op: ArithmeticOp,
        /// Left operand.
        left: Box<Expression>,
        /// Right operand.
        right: Box<Expression>,
        /// Source line.
        line: u32,
    },

    /// An ordering comparison on `Int` operands.
    Comparison {
        /// Which operator.
        op: ComparisonOp,
        /// Left operand.
        left: Box<Expression>,
        /// Right operand.
        right: Box<Expression>,
        /// Source line.
        line: u32,
    },

    /// An equality test: `left = right`.
    ///
    /// Primitive values (`Int`, `Bool`, `String`) compare only against the
    /// same primitive type.
    Equality {
        /// Left operand.
        left: Box<Expression>,
        /// Right operand.
        right: Box<Expression>,
        /// Source line.
        line: u32,
    },

    /// A boolean complement: `not operand`.
    Not {
        /// The operand; must type to `Bool`.
        operand: Box<Expression>,
        /// Source line.
        line: u32,
    },

    /// An integer negation: `~operand`.
    Negate {
        /// The operand; must type to `Int`.
        operand: Box<Expression>,
        /// Source line.
        line: u32,
    },
}

impl Expression {
    /// Returns the source line of this expression.
    #[must_use]
    pub const fn line(&self) -> u32 {
        match self {
            Self::IntLiteral { line, .. }
            | Self::BoolLiteral { line, .. }
            | Self::StringLiteral { line, .. }
            | Self::Identifier { line, .. }
            | Self::Assignment { line, .. }
            | Self::Dispatch { line, .. }
            | Self::If { line, .. }
            | Self::While { line, .. }
            | Self::Block { line, .. }
            | Self::Let { line, .. }
            | Self::Case { line, .. }
            | Self::New { line, .. }
            | Self::IsVoid { line, .. }
            | Self::Arithmetic { line, .. }
            | Self::Comparison { line, .. }
            | Self::Equality { line, .. }
            | Self::Not { line, .. }
            | Self::Negate { line, .. } => *line,
        }
    }
}

/// A branch of a `case` expression: `name : Type => body`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CaseBranch {
    /// The identifier bound within the branch body.
    pub name: EcoString,
    /// The declared branch type; must be distinct across branches.
    pub declared_type: EcoString,
    /// The branch body.
    pub body: Expression,
    /// Line of the branch declaration.
    pub line: u32,
}

/// The arithmetic operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArithmeticOp {
    /// `+`
    Add,
    /// `-`
    Subtract,
    /// `*`
    Multiply,
    /// `/`
    Divide,
}

/// The ordering comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonOp {
    /// `<`
    LessThan,
    /// `<=`
    LessThanOrEqual,
}

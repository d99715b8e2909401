// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! The expression type checker and per-class feature checks.
//!
//! [`CheckContext`] owns the class registry and the accumulated diagnostics
//! for one analysis run. Checking is a single structurally recursive pass:
//! every expression yields a static type, and every violation substitutes a
//! safe fallback (usually `Object`) so checking continues past the error.
//! Nothing here panics on malformed input; unknown names and ill-typed
//! subexpressions are ordinary diagnostics.

use ecow::EcoString;

use super::class_registry::ClassRegistry;
use super::features;
use super::scope::TypeEnvironment;
use super::subtype::{is_subtype, lub};
use crate::ast::{self, AttributeDef, ClassDef, Expression, Feature, MethodDef};
use crate::diagnostics::{Diagnostic, DiagnosticKind, SelfTypePosition};

/// State threaded through one type-checking run.
///
/// Owns the registry (read-only from here on) and the append-only diagnostics
/// vector. Environments are not stored here; each method or attribute check
/// builds its own.
#[derive(Debug)]
pub struct CheckContext<'a> {
    registry: ClassRegistry<'a>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> CheckContext<'a> {
    /// Creates a context over a fully built registry.
    #[must_use]
    pub fn new(registry: ClassRegistry<'a>) -> Self {
        Self {
            registry,
            diagnostics: Vec::new(),
        }
    }

    /// Diagnostics accumulated so far, in emission order.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Consumes the context, yielding the accumulated diagnostics.
    #[must_use]
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// Checks every feature of `class`: override compatibility first, then
    /// each attribute and method body in declaration order.
    pub fn check_class(&mut self, class: &ClassDef) {
        let override_diagnostics = features::check_overrides(&self.registry, class);
        self.diagnostics.extend(override_diagnostics);

        for feature in &class.features {
            match feature {
                Feature::Attribute(attribute) => self.check_attribute(class, attribute),
                Feature::Method(method) => self.check_method(class, method),
            }
        }
    }

    /// An attribute's declared type must not be `SELF_TYPE`; its initializer,
    /// if any, is checked like a let initializer against the declared type.
    fn check_attribute(&mut self, class: &ClassDef, attribute: &AttributeDef) {
        let declared = if attribute.declared_type == ast::SELF_TYPE {
            self.diagnostics.push(Diagnostic::in_class(
                class,
                DiagnosticKind::IllegalSelfType {
                    position: SelfTypePosition::Attribute,
                    name: attribute.name.clone(),
                },
            ));
            EcoString::from(ast::OBJECT)
        } else {
            attribute.declared_type.clone()
        };

        if let Some(initializer) = &attribute.initializer {
            let mut env = TypeEnvironment::new();
            env.define(ast::SELF, ast::SELF_TYPE);
            let initializer_type = self.check_expression(class, &mut env, initializer);
            if !is_subtype(&self.registry, &initializer_type, &declared) {
                self.report_at(
                    class,
                    initializer.line(),
                    DiagnosticKind::TypeMismatch {
                        found: initializer_type,
                        expected: declared,
                    },
                );
            }
        }
    }

    /// Checks a method body in a fresh environment seeded with `self` and the
    /// formals, then compares the body type against the declared return type.
    fn check_method(&mut self, class: &ClassDef, method: &MethodDef) {
        let mut env = TypeEnvironment::new();
        env.define(ast::SELF, ast::SELF_TYPE);
        for formal in &method.formals {
            env.define(formal.name.clone(), formal.declared_type.clone());
        }

        let body_type = self.check_expression(class, &mut env, &method.body);

        // A declared `SELF_TYPE` return demands exactly `SELF_TYPE` from the
        // body; a concrete body type would lose the covariance.
        let conforms = if method.return_type == ast::SELF_TYPE {
            body_type == ast::SELF_TYPE
        } else {
            is_subtype(&self.registry, &body_type, &method.return_type)
        };

        if !conforms {
            let mut diagnostic = Diagnostic::in_class(
                class,
                DiagnosticKind::ReturnTypeMismatch {
                    method: method.name.clone(),
                    found: body_type,
                    declared: method.return_type.clone(),
                },
            );
            if method.return_type == ast::SELF_TYPE {
                diagnostic = diagnostic
                    .with_hint("a `SELF_TYPE` method must return `self` or a `SELF_TYPE` dispatch");
            }
            self.diagnostics.push(diagnostic);
        }
    }

    /// Computes the static type of `expr`, emitting diagnostics along the way.
    ///
    /// One arm per expression shape. Every arm produces a type even after an
    /// error, so a single pass surfaces every violation in a method body.
    #[allow(clippy::too_many_lines)] // one arm per expression shape
    fn check_expression(
        &mut self,
        class: &ClassDef,
        env: &mut TypeEnvironment,
        expr: &Expression,
    ) -> EcoString {
        match expr {
            Expression::IntLiteral { .. } => ast::INT.into(),
            Expression::BoolLiteral { .. } => ast::BOOL.into(),
            Expression::StringLiteral { .. } => ast::STRING.into(),

            Expression::Identifier { name, line } => match env.lookup(name) {
                Some(ty) => ty.clone(),
                None => {
                    self.report_at(
                        class,
                        *line,
                        DiagnosticKind::UndefinedVariable { name: name.clone() },
                    );
                    ast::OBJECT.into()
                }
            },

            Expression::Assignment {
                target,
                value,
                line,
            } => {
                let Some(declared) = env.lookup(target) else {
                    // Unknown target: the value expression is left unchecked.
                    self.report_at(
                        class,
                        *line,
                        DiagnosticKind::UndefinedVariable {
                            name: target.clone(),
                        },
                    );
                    return ast::OBJECT.into();
                };
                let declared = declared.clone();

                let value_type = self.check_expression(class, env, value);
                if !is_subtype(&self.registry, &value_type, &declared) {
                    self.report_at(
                        class,
                        *line,
                        DiagnosticKind::TypeMismatch {
                            found: value_type.clone(),
                            expected: declared,
                        },
                    );
                }
                value_type
            }

            Expression::Dispatch {
                receiver,
                method,
                arguments,
                line,
            } => {
                let receiver_type = match receiver {
                    Some(receiver) => self.check_expression(class, env, receiver),
                    None => class.name.clone(),
                };
                // `SELF_TYPE` resolves to the enclosing class for lookup only;
                // the receiver keeps its static type for the result.
                let lookup_class = if receiver_type == ast::SELF_TYPE {
                    class.name.clone()
                } else {
                    receiver_type.clone()
                };

                let Some(found) = features::find_method(&self.registry, &lookup_class, method)
                else {
                    self.report_at(
                        class,
                        *line,
                        DiagnosticKind::UndefinedMethod {
                            method: method.clone(),
                        },
                    );
                    return ast::OBJECT.into();
                };
                let formal_types: Vec<EcoString> = found
                    .formals
                    .iter()
                    .map(|formal| formal.declared_type.clone())
                    .collect();
                let declared_return = found.return_type.clone();

                // Each actual is checked exactly once, arity match or not.
                let actuals: Vec<(EcoString, u32)> = arguments
                    .iter()
                    .map(|argument| (self.check_expression(class, env, argument), argument.line()))
                    .collect();

                if actuals.len() == formal_types.len() {
                    for ((actual_type, actual_line), formal_type) in
                        actuals.iter().zip(&formal_types)
                    {
                        if !is_subtype(&self.registry, actual_type, formal_type) {
                            self.report_at(
                                class,
                                *actual_line,
                                DiagnosticKind::ArgTypeMismatch {
                                    found: actual_type.clone(),
                                    expected: formal_type.clone(),
                                },
                            );
                        }
                    }
                } else {
                    self.report_at(
                        class,
                        *line,
                        DiagnosticKind::ArgCountMismatch {
                            method: method.clone(),
                            found: actuals.len(),
                            expected: formal_types.len(),
                        },
                    );
                }

                if declared_return == ast::SELF_TYPE {
                    receiver_type
                } else {
                    declared_return
                }
            }

            Expression::If {
                predicate,
                then_branch,
                else_branch,
                line: _,
            } => {
                self.check_predicate(class, env, predicate, "if");
                let then_type = self.check_expression(class, env, then_branch);
                let else_type = self.check_expression(class, env, else_branch);
                lub(&self.registry, &then_type, &else_type)
            }

            Expression::While {
                predicate,
                body,
                line: _,
            } => {
                self.check_predicate(class, env, predicate, "while");
                self.check_expression(class, env, body);
                ast::OBJECT.into()
            }

            Expression::Block { body, line: _ } => {
                let mut last = EcoString::from(ast::NO_TYPE);
                for expr in body {
                    last = self.check_expression(class, env, expr);
                }
                last
            }

            Expression::Let {
                name,
                declared_type,
                initializer,
                body,
                line,
            } => {
                let bound_type = if declared_type == ast::SELF_TYPE {
                    self.report_at(
                        class,
                        *line,
                        DiagnosticKind::IllegalSelfType {
                            position: SelfTypePosition::Let,
                            name: name.clone(),
                        },
                    );
                    EcoString::from(ast::OBJECT)
                } else {
                    declared_type.clone()
                };

                // The initializer is checked in the enclosing scope; the new
                // binding is visible to the body only.
                if let Some(initializer) = initializer {
                    let initializer_type = self.check_expression(class, env, initializer);
                    if !is_subtype(&self.registry, &initializer_type, &bound_type) {
                        self.report_at(
                            class,
                            initializer.line(),
                            DiagnosticKind::TypeMismatch {
                                found: initializer_type,
                                expected: bound_type.clone(),
                            },
                        );
                    }
                }

                env.push_scope();
                env.define(name.clone(), bound_type);
                let body_type = self.check_expression(class, env, body);
                env.pop_scope();
                body_type
            }

            Expression::Case {
                scrutinee,
                branches,
                line: _,
            } => {
                self.check_expression(class, env, scrutinee);

                let mut seen_types: Vec<&EcoString> = Vec::new();
                let mut merged = EcoString::from(ast::NO_TYPE);
                for branch in branches {
                    if seen_types.contains(&&branch.declared_type) {
                        // Duplicate declared type; the branch is still checked.
                        self.report_at(
                            class,
                            branch.line,
                            DiagnosticKind::DuplicateBranchType {
                                branch_type: branch.declared_type.clone(),
                            },
                        );
                    } else {
                        seen_types.push(&branch.declared_type);
                    }

                    env.push_scope();
                    env.define(branch.name.clone(), branch.declared_type.clone());
                    let branch_type = self.check_expression(class, env, &branch.body);
                    env.pop_scope();

                    // A branch contributes its body's type, not its declared one.
                    merged = lub(&self.registry, &merged, &branch_type);
                }
                merged
            }

            Expression::New { class_name, line } => {
                if class_name.as_str() != ast::SELF_TYPE && !self.registry.has_class(class_name) {
                    self.report_at(
                        class,
                        *line,
                        DiagnosticKind::UndefinedType {
                            name: class_name.clone(),
                        },
                    );
                }
                class_name.clone()
            }

            Expression::IsVoid { operand, line: _ } => {
                self.check_expression(class, env, operand);
                ast::BOOL.into()
            }

            Expression::Arithmetic {
                op: _,
                left,
                right,
                line,
            } => {
                let left_type = self.check_expression(class, env, left);
                let right_type = self.check_expression(class, env, right);
                if left_type != ast::INT || right_type != ast::INT {
                    self.report_at(
                        class,
                        *line,
                        DiagnosticKind::ArithmeticTypeError {
                            left: left_type,
                            right: right_type,
                        },
                    );
                }
                ast::INT.into()
            }

            Expression::Comparison {
                op: _,
                left,
                right,
                line,
            } => {
                let left_type = self.check_expression(class, env, left);
                let right_type = self.check_expression(class, env, right);
                if left_type != ast::INT || right_type != ast::INT {
                    self.report_at(
                        class,
                        *line,
                        DiagnosticKind::ComparisonTypeError {
                            left: left_type,
                            right: right_type,
                        },
                    );
                }
                ast::BOOL.into()
            }

            Expression::Equality { left, right, line } => {
                let left_type = self.check_expression(class, env, left);
                let right_type = self.check_expression(class, env, right);
                // Primitives compare only with themselves; reference types
                // compare freely.
                let primitive_involved = ClassRegistry::is_primitive_class(&left_type)
                    || ClassRegistry::is_primitive_class(&right_type);
                if primitive_involved && left_type != right_type {
                    self.report_at(
                        class,
                        *line,
                        DiagnosticKind::IncomparableTypes {
                            left: left_type,
                            right: right_type,
                        },
                    );
                }
                ast::BOOL.into()
            }

            Expression::Not { operand, line: _ } => {
                let operand_type = self.check_expression(class, env, operand);
                if operand_type != ast::BOOL {
                    self.report_at(
                        class,
                        operand.line(),
                        DiagnosticKind::TypeMismatch {
                            found: operand_type,
                            expected: ast::BOOL.into(),
                        },
                    );
                }
                ast::BOOL.into()
            }

            Expression::Negate { operand, line: _ } => {
                let operand_type = self.check_expression(class, env, operand);
                if operand_type != ast::INT {
                    self.report_at(
                        class,
                        operand.line(),
                        DiagnosticKind::TypeMismatch {
                            found: operand_type,
                            expected: ast::INT.into(),
                        },
                    );
                }
                ast::INT.into()
            }
        }
    }

    fn check_predicate(
        &mut self,
        class: &ClassDef,
        env: &mut TypeEnvironment,
        predicate: &Expression,
        construct: &str,
    ) {
        let predicate_type = self.check_expression(class, env, predicate);
        if predicate_type != ast::BOOL {
            self.report_at(
                class,
                predicate.line(),
                DiagnosticKind::NonBooleanPredicate {
                    construct: construct.into(),
                },
            );
        }
    }

    fn report_at(&mut self, class: &ClassDef, line: u32, kind: DiagnosticKind) {
        self.diagnostics
            .push(Diagnostic::at(class.filename.clone(), line, kind));
    }
}

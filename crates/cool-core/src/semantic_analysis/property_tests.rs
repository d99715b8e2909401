// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Property-based tests for the semantic analysis pipeline.
//!
//! These tests verify the algebra of the conformance relation and that the
//! pipeline is total over arbitrary inputs:
//!
//! 1. **Conformance is reflexive** — every registered class conforms to itself
//! 2. **Conformance follows the chain** — a class conforms to each ancestor
//! 3. **`lub` is commutative** — joins are order-independent
//! 4. **`lub` is an upper bound** — both operands conform to the join
//! 5. **`Object` absorbs** — joining with `Object` yields `Object`
//! 6. **`check_program` never panics** — any expression tree in any acyclic
//!    hierarchy produces a result
//! 7. **Analysis is deterministic** — identical runs yield identical
//!    diagnostics

use ecow::EcoString;
use proptest::prelude::*;

use crate::ast::{
    self, ArithmeticOp, CaseBranch, ClassDef, Expression, Feature, MethodDef, Program,
};

use super::{ClassRegistry, check_program, is_subtype, lub};

// ============================================================================
// Generators
// ============================================================================

/// Generates a hierarchy that is acyclic by construction: each class picks
/// its parent from `Object`, `IO`, or a class generated before it.
fn acyclic_classes() -> impl Strategy<Value = Vec<ClassDef>> {
    prop::collection::vec(any::<prop::sample::Index>(), 1..8).prop_map(|parent_picks| {
        parent_picks
            .iter()
            .enumerate()
            .map(|(position, pick)| {
                let parent: EcoString = match pick.index(position + 2) {
                    0 => ast::OBJECT.into(),
                    1 => ast::IO.into(),
                    earlier => format!("P{}", earlier - 2).into(),
                };
                ClassDef {
                    name: format!("P{position}").into(),
                    parent: Some(parent),
                    features: vec![],
                    filename: "prop.cl".into(),
                    line: 1,
                }
            })
            .collect()
    })
}

/// Generates expression trees mixing well-typed and ill-typed shapes,
/// including unknown identifiers and classes.
fn arb_expression() -> impl Strategy<Value = Expression> {
    let leaf = prop_oneof![
        any::<i64>().prop_map(|value| Expression::IntLiteral { value, line: 1 }),
        any::<bool>().prop_map(|value| Expression::BoolLiteral { value, line: 1 }),
        "[a-z]{1,8}".prop_map(|value| Expression::StringLiteral {
            value: value.into(),
            line: 1,
        }),
        prop_oneof![Just("self"), Just("x"), Just("ghost")].prop_map(|name| {
            Expression::Identifier {
                name: name.into(),
                line: 1,
            }
        }),
        prop_oneof![
            Just("Object"),
            Just("Int"),
            Just("P0"),
            Just("Ghost"),
            Just("SELF_TYPE")
        ]
        .prop_map(|class_name| Expression::New {
            class_name: class_name.into(),
            line: 1,
        }),
    ];
    leaf.prop_recursive(3, 24, 3, |inner| {
        prop_oneof![
            (inner.clone(), inner.clone()).prop_map(|(left, right)| Expression::Arithmetic {
                op: ArithmeticOp::Add,
                left: Box::new(left),
                right: Box::new(right),
                line: 1,
            }),
            (inner.clone(), inner.clone()).prop_map(|(left, right)| Expression::Equality {
                left: Box::new(left),
                right: Box::new(right),
                line: 1,
            }),
            (inner.clone(), inner.clone(), inner.clone()).prop_map(
                |(predicate, then_branch, else_branch)| Expression::If {
                    predicate: Box::new(predicate),
                    then_branch: Box::new(then_branch),
                    else_branch: Box::new(else_branch),
                    line: 1,
                }
            ),
            prop::collection::vec(inner.clone(), 0..4)
                .prop_map(|body| Expression::Block { body, line: 1 }),
            (inner.clone(), inner.clone()).prop_map(|(initializer, body)| Expression::Let {
                name: "x".into(),
                declared_type: "Int".into(),
                initializer: Some(Box::new(initializer)),
                body: Box::new(body),
                line: 1,
            }),
            inner.clone().prop_map(|operand| Expression::Not {
                operand: Box::new(operand),
                line: 1,
            }),
            (inner.clone(), prop::collection::vec(inner.clone(), 0..3)).prop_map(
                |(receiver, arguments)| Expression::Dispatch {
                    receiver: Some(Box::new(receiver)),
                    method: "poke".into(),
                    arguments,
                    line: 1,
                }
            ),
            (inner.clone(), inner.clone()).prop_map(|(scrutinee, body)| Expression::Case {
                scrutinee: Box::new(scrutinee),
                branches: vec![CaseBranch {
                    name: "c".into(),
                    declared_type: "Int".into(),
                    body,
                    line: 1,
                }],
                line: 1,
            }),
        ]
    })
}

// ============================================================================
// Helpers
// ============================================================================

fn registry_over(classes: &[ClassDef]) -> ClassRegistry<'_> {
    let mut registry = ClassRegistry::with_builtins();
    for class in classes {
        registry.register(class).unwrap();
    }
    registry
}

/// Wraps an arbitrary expression as the body of a method so the whole
/// pipeline runs over it.
fn probe_program(mut classes: Vec<ClassDef>, body: Expression) -> Program {
    classes.push(ClassDef {
        name: "Probe".into(),
        parent: Some(ast::OBJECT.into()),
        features: vec![Feature::Method(MethodDef {
            name: "poke".into(),
            formals: vec![],
            return_type: ast::OBJECT.into(),
            body,
        })],
        filename: "prop.cl".into(),
        line: 1,
    });
    Program { classes }
}

fn proptest_config() -> ProptestConfig {
    let default = ProptestConfig::default();
    ProptestConfig {
        cases: default.cases.max(512),
        ..default
    }
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    #![proptest_config(proptest_config())]

    /// Property 1: conformance is reflexive for every registered class.
    #[test]
    fn conformance_is_reflexive(classes in acyclic_classes()) {
        let registry = registry_over(&classes);
        for name in registry.class_names() {
            prop_assert!(is_subtype(&registry, name, name));
        }
    }

    /// Property 2: a class conforms to every ancestor on its chain.
    #[test]
    fn every_class_conforms_to_its_whole_chain(classes in acyclic_classes()) {
        let registry = registry_over(&classes);
        for class in &classes {
            for ancestor in registry.superclass_chain(&class.name) {
                prop_assert!(
                    is_subtype(&registry, &class.name, &ancestor),
                    "{} does not conform to its ancestor {}",
                    class.name,
                    ancestor,
                );
            }
        }
    }

    /// Property 3: `lub` is commutative.
    #[test]
    fn lub_is_commutative(
        classes in acyclic_classes(),
        first in any::<prop::sample::Index>(),
        second in any::<prop::sample::Index>(),
    ) {
        let registry = registry_over(&classes);
        let names: Vec<EcoString> = registry.class_names().cloned().collect();
        let a = &names[first.index(names.len())];
        let b = &names[second.index(names.len())];
        prop_assert_eq!(lub(&registry, a, b), lub(&registry, b, a));
    }

    /// Property 4: both operands conform to their join.
    #[test]
    fn lub_is_an_upper_bound(
        classes in acyclic_classes(),
        first in any::<prop::sample::Index>(),
        second in any::<prop::sample::Index>(),
    ) {
        let registry = registry_over(&classes);
        let names: Vec<EcoString> = registry.class_names().cloned().collect();
        let a = &names[first.index(names.len())];
        let b = &names[second.index(names.len())];
        let joined = lub(&registry, a, b);
        prop_assert!(is_subtype(&registry, a, &joined));
        prop_assert!(is_subtype(&registry, b, &joined));
    }

    /// Property 5: joining with `Object` always yields `Object`, and the
    /// bottom type conforms to every registered class.
    #[test]
    fn object_absorbs_and_bottom_conforms(
        classes in acyclic_classes(),
        first in any::<prop::sample::Index>(),
    ) {
        let registry = registry_over(&classes);
        let names: Vec<EcoString> = registry.class_names().cloned().collect();
        let a = &names[first.index(names.len())];
        prop_assert_eq!(lub(&registry, a, ast::OBJECT), ast::OBJECT);
        for name in &names {
            prop_assert!(is_subtype(&registry, ast::NO_TYPE, name));
        }
    }

    /// Property 6: the pipeline is total. Any expression tree in any acyclic
    /// hierarchy produces a result instead of panicking.
    #[test]
    fn check_program_never_panics(
        classes in acyclic_classes(),
        body in arb_expression(),
    ) {
        let program = probe_program(classes, body);
        let _result = check_program(&program);
    }

    /// Property 7: analysis is deterministic, and every diagnostic carries
    /// the source file of the class it arose in.
    #[test]
    fn analysis_is_deterministic(
        classes in acyclic_classes(),
        body in arb_expression(),
    ) {
        let program = probe_program(classes, body);
        let first: Vec<String> = check_program(&program)
            .diagnostics
            .iter()
            .map(ToString::to_string)
            .collect();
        let second: Vec<String> = check_program(&program)
            .diagnostics
            .iter()
            .map(ToString::to_string)
            .collect();
        prop_assert_eq!(first, second);

        for diagnostic in check_program(&program).diagnostics {
            prop_assert_eq!(diagnostic.filename.as_str(), "prop.cl");
        }
    }
}

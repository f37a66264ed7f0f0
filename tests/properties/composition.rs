// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Property tests for field set composition and emission.

use proptest::prelude::*;
use viewgen::{
    ConfigWarning, ExplicitField, FieldDef, Generator, GeneratorConfig, MetadataGraph,
    ProjectionSpec, TypeDef, TypeRef
};

const RESERVED: [&str; 3] = ["self", "super", "crate"];

fn field_name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,6}".prop_filter("path keyword", |name| !RESERVED.contains(&name.as_str()))
}

fn field_names() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::btree_set(field_name(), 1..8).prop_map(|names| names.into_iter().collect())
}

/// A camelCase name and the snake_case field it targets, e.g.
/// `("addressLine1", "address_line1")`.
fn camel_name() -> impl Strategy<Value = (String, String)> {
    (
        "[a-z]{1,5}",
        proptest::collection::vec(("[a-z]", "[a-z]{1,4}"), 1..3),
        "[0-9]{0,2}"
    )
        .prop_map(|(head, words, digits)| {
            let mut camel = head.clone();
            let mut snake = head;
            for (first, rest) in words {
                camel.push_str(&format!("{}{rest}", first.to_uppercase()));
                snake.push_str(&format!("_{first}{rest}"));
            }
            camel.push_str(&digits);
            snake.push_str(&digits);
            (camel, snake)
        })
}

fn record(names: &[String]) -> MetadataGraph {
    let mut ty = TypeDef::new("Record").in_package("crate::model");
    for name in names {
        ty = ty.with_field(FieldDef::new(name.clone(), TypeRef::named("String")));
    }
    let mut graph = MetadataGraph::new();
    graph.insert(ty);
    graph
}

fn names_with_mask() -> impl Strategy<Value = (Vec<String>, Vec<bool>)> {
    field_names().prop_flat_map(|names| {
        let len = names.len();
        (Just(names), proptest::collection::vec(any::<bool>(), len))
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: `only_explicit` composes exactly the explicit declarations, in order.
    #[test]
    fn property_only_explicit_is_exact((names, mask) in names_with_mask()) {
        let graph = record(&names);
        let config = GeneratorConfig::default();
        let explicit: Vec<&String> = names.iter().zip(&mask).filter(|(_, keep)| **keep).map(|(n, _)| n).collect();

        let mut spec = ProjectionSpec::new().only_explicit();
        for name in &explicit {
            spec = spec.field(ExplicitField::new(name.as_str()));
        }

        let composition = Generator::new(&graph, &config).compose("Record", &spec).unwrap();
        let composed: Vec<&str> = composition.names();
        let expected: Vec<&str> = explicit.iter().map(|n| n.as_str()).collect();
        prop_assert_eq!(composed, expected);
    }

    /// PROPERTY: An explicit declaration overriding a discovered field carries its own expression.
    #[test]
    fn property_explicit_overrides_discovered(
        (names, target, source) in field_names().prop_flat_map(|names| {
            let len = names.len();
            (Just(names), 0..len, 0..len)
        })
    ) {
        let graph = record(&names);
        let config = GeneratorConfig::default();
        let spec = ProjectionSpec::new()
            .field(ExplicitField::path(names[target].as_str(), names[source].as_str()));

        let composition = Generator::new(&graph, &config).compose("Record", &spec).unwrap();

        let matching: Vec<_> = composition.fields.iter().filter(|f| f.name == names[target]).collect();
        prop_assert_eq!(matching.len(), 1);
        prop_assert_eq!(matching[0].expression(), names[source].as_str());
        prop_assert_eq!(composition.fields.len(), names.len());
        let shadowed = matches!(
            &composition.warnings[..],
            [ConfigWarning::Shadowed { name, .. }] if *name == names[target]
        );
        prop_assert!(shadowed);
    }

    /// PROPERTY: A camelCase declaration overrides the snake_case field it names.
    #[test]
    fn property_camel_case_overrides_discovered(
        (camel, snake) in camel_name(),
        others in field_names()
    ) {
        let mut names: Vec<String> = others.into_iter().filter(|n| *n != snake).collect();
        names.push(snake.clone());
        let graph = record(&names);
        let config = GeneratorConfig::default();
        let spec = ProjectionSpec::new().field(ExplicitField::path(camel.as_str(), names[0].as_str()));

        let composition = Generator::new(&graph, &config).compose("Record", &spec).unwrap();

        prop_assert_eq!(composition.fields[0].name.as_str(), snake.as_str());
        prop_assert_eq!(composition.fields.iter().filter(|f| f.name == snake).count(), 1);
        prop_assert_eq!(composition.fields.len(), names.len());
        let shadowed = matches!(
            &composition.warnings[..],
            [ConfigWarning::Shadowed { name, .. }] if *name == snake
        );
        prop_assert!(shadowed);
    }

    /// PROPERTY: Excluded names never appear in the discovered set.
    #[test]
    fn property_exclusions_hold((names, mask) in names_with_mask()) {
        let graph = record(&names);
        let config = GeneratorConfig::default();
        let mut spec = ProjectionSpec::new();
        for (name, excluded) in names.iter().zip(&mask) {
            if *excluded {
                spec = spec.exclude(name.as_str());
            }
        }

        let composition = Generator::new(&graph, &config).compose("Record", &spec).unwrap();
        for field in &composition.fields {
            prop_assert!(!spec.excludes(&field.name));
        }
        prop_assert_eq!(composition.fields.len(), mask.iter().filter(|m| !**m).count());
    }

    /// PROPERTY: Composition and emission are idempotent.
    #[test]
    fn property_generation_is_idempotent((names, mask) in names_with_mask()) {
        let graph = record(&names);
        let config = GeneratorConfig::default();
        let mut spec = ProjectionSpec::new().scene("list");
        for (name, excluded) in names.iter().zip(&mask) {
            if *excluded {
                spec = spec.exclude(name.as_str());
            }
        }

        let generator = Generator::new(&graph, &config);
        let first = generator.generate_scene("Record", &spec).unwrap();
        let second = generator.generate_scene("Record", &spec).unwrap();
        prop_assert_eq!(first, second);
    }
}

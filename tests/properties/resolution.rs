// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Property tests for path resolution.

use proptest::prelude::*;
use viewgen::{
    Classifier, ContainerRegistry, FieldDef, MetadataGraph, PathResolver, ResolutionError,
    TypeDef, TypeMetadataProvider, TypeRef
};

/// `Node0.next -> Node1.next -> ... -> NodeN.value: u64`; `links[i]` makes
/// the i-th link an `Option`.
fn chain(links: &[bool]) -> MetadataGraph {
    let mut graph = MetadataGraph::new();
    for (i, optional) in links.iter().enumerate() {
        let next = TypeRef::named(format!("Node{}", i + 1));
        let ty = if *optional {
            TypeRef::generic("Option", [next])
        } else {
            next
        };
        graph.insert(TypeDef::new(format!("Node{i}")).with_field(FieldDef::new("next", ty)));
    }
    graph.insert(
        TypeDef::new(format!("Node{}", links.len()))
            .with_field(FieldDef::new("value", TypeRef::named("u64")))
    );
    graph
}

fn segments(depth: usize) -> Vec<&'static str> {
    let mut segments = vec!["next"; depth];
    segments.push("value");
    segments
}

fn links() -> impl Strategy<Value = Vec<bool>> {
    proptest::collection::vec(any::<bool>(), 0..8)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: An existing chain resolves to the declared type of its last segment.
    #[test]
    fn property_chain_resolves_to_terminal_type(links in links()) {
        let graph = chain(&links);
        let registry = ContainerRegistry::default();
        let resolver = PathResolver::new(&graph, Classifier::new(&registry));
        let start = graph.type_def("Node0").unwrap();

        let path = resolver.resolve(start, &segments(links.len()).join(".")).unwrap();

        prop_assert_eq!(&path.field.ty, &TypeRef::named("u64"));
        prop_assert_eq!(path.steps.len(), links.len() + 1);
        let optional: Vec<bool> = path.steps.iter().take(links.len()).map(|s| s.optional).collect();
        prop_assert_eq!(optional, links);
    }

    /// PROPERTY: A missing segment fails naming exactly that segment and its owner.
    #[test]
    fn property_missing_segment_is_named(
        (links, position) in links().prop_flat_map(|links| {
            let len = links.len();
            (Just(links), 0..=len)
        })
    ) {
        let graph = chain(&links);
        let registry = ContainerRegistry::default();
        let resolver = PathResolver::new(&graph, Classifier::new(&registry));
        let start = graph.type_def("Node0").unwrap();

        let mut segments = segments(links.len());
        segments[position] = "missing";
        let expression = segments.join(".");

        let err = resolver.resolve(start, &expression).unwrap_err();
        prop_assert_eq!(
            err,
            ResolutionError::FieldNotFound {
                type_name:  format!("Node{position}"),
                segment:    "missing".to_string(),
                expression: expression.clone()
            }
        );
    }

    /// PROPERTY: Resolution never panics on arbitrary expressions.
    #[test]
    fn property_resolve_never_panics(expression in "(?s).{0,64}") {
        let graph = chain(&[true, false]);
        let registry = ContainerRegistry::default();
        let resolver = PathResolver::new(&graph, Classifier::new(&registry));
        let _ = resolver.resolve(graph.type_def("Node0").unwrap(), &expression);
    }
}

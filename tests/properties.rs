//! Property tests for functional-interface classification over random hierarchies,
//! including diamonds, cycles and unresolved supertypes.

use std::collections::{HashSet, VecDeque};

use petgraph::stable_graph::NodeIndex;
use proptest::collection::vec;
use proptest::prelude::*;

use sam_check::graph::node::{MethodSymbol, Modifiers, TypeSymbol};
use sam_check::{AbstractMethodCounter, FunctionalInterfaceClassifier, TypeGraph};

#[derive(Debug, Clone)]
struct Hierarchy {
    abstract_methods: Vec<usize>,
    unresolved: Vec<bool>,
    edges: Vec<(usize, usize)>,
}

prop_compose! {
    fn arb_hierarchy()(n in 1usize..8)(
        abstract_methods in vec(0usize..3, n),
        unresolved in vec(prop::bool::weighted(0.15), n),
        edges in vec((0..n, 0..n), 0..(n * 2)),
    ) -> Hierarchy {
        Hierarchy { abstract_methods, unresolved, edges }
    }
}

fn build(h: &Hierarchy) -> (TypeGraph, Vec<NodeIndex>) {
    let mut graph = TypeGraph::new();
    let nodes: Vec<NodeIndex> = (0..h.abstract_methods.len())
        .map(|i| {
            if h.unresolved[i] {
                return graph.add_unresolved(&format!("lib.U{i}"));
            }
            let name = format!("p.I{i}");
            let mut symbol = TypeSymbol::interface(&name)
                .with_method(
                    MethodSymbol::declared(&name, "describe", &[])
                        .with_modifiers(Modifiers::DEFAULT),
                )
                .with_method(MethodSymbol::declared(&name, "toString", &[]));
            for m in 0..h.abstract_methods[i] {
                symbol = symbol.with_method(MethodSymbol::declared(&name, &format!("m{m}"), &[]));
            }
            graph.add_type(symbol)
        })
        .collect();
    for &(from, to) in &h.edges {
        if !h.unresolved[from] {
            graph.add_super_interface(nodes[from], nodes[to]);
        }
    }
    (graph, nodes)
}

/// Nodes reachable from `start` through one or more super-interface edges.
fn reachable(graph: &TypeGraph, start: NodeIndex) -> HashSet<NodeIndex> {
    let mut seen = HashSet::new();
    let mut queue: VecDeque<NodeIndex> = graph.super_interfaces(start).collect();
    while let Some(next) = queue.pop_front() {
        if seen.insert(next) {
            queue.extend(graph.super_interfaces(next));
        }
    }
    seen
}

/// Reference answer: one local abstract method, every ancestor resolved with none of its
/// own, and no cycle anywhere above the root.
fn oracle(graph: &TypeGraph, root: NodeIndex) -> bool {
    let counter = AbstractMethodCounter::new();
    if !counter.count(graph.node(root)).is_exactly(1) {
        return false;
    }
    let ancestors = reachable(graph, root);
    let clean = ancestors
        .iter()
        .all(|&a| !counter.count(graph.node(a)).is_positive());
    let root_cyclic = ancestors.contains(&root);
    let ancestor_cyclic = ancestors
        .iter()
        .any(|&a| reachable(graph, a).contains(&a));
    clean && !root_cyclic && !ancestor_cyclic
}

proptest! {
    #[test]
    fn classification_matches_reference(h in arb_hierarchy()) {
        let (graph, nodes) = build(&h);
        let classifier = FunctionalInterfaceClassifier::new(&graph);
        for (i, &idx) in nodes.iter().enumerate() {
            if h.unresolved[i] {
                continue;
            }
            prop_assert_eq!(
                classifier.is_functional_interface_candidate(idx),
                oracle(&graph, idx),
                "node p.I{}", i
            );
        }
    }

    #[test]
    fn classification_is_idempotent(h in arb_hierarchy()) {
        let (graph, nodes) = build(&h);
        let classifier = FunctionalInterfaceClassifier::new(&graph);
        for &idx in &nodes {
            let first = classifier.is_functional_interface_candidate(idx);
            prop_assert_eq!(first, classifier.is_functional_interface_candidate(idx));
            prop_assert_eq!(first, classifier.explain(idx).is_candidate);
        }
    }

    #[test]
    fn redundant_paths_do_not_change_result(h in arb_hierarchy(), pick in any::<prop::sample::Index>()) {
        let (mut graph, nodes) = build(&h);
        let resolved: Vec<NodeIndex> = nodes
            .iter()
            .zip(&h.unresolved)
            .filter(|&(_, &u)| !u)
            .map(|(&idx, _)| idx)
            .collect();
        prop_assume!(!resolved.is_empty());
        let root = resolved[pick.index(resolved.len())];

        let before = FunctionalInterfaceClassifier::new(&graph).is_functional_interface_candidate(root);
        let ancestors: Vec<NodeIndex> = reachable(&graph, root).into_iter().collect();
        for a in ancestors {
            graph.add_super_interface(root, a);
        }
        let after = FunctionalInterfaceClassifier::new(&graph).is_functional_interface_candidate(root);
        prop_assert_eq!(before, after);
    }
}

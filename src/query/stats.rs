use rayon::prelude::*;

use crate::check::FUNCTIONAL_INTERFACE_ANNOTATION;
use crate::graph::{TypeGraph, node::TypeKind};
use crate::query::functional::FunctionalInterfaceClassifier;

/// Aggregated statistics derived from a type graph.
#[derive(Debug, serde::Serialize)]
pub struct SnapshotStats {
    pub type_count: usize,
    pub classes: usize,
    pub interfaces: usize,
    pub enums: usize,
    pub annotations: usize,
    pub unresolved: usize,
    pub methods: usize,
    /// Declared super-interface edges (`extends` on interfaces, `implements` on classes).
    pub super_interface_edges: usize,
    /// Types declaring an explicit superclass.
    pub with_superclass: usize,
    /// Interfaces already carrying `@FunctionalInterface`.
    pub annotated: usize,
    /// Interfaces classified as functional-interface candidates, annotated or not.
    pub candidates: usize,
}

/// Compute statistics from a built `TypeGraph`.
pub fn snapshot_stats(graph: &TypeGraph) -> SnapshotStats {
    let breakdown = graph.types_by_kind();
    let interfaces = graph.interfaces();

    let methods = graph
        .graph
        .node_indices()
        .filter_map(|i| graph.graph[i].as_type())
        .map(|t| t.methods().count())
        .sum();

    let super_interface_edges = graph
        .graph
        .node_indices()
        .map(|i| graph.super_interfaces(i).count())
        .sum();
    let with_superclass = graph
        .graph
        .node_indices()
        .filter(|&i| graph.superclass(i).is_some())
        .count();

    let annotated = interfaces
        .iter()
        .filter_map(|&i| graph.node(i).as_type())
        .filter(|t| t.is_annotated_with(FUNCTIONAL_INTERFACE_ANNOTATION))
        .count();

    let classifier = FunctionalInterfaceClassifier::new(graph);
    let candidates = interfaces
        .par_iter()
        .filter(|&&i| classifier.is_functional_interface_candidate(i))
        .count();

    SnapshotStats {
        type_count: graph.type_count(),
        classes: *breakdown.get(&TypeKind::Class).unwrap_or(&0),
        interfaces: interfaces.len(),
        enums: *breakdown.get(&TypeKind::Enum).unwrap_or(&0),
        annotations: *breakdown.get(&TypeKind::Annotation).unwrap_or(&0),
        unresolved: graph.unresolved_count(),
        methods,
        super_interface_edges,
        with_superclass,
        annotated,
        candidates,
    }
}

pub mod edge;
pub mod node;

use std::collections::HashMap;

use petgraph::Directed;
use petgraph::Direction::Outgoing;
use petgraph::stable_graph::{NodeIndex, StableGraph};
use petgraph::visit::EdgeRef;
use tracing::warn;

use edge::EdgeKind;
use node::{TypeKind, TypeNode, TypeSymbol};

/// The resolved type hierarchy: a directed petgraph StableGraph with an O(1) name index.
///
/// Nodes are resolved types or unresolved placeholders; edges run from a type to each of
/// its direct supertypes. Nothing here assumes the graph is acyclic.
#[derive(Debug, Clone)]
pub struct TypeGraph {
    pub graph: StableGraph<TypeNode, EdgeKind, Directed>,
    /// Maps qualified names (resolved or not) to their node indices.
    pub type_index: HashMap<String, NodeIndex>,
}

impl TypeGraph {
    pub fn new() -> Self {
        Self {
            graph: StableGraph::new(),
            type_index: HashMap::new(),
        }
    }

    /// Add a resolved type.
    ///
    /// An unresolved placeholder of the same name is upgraded in place, keeping its incoming
    /// edges. An already resolved type of the same name is kept and `symbol` is dropped;
    /// callers that must reject duplicates check [`TypeGraph::lookup`] first.
    pub fn add_type(&mut self, symbol: TypeSymbol) -> NodeIndex {
        if let Some(&existing) = self.type_index.get(&symbol.qualified_name) {
            if matches!(self.graph[existing], TypeNode::Unresolved { .. }) {
                self.graph[existing] = TypeNode::Type(symbol);
            } else {
                warn!(name = %symbol.qualified_name, "type already declared, keeping first");
            }
            return existing;
        }
        let name = symbol.qualified_name.clone();
        let idx = self.graph.add_node(TypeNode::Type(symbol));
        self.type_index.insert(name, idx);
        idx
    }

    /// Add a placeholder for a supertype that could not be resolved.
    /// Returns the existing node if the name is already known.
    pub fn add_unresolved(&mut self, name: &str) -> NodeIndex {
        if let Some(&existing) = self.type_index.get(name) {
            return existing;
        }
        let idx = self.graph.add_node(TypeNode::Unresolved {
            name: name.to_owned(),
        });
        self.type_index.insert(name.to_owned(), idx);
        idx
    }

    /// Record that `parent` is a direct super-interface of `child`.
    pub fn add_super_interface(&mut self, child: NodeIndex, parent: NodeIndex) {
        self.graph.add_edge(child, parent, EdgeKind::SuperInterface);
    }

    /// Record that `parent` is the direct superclass of `child`.
    pub fn add_superclass(&mut self, child: NodeIndex, parent: NodeIndex) {
        self.graph.add_edge(child, parent, EdgeKind::SuperClass);
    }

    pub fn lookup(&self, qualified_name: &str) -> Option<NodeIndex> {
        self.type_index.get(qualified_name).copied()
    }

    pub fn node(&self, idx: NodeIndex) -> &TypeNode {
        &self.graph[idx]
    }

    /// Direct super-interfaces of `idx`, one entry per declared edge.
    pub fn super_interfaces(&self, idx: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph
            .edges_directed(idx, Outgoing)
            .filter(|e| *e.weight() == EdgeKind::SuperInterface)
            .map(|e| e.target())
    }

    /// Direct superclass of `idx`, if declared.
    pub fn superclass(&self, idx: NodeIndex) -> Option<NodeIndex> {
        self.graph
            .edges_directed(idx, Outgoing)
            .find(|e| *e.weight() == EdgeKind::SuperClass)
            .map(|e| e.target())
    }

    /// Node indices of all resolved interface declarations.
    pub fn interfaces(&self) -> Vec<NodeIndex> {
        self.graph
            .node_indices()
            .filter(|&i| matches!(&self.graph[i], TypeNode::Type(t) if t.is_interface()))
            .collect()
    }

    /// Number of resolved type nodes.
    pub fn type_count(&self) -> usize {
        self.graph
            .node_indices()
            .filter(|&i| matches!(self.graph[i], TypeNode::Type(_)))
            .count()
    }

    /// Number of unresolved placeholder nodes.
    pub fn unresolved_count(&self) -> usize {
        self.graph
            .node_indices()
            .filter(|&i| matches!(self.graph[i], TypeNode::Unresolved { .. }))
            .count()
    }

    /// Return a count of resolved types broken down by kind.
    pub fn types_by_kind(&self) -> HashMap<TypeKind, usize> {
        let mut map: HashMap<TypeKind, usize> = HashMap::new();
        for idx in self.graph.node_indices() {
            if let TypeNode::Type(ref t) = self.graph[idx] {
                *map.entry(t.kind).or_insert(0) += 1;
            }
        }
        map
    }
}

impl Default for TypeGraph {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use node::TypeSymbol;

    #[test]
    fn test_add_type_and_super_interface() {
        let mut graph = TypeGraph::new();
        let base = graph.add_type(TypeSymbol::interface("a.Base"));
        let foo = graph.add_type(TypeSymbol::interface("a.Foo"));
        graph.add_super_interface(foo, base);

        assert_eq!(graph.type_count(), 2);
        assert_eq!(graph.super_interfaces(foo).collect::<Vec<_>>(), vec![base]);
        assert!(graph.super_interfaces(base).next().is_none());
        assert!(
            graph.graph.contains_edge(foo, base),
            "edge should point from subtype to supertype"
        );
    }

    #[test]
    fn test_add_unresolved_is_deduplicated() {
        let mut graph = TypeGraph::new();
        let a = graph.add_unresolved("lib.Missing");
        let b = graph.add_unresolved("lib.Missing");
        assert_eq!(a, b);
        assert_eq!(graph.unresolved_count(), 1);
        assert_eq!(graph.type_count(), 0);
    }

    #[test]
    fn test_add_type_upgrades_placeholder_in_place() {
        let mut graph = TypeGraph::new();
        let foo = graph.add_type(TypeSymbol::interface("a.Foo"));
        let placeholder = graph.add_unresolved("a.Base");
        graph.add_super_interface(foo, placeholder);

        let base = graph.add_type(TypeSymbol::interface("a.Base"));
        assert_eq!(base, placeholder);
        assert_eq!(graph.unresolved_count(), 0);
        assert!(graph.node(base).as_type().is_some());
        assert_eq!(graph.super_interfaces(foo).collect::<Vec<_>>(), vec![base]);
    }

    #[test]
    fn test_add_type_keeps_existing_resolved_type() {
        let mut graph = TypeGraph::new();
        let first = graph.add_type(TypeSymbol::interface("a.I"));
        let second = graph.add_type(TypeSymbol::new("a.I", TypeKind::Class));

        assert_eq!(first, second);
        assert_eq!(graph.type_count(), 1);
        let kept = graph.node(first).as_type().unwrap();
        assert!(kept.is_interface(), "the first declaration must win");
    }

    #[test]
    fn test_superclass_edges_are_not_super_interfaces() {
        let mut graph = TypeGraph::new();
        let object = graph.add_type(TypeSymbol::new("java.lang.Object", TypeKind::Class));
        let c = graph.add_type(TypeSymbol::new("a.C", TypeKind::Class));
        graph.add_superclass(c, object);

        assert_eq!(graph.superclass(c), Some(object));
        assert!(graph.super_interfaces(c).next().is_none());
    }

    #[test]
    fn test_interfaces_and_kind_breakdown() {
        let mut graph = TypeGraph::new();
        graph.add_type(TypeSymbol::interface("a.I"));
        graph.add_type(TypeSymbol::interface("a.J"));
        graph.add_type(TypeSymbol::new("a.C", TypeKind::Class));
        graph.add_type(TypeSymbol::new("a.Marker", TypeKind::Annotation));
        graph.add_unresolved("lib.X");

        assert_eq!(graph.interfaces().len(), 2);
        let breakdown = graph.types_by_kind();
        assert_eq!(breakdown.get(&TypeKind::Interface), Some(&2));
        assert_eq!(breakdown.get(&TypeKind::Class), Some(&1));
        assert_eq!(breakdown.get(&TypeKind::Annotation), Some(&1));
        assert_eq!(breakdown.get(&TypeKind::Enum), None);
    }

    #[test]
    fn test_lookup() {
        let mut graph = TypeGraph::new();
        let i = graph.add_type(TypeSymbol::interface("a.I"));
        assert_eq!(graph.lookup("a.I"), Some(i));
        assert_eq!(graph.lookup("a.Missing"), None);
        assert_eq!(graph.node(i).name(), "a.I");
    }
}

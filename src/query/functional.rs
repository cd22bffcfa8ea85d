use std::collections::HashSet;

use petgraph::stable_graph::NodeIndex;
use tracing::{debug, trace};

use crate::graph::TypeGraph;
use crate::query::abstract_count::{AbstractCount, AbstractMethodCounter};

/// Why an ancestor disqualifies a candidate.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case", tag = "reason")]
pub enum ContributionReason {
    /// The ancestor declares abstract methods of its own.
    AbstractMethods { count: usize },
    /// The ancestor could not be resolved, so its members are unknown.
    Unresolved,
    /// The ancestor is reachable from itself through super-interface edges.
    Cycle,
}

/// The first ancestor found that contributes an abstract method.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Contributor {
    pub ancestor: String,
    #[serde(flatten)]
    pub reason: ContributionReason,
}

/// A locally declared abstract method.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct AbstractMethod {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
}

/// Full account of one classification, as printed by `sam-check classify`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Classification {
    pub interface: String,
    pub local_count: AbstractCount,
    /// The abstract methods behind `local_count`; empty for unresolved types.
    pub abstract_methods: Vec<AbstractMethod>,
    pub contributor: Option<Contributor>,
    pub is_candidate: bool,
}

struct Frame {
    parents: Vec<NodeIndex>,
    next: usize,
    node: NodeIndex,
}

/// Decides whether an interface is a functional-interface candidate: exactly one
/// abstract method of its own, and no ancestor interface contributing any.
pub struct FunctionalInterfaceClassifier<'g, 'm> {
    graph: &'g TypeGraph,
    counter: AbstractMethodCounter<'m>,
}

impl<'g> FunctionalInterfaceClassifier<'g, 'static> {
    pub fn new(graph: &'g TypeGraph) -> Self {
        Self::with_counter(graph, AbstractMethodCounter::new())
    }
}

impl<'g, 'm> FunctionalInterfaceClassifier<'g, 'm> {
    pub fn with_counter(graph: &'g TypeGraph, counter: AbstractMethodCounter<'m>) -> Self {
        Self { graph, counter }
    }

    /// Abstract methods declared directly on `idx`.
    pub fn local_count(&self, idx: NodeIndex) -> AbstractCount {
        self.counter.count(self.graph.node(idx))
    }

    /// True if `idx` itself declares exactly one abstract method. Ancestors are not
    /// consulted.
    pub fn declares_single_abstract_method(&self, idx: NodeIndex) -> bool {
        self.local_count(idx).is_exactly(1)
    }

    pub fn is_functional_interface_candidate(&self, idx: NodeIndex) -> bool {
        let candidate =
            self.declares_single_abstract_method(idx) && !self.any_ancestor_contributes(idx);
        trace!(interface = self.graph.node(idx).name(), candidate, "classified");
        candidate
    }

    /// True if any direct or transitive super-interface of `idx` declares an abstract
    /// method, is unresolved, or sits on a super-interface cycle.
    pub fn any_ancestor_contributes(&self, idx: NodeIndex) -> bool {
        self.find_contributor(idx).is_some()
    }

    pub fn explain(&self, idx: NodeIndex) -> Classification {
        let node = self.graph.node(idx);
        let local_count = self.local_count(idx);
        let abstract_methods = node
            .as_type()
            .map(|symbol| {
                self.counter
                    .abstract_methods(symbol)
                    .map(|m| AbstractMethod {
                        name: m.name.clone(),
                        line: m.line(),
                    })
                    .collect()
            })
            .unwrap_or_default();
        let contributor = self.find_contributor(idx);
        Classification {
            interface: node.name().to_owned(),
            is_candidate: local_count.is_exactly(1) && contributor.is_none(),
            local_count,
            abstract_methods,
            contributor,
        }
    }

    /// Depth-first search over super-interface edges, stopping at the first contributor.
    ///
    /// `on_path` holds the nodes of the current DFS branch (the root included); reaching
    /// one of them again is a cycle. `done` holds ancestors already explored without a
    /// finding, so a diamond's shared ancestor is examined once.
    fn find_contributor(&self, root: NodeIndex) -> Option<Contributor> {
        let mut on_path: HashSet<NodeIndex> = HashSet::from([root]);
        let mut done: HashSet<NodeIndex> = HashSet::new();
        let mut stack = vec![Frame {
            parents: self.graph.super_interfaces(root).collect(),
            next: 0,
            node: root,
        }];

        while let Some(frame) = stack.last_mut() {
            let Some(&parent) = frame.parents.get(frame.next) else {
                let finished = frame.node;
                stack.pop();
                on_path.remove(&finished);
                done.insert(finished);
                continue;
            };
            frame.next += 1;

            if on_path.contains(&parent) {
                let name = self.graph.node(parent).name();
                debug!(
                    root = self.graph.node(root).name(),
                    ancestor = name,
                    "super-interface cycle"
                );
                return Some(Contributor {
                    ancestor: name.to_owned(),
                    reason: ContributionReason::Cycle,
                });
            }
            if done.contains(&parent) {
                continue;
            }

            match self.local_count(parent) {
                AbstractCount::Resolved(0) => {}
                AbstractCount::Resolved(count) => {
                    return Some(Contributor {
                        ancestor: self.graph.node(parent).name().to_owned(),
                        reason: ContributionReason::AbstractMethods { count },
                    });
                }
                AbstractCount::Unbounded => {
                    return Some(Contributor {
                        ancestor: self.graph.node(parent).name().to_owned(),
                        reason: ContributionReason::Unresolved,
                    });
                }
            }

            on_path.insert(parent);
            stack.push(Frame {
                parents: self.graph.super_interfaces(parent).collect(),
                next: 0,
                node: parent,
            });
        }
        None
    }
}

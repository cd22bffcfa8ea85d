//! The `S1609` rule: interfaces that qualify as functional interfaces should say so with
//! `@FunctionalInterface`.

pub mod version;

pub use version::JavaVersion;

use glob::Pattern;
use petgraph::stable_graph::NodeIndex;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::graph::TypeGraph;
use crate::query::functional::FunctionalInterfaceClassifier;

pub const RULE_KEY: &str = "S1609";

/// Marker annotation whose presence suppresses the issue.
pub const FUNCTIONAL_INTERFACE_ANNOTATION: &str = "java.lang.FunctionalInterface";

/// One reported issue.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Diagnostic {
    pub rule: &'static str,
    /// Qualified name of the interface.
    pub interface: String,
    pub simple_name: String,
    pub file: Option<String>,
    pub line: Option<usize>,
    pub message: String,
}

/// Runs functional-interface classification over every interface in a graph and reports
/// the ones missing the marker annotation.
#[derive(Debug, Clone, Default)]
pub struct SamAnnotatedCheck {
    java_version: JavaVersion,
    exclude: Vec<Pattern>,
}

impl SamAnnotatedCheck {
    pub fn new(java_version: JavaVersion) -> Self {
        Self {
            java_version,
            exclude: Vec::new(),
        }
    }

    /// Skip interfaces whose qualified name matches any of `patterns`.
    pub fn with_exclusions(mut self, patterns: Vec<Pattern>) -> Self {
        self.exclude = patterns;
        self
    }

    /// The marker annotation only exists from Java 8 on.
    pub fn is_enabled(&self) -> bool {
        self.java_version.is_java8_compatible()
    }

    pub fn run(&self, graph: &TypeGraph) -> Vec<Diagnostic> {
        if !self.is_enabled() {
            info!(java_version = %self.java_version, "rule {RULE_KEY} disabled below Java 8");
            return Vec::new();
        }

        let classifier = FunctionalInterfaceClassifier::new(graph);
        let mut diagnostics: Vec<Diagnostic> = graph
            .interfaces()
            .par_iter()
            .filter_map(|&idx| self.visit(graph, &classifier, idx))
            .collect();

        diagnostics.sort_by(|a, b| {
            (&a.file, a.line, &a.interface).cmp(&(&b.file, b.line, &b.interface))
        });
        debug!(count = diagnostics.len(), "rule {RULE_KEY} finished");
        diagnostics
    }

    fn visit(
        &self,
        graph: &TypeGraph,
        classifier: &FunctionalInterfaceClassifier<'_, '_>,
        idx: NodeIndex,
    ) -> Option<Diagnostic> {
        let symbol = graph.node(idx).as_type()?;
        if symbol.is_annotated_with(FUNCTIONAL_INTERFACE_ANNOTATION) {
            return None;
        }
        if self
            .exclude
            .iter()
            .any(|p| p.matches(&symbol.qualified_name))
        {
            debug!(interface = %symbol.qualified_name, "excluded by configuration");
            return None;
        }
        if !classifier.is_functional_interface_candidate(idx) {
            return None;
        }

        let simple_name = symbol.simple_name();
        Some(Diagnostic {
            rule: RULE_KEY,
            interface: symbol.qualified_name.clone(),
            simple_name: simple_name.to_owned(),
            file: symbol.file.clone(),
            line: symbol.line,
            message: format!(
                "Annotate the \"{simple_name}\" interface with the @FunctionalInterface annotation{}",
                self.java_version.java8_compatibility_message()
            ),
        })
    }
}

//! Functional-interface classification over resolved Java symbol snapshots.
//!
//! The entry point for rule layers is
//! [`FunctionalInterfaceClassifier::is_functional_interface_candidate`]; the
//! [`matcher`] module exposes the method-signature patterns it uses so other rules can
//! define their own.

pub mod check;
pub mod cli;
pub mod config;
pub mod graph;
pub mod matcher;
pub mod query;
pub mod snapshot;

pub use check::{Diagnostic, JavaVersion, SamAnnotatedCheck};
pub use graph::TypeGraph;
pub use query::abstract_count::{AbstractCount, AbstractMethodCounter};
pub use query::functional::FunctionalInterfaceClassifier;

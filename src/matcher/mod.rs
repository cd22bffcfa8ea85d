//! Declarative method-signature patterns.
//!
//! A [`SignatureMatcher`] describes one method shape: which declaring type it may live
//! on, its exact name, and either an exact parameter list or no parameter constraint.
//! [`MatcherSet`] groups matchers behind a single any-match predicate.

pub mod collection;

pub use collection::{MatcherSet, OBJECT_METHODS, object_methods};

use crate::graph::node::MethodDeclaration;

/// Criterion on the declaring type of a method.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeCriteria {
    /// Any declaring type.
    Any,
    /// Exactly this fully qualified type name.
    Is(String),
}

impl TypeCriteria {
    pub fn matches(&self, owner: &str) -> bool {
        match self {
            TypeCriteria::Any => true,
            TypeCriteria::Is(name) => name == owner,
        }
    }
}

/// Constraint on the parameter list of a method.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParameterShape {
    /// Any arity, any types.
    Unconstrained,
    /// Exactly these fully qualified parameter types, in order.
    Exact(Vec<String>),
}

impl ParameterShape {
    pub fn matches(&self, parameter_types: &[String]) -> bool {
        match self {
            ParameterShape::Unconstrained => true,
            ParameterShape::Exact(expected) => expected.as_slice() == parameter_types,
        }
    }
}

/// An immutable method-signature pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SignatureMatcher {
    pub owner: TypeCriteria,
    pub name: String,
    pub parameters: ParameterShape,
}

impl SignatureMatcher {
    /// A matcher for `name` on any type, taking no parameters.
    pub fn named(name: &str) -> Self {
        Self {
            owner: TypeCriteria::Any,
            name: name.to_owned(),
            parameters: ParameterShape::Exact(Vec::new()),
        }
    }

    /// Pin the matcher to methods declared on `qualified_name`.
    pub fn on_type(mut self, qualified_name: &str) -> Self {
        self.owner = TypeCriteria::Is(qualified_name.to_owned());
        self
    }

    /// Replace the parameter list with exactly `parameter_types`.
    pub fn with_parameters(mut self, parameter_types: &[&str]) -> Self {
        self.parameters =
            ParameterShape::Exact(parameter_types.iter().map(|p| (*p).to_owned()).collect());
        self
    }

    /// Accept any parameter list.
    pub fn with_any_parameters(mut self) -> Self {
        self.parameters = ParameterShape::Unconstrained;
        self
    }

    pub fn matches(&self, declaration: &MethodDeclaration) -> bool {
        self.name == declaration.name
            && self.owner.matches(&declaration.owner)
            && self.parameters.matches(&declaration.parameter_types)
    }
}

use std::fmt;

use crate::graph::node::{MethodSymbol, TypeNode, TypeSymbol};
use crate::matcher::{MatcherSet, object_methods};

/// Number of abstract methods a type declares, or `Unbounded` when the type could not be
/// resolved and its members are unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AbstractCount {
    Resolved(usize),
    Unbounded,
}

impl AbstractCount {
    /// True if the type contributes at least one abstract method. Unknown types always do.
    pub fn is_positive(self) -> bool {
        match self {
            AbstractCount::Resolved(n) => n > 0,
            AbstractCount::Unbounded => true,
        }
    }

    pub fn is_exactly(self, n: usize) -> bool {
        self == AbstractCount::Resolved(n)
    }
}

impl fmt::Display for AbstractCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbstractCount::Resolved(n) => write!(f, "{n}"),
            AbstractCount::Unbounded => f.write_str("unbounded"),
        }
    }
}

/// Counts the abstract methods a type declares directly, ignoring re-declarations that
/// match an exclusion set (by default the `java.lang.Object` methods).
#[derive(Debug, Clone, Copy)]
pub struct AbstractMethodCounter<'m> {
    exclusions: &'m MatcherSet,
}

impl AbstractMethodCounter<'static> {
    pub fn new() -> Self {
        Self {
            exclusions: object_methods(),
        }
    }
}

impl Default for AbstractMethodCounter<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'m> AbstractMethodCounter<'m> {
    pub fn with_exclusions(exclusions: &'m MatcherSet) -> Self {
        Self { exclusions }
    }

    /// Local abstract-method count of `node`. Supertypes are not visited.
    pub fn count(&self, node: &TypeNode) -> AbstractCount {
        match node {
            TypeNode::Type(symbol) => AbstractCount::Resolved(self.count_members(symbol)),
            TypeNode::Unresolved { .. } => AbstractCount::Unbounded,
        }
    }

    fn count_members(&self, symbol: &TypeSymbol) -> usize {
        self.abstract_methods(symbol).count()
    }

    /// The methods of `symbol` that count as abstract, in declaration order.
    pub fn abstract_methods<'s>(
        &self,
        symbol: &'s TypeSymbol,
    ) -> impl Iterator<Item = &'s MethodSymbol> {
        symbol.methods().filter(|m| self.is_abstract(m))
    }

    /// Non-static, non-default, and not an excluded re-declaration.
    ///
    /// A method without a declaration cannot be matched, so it is kept.
    pub fn is_abstract(&self, method: &MethodSymbol) -> bool {
        if method.is_static() || method.is_default() {
            return false;
        }
        match &method.declaration {
            Some(declaration) => !self.exclusions.any_match(declaration),
            None => true,
        }
    }
}

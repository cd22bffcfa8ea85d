use std::sync::OnceLock;

use crate::graph::node::MethodDeclaration;

use super::SignatureMatcher;

/// `java.lang.Object` method shapes as `(name, parameter types)`.
///
/// Re-declaring one of these on an interface does not add an abstract obligation, since
/// every implementation already inherits it from `Object`.
pub const OBJECT_METHODS: &[(&str, &[&str])] = &[
    ("equals", &["java.lang.Object"]),
    ("getClass", &[]),
    ("hashCode", &[]),
    ("notify", &[]),
    ("notifyAll", &[]),
    ("toString", &[]),
    ("wait", &[]),
    ("wait", &["long"]),
    ("wait", &["long", "int"]),
];

static OBJECT_METHOD_SET: OnceLock<MatcherSet> = OnceLock::new();

/// The shared matcher set built from [`OBJECT_METHODS`].
pub fn object_methods() -> &'static MatcherSet {
    OBJECT_METHOD_SET.get_or_init(|| MatcherSet::from_table(OBJECT_METHODS))
}

/// An unordered collection of [`SignatureMatcher`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatcherSet {
    matchers: Vec<SignatureMatcher>,
}

impl MatcherSet {
    pub fn new(matchers: Vec<SignatureMatcher>) -> Self {
        Self { matchers }
    }

    /// Build a set of any-owner matchers from `(name, parameter types)` rows.
    pub fn from_table(rows: &[(&str, &[&str])]) -> Self {
        rows.iter()
            .map(|(name, params)| SignatureMatcher::named(name).with_parameters(params))
            .collect()
    }

    /// True iff at least one matcher in the set matches `declaration`.
    pub fn any_match(&self, declaration: &MethodDeclaration) -> bool {
        self.matchers.iter().any(|m| m.matches(declaration))
    }

    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SignatureMatcher> {
        self.matchers.iter()
    }
}

impl FromIterator<SignatureMatcher> for MatcherSet {
    fn from_iter<I: IntoIterator<Item = SignatureMatcher>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

use bitflags::bitflags;

/// The kind of a declared type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    /// A class declaration.
    Class,
    /// An interface declaration (`interface Foo`).
    Interface,
    /// An enum declaration.
    Enum,
    /// An annotation type declaration (`@interface Foo`).
    Annotation,
}

bitflags! {
    /// Method modifiers the classifier cares about.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
    pub struct Modifiers: u8 {
        const STATIC = 1 << 0;
        /// The method has a body (`default` method on an interface).
        const DEFAULT = 1 << 1;
    }
}

/// The syntactic declaration of a method, available only for members read from source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDeclaration {
    /// Qualified name of the declaring type.
    pub owner: String,
    pub name: String,
    /// Fully qualified parameter type names, in declaration order.
    pub parameter_types: Vec<String>,
    /// 1-based line of the declaration, if known.
    pub line: Option<usize>,
}

/// A method member of a type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSymbol {
    pub name: String,
    pub modifiers: Modifiers,
    /// `None` when the member comes from a binary (class file) source.
    pub declaration: Option<MethodDeclaration>,
}

impl MethodSymbol {
    /// A method read from source, declared on `owner`.
    pub fn declared(owner: &str, name: &str, parameter_types: &[&str]) -> Self {
        Self {
            name: name.to_owned(),
            declaration: Some(MethodDeclaration {
                owner: owner.to_owned(),
                name: name.to_owned(),
                parameter_types: parameter_types.iter().map(|p| (*p).to_owned()).collect(),
                line: None,
            }),
            modifiers: Modifiers::empty(),
        }
    }

    /// A method known only from bytecode: no declaration, so no signature to match.
    pub fn binary(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            modifiers: Modifiers::empty(),
            declaration: None,
        }
    }

    pub fn at_line(mut self, line: usize) -> Self {
        if let Some(declaration) = &mut self.declaration {
            declaration.line = Some(line);
        }
        self
    }

    /// Source line of the declaration, when the method was read from source.
    pub fn line(&self) -> Option<usize> {
        self.declaration.as_ref().and_then(|d| d.line)
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn is_static(&self) -> bool {
        self.modifiers.contains(Modifiers::STATIC)
    }

    pub fn is_default(&self) -> bool {
        self.modifiers.contains(Modifiers::DEFAULT)
    }
}

/// A member of a type: a method, or anything else (field, nested type, initializer).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberSymbol {
    Method(MethodSymbol),
    Other { name: String },
}

impl MemberSymbol {
    pub fn name(&self) -> &str {
        match self {
            MemberSymbol::Method(m) => &m.name,
            MemberSymbol::Other { name } => name,
        }
    }
}

/// A resolved type declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSymbol {
    /// Fully qualified name, e.g. `com.acme.Handler`.
    pub qualified_name: String,
    pub kind: TypeKind,
    pub members: Vec<MemberSymbol>,
    /// Qualified names of the annotations present on the declaration.
    pub annotations: Vec<String>,
    /// Source file the type was declared in, if known.
    pub file: Option<String>,
    /// 1-based line of the type name, if known.
    pub line: Option<usize>,
}

impl TypeSymbol {
    pub fn new(qualified_name: &str, kind: TypeKind) -> Self {
        Self {
            qualified_name: qualified_name.to_owned(),
            kind,
            members: Vec::new(),
            annotations: Vec::new(),
            file: None,
            line: None,
        }
    }

    pub fn interface(qualified_name: &str) -> Self {
        Self::new(qualified_name, TypeKind::Interface)
    }

    pub fn with_method(mut self, method: MethodSymbol) -> Self {
        self.members.push(MemberSymbol::Method(method));
        self
    }

    pub fn with_member(mut self, member: MemberSymbol) -> Self {
        self.members.push(member);
        self
    }

    pub fn with_annotation(mut self, qualified_name: &str) -> Self {
        self.annotations.push(qualified_name.to_owned());
        self
    }

    /// The last segment of the qualified name (`Handler` for `com.acme.Handler`,
    /// `Inner` for `com.acme.Outer$Inner`).
    pub fn simple_name(&self) -> &str {
        self.qualified_name
            .rsplit(['.', '$'])
            .next()
            .unwrap_or(&self.qualified_name)
    }

    pub fn is_interface(&self) -> bool {
        self.kind == TypeKind::Interface
    }

    pub fn is_annotated_with(&self, qualified_name: &str) -> bool {
        self.annotations.iter().any(|a| a == qualified_name)
    }

    pub fn methods(&self) -> impl Iterator<Item = &MethodSymbol> {
        self.members.iter().filter_map(|m| match m {
            MemberSymbol::Method(method) => Some(method),
            MemberSymbol::Other { .. } => None,
        })
    }
}

/// A node in the type graph: a resolved type, or a supertype reference that could not be
/// resolved (missing dependency, partial classpath).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeNode {
    Type(TypeSymbol),
    Unresolved { name: String },
}

impl TypeNode {
    pub fn name(&self) -> &str {
        match self {
            TypeNode::Type(t) => &t.qualified_name,
            TypeNode::Unresolved { name } => name,
        }
    }

    pub fn as_type(&self) -> Option<&TypeSymbol> {
        match self {
            TypeNode::Type(t) => Some(t),
            TypeNode::Unresolved { .. } => None,
        }
    }
}

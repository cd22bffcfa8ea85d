//! Serialized symbol model: the resolved types of a Java project as produced by an
//! upstream front end, and the builder that turns it into a [`TypeGraph`].

pub mod pack;

use std::path::Path;

use petgraph::stable_graph::NodeIndex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::graph::TypeGraph;
use crate::graph::node::{
    MemberSymbol, MethodDeclaration, MethodSymbol, Modifiers, TypeKind, TypeSymbol,
};

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to decode packed snapshot: {0}")]
    Decode(#[from] bincode::error::DecodeError),
    #[error("failed to encode packed snapshot: {0}")]
    Encode(#[from] bincode::error::EncodeError),
    #[error("packed snapshot has format version {found}, expected {expected}")]
    VersionMismatch { found: u32, expected: u32 },
    #[error("type `{0}` is declared more than once")]
    DuplicateType(String),
    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Root of a snapshot document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub types: Vec<TypeEntry>,
}

/// One resolved type declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeEntry {
    /// Fully qualified name.
    pub name: String,
    pub kind: TypeKind,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default)]
    pub line: Option<usize>,
    /// Read from a class file rather than source: members carry no declarations.
    #[serde(default)]
    pub binary: bool,
    #[serde(default)]
    pub annotations: Vec<String>,
    #[serde(default)]
    pub superclass: Option<String>,
    /// Direct super-interfaces (`extends` on an interface, `implements` on a class).
    #[serde(default)]
    pub interfaces: Vec<String>,
    #[serde(default)]
    pub members: Vec<MemberEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberKind {
    Method,
    Field,
    Type,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberEntry {
    pub kind: MemberKind,
    pub name: String,
    /// Fully qualified parameter types (methods only).
    #[serde(default)]
    pub parameters: Vec<String>,
    /// Source modifiers; only `static` and `default` affect classification.
    #[serde(default)]
    pub modifiers: Vec<String>,
    #[serde(default)]
    pub line: Option<usize>,
}

impl Snapshot {
    pub fn from_json(text: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Build the type graph. Supertype names with no entry become unresolved nodes.
    pub fn build_graph(&self) -> Result<TypeGraph, SnapshotError> {
        let mut graph = TypeGraph::new();

        for entry in &self.types {
            if graph.lookup(&entry.name).is_some() {
                return Err(SnapshotError::DuplicateType(entry.name.clone()));
            }
            graph.add_type(entry.to_symbol());
        }

        for entry in &self.types {
            let Some(child) = graph.lookup(&entry.name) else {
                continue;
            };
            if let Some(superclass) = &entry.superclass {
                let parent = resolve(&mut graph, superclass);
                graph.add_superclass(child, parent);
            }
            for interface in &entry.interfaces {
                let parent = resolve(&mut graph, interface);
                graph.add_super_interface(child, parent);
            }
        }

        debug!(
            types = graph.type_count(),
            unresolved = graph.unresolved_count(),
            "type graph built"
        );
        Ok(graph)
    }
}

fn resolve(graph: &mut TypeGraph, name: &str) -> NodeIndex {
    match graph.lookup(name) {
        Some(idx) => idx,
        None => {
            debug!(name, "unresolved supertype");
            graph.add_unresolved(name)
        }
    }
}

impl TypeEntry {
    fn to_symbol(&self) -> TypeSymbol {
        let mut symbol = TypeSymbol::new(&self.name, self.kind);
        symbol.file = self.file.clone();
        symbol.line = self.line;
        symbol.annotations = self.annotations.clone();
        symbol.members = self
            .members
            .iter()
            .map(|m| m.to_member(&self.name, self.binary))
            .collect();
        symbol
    }
}

impl MemberEntry {
    fn to_member(&self, owner: &str, binary: bool) -> MemberSymbol {
        if self.kind != MemberKind::Method {
            return MemberSymbol::Other {
                name: self.name.clone(),
            };
        }
        let declaration = (!binary).then(|| MethodDeclaration {
            owner: owner.to_owned(),
            name: self.name.clone(),
            parameter_types: self.parameters.clone(),
            line: self.line,
        });
        MemberSymbol::Method(MethodSymbol {
            name: self.name.clone(),
            modifiers: parse_modifiers(&self.modifiers),
            declaration,
        })
    }
}

fn parse_modifiers(modifiers: &[String]) -> Modifiers {
    modifiers
        .iter()
        .fold(Modifiers::empty(), |acc, m| match m.as_str() {
            "static" => acc | Modifiers::STATIC,
            "default" => acc | Modifiers::DEFAULT,
            _ => acc,
        })
}

/// Load a snapshot from disk. Files ending in `.bin` are read as packed snapshots,
/// anything else as JSON.
pub fn load(path: &Path) -> Result<Snapshot, SnapshotError> {
    if path.extension().is_some_and(|e| e == "bin") {
        return pack::load_packed(path);
    }
    let text = std::fs::read_to_string(path).map_err(|source| SnapshotError::Io {
        path: path.display().to_string(),
        source,
    })?;
    Snapshot::from_json(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::node::TypeNode;

    const SAMPLE: &str = r#"{
      "types": [
        {
          "name": "com.acme.Handler",
          "kind": "interface",
          "file": "com/acme/Handler.java",
          "line": 3,
          "interfaces": ["com.acme.Base", "org.lib.Missing"],
          "members": [
            { "kind": "method", "name": "handle", "parameters": ["java.lang.String"], "line": 4 },
            { "kind": "method", "name": "describe", "modifiers": ["public", "default"] },
            { "kind": "field", "name": "ID" }
          ]
        },
        { "name": "com.acme.Base", "kind": "interface" },
        {
          "name": "org.lib.Compiled",
          "kind": "interface",
          "binary": true,
          "members": [ { "kind": "method", "name": "apply" } ]
        }
      ]
    }"#;

    #[test]
    fn test_parse_and_build() {
        let graph = Snapshot::from_json(SAMPLE).unwrap().build_graph().unwrap();
        assert_eq!(graph.type_count(), 3);
        assert_eq!(graph.unresolved_count(), 1);

        let handler = graph.lookup("com.acme.Handler").unwrap();
        let base = graph.lookup("com.acme.Base").unwrap();
        let missing = graph.lookup("org.lib.Missing").unwrap();
        let mut supers: Vec<_> = graph.super_interfaces(handler).collect();
        supers.sort();
        let mut expected = vec![base, missing];
        expected.sort();
        assert_eq!(supers, expected);
        assert!(matches!(graph.node(missing), TypeNode::Unresolved { .. }));
    }

    #[test]
    fn test_members_and_modifiers() {
        let graph = Snapshot::from_json(SAMPLE).unwrap().build_graph().unwrap();
        let handler = graph.node(graph.lookup("com.acme.Handler").unwrap()).as_type().unwrap();
        assert_eq!(handler.file.as_deref(), Some("com/acme/Handler.java"));
        assert_eq!(handler.line, Some(3));
        assert_eq!(handler.members.len(), 3);

        let methods: Vec<_> = handler.methods().collect();
        let declaration = methods[0].declaration.as_ref().unwrap();
        assert_eq!(declaration.parameter_types, vec!["java.lang.String".to_string()]);
        assert_eq!(declaration.owner, "com.acme.Handler");
        assert_eq!(methods[0].line(), Some(4));
        assert!(!methods[0].is_default());
        assert!(methods[1].is_default());
        assert!(!methods[1].is_static());
    }

    #[test]
    fn test_binary_types_have_no_declarations() {
        let graph = Snapshot::from_json(SAMPLE).unwrap().build_graph().unwrap();
        let compiled = graph.node(graph.lookup("org.lib.Compiled").unwrap()).as_type().unwrap();
        assert!(compiled.methods().all(|m| m.declaration.is_none()));
    }

    #[test]
    fn test_forward_references_resolve() {
        let json = r#"{ "types": [
            { "name": "a.Child", "kind": "interface", "interfaces": ["a.Parent"] },
            { "name": "a.Parent", "kind": "interface" }
        ] }"#;
        let graph = Snapshot::from_json(json).unwrap().build_graph().unwrap();
        assert_eq!(graph.unresolved_count(), 0);
    }

    #[test]
    fn test_superclass_edge() {
        let json = r#"{ "types": [
            { "name": "a.Impl", "kind": "class", "superclass": "java.lang.Object", "interfaces": ["a.I"] },
            { "name": "a.I", "kind": "interface" }
        ] }"#;
        let graph = Snapshot::from_json(json).unwrap().build_graph().unwrap();
        let imp = graph.lookup("a.Impl").unwrap();
        let object = graph.superclass(imp).unwrap();
        assert_eq!(graph.node(object).name(), "java.lang.Object");
        assert_eq!(graph.super_interfaces(imp).count(), 1);
    }

    #[test]
    fn test_duplicate_type_is_an_error() {
        let json = r#"{ "types": [
            { "name": "a.I", "kind": "interface" },
            { "name": "a.I", "kind": "class" }
        ] }"#;
        let err = Snapshot::from_json(json).unwrap().build_graph().unwrap_err();
        assert!(matches!(err, SnapshotError::DuplicateType(ref n) if n == "a.I"));
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(matches!(
            Snapshot::from_json("{ \"types\": 3 }"),
            Err(SnapshotError::Json(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let tmp = tempfile::tempdir().unwrap();
        let err = load(&tmp.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, SnapshotError::Io { .. }));
    }
}

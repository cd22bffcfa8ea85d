/// The kind of directed edge between two type nodes. Edges point from subtype to supertype.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeKind {
    /// `interface A extends B` or `class A implements B`: B is a direct super-interface of A.
    SuperInterface,
    /// `class A extends B`.
    SuperClass,
}

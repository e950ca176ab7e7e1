use indexmap::IndexMap;

use crate::tree::{Node, REFERENCE_TAG};

const IMPORT_TAG: &str = "import";

/// What a top-level element of a module stands for, decided once at load time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleItem {
    /// `<import module=".."/>`: pulls every declaration of another module.
    Import(Node),
    /// `<test id=".."/>`: a top-level reference to resolve.
    TestRef(Node),
    /// Any other element: a reusable named subtree.
    Declaration(Node),
}

impl From<Node> for ModuleItem {
    fn from(node: Node) -> Self {
        match node.name.as_str() {
            IMPORT_TAG => Self::Import(node),
            REFERENCE_TAG => Self::TestRef(node),
            _ => Self::Declaration(node),
        }
    }
}

/// Ordered, name-keyed declarations of one module.
///
/// At most one declaration per name is live: inserting a name that already
/// exists drops the old entry and appends the new one at the end.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Declarations {
    entries: IndexMap<String, Node>,
}

impl Declarations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a declaration, shadowing any earlier one with the same name.
    ///
    /// Returns the shadowed declaration, if any.
    pub fn insert(&mut self, declaration: Node) -> Option<Node> {
        let shadowed = self.entries.shift_remove(&declaration.name);
        self.entries.insert(declaration.name.clone(), declaration);
        shadowed
    }

    /// Registers every declaration of `other` in its order, with shadowing.
    pub fn extend(&mut self, other: Declarations) {
        for declaration in other.entries.into_values() {
            self.insert(declaration);
        }
    }

    pub fn get(&self, name: &str) -> Option<&Node> {
        self.entries.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<Node> for Declarations {
    fn from_iter<I: IntoIterator<Item = Node>>(iter: I) -> Self {
        let mut declarations = Self::new();
        for node in iter {
            declarations.insert(node);
        }
        declarations
    }
}

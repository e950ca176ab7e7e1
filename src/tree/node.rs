use indexmap::IndexMap;
use std::path::PathBuf;

use crate::error::{ResolveError, ResolveResult};

/// Tag of a node that references a declaration by its `id` attribute.
pub const REFERENCE_TAG: &str = "test";

/// Attribute naming the declaration a reference points to.
pub const ID_ATTRIBUTE: &str = "id";

/// A named, attributed, ordered tree node.
///
/// `children` is authoritative for structure; `content` keeps the raw inner
/// markup so leaves whose body is not made of elements survive a round trip.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Node {
    pub name: String,
    pub attributes: IndexMap<String, String>,
    pub content: String,
    pub children: Vec<Node>,
    /// Module the node was pulled from. Only set on nodes produced by resolution.
    pub origin_module: Option<PathBuf>,
}

impl Node {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// Returns the value of a required attribute.
    pub fn attribute(&self, name: &str) -> ResolveResult<&str> {
        self.attributes
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| ResolveError::MissingAttribute {
                node: self.name.clone(),
                attribute: name.to_string(),
            })
    }

    /// True for `<test id=".."/>` nodes found inside a declaration body.
    pub fn is_reference(&self) -> bool {
        self.name == REFERENCE_TAG
    }

    /// Depth-first, parent-before-children visit of every descendant.
    ///
    /// The visitor receives `(node, parent)` and returns whether to descend
    /// into the node; nodes without children are never descended into.
    pub fn walk<E>(&self, visit: &mut impl FnMut(&Node, &Node) -> Result<bool, E>) -> Result<(), E> {
        for child in &self.children {
            if visit(child, self)? && !child.children.is_empty() {
                child.walk(visit)?;
            }
        }
        Ok(())
    }
}

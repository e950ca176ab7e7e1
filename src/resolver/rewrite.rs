use std::path::Path;
use tracing::trace;

use crate::{
    error::{ResolveError, ResolveResult},
    resolver::{Declarations, ModuleLoader, is_qualified_id, slash_name},
    tree::{ID_ATTRIBUTE, Node},
};

/// Expands the references nested inside resolved top-level trees.
///
/// Each tree is owned by the pass that rewrites it. Children are taken out
/// of their parent, rewritten into new values and installed back, so a
/// substitution replaces a subtree wholesale.
pub(crate) struct Rewriter<'a> {
    loader: ModuleLoader<'a>,
    root_path: &'a Path,
    root_declarations: &'a Declarations,
    max_nesting_depth: usize,
}

impl<'a> Rewriter<'a> {
    pub(crate) fn new(
        loader: ModuleLoader<'a>,
        root_path: &'a Path,
        root_declarations: &'a Declarations,
        max_nesting_depth: usize,
    ) -> Self {
        Self {
            loader,
            root_path,
            root_declarations,
            max_nesting_depth,
        }
    }

    pub(crate) fn expand(&self, mut tree: Node) -> ResolveResult<Node> {
        let current_module = tree
            .origin_module
            .clone()
            .unwrap_or_else(|| self.root_path.to_path_buf());
        self.rewrite_children(&mut tree, &current_module, 0)?;
        Ok(tree)
    }

    fn rewrite_children(
        &self,
        parent: &mut Node,
        current_module: &Path,
        expansions: usize,
    ) -> ResolveResult<()> {
        let children = std::mem::take(&mut parent.children);
        let mut rewritten = Vec::with_capacity(children.len());
        for child in children {
            rewritten.push(self.rewrite_node(child, parent, current_module, expansions)?);
        }
        parent.children = rewritten;
        Ok(())
    }

    fn rewrite_node(
        &self,
        node: Node,
        parent: &Node,
        current_module: &Path,
        expansions: usize,
    ) -> ResolveResult<Node> {
        let (mut node, expansions) = if node.is_reference() {
            let id = node.attribute(ID_ATTRIBUTE)?;
            if expansions >= self.max_nesting_depth {
                return Err(ResolveError::NestingTooDeep {
                    id: id.to_string(),
                    limit: self.max_nesting_depth,
                });
            }
            let substituted = self.substitute(id, parent, current_module)?;
            trace!(
                id,
                parent = %parent.name,
                declaration = %substituted.name,
                "substituted nested reference"
            );
            (substituted, expansions + 1)
        } else {
            (node, expansions)
        };

        if node.children.is_empty() {
            return Ok(node);
        }

        // A substituted declaration's own module becomes the lookup context for its body
        let module = node
            .origin_module
            .clone()
            .unwrap_or_else(|| current_module.to_path_buf());
        self.rewrite_children(&mut node, &module, expansions)?;
        Ok(node)
    }

    fn substitute(&self, id: &str, parent: &Node, current_module: &Path) -> ResolveResult<Node> {
        let qualified = is_qualified_id(id);

        if current_module == self.root_path {
            if qualified {
                let declaration = self.loader.get_qualified_declaration(id)?;
                reject_direct_cycle(parent, &declaration)?;
                reject_indirect_cycle(parent, &declaration)?;
                return Ok(declaration);
            }

            let mut declaration = self.root_declarations.get(id).cloned().ok_or_else(|| {
                ResolveError::DeclarationNotFound {
                    name: id.to_string(),
                    module: self.root_path.to_path_buf(),
                }
            })?;
            reject_direct_cycle(parent, &declaration)?;
            declaration.origin_module = Some(self.root_path.to_path_buf());
            return Ok(declaration);
        }

        // Outside the root module a qualified substitution only gets the direct check
        if qualified {
            let declaration = self.loader.get_qualified_declaration(id)?;
            reject_direct_cycle(parent, &declaration)?;
            return Ok(declaration);
        }

        // `current_module` already is the parent's origin whenever the parent has one
        let mut declaration = self.loader.get_declaration(current_module, id)?;
        reject_direct_cycle(parent, &declaration)?;
        declaration.origin_module = Some(current_module.to_path_buf());
        Ok(declaration)
    }
}

/// Rejects a substitution whose declaration is the parent itself, by tag or by body.
fn reject_direct_cycle(parent: &Node, declaration: &Node) -> ResolveResult<()> {
    if parent.name == declaration.name || parent.content == declaration.content {
        return Err(ResolveError::RecursionRejected {
            parent: parent.name.clone(),
            target: declaration.name.clone(),
            nested_id: None,
        });
    }
    Ok(())
}

/// Rejects a declaration whose body still references the parent (A -> B -> A).
fn reject_indirect_cycle(parent: &Node, declaration: &Node) -> ResolveResult<()> {
    let parent_id = slash_name(&parent.name);

    declaration.walk(&mut |node, _| {
        if node.is_reference() {
            let nested_id = node.attribute(ID_ATTRIBUTE)?;
            if slash_name(nested_id) == parent_id {
                return Err(ResolveError::RecursionRejected {
                    parent: parent.name.clone(),
                    target: declaration.name.clone(),
                    nested_id: Some(nested_id.to_string()),
                });
            }
        }
        Ok(true)
    })
}

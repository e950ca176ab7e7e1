use std::path::Path;
use tracing::{debug, info};

use crate::{
    error::{ResolveError, ResolveResult},
    resolver::{ModuleConfig, ModuleLayout, ModuleLoader, is_qualified_id, rewrite::Rewriter},
    tree::{ID_ATTRIBUTE, Node},
};

/// Default limit on nested substitutions along one path of a test tree.
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 64;

/// Resolves the test references of a root module into fully expanded trees.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    loader: ModuleLoader<'a>,
    max_nesting_depth: usize,
}

impl<'a> Resolver<'a> {
    pub fn new(layout: &'a ModuleLayout) -> Self {
        Self {
            loader: ModuleLoader::new(layout),
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
        }
    }

    pub fn with_max_nesting_depth(mut self, max_nesting_depth: usize) -> Self {
        self.max_nesting_depth = max_nesting_depth;
        self
    }

    /// Loads `root_path`, resolves each top-level `<test id=".."/>` to its
    /// declaration, then expands the references nested inside those trees.
    ///
    /// The first error aborts the whole pass; there is no partial output.
    pub fn resolve(&self, root_path: &Path) -> ResolveResult<ModuleConfig> {
        let mut config = self.loader.load(root_path, true)?;

        info!(
            root = %root_path.display(),
            tests = config.unresolved_tests.len(),
            "resolving top-level tests"
        );

        let top_level = config
            .unresolved_tests
            .iter()
            .map(|reference| self.resolve_top_level(&config, reference))
            .collect::<ResolveResult<Vec<_>>>()?;

        let rewriter = Rewriter::new(
            self.loader,
            root_path,
            &config.declarations,
            self.max_nesting_depth,
        );
        let resolved = top_level
            .into_iter()
            .map(|tree| rewriter.expand(tree))
            .collect::<ResolveResult<Vec<_>>>()?;

        config.resolved_tests = resolved;
        Ok(config)
    }

    fn resolve_top_level(&self, config: &ModuleConfig, reference: &Node) -> ResolveResult<Node> {
        let id = reference.attribute(ID_ATTRIBUTE)?;

        let tree = if is_qualified_id(id) {
            self.loader.get_qualified_declaration(id)?
        } else {
            let mut declaration = config
                .declarations
                .get(id)
                .cloned()
                .ok_or_else(|| ResolveError::UnresolvedReference { id: id.to_string() })?;
            declaration.origin_module = Some(config.file_path.clone());
            declaration
        };

        debug!(
            id,
            test = %tree.name,
            module = ?tree.origin_module,
            "resolved top-level test"
        );
        Ok(tree)
    }
}

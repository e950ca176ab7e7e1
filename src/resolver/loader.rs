use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, trace, warn};

use crate::{
    error::{ResolveError, ResolveResult},
    resolver::{Declarations, ModuleItem, ModuleLayout, display_name, reference_name},
    tree::{Node, TESTS_TAG, parse_document},
};

const MODULE_ATTRIBUTE: &str = "module";
/// Pseudo declaration name appended to an import's module so it parses as a qualified id.
const IMPORT_ALL: &str = "All";

/// Result of loading one module file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleConfig {
    pub file_path: PathBuf,
    /// Declarations of the module itself and everything it imports.
    pub declarations: Declarations,
    /// Top-level `<test id=".."/>` references, in document order.
    pub unresolved_tests: Vec<Node>,
    /// One expanded tree per top-level reference, filled in by the resolver.
    pub resolved_tests: Vec<Node>,
    /// Raw source text, kept for the root module only.
    pub source: Option<String>,
}

/// Modules whose imports are currently being followed, outermost first.
#[derive(Debug, Default)]
struct ImportStack {
    stack: Vec<PathBuf>,
}

impl ImportStack {
    fn push(&mut self, path: &Path) {
        self.stack.push(path.to_path_buf());
    }

    fn pop(&mut self) {
        self.stack.pop();
    }

    // Modules from the earlier visit of `path` to the top of the stack, if `path` is already open
    fn cycle_to(&self, path: &Path) -> Option<&[PathBuf]> {
        self.stack
            .iter()
            .rposition(|open| open == path)
            .map(|index| &self.stack[index..])
    }
}

/// Reads modules and builds their declaration registries.
///
/// Nothing is cached: every call re-reads the files it needs, so loaded
/// registries are plain values owned by the caller.
#[derive(Debug, Clone, Copy)]
pub struct ModuleLoader<'a> {
    layout: &'a ModuleLayout,
}

impl<'a> ModuleLoader<'a> {
    pub fn new(layout: &'a ModuleLayout) -> Self {
        Self { layout }
    }

    /// Loads `path` and, transitively, every module it imports.
    pub fn load(&self, path: &Path, is_root: bool) -> ResolveResult<ModuleConfig> {
        let mut imports = ImportStack::default();
        self.load_module(path, is_root, &mut imports)
    }

    /// Declarations visible in the module at `path`, imports included.
    pub fn get_declarations(&self, path: &Path) -> ResolveResult<Declarations> {
        Ok(self.load(path, false)?.declarations)
    }

    /// Looks up a single declaration of the module at `path`.
    pub fn get_declaration(&self, path: &Path, name: &str) -> ResolveResult<Node> {
        self.get_declarations(path)?
            .get(name)
            .cloned()
            .ok_or_else(|| ResolveError::DeclarationNotFound {
                name: name.to_string(),
                module: path.to_path_buf(),
            })
    }

    /// Fetches the declaration a qualified id names, tagged `pkg.Sub.Name`
    /// and stamped with the module it came from.
    pub fn get_qualified_declaration(&self, id: &str) -> ResolveResult<Node> {
        let module_path = self.layout.module_path(id)?;
        let mut declaration = self.get_declaration(&module_path, reference_name(id))?;
        declaration.name = display_name(id);
        declaration.origin_module = Some(module_path);
        Ok(declaration)
    }

    fn load_module(
        &self,
        path: &Path,
        is_root: bool,
        imports: &mut ImportStack,
    ) -> ResolveResult<ModuleConfig> {
        if let Some(cycle) = imports.cycle_to(path) {
            let chain = cycle
                .iter()
                .chain(std::iter::once(&path.to_path_buf()))
                .map(|module| module.display().to_string())
                .collect::<Vec<_>>()
                .join(" -> ");
            return Err(ResolveError::CircularImport { chain });
        }

        debug!(module = %path.display(), "loading module");

        let bytes = fs::read(path).map_err(|source| ResolveError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let source = String::from_utf8(bytes).map_err(|err| ResolveError::Parse {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        let document = parse_document(&source, path)?;

        if document.name != TESTS_TAG {
            warn!(
                module = %path.display(),
                root = %document.name,
                "module root element is not <{TESTS_TAG}>"
            );
        }

        let mut config = ModuleConfig {
            file_path: path.to_path_buf(),
            ..ModuleConfig::default()
        };

        imports.push(path);
        for child in document.children {
            match ModuleItem::from(child) {
                ModuleItem::Import(node) => {
                    let module = node.attribute(MODULE_ATTRIBUTE)?;
                    let module_path = self
                        .layout
                        .module_path(&format!("{module}/{IMPORT_ALL}"))?;

                    debug!(
                        module = %path.display(),
                        import = %module_path.display(),
                        "following import"
                    );
                    let imported = self.load_module(&module_path, false, imports)?;
                    config.declarations.extend(imported.declarations);
                }
                ModuleItem::TestRef(node) => config.unresolved_tests.push(node),
                ModuleItem::Declaration(node) => {
                    let name = node.name.clone();
                    if config.declarations.insert(node).is_some() {
                        trace!(module = %path.display(), declaration = %name, "declaration shadowed");
                    }
                }
            }
        }
        imports.pop();

        if is_root {
            config.source = Some(source);
        }

        debug!(
            module = %path.display(),
            declarations = config.declarations.len(),
            tests = config.unresolved_tests.len(),
            "module loaded"
        );

        Ok(config)
    }
}

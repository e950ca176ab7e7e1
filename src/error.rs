use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading modules and resolving test references.
///
/// Every failure is fatal for the resolve pass that produced it: nothing in the
/// pipeline recovers locally, the first error is handed back to the caller.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ResolveError {
    /// A module file could not be opened or read.
    #[error("failed to read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A module file is not well-formed markup.
    #[error("failed to parse '{}': {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    /// An identifier was handed to the module path resolver but is not a module path.
    #[error("'{id}' module path was not resolved")]
    InvalidReferenceSyntax { id: String },

    /// A required attribute (`module` on imports, `id` on tests) is absent.
    #[error("node {node} missing attribute {attribute}")]
    MissingAttribute { node: String, attribute: String },

    /// The searched module has no declaration with this name.
    #[error("no declarations found for {name} in {}", .module.display())]
    DeclarationNotFound { name: String, module: PathBuf },

    /// A top-level `<test id=".."/>` of the root module names nothing.
    #[error("<test id=\"{id}\" ... /> was not resolved")]
    UnresolvedReference { id: String },

    /// A substitution would make a declaration expand into itself.
    #[error("recursion links are not allowed: {parent} -> {target}{}", nested_suffix(.nested_id))]
    RecursionRejected {
        parent: String,
        target: String,
        nested_id: Option<String>,
    },

    /// A chain of `import` directives leads back to a module that is still loading.
    #[error("circular import: {chain}")]
    CircularImport { chain: String },

    /// Expansion went deeper than the configured nesting limit.
    #[error("<test id=\"{id}\" .../> exceeds the nesting limit of {limit} levels")]
    NestingTooDeep { id: String, limit: usize },
}

fn nested_suffix(nested_id: &Option<String>) -> String {
    match nested_id {
        Some(id) => format!(" with child <test id=\"{id}\" .../>"),
        None => String::new(),
    }
}

pub type ResolveResult<T> = Result<T, ResolveError>;

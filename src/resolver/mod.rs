mod loader;
mod module_path;
mod registry;
mod resolve;
mod rewrite;

pub use loader::{ModuleConfig, ModuleLoader};
pub use module_path::{
    ModuleLayout, display_name, is_qualified_id, reference_name, slash_name,
};
pub use registry::{Declarations, ModuleItem};
pub use resolve::{DEFAULT_MAX_NESTING_DEPTH, Resolver};

use std::path::{Path, PathBuf};

use crate::error::{ResolveError, ResolveResult};

const COMMON_PREFIX: &str = "common";
const COMMON_MODULE_FILE: &str = "common.xml";
const MODULE_EXTENSION: &str = "xml";

/// Maps qualified reference ids onto module files.
///
/// Ids look like `segment/.../Name`: every leading segment names a directory
/// or file stem, the final segment names the declaration inside that file.
///
/// | id                       | module file                      |
/// |--------------------------|----------------------------------|
/// | `common/Name`            | `<common_root>/common.xml`       |
/// | `common/folder/file/Name`| `<common_root>/folder/file.xml`  |
/// | `pkg/sub/Name`           | `<configs_root>/pkg/sub.xml`     |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleLayout {
    pub common_root: PathBuf,
    pub configs_root: PathBuf,
}

impl ModuleLayout {
    pub fn new(common_root: impl Into<PathBuf>, configs_root: impl Into<PathBuf>) -> Self {
        Self {
            common_root: common_root.into(),
            configs_root: configs_root.into(),
        }
    }

    /// Resolves a qualified id to the module file that declares it.
    ///
    /// Bare names are rejected; callers branch on [`is_qualified_id`] first.
    pub fn module_path(&self, id: &str) -> ResolveResult<PathBuf> {
        let Some((module, _name)) = split_qualified_id(id) else {
            return Err(ResolveError::InvalidReferenceSyntax { id: id.to_string() });
        };

        let mut segments = module.split('/');
        let first = segments.next().unwrap_or_default();

        if first == COMMON_PREFIX {
            let rest: Vec<&str> = segments.collect();
            if rest.is_empty() {
                return Ok(self.common_root.join(COMMON_MODULE_FILE));
            }
            return Ok(module_file(&self.common_root, &rest));
        }

        let all: Vec<&str> = module.split('/').collect();
        Ok(module_file(&self.configs_root, &all))
    }
}

fn module_file(root: &Path, segments: &[&str]) -> PathBuf {
    let mut path = root.to_path_buf();
    for segment in segments {
        path.push(segment);
    }
    path.set_extension(MODULE_EXTENSION);
    path
}

/// True when `id` follows the `segment/.../Name` grammar.
///
/// Segments use `[A-Za-z0-9_-]`, the final name `[A-Za-z0-9]`.
pub fn is_qualified_id(id: &str) -> bool {
    split_qualified_id(id).is_some()
}

/// Declaration name at the end of a qualified id (`pkg/Sub/Name` -> `Name`).
pub fn reference_name(id: &str) -> &str {
    id.rsplit_once('/').map_or(id, |(_, name)| name)
}

/// Tag given to a declaration fetched through a qualified id (`pkg/Sub/Name` -> `pkg.Sub.Name`).
pub fn display_name(id: &str) -> String {
    id.replace('/', ".")
}

/// Inverse of [`display_name`].
pub fn slash_name(tag: &str) -> String {
    tag.replace('.', "/")
}

fn split_qualified_id(id: &str) -> Option<(&str, &str)> {
    let (module, name) = id.rsplit_once('/')?;

    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }

    let segments_valid = module.split('/').all(|segment| {
        !segment.is_empty()
            && segment
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    });

    segments_valid.then_some((module, name))
}

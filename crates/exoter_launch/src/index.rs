//! Package index: resolves package source checkouts and installed share directories

use std::path::{Path, PathBuf};

/// Environment variable listing colon-separated install prefixes to search
pub const PREFIX_PATH_ENV: &str = "AMENT_PREFIX_PATH";

/// Marker file identifying a package root inside the workspace source tree
const PACKAGE_MARKER: &str = "package.xml";

/// Index over a workspace source tree and a set of install prefixes
///
/// Lookups are pure: the same index returns the same paths for the same
/// package name, and a failed lookup has no side effects.
#[derive(Debug, Clone)]
pub struct PackageIndex {
    /// Root of the workspace source tree (the `src/` of a colcon-style workspace)
    workspace_src: PathBuf,
    /// Install prefixes searched for `share/<package>` directories
    prefix_paths: Vec<PathBuf>,
}

impl PackageIndex {
    /// Create an index over a workspace source tree with no install prefixes
    pub fn new(workspace_src: impl Into<PathBuf>) -> Self {
        Self {
            workspace_src: workspace_src.into(),
            prefix_paths: Vec::new(),
        }
    }

    /// Create an index seeded with prefixes from the environment
    pub fn discover(workspace_src: impl Into<PathBuf>) -> Self {
        let mut index = Self::new(workspace_src);
        if let Ok(paths) = std::env::var(PREFIX_PATH_ENV) {
            for path in std::env::split_paths(&paths) {
                if !path.as_os_str().is_empty() {
                    index.prefix_paths.push(path);
                }
            }
        }
        index
    }

    /// Add an install prefix to search
    pub fn with_prefix(mut self, prefix: impl Into<PathBuf>) -> Self {
        self.prefix_paths.push(prefix.into());
        self
    }

    /// Root of the workspace source tree
    pub fn workspace_src(&self) -> &Path {
        &self.workspace_src
    }

    /// Resolve the source checkout directory of a package
    ///
    /// A package directory is a directory named after the package that
    /// contains a `package.xml`. Direct children of the workspace source
    /// tree are checked first, then one level of repository subdirectories.
    pub fn source_dir(&self, package: &str) -> Result<PathBuf, IndexError> {
        let direct = self.workspace_src.join(package);
        if is_package_dir(&direct) {
            return Ok(direct);
        }

        // Workspaces often group packages under per-repository directories
        let entries = std::fs::read_dir(&self.workspace_src).map_err(|source| IndexError::Io {
            path: self.workspace_src.clone(),
            source,
        })?;
        for entry in entries.flatten() {
            let nested = entry.path().join(package);
            if is_package_dir(&nested) {
                return Ok(nested);
            }
        }

        Err(IndexError::PackageNotFound {
            package: package.to_string(),
            searched: vec![self.workspace_src.clone()],
        })
    }

    /// Resolve the installed share directory of a package
    ///
    /// Returns `<prefix>/share/<package>` for the first prefix that has it.
    pub fn share_dir(&self, package: &str) -> Result<PathBuf, IndexError> {
        for prefix in &self.prefix_paths {
            let share = prefix.join("share").join(package);
            if share.is_dir() {
                return Ok(share);
            }
        }

        Err(IndexError::PackageNotFound {
            package: package.to_string(),
            searched: self.prefix_paths.clone(),
        })
    }
}

fn is_package_dir(path: &Path) -> bool {
    path.is_dir() && path.join(PACKAGE_MARKER).is_file()
}

/// Errors that can occur during package lookup
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error("Package '{package}' not found (searched: {})", format_paths(.searched))]
    PackageNotFound {
        package: String,
        searched: Vec<PathBuf>,
    },

    #[error("Failed to scan '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn format_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

//! Installed dependency lookup
//!
//! Locates the root directory of an installed package dependency the way
//! the package loader would: by walking `node_modules` directories from a
//! start directory up to the filesystem root, then the global locations.
//! Typical use is serving the files of a client-side library that was
//! installed as a dependency of the application.

use std::path::{Path, PathBuf};

use crate::utils::fs::{is_dir, join_paths};

/// Name of the directory dependencies are installed into
pub const DEPENDENCY_DIR: &str = "node_modules";

/// Environment variable listing additional global search directories
pub const MODULE_PATH_ENV: &str = "NODE_PATH";

/// Global directories searched below the home directory, in order
pub const HOME_MODULE_DIRS: [&str; 2] = [".node_modules", ".node_libraries"];

/// Dependency search path configuration
///
/// Holds everything that determines where [`ModulePaths::resolve`] looks.
/// [`ModulePaths::from_env`] mirrors the loader's defaults; the `with_*`
/// methods adjust individual parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModulePaths {
    /// Directory the upward walk starts in (current directory when `None`)
    pub start_dir: Option<PathBuf>,
    /// Name of the per-directory dependency folder
    pub dependency_dir: String,
    /// Directories searched after the upward walk, in order
    pub global_paths: Vec<PathBuf>,
}

impl Default for ModulePaths {
    fn default() -> Self {
        Self {
            start_dir: None,
            dependency_dir: DEPENDENCY_DIR.to_string(),
            global_paths: Vec::new(),
        }
    }
}

impl ModulePaths {
    /// Create a configuration without global search directories
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the configuration the loader of this process would use
    ///
    /// Global directories are the entries of `NODE_PATH` followed by
    /// `~/.node_modules` and `~/.node_libraries`.
    pub fn from_env() -> Self {
        let mut global_paths: Vec<PathBuf> = std::env::var_os(MODULE_PATH_ENV)
            .map(|paths| {
                std::env::split_paths(&paths)
                    .filter(|p| !p.as_os_str().is_empty())
                    .collect()
            })
            .unwrap_or_default();

        if let Some(home) = dirs::home_dir() {
            global_paths.extend(HOME_MODULE_DIRS.iter().map(|dir| home.join(dir)));
        }

        Self {
            global_paths,
            ..Self::default()
        }
    }

    /// Set the directory the upward walk starts in
    pub fn with_start_dir<P: Into<PathBuf>>(mut self, start_dir: P) -> Self {
        self.start_dir = Some(start_dir.into());
        self
    }

    /// Set the name of the dependency folder
    pub fn with_dependency_dir<S: Into<String>>(mut self, dependency_dir: S) -> Self {
        self.dependency_dir = dependency_dir.into();
        self
    }

    /// Append a global search directory
    pub fn with_global_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.global_paths.push(path.into());
        self
    }

    /// The ordered list of directories searched for dependencies
    ///
    /// One `<dir>/node_modules` per ancestor of the start directory (closest
    /// first, skipping ancestors that are themselves dependency folders),
    /// followed by the global directories.
    pub fn search_paths(&self) -> Vec<PathBuf> {
        let start = match &self.start_dir {
            // `absolute` keeps `..`, which would walk through non-ancestors
            Some(dir) => join_paths([std::path::absolute(dir).unwrap_or_else(|_| dir.clone())]),
            None => std::env::current_dir().unwrap_or_else(|e| {
                tracing::debug!("No current directory for dependency lookup: {}", e);
                PathBuf::new()
            }),
        };

        let mut paths: Vec<PathBuf> = start
            .ancestors()
            .filter(|dir| !dir.as_os_str().is_empty())
            .filter(|dir| {
                dir.file_name()
                    .map_or(true, |name| name != self.dependency_dir.as_str())
            })
            .map(|dir| dir.join(&self.dependency_dir))
            .collect();
        paths.extend(self.global_paths.iter().cloned());
        paths
    }

    /// Find the installed directory of a dependency
    ///
    /// # Returns
    ///
    /// The first `<search path>/<modulename>` that is a directory, or `None`
    pub fn find(&self, modulename: &str) -> Option<PathBuf> {
        self.search_paths()
            .into_iter()
            .find(|dir| is_dir([dir.as_path(), Path::new(modulename)]))
            .map(|dir| join_paths([dir.as_path(), Path::new(modulename)]))
    }

    /// Determine the root path of a dependency, with fallbacks
    ///
    /// Returns the located directory, else `default_value` when given, else
    /// the conventional `node_modules/<modulename>` relative path.
    pub fn resolve(&self, modulename: &str, default_value: Option<&Path>) -> PathBuf {
        self.find(modulename).unwrap_or_else(|| {
            tracing::debug!("Dependency {} not found on the search path", modulename);
            default_value.map_or_else(
                || join_paths([self.dependency_dir.as_str(), modulename]),
                Path::to_path_buf,
            )
        })
    }

    /// Build a path below the root of a dependency
    pub fn make_root_path<I, P>(&self, modulename: &str, segments: I) -> PathBuf
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let root = self.resolve(modulename, None);
        join_paths(
            std::iter::once(root).chain(segments.into_iter().map(|s| s.as_ref().to_path_buf())),
        )
    }
}

/// Determine the physical root path of an installed dependency
///
/// Searches the process's dependency search path (see
/// [`ModulePaths::from_env`]) starting in the current directory.
///
/// # Example
///
/// ```rust
/// use valkit::module_root::get_module_root_path;
/// use std::path::{Path, PathBuf};
///
/// let fallback = Path::new("/opt/fallback");
/// let found = get_module_root_path("surely-not-installed-anywhere", Some(fallback));
/// assert_eq!(found, PathBuf::from("/opt/fallback"));
///
/// let found = get_module_root_path("surely-not-installed-anywhere", None);
/// assert_eq!(found, PathBuf::from("node_modules/surely-not-installed-anywhere"));
/// ```
pub fn get_module_root_path(modulename: &str, default_value: Option<&Path>) -> PathBuf {
    ModulePaths::from_env().resolve(modulename, default_value)
}

/// Build a path below the physical root of an installed dependency
///
/// # Example
///
/// ```rust
/// use valkit::module_root::make_module_root_path;
/// use std::path::PathBuf;
///
/// let path = make_module_root_path("surely-not-installed-anywhere", ["dist", "lib.min.js"]);
/// assert_eq!(path, PathBuf::from("node_modules/surely-not-installed-anywhere/dist/lib.min.js"));
/// ```
pub fn make_module_root_path<I, P>(modulename: &str, segments: I) -> PathBuf
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    ModulePaths::from_env().make_root_path(modulename, segments)
}

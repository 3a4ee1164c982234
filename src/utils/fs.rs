//! Filesystem convenience helpers
//!
//! Thin synchronous wrappers over `std::fs`. The existence checks never fail;
//! directory creation comes in a propagating and a swallowing flavour.

use std::fs::DirBuilder;
use std::path::{Component, Path, PathBuf};

use crate::error::{Result, ValkitError};

/// Permission bits applied to created directories unless told otherwise
pub const DEFAULT_DIR_MODE: u32 = 0o755;

/// Join path segments and normalize the result lexically
///
/// Unlike [`PathBuf::push`], a later segment that carries a root does not
/// replace what came before: `join_paths(["a", "/b"])` is `a/b`. Empty
/// segments are skipped, `.` components are dropped and `..` removes the
/// preceding normal component. A relative path that collapses completely,
/// or no segments at all, yields `.`.
///
/// # Example
///
/// ```rust
/// use valkit::utils::fs::join_paths;
/// use std::path::PathBuf;
///
/// assert_eq!(join_paths(["lib", "/vendor", "./x/../jquery"]), PathBuf::from("lib/vendor/jquery"));
/// assert_eq!(join_paths(["/srv", "..", "..", "etc"]), PathBuf::from("/etc"));
/// assert_eq!(join_paths(Vec::<&str>::new()), PathBuf::from("."));
/// ```
pub fn join_paths<I, P>(segments: I) -> PathBuf
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let mut root = PathBuf::new();
    let mut parts: Vec<PathBuf> = Vec::new();
    let mut leading = true;

    for segment in segments {
        let segment = segment.as_ref();
        if segment.as_os_str().is_empty() {
            continue;
        }
        for component in segment.components() {
            match component {
                Component::Prefix(_) | Component::RootDir => {
                    if leading {
                        root.push(component.as_os_str());
                    }
                }
                Component::CurDir => {}
                Component::ParentDir => match parts.last() {
                    Some(last) if last.as_os_str() != ".." => {
                        parts.pop();
                    }
                    // ".." above the root stays at the root
                    _ if root.as_os_str().is_empty() => parts.push(PathBuf::from("..")),
                    _ => {}
                },
                Component::Normal(name) => parts.push(PathBuf::from(name)),
            }
        }
        leading = false;
    }

    root.extend(parts);
    if root.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        root
    }
}

/// Check whether the joined path names an existing directory
///
/// Symbolic links are followed. Any error, including a missing path, counts
/// as "not a directory".
pub fn is_dir<I, P>(segments: I) -> bool
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let path = join_paths(segments);
    std::fs::metadata(&path)
        .map(|meta| meta.is_dir())
        .unwrap_or_else(|e| {
            tracing::trace!("is_dir({}): {}", path.display(), e);
            false
        })
}

/// Check whether the joined path names an existing regular file
///
/// Symbolic links are followed. Any error, including a missing path, counts
/// as "not a file".
pub fn is_file<I, P>(segments: I) -> bool
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let path = join_paths(segments);
    std::fs::metadata(&path)
        .map(|meta| meta.is_file())
        .unwrap_or_else(|e| {
            tracing::trace!("is_file({}): {}", path.display(), e);
            false
        })
}

/// Create a directory and all of its missing parents
///
/// `mode` (default [`DEFAULT_DIR_MODE`]) sets the permission bits of the
/// directories created, subject to the process umask. It is ignored on
/// platforms without Unix permissions. An already existing directory is
/// not an error.
///
/// # Errors
///
/// `ValkitError::Io` carrying the underlying error, for instance when a
/// path component is a regular file or permission is denied.
/// `ValkitError::Custom` for an empty `dirname`.
pub fn mkdir_sync_recursively<P: AsRef<Path>>(dirname: P, mode: Option<u32>) -> Result<()> {
    let dirname = dirname.as_ref();
    if dirname.as_os_str().is_empty() {
        return Err(ValkitError::custom("Cannot create a directory with an empty name"));
    }
    let mut builder = DirBuilder::new();
    builder.recursive(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(mode.unwrap_or(DEFAULT_DIR_MODE));
    }
    #[cfg(not(unix))]
    let _ = mode;

    tracing::debug!("Creating directory tree {}", dirname.display());
    builder
        .create(dirname)
        .map_err(|e| ValkitError::io(dirname, e))
}

/// Make sure a directory tree exists
///
/// Same as [`mkdir_sync_recursively`] but reports the outcome as a boolean
/// instead of an error.
pub fn create_directory_if_not_exists<P: AsRef<Path>>(dirname: P, mode: Option<u32>) -> bool {
    match mkdir_sync_recursively(dirname, mode) {
        Ok(()) => true,
        Err(e) => {
            tracing::debug!("create_directory_if_not_exists: {}", e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_join_paths() {
        assert_eq!(join_paths(["a", "b", "c"]), PathBuf::from("a/b/c"));
        assert_eq!(join_paths(["a", "", "b"]), PathBuf::from("a/b"));
        assert_eq!(join_paths(["a/", "/b/"]), PathBuf::from("a/b"));
        assert_eq!(join_paths(["", "/b"]), PathBuf::from("/b"));
        assert_eq!(join_paths(["a", ".", "b"]), PathBuf::from("a/b"));
        assert_eq!(join_paths(["a", "..", "b"]), PathBuf::from("b"));
        assert_eq!(join_paths(["a", "..", ".."]), PathBuf::from(".."));
        assert_eq!(join_paths(["../a", "../../b"]), PathBuf::from("../../b"));
        assert_eq!(join_paths(["a", ".."]), PathBuf::from("."));
        assert_eq!(join_paths(["/", ".."]), PathBuf::from("/"));
    }

    #[test]
    fn test_is_dir_and_is_file() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("file.txt"), "x").unwrap();
        std::fs::create_dir(tmp.path().join("sub")).unwrap();

        assert!(is_dir([tmp.path()]));
        assert!(is_dir([tmp.path(), Path::new("sub")]));
        assert!(!is_dir([tmp.path(), Path::new("file.txt")]));
        assert!(is_file([tmp.path(), Path::new("file.txt")]));
        assert!(!is_file([tmp.path(), Path::new("sub")]));
        assert!(is_file([tmp.path(), Path::new("sub/../file.txt")]));
    }

    #[test]
    fn test_missing_paths() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("does/not/exist");
        assert!(!is_dir([&missing]));
        assert!(!is_file([&missing]));
        assert!(!is_file(["\0invalid"]));
    }

    #[test]
    fn test_mkdir_sync_recursively() {
        let tmp = TempDir::new().unwrap();
        let target = tmp.path().join("a/b/c");

        mkdir_sync_recursively(&target, None).unwrap();
        assert!(is_dir([&target]));
        // Existing tree is fine
        mkdir_sync_recursively(&target, None).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn test_mkdir_mode() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        let target = tmp.path().join("private");
        mkdir_sync_recursively(&target, Some(0o700)).unwrap();

        let mode = std::fs::metadata(&target).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o700);
    }

    #[test]
    fn test_mkdir_propagates_errors() {
        let tmp = TempDir::new().unwrap();
        let blocker = tmp.path().join("blocker");
        std::fs::write(&blocker, "x").unwrap();

        let err = mkdir_sync_recursively(blocker.join("child"), None).unwrap_err();
        assert!(err.is_io_error());
        assert!(err.to_string().contains("blocker"));
    }

    #[test]
    fn test_mkdir_rejects_empty_name() {
        let err = mkdir_sync_recursively("", None).unwrap_err();
        assert!(matches!(err, ValkitError::Custom(_)));
        assert!(!err.is_io_error());
        assert!(!create_directory_if_not_exists("", None));
    }

    #[test]
    fn test_create_directory_if_not_exists() {
        let tmp = TempDir::new().unwrap();
        let target = tmp.path().join("x/y");
        assert!(create_directory_if_not_exists(&target, None));
        assert!(create_directory_if_not_exists(&target, Some(0o750)));

        let blocker = tmp.path().join("blocker");
        std::fs::write(&blocker, "x").unwrap();
        assert!(!create_directory_if_not_exists(&blocker, None));
        assert!(!create_directory_if_not_exists(blocker.join("child"), None));
    }
}

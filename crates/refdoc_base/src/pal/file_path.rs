use relative_path::{RelativePath, RelativePathBuf};
use std::path::Path;

/* 📖 # Why use RelativePathBuf for FilePath?

FilePath wraps RelativePathBuf to enforce that all paths are relative to the PAL's
base directory, not absolute system paths. Configuration files name the registry and
the output pages with paths like `data/api-endpoints.json`, and those must resolve the
same way on every platform.
*/

/// Type-safe wrapper for file paths relative to PAL base directory.
///
/// ```
/// use refdoc_base::FilePath;
///
/// let path = FilePath::from("data/api-endpoints.json");
/// assert_eq!(path.extension(), Some("json"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FilePath(RelativePathBuf);

impl FilePath {
    /// Returns the underlying RelativePathBuf as a reference.
    pub fn as_relative(&self) -> &RelativePath {
        &self.0
    }

    /// Converts to a regular Path for use with std::fs operations.
    /// This returns the relative path portion without a base directory.
    pub fn as_path(&self) -> &Path {
        Path::new(self.as_relative().as_str())
    }

    /// Returns the parent directory, or `None` for paths directly in the base directory.
    pub fn parent(&self) -> Option<FilePath> {
        self.0
            .parent()
            .filter(|parent| !parent.as_str().is_empty())
            .map(FilePath::from)
    }

    /// Returns the file extension without the leading dot.
    pub fn extension(&self) -> Option<&str> {
        self.0.extension()
    }
}

impl From<&str> for FilePath {
    fn from(s: &str) -> Self {
        Self(RelativePathBuf::from(s))
    }
}

impl From<&RelativePath> for FilePath {
    fn from(p: &RelativePath) -> Self {
        Self(p.to_relative_path_buf())
    }
}

impl std::fmt::Display for FilePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

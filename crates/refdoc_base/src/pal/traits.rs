use std::io::{Read, Seek, Write};
use std::sync::Arc;

use crate::error::{ErrorKind, RefdocError, RefdocResult};

use super::file_path::FilePath;

/// Trait combining Read + Seek for file operations.
pub trait ReadSeek: Read + Seek {}
impl<T: Read + Seek> ReadSeek for T {}

/* 📖 # Why is Pal a trait instead of a struct?

Using a trait enables two key benefits:
1. **Testability**: MockPal implements Pal for fast, deterministic tests without filesystem side effects
2. **Flexibility**: Code depends on the abstraction, not the concrete implementation
*/

/// Platform Abstraction Layer (PAL) trait providing filesystem operations.
///
/// Two implementations are provided:
/// - `RealPal`: Uses the real filesystem via `std::fs`
/// - `MockPal`: In-memory implementation for testing
pub trait Pal: std::fmt::Debug + Send + Sync + 'static {
    /// Open a file for reading.
    fn read_file(&self, path: &FilePath) -> RefdocResult<Box<dyn ReadSeek + 'static>>;

    /// Read entire file contents as a UTF-8 string.
    fn read_file_to_string(&self, path: &FilePath) -> RefdocResult<String> {
        let mut reader = self.read_file(path)?;
        let mut contents = Vec::new();
        reader.read_to_end(&mut contents).map_err(|e| {
            Box::new(RefdocError::new(ErrorKind::FileError {
                path: path.as_path().to_path_buf(),
                source: e,
            }))
        })?;
        String::from_utf8(contents).map_err(|_e| crate::err!("File is not valid UTF-8: {}", path))
    }

    /// Create a new file, overwriting if it exists.
    fn create_file(&self, path: &FilePath) -> RefdocResult<Box<dyn Write>>;

    /// Create a directory and all parent directories.
    fn create_directory_all(&self, path: &FilePath) -> RefdocResult<()>;

    /// Write `contents` to `path`, creating parent directories as needed.
    fn write_file(&self, path: &FilePath, contents: &[u8]) -> RefdocResult<()> {
        if let Some(parent) = path.parent() {
            self.create_directory_all(&parent)?;
        }
        let mut writer = self.create_file(path)?;
        writer
            .write_all(contents)
            .and_then(|_| writer.flush())
            .map_err(|e| {
                Box::new(RefdocError::new(ErrorKind::FileError {
                    path: path.as_path().to_path_buf(),
                    source: e,
                }))
            })
    }
}

/// Handle to a PAL implementation, enabling shared ownership.
///
/// Internally wraps `Arc<dyn Pal>` for cheap cloning and thread-safe sharing.
///
/// ```no_run
/// use refdoc_base::{RealPal, PalHandle};
///
/// let pal = PalHandle::new(RealPal::new(".".into()));
/// let pal_clone = pal.clone();
/// ```
#[derive(Debug, Clone)]
pub struct PalHandle(Arc<dyn Pal>);

impl PalHandle {
    /// Create a new PalHandle from a Pal implementation.
    pub fn new(pal: impl Pal + 'static) -> Self {
        Self(Arc::new(pal))
    }
}

impl std::ops::Deref for PalHandle {
    type Target = dyn Pal;

    fn deref(&self) -> &Self::Target {
        &*self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pal::mock::MockPal;

    #[test]
    fn test_pal_handle_clone_shares_storage() {
        let mock = MockPal::new();
        let pal = PalHandle::new(mock.clone());
        let pal_clone = pal.clone();

        pal.write_file(&FilePath::from("out.txt"), b"shared").unwrap();

        assert_eq!(
            pal_clone.read_file_to_string(&FilePath::from("out.txt")).unwrap(),
            "shared"
        );
    }

    #[test]
    fn test_write_file_creates_parent_directory() {
        let mock = MockPal::new();
        let pal = PalHandle::new(mock.clone());

        pal.write_file(&FilePath::from("site/api/index.html"), b"<html>")
            .unwrap();

        assert!(mock.has_directory(&FilePath::from("site/api")));
        assert_eq!(
            mock.file_content(&FilePath::from("site/api/index.html")),
            Some(b"<html>".to_vec())
        );
    }

    #[test]
    fn test_read_file_to_string_rejects_invalid_utf8() {
        let mock = MockPal::new();
        mock.add_file(FilePath::from("binary.bin"), vec![0xff, 0xfe, 0x00]);
        let pal = PalHandle::new(mock);

        let err = pal
            .read_file_to_string(&FilePath::from("binary.bin"))
            .unwrap_err();
        assert_eq!(err.to_string(), "File is not valid UTF-8: binary.bin");
    }
}

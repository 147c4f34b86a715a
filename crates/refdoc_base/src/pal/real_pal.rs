use std::fs;
use std::io::Write;
use std::path::PathBuf;

use tracing::{debug, instrument};

use crate::{RefdocError, RefdocResult, error::ErrorKind};

use super::FilePath;
use super::traits::{Pal, ReadSeek};

/* 📖 # Why use std::fs instead of async or other crates?

Rendering is a single synchronous pass: read one config, read one registry, write
one or two pages. Blocking std::fs calls are all that is needed.
*/

/// Concrete PAL implementation using the real filesystem via std::fs.
///
/// All file paths are resolved relative to a configured base directory.
#[derive(Debug)]
pub struct RealPal {
    base_dir: PathBuf,
}

impl RealPal {
    /// Create a new RealPal with the given base directory.
    pub fn new(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Resolve a FilePath to an absolute filesystem path.
    fn resolve_path(&self, path: &FilePath) -> PathBuf {
        self.base_dir.join(path.as_path())
    }
}

fn file_error(path: PathBuf, source: std::io::Error) -> Box<RefdocError> {
    Box::new(RefdocError::new(ErrorKind::FileError { path, source }))
}

impl Pal for RealPal {
    #[instrument(skip(self), fields(path = %path))]
    fn read_file(&self, path: &FilePath) -> RefdocResult<Box<dyn ReadSeek + 'static>> {
        let resolved = self.resolve_path(path);
        debug!(resolved = %resolved.display(), "opening file for reading");
        let file = fs::File::open(&resolved).map_err(|e| {
            debug!(error = %e, "failed to open file");
            file_error(resolved, e)
        })?;
        Ok(Box::new(file))
    }

    #[instrument(skip(self), fields(path = %path))]
    fn create_file(&self, path: &FilePath) -> RefdocResult<Box<dyn Write>> {
        let resolved = self.resolve_path(path);
        debug!(resolved = %resolved.display(), "creating file");
        let file = fs::File::create(&resolved).map_err(|e| {
            debug!(error = %e, "failed to create file");
            file_error(resolved, e)
        })?;
        Ok(Box::new(file))
    }

    #[instrument(skip(self), fields(path = %path))]
    fn create_directory_all(&self, path: &FilePath) -> RefdocResult<()> {
        let resolved = self.resolve_path(path);
        debug!(resolved = %resolved.display(), "creating directory and parents");
        fs::create_dir_all(&resolved).map_err(|e| {
            debug!(error = %e, "failed to create directory");
            file_error(resolved, e)
        })
    }
}

/* 📖 # Why have refdoc_base as a core library?
refdoc_base provides the foundational error handling, tracing setup and filesystem
abstraction used across all crates. Keeping them here prevents circular dependencies
between the engine and the command line front end.
*/

pub mod error;
pub mod pal;
pub mod tracing;

// Re-export commonly used types for convenience
pub use error::{ErrorKind, RefdocError, RefdocResult, ResultExt};
pub use pal::{FilePath, MockPal, Pal, PalHandle, RealPal};

/* 📖 # What is the Platform Abstraction Layer?

The PAL provides a trait-based abstraction over filesystem operations, enabling testable code.
The registry loader, config loader and page writer all go through it, so the whole
pipeline can be exercised against MockPal without touching disk.
*/

mod file_path;
pub mod mock;
pub mod real_pal;
mod traits;

pub use file_path::FilePath;
pub use mock::MockPal;
pub use real_pal::RealPal;
pub use traits::{Pal, PalHandle, ReadSeek};

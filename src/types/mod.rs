//! misc types

pub mod errno;
pub mod file;

// re-export these types to save on typing
pub use errno::Errno;
pub use file::{FileDescriptor, OpenFlags, Permissions, SeekKind};

//! filesystem interface consumed by the open file layer
//!
//! the actual filesystems live elsewhere in the kernel- this module only defines the
//! narrow seam the file tables talk through

use crate::types::{Errno, OpenFlags, Permissions};
use alloc::boxed::Box;

/// the in-kernel handle to an underlying file or device object
///
/// a vnode is owned by exactly one open file table entry at a time- sharing between
/// descriptors happens through that entry's reference count, never by duplicating
/// the handle itself
pub trait Vnode: Send {
    /// reads up to buf.len() bytes starting at the given offset into the given buffer,
    /// returning the amount of bytes actually read (0 at end of file)
    fn read_at(&self, offset: i64, buf: &mut [u8]) -> Result<usize, Errno>;

    /// writes the given buffer at the given offset, returning the amount of bytes
    /// actually written
    fn write_at(&mut self, offset: i64, buf: &[u8]) -> Result<usize, Errno>;

    /// gets the current size of the object
    fn size(&self) -> Result<i64, Errno>;

    /// whether this object supports repositioning its read/write offset
    fn is_seekable(&self) -> bool;

    /// releases the underlying object. called exactly once, when the last descriptor
    /// referencing it goes away
    fn close(&mut self) -> Result<(), Errno>;
}

/// the filesystem layer's lookup entry point
pub trait Filesystem {
    /// opens (or with OpenFlags::Create, creates) the object at the given path,
    /// returning a fresh vnode for it
    fn open(&self, path: &str, flags: OpenFlags, permissions: Permissions) -> Result<Box<dyn Vnode>, Errno>;
}

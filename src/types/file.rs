//! file-related types shared with the syscall ABI

use bitmask_enum::bitmask;
use core::fmt;
use num_enum::TryFromPrimitive;

/// numerical file descriptor
pub type FileDescriptor = usize;

/// describes how a file will be opened
///
/// the access bits are recorded in the open file table when the file is opened and
/// stay fixed for the lifetime of the entry
#[bitmask(u8)]
pub enum OpenFlags {
    None = 0,
    Read = 1 << 0,
    Write = 1 << 1,
    Append = 1 << 2,
    Create = 1 << 3,
    Truncate = 1 << 4,
}

/// controls how lseek() seeks
///
/// an out of range whence value from userspace simply fails the conversion, it never
/// defaults to anything
#[repr(u8)]
#[derive(Copy, Clone, PartialEq, Eq, TryFromPrimitive)]
pub enum SeekKind {
    /// set file offset to provided offset
    Set = 0,

    /// add the provided offset to the current file offset
    Current,

    /// set the file offset to the end of the file plus the provided offset
    End,
}

/// standard unix permissions bit field
#[bitmask(u16)]
pub enum Permissions {
    None = 0,
    OwnerRead = 1 << 8,
    OwnerWrite = 1 << 7,
    OwnerExecute = 1 << 6,
    GroupRead = 1 << 5,
    GroupWrite = 1 << 4,
    GroupExecute = 1 << 3,
    OtherRead = 1 << 2,
    OtherWrite = 1 << 1,
    OtherExecute = 1 << 0,
}

impl fmt::Display for Permissions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", if *self & Self::OwnerRead != 0 { "r" } else { "-" })?;
        write!(f, "{}", if *self & Self::OwnerWrite != 0 { "w" } else { "-" })?;
        write!(f, "{}", if *self & Self::OwnerExecute != 0 { "x" } else { "-" })?;
        write!(f, "{}", if *self & Self::GroupRead != 0 { "r" } else { "-" })?;
        write!(f, "{}", if *self & Self::GroupWrite != 0 { "w" } else { "-" })?;
        write!(f, "{}", if *self & Self::GroupExecute != 0 { "x" } else { "-" })?;
        write!(f, "{}", if *self & Self::OtherRead != 0 { "r" } else { "-" })?;
        write!(f, "{}", if *self & Self::OtherWrite != 0 { "w" } else { "-" })?;
        write!(f, "{}", if *self & Self::OtherExecute != 0 { "x" } else { "-" })
    }
}

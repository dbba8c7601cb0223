//! POSIX errno

use core::fmt;
use num_enum::FromPrimitive;

/// error number and message
#[repr(u32)]
#[derive(Copy, Clone, PartialEq, Eq, FromPrimitive, Default)]
pub enum Errno {
    /// no error (:
    #[default]
    None = 0,
    /// EACCES (permission denied)
    PermissionDenied,
    /// EAGAIN (resource unavailable, try again)
    TryAgain,
    /// EBADF (bad file descriptor)
    BadFile,
    /// EBUSY (device or resource busy)
    Busy,
    /// EEXIST (file exists)
    Exists,
    /// EFAULT (bad address)
    BadAddress,
    /// EFBIG (file too big)
    FileTooBig,
    /// EINTR (interrupted function)
    Interrupted,
    /// EINVAL (invalid argument)
    InvalidArgument,
    /// EIO (input-output error)
    IOError,
    /// EISDIR (is a directory)
    IsDirectory,
    /// EMFILE (file descriptor too big)
    FileDescTooBig,
    /// ENAMETOOLONG (filename too long)
    FilenameTooLong,
    /// ENFILE (too many files open in system)
    TooManyFilesOpen,
    /// ENODEV (no such device)
    NoSuchDevice,
    /// ENOENT (no such file or directory)
    NoSuchFileOrDir,
    /// ENOMEM (out of memory)
    OutOfMemory,
    /// ENOSPC (no space left on device)
    NoSpaceLeft,
    /// ENOSYS (functionality not supported)
    FuncNotSupported,
    /// ENOTDIR (not a directory)
    NotDirectory,
    /// EOVERFLOW (value too large for data type)
    ValueOverflow,
    /// EPERM (operation not permitted)
    OperationNotPermitted,
    /// EPIPE (broken pipe)
    BrokenPipe,
    /// EROFS (read-only file system)
    ReadOnlyFileSystem,
    /// ESPIPE (invalid seek)
    InvalidSeek,
    /// ERANGE (result too large)
    ResultTooLarge,
}

impl fmt::Display for Errno {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", match self {
            Self::None => "no error",
            Self::PermissionDenied => "permission denied",
            Self::TryAgain => "resource unavailable, try again",
            Self::BadFile => "bad file descriptor",
            Self::Busy => "device or resource busy",
            Self::Exists => "file exists",
            Self::BadAddress => "bad address",
            Self::FileTooBig => "file too big",
            Self::Interrupted => "interrupted function",
            Self::InvalidArgument => "invalid argument",
            Self::IOError => "input-output error",
            Self::IsDirectory => "is a directory",
            Self::FileDescTooBig => "file descriptor too big",
            Self::FilenameTooLong => "filename too long",
            Self::TooManyFilesOpen => "too many files open in system",
            Self::NoSuchDevice => "no such device",
            Self::NoSuchFileOrDir => "no such file or directory",
            Self::OutOfMemory => "out of memory",
            Self::NoSpaceLeft => "no space left on device",
            Self::FuncNotSupported => "functionality not supported",
            Self::NotDirectory => "not a directory or a symbolic link to a directory",
            Self::ValueOverflow => "value too large for data type",
            Self::OperationNotPermitted => "operation not permitted",
            Self::BrokenPipe => "broken pipe",
            Self::ReadOnlyFileSystem => "read-only file system",
            Self::InvalidSeek => "invalid seek",
            Self::ResultTooLarge => "result too large",
        })
    }
}

impl fmt::Debug for Errno {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Errno: {}", self)
    }
}

//! user/kernel memory copy seam
//!
//! syscall arguments arrive as raw addresses in the calling process' address space.
//! nothing in this crate dereferences them- all traffic across the boundary goes
//! through this trait, implemented by the platform's memory management

use crate::types::Errno;
use alloc::{string::String, vec::Vec};

/// an address in the calling process' address space
pub type UserAddr = usize;

pub trait UserMemory {
    /// copies len bytes in from the given user address. fails with Errno::BadAddress
    /// if any part of the range is inaccessible
    fn copy_in(&self, addr: UserAddr, len: usize) -> Result<Vec<u8>, Errno>;

    /// copies a nul-terminated string in from the given user address, stopping with
    /// Errno::FilenameTooLong if no terminator shows up within max_len bytes
    fn copy_in_string(&self, addr: UserAddr, max_len: usize) -> Result<String, Errno>;

    /// copies bytes out to the given user address
    fn copy_out(&self, bytes: &[u8], addr: UserAddr) -> Result<(), Errno>;
}

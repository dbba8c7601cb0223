//! per-process file descriptor tables

use crate::types::{Errno, FileDescriptor};
use alloc::vec::Vec;

use super::OPEN_MAX;

/// maps a process' descriptor numbers onto open file table slots
///
/// each process owns exactly one of these, created at process start and torn down
/// (via syscalls::ProcessFiles::close_all()) at exit. it is not synchronized- sibling
/// threads racing on the same descriptor number have to be serialized by the caller
#[derive(Clone)]
pub struct FileDescriptorTable {
    /// open file table slot per descriptor, or None for a closed descriptor
    descriptors: Vec<Option<usize>>,
}

impl FileDescriptorTable {
    /// creates a table with every descriptor closed
    pub fn new() -> Self {
        Self::with_capacity(OPEN_MAX)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            descriptors: alloc::vec![None; capacity],
        }
    }

    pub fn capacity(&self) -> usize {
        self.descriptors.len()
    }

    /// finds the lowest-numbered closed descriptor
    ///
    /// always lowest-available, matching conventional fd reuse- it keeps
    /// close/dup2/open interleavings deterministic
    pub fn allocate_descriptor(&self) -> Result<FileDescriptor, Errno> {
        self.descriptors.iter().position(|d| d.is_none()).ok_or(Errno::FileDescTooBig)
    }

    /// points a descriptor at an open file table slot
    pub fn bind(&mut self, fd: FileDescriptor, slot: usize) {
        debug_assert!(self.descriptors[fd].is_none(), "descriptor {} already bound", fd);
        self.descriptors[fd] = Some(slot);
    }

    /// closes a descriptor, returning the slot it pointed at
    pub fn unbind(&mut self, fd: FileDescriptor) -> Option<usize> {
        self.descriptors.get_mut(fd).and_then(|d| d.take())
    }

    /// gets the slot a descriptor points at, or None if it's out of range or closed
    pub fn get(&self, fd: FileDescriptor) -> Option<usize> {
        self.descriptors.get(fd).copied().flatten()
    }

    /// iterates over every open descriptor and the slot it points at
    pub fn open_descriptors(&self) -> impl Iterator<Item = (FileDescriptor, usize)> + '_ {
        self.descriptors.iter().enumerate().filter_map(|(fd, slot)| slot.map(|s| (fd, s)))
    }
}

impl Default for FileDescriptorTable {
    fn default() -> Self {
        Self::new()
    }
}

//! the system-wide open file table

use crate::types::{Errno, OpenFlags};
use crate::vfs::Vnode;
use alloc::{boxed::Box, vec::Vec};
use log::trace;

use super::OPEN_MAX;

/// one open file, shared by however many descriptors reference it
///
/// the entry owns its vnode. all field access happens under the table's lock
pub struct OpenFileEntry {
    /// handle to the underlying filesystem object
    pub node: Box<dyn Vnode>,

    /// current read/write position. only meaningful for seekable objects
    pub offset: i64,

    /// how the file was opened. fixed at open time
    pub flags: OpenFlags,

    /// how many descriptor table slots (across all processes) point at this entry
    refcount: usize,
}

impl OpenFileEntry {
    pub fn refcount(&self) -> usize {
        self.refcount
    }
}

/// fixed-size table of open file entries, identified by slot index
///
/// the table itself carries no lock- the kernel-wide instance lives behind a
/// spin::Mutex (see fs::open_file_table()) and every multi-step sequence on it runs
/// under a single hold of that lock, so no one ever observes a half-updated table
pub struct OpenFileTable {
    slots: Vec<Option<OpenFileEntry>>,
}

impl OpenFileTable {
    /// creates a table with the system-wide slot limit
    pub fn new() -> Self {
        Self::with_capacity(OPEN_MAX)
    }

    /// creates a table with an explicit slot limit
    pub fn with_capacity(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        Self { slots }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// finds the lowest-numbered empty slot and fills it with a fresh entry (offset 0,
    /// refcount 1) owning the given vnode
    ///
    /// fails when no empty slot exists among the whole table, however many slots that
    /// is and whichever slot would have been picked- the vnode is handed back so the
    /// caller can close it instead of leaking it
    pub fn allocate_slot(&mut self, node: Box<dyn Vnode>, flags: OpenFlags) -> Result<usize, Box<dyn Vnode>> {
        let slot = match self.slots.iter().position(|s| s.is_none()) {
            Some(slot) => slot,
            None => return Err(node),
        };

        self.slots[slot] = Some(OpenFileEntry {
            node,
            offset: 0,
            flags,
            refcount: 1,
        });

        trace!("allocated open file slot {}", slot);
        Ok(slot)
    }

    /// adds a reference to the entry in the given slot, for dup2 and descriptor
    /// inheritance
    pub fn retain(&mut self, slot: usize) -> Result<(), Errno> {
        let entry = self.entry_mut(slot).ok_or(Errno::BadFile)?;
        entry.refcount += 1;
        Ok(())
    }

    /// drops a reference to the entry in the given slot. when the last reference goes
    /// away the vnode is closed and the slot emptied
    ///
    /// the slot is only emptied once the close has succeeded, so a failed close leaves
    /// the entry in place (still holding its last reference) instead of double-freeing
    pub fn release_reference(&mut self, slot: usize) -> Result<(), Errno> {
        let entry = self.entry_mut(slot).ok_or(Errno::BadFile)?;

        if entry.refcount == 1 {
            entry.node.close()?;
            self.slots[slot] = None;
            trace!("released open file slot {}", slot);
        } else {
            entry.refcount -= 1;
        }

        Ok(())
    }

    /// gets a reference to the entry in the given slot
    pub fn entry(&self, slot: usize) -> Option<&OpenFileEntry> {
        self.slots.get(slot).and_then(|s| s.as_ref())
    }

    /// gets a mutable reference to the entry in the given slot
    pub fn entry_mut(&mut self, slot: usize) -> Option<&mut OpenFileEntry> {
        self.slots.get_mut(slot).and_then(|s| s.as_mut())
    }

    /// how many slots currently hold an entry
    pub fn open_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }
}

impl Default for OpenFileTable {
    fn default() -> Self {
        Self::new()
    }
}

//! the file syscalls, composed out of the two tables
//!
//! every operation follows the same shape: validate the descriptor against the
//! process' own table first, then take the open file table lock only for the critical
//! section that touches shared state, and drop it before copying anything back out to
//! userspace

use crate::types::{Errno, FileDescriptor, OpenFlags, Permissions, SeekKind};
use crate::usercopy::{UserAddr, UserMemory};
use crate::vfs::Filesystem;
use alloc::{sync::Arc, vec::Vec};
use log::{debug, warn};
use spin::Mutex;

use super::fdt::FileDescriptorTable;
use super::oft::OpenFileTable;
use super::{CONSOLE_PATH, PATH_MAX, STDERR, STDOUT};

/// a process' view of the filesystem- its own descriptor table plus a handle on the
/// shared open file table
///
/// the descriptor table is owned and unsynchronized, so the process (or its syscall
/// dispatcher) is responsible for serializing concurrent file syscalls from its own
/// threads. everything touching the open file table is serialized by that table's lock
pub struct ProcessFiles {
    open_files: Arc<Mutex<OpenFileTable>>,
    descriptors: FileDescriptorTable,
}

impl ProcessFiles {
    /// creates the file state for a fresh process, with every descriptor closed. the
    /// descriptor table gets the same capacity as the open file table it maps into
    pub fn new(open_files: Arc<Mutex<OpenFileTable>>) -> Self {
        let capacity = open_files.lock().capacity();

        Self {
            open_files,
            descriptors: FileDescriptorTable::with_capacity(capacity),
        }
    }

    /// attaches the console device to descriptors 1 and 2 (write-only, one open file
    /// entry each) so a fresh process can produce output. run once at process start,
    /// before anything else is opened
    pub fn attach_console(&mut self, fs: &dyn Filesystem) -> Result<(), Errno> {
        for fd in [STDOUT, STDERR] {
            if self.descriptors.get(fd).is_some() {
                return Err(Errno::Busy);
            }

            let mut node = fs.open(CONSOLE_PATH, OpenFlags::Write, Permissions::None)?;

            let mut table = self.open_files.lock();
            match table.allocate_slot(node, OpenFlags::Write) {
                Ok(slot) => {
                    drop(table);
                    self.descriptors.bind(fd, slot);
                }
                Err(returned) => {
                    drop(table);
                    node = returned;
                    let _ = node.close();
                    return Err(Errno::TooManyFilesOpen);
                }
            }
        }

        Ok(())
    }

    /// opens the file at the path read from the given user address, returning the
    /// lowest free descriptor for it
    ///
    /// on any failure after the filesystem open succeeded (either table full) the
    /// fresh vnode is closed again before the error returns, so nothing leaks
    pub fn open(
        &mut self,
        fs: &dyn Filesystem,
        mem: &dyn UserMemory,
        path: UserAddr,
        flags: OpenFlags,
        permissions: Permissions,
    ) -> Result<FileDescriptor, Errno> {
        let path = mem.copy_in_string(path, PATH_MAX)?;
        let mut node = fs.open(&path, flags, permissions)?;

        let fd = match self.descriptors.allocate_descriptor() {
            Ok(fd) => fd,
            Err(err) => {
                let _ = node.close();
                return Err(err);
            }
        };

        let mut table = self.open_files.lock();
        let slot = match table.allocate_slot(node, flags) {
            Ok(slot) => slot,
            Err(returned) => {
                drop(table);
                node = returned;
                let _ = node.close();
                return Err(Errno::TooManyFilesOpen);
            }
        };
        drop(table);

        self.descriptors.bind(fd, slot);
        debug!("opened {:?} as fd {}", path, fd);
        Ok(fd)
    }

    /// reads up to len bytes from the descriptor's current offset into the buffer at
    /// the given user address, advancing the offset by the amount actually read
    pub fn read(&mut self, mem: &dyn UserMemory, fd: FileDescriptor, buf: UserAddr, len: usize) -> Result<usize, Errno> {
        let slot = self.resolve(fd)?;

        // stage in kernel memory- the transfer happens under the table lock, the copy
        // out to userspace afterwards
        let mut staging = Vec::new();
        staging.try_reserve_exact(len).map_err(|_| Errno::OutOfMemory)?;
        staging.resize(len, 0);

        let mut table = self.open_files.lock();
        let entry = table.entry_mut(slot).ok_or(Errno::BadFile)?;

        if entry.flags & OpenFlags::Read == OpenFlags::None {
            return Err(Errno::BadFile);
        }

        let amount = entry.node.read_at(entry.offset, &mut staging)?;
        // advance by what was actually transferred, never by what was asked for
        entry.offset += amount as i64;
        drop(table);

        staging.truncate(amount);
        mem.copy_out(&staging, buf)?;
        Ok(amount)
    }

    /// writes up to len bytes from the buffer at the given user address at the
    /// descriptor's current offset, advancing the offset by the amount actually
    /// written
    pub fn write(&mut self, mem: &dyn UserMemory, fd: FileDescriptor, buf: UserAddr, len: usize) -> Result<usize, Errno> {
        let slot = self.resolve(fd)?;

        let staging = mem.copy_in(buf, len)?;

        let mut table = self.open_files.lock();
        let entry = table.entry_mut(slot).ok_or(Errno::BadFile)?;

        if entry.flags & OpenFlags::Write == OpenFlags::None {
            return Err(Errno::BadFile);
        }

        if entry.flags & OpenFlags::Append != OpenFlags::None {
            entry.offset = entry.node.size()?;
        }

        let amount = entry.node.write_at(entry.offset, &staging)?;
        entry.offset += amount as i64;

        Ok(amount)
    }

    /// repositions the descriptor's offset. the new offset can land past the end of
    /// the object, but never before its start
    pub fn lseek(&mut self, fd: FileDescriptor, pos: i64, whence: SeekKind) -> Result<i64, Errno> {
        let slot = self.resolve(fd)?;

        let mut table = self.open_files.lock();
        let entry = table.entry_mut(slot).ok_or(Errno::BadFile)?;

        if !entry.node.is_seekable() {
            return Err(Errno::InvalidSeek);
        }

        let target = match whence {
            SeekKind::Set => pos,
            SeekKind::Current => entry.offset.checked_add(pos).ok_or(Errno::InvalidArgument)?,
            SeekKind::End => entry.node.size()?.checked_add(pos).ok_or(Errno::InvalidArgument)?,
        };

        if target < 0 {
            return Err(Errno::InvalidArgument);
        }

        entry.offset = target;
        Ok(target)
    }

    /// closes a descriptor, dropping its reference on the open file entry (which
    /// closes the underlying object if this was the last one). closing the same
    /// descriptor again fails with Errno::BadFile
    pub fn close(&mut self, fd: FileDescriptor) -> Result<(), Errno> {
        let slot = self.resolve(fd)?;

        self.descriptors.unbind(fd);
        debug!("closed fd {}", fd);
        self.open_files.lock().release_reference(slot)
    }

    /// points newfd at the same open file entry as oldfd, sharing its offset and
    /// flags
    ///
    /// an already-open newfd is implicitly closed first- if that close fails, the
    /// whole operation fails with its error and nothing has changed. the implicit
    /// close, rebind, and refcount bump all happen under one hold of the table lock,
    /// so no concurrent open or close sees newfd half-moved
    pub fn dup2(&mut self, oldfd: FileDescriptor, newfd: FileDescriptor) -> Result<FileDescriptor, Errno> {
        let slot = self.resolve(oldfd)?;

        if newfd >= self.descriptors.capacity() {
            return Err(Errno::BadFile);
        }

        if oldfd == newfd {
            return Ok(newfd);
        }

        let mut table = self.open_files.lock();

        if let Some(old_slot) = self.descriptors.get(newfd) {
            table.release_reference(old_slot)?;
            self.descriptors.unbind(newfd);
        }

        table.retain(slot)?;
        drop(table);

        self.descriptors.bind(newfd, slot);
        debug!("dup2: fd {} now aliases fd {}", newfd, oldfd);
        Ok(newfd)
    }

    /// clones this process' file state for a child process: same descriptor layout,
    /// every referenced entry gaining one reference. offsets stay shared with the
    /// parent, the way fork wants them
    pub fn fork_files(&self) -> Result<Self, Errno> {
        let descriptors = self.descriptors.clone();

        let mut table = self.open_files.lock();
        for (_fd, slot) in self.descriptors.open_descriptors() {
            table.retain(slot)?;
        }
        drop(table);

        Ok(Self {
            open_files: self.open_files.clone(),
            descriptors,
        })
    }

    /// closes every open descriptor, for process exit. close failures are logged and
    /// skipped- the process is going away either way
    pub fn close_all(&mut self) {
        let mut table = self.open_files.lock();

        for fd in 0..self.descriptors.capacity() {
            if let Some(slot) = self.descriptors.unbind(fd) {
                if let Err(err) = table.release_reference(slot) {
                    warn!("couldn't release slot {} for fd {} at exit: {}", slot, fd, err);
                }
            }
        }
    }

    /// maps a descriptor number to its open file table slot, rejecting out of range
    /// and closed descriptors. runs before the table lock is taken
    fn resolve(&self, fd: FileDescriptor) -> Result<usize, Errno> {
        self.descriptors.get(fd).ok_or(Errno::BadFile)
    }

    /// this process' descriptor table
    pub fn descriptors(&self) -> &FileDescriptorTable {
        &self.descriptors
    }
}

//! kernel open-file and file-descriptor management
//!
//! this crate implements the layer that sits between the syscall dispatcher and the
//! filesystem: a kernel-wide open file table shared by every process, per-process
//! file descriptor tables mapping small integers onto it, and the classic
//! open/read/write/lseek/close/dup2 semantics on top of both

#![cfg_attr(not(test), no_std)]

// we need this to effectively use our heap
extern crate alloc;

mod logging;

pub mod types;

pub mod vfs;

pub mod usercopy;

pub mod fs;


pub use logging::init as init_logging;

pub const NAME: &str = env!("CARGO_PKG_NAME");
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

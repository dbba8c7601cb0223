//! open file bookkeeping- the kernel-wide open file table, per-process descriptor
//! tables, and the file syscalls on top of them

pub mod fdt;
pub mod oft;
pub mod syscalls;

use alloc::sync::Arc;
use lazy_static::lazy_static;
use log::debug;
use spin::Mutex;

use self::oft::OpenFileTable;

/// maximum amount of files allowed to be open at once, system-wide. also the size of
/// each process' descriptor table
pub const OPEN_MAX: usize = 128;

/// longest path accepted from userspace, including the nul terminator
pub const PATH_MAX: usize = 1024;

/// path the console device lives at
pub const CONSOLE_PATH: &str = "/dev/console";

/// descriptor attached to the console for normal output at process start
pub const STDOUT: usize = 1;

/// descriptor attached to the console for error output at process start
pub const STDERR: usize = 2;

lazy_static! {
    /// the one open file table shared by every process on the system
    static ref OPEN_FILES: Arc<Mutex<OpenFileTable>> = Arc::new(Mutex::new(OpenFileTable::new()));
}

/// sets up the global open file table. run once at kernel init, before any process is
/// created
pub fn init() {
    lazy_static::initialize(&OPEN_FILES);
    debug!("initialized open file table ({} slots)", OPEN_MAX);
}

/// gets a handle to the global open file table
pub fn open_file_table() -> Arc<Mutex<OpenFileTable>> {
    OPEN_FILES.clone()
}

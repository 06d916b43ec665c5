//! Process relationship bookkeeping: pid allocation, parent/child records and
//! the exit/wait rendezvous between a process and its parent.
//!
//! Every process that was ever forked owns a record in the [`ProcessTable`]
//! until it has exited and its status has been collected (reaped), or it has
//! exited with nobody left to collect it. All records live under one lock owned
//! by the [`ProcessManager`]; the only place a caller blocks is
//! [`ProcessManager::wait`], which parks on the manager's child-exit
//! [`Condvar`] with the lock released.
#![cfg_attr(not(any(test, feature = "std")), no_std)]

extern crate alloc;
#[macro_use]
extern crate log;

pub mod condvar;
pub mod config;
pub mod pid;
pub mod process;
pub mod record;
pub mod status;
pub mod table;

/// Type alias for process ID.
/// Linux uses `int` for these IDs, which is typically 32 bits; only positive
/// values are ever handed out.
pub type Pid = u32;

/// Parent id of a process with no parent: the init process, or an orphan
/// whose parent has exited.
pub const NO_PARENT: Pid = 0;

pub use condvar::{Condvar, WaitQueue};
#[cfg(any(test, feature = "std"))]
pub use condvar::StdWaitQueue;
pub use config::{OrphanPolicy, ProcessConfig};
pub use process::ProcessManager;
pub use record::ProcessRecord;
pub use status::ExitStatus;
pub use table::ProcessTable;

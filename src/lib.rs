//! Process-lifecycle syscalls for a small Unix-like kernel.
//!
//! The kernel's trap handler hands every syscall to [`handle_syscall`] along
//! with the [`Kernel`](reaper_core::Kernel) it runs on. The table itself
//! lives in [`reaper_process`], the syscalls in [`reaper_api`].
#![no_std]

#[macro_use]
extern crate log;

mod syscall;

pub use reaper_core::{Kernel, KernelConfig, KernelServices, UserContext};
pub use reaper_process::{ExitStatus, Pid};
pub use syscall::handle_syscall;

//! Kernel-side glue around the process table: the [`Kernel`] object that the
//! syscall layer works on, and the services it borrows from the rest of the
//! kernel (scheduler, address spaces, user memory).
#![cfg_attr(not(any(test, feature = "testing")), no_std)]

extern crate alloc;
#[macro_use]
extern crate log;

pub mod config;
pub mod entry;
pub mod kernel;
pub mod task;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use config::KernelConfig;
pub use kernel::Kernel;
pub use task::{KernelServices, UserContext};

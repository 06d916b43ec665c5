//! User-facing process-control syscalls: fork, exit and wait.
//!
//! `interface` decodes raw syscall arguments, `imp` does the work against a
//! [`Kernel`](reaper_core::Kernel).
#![no_std]

extern crate alloc;
#[macro_use]
extern crate log;

pub mod imp;
pub mod interface;
pub mod ptr;

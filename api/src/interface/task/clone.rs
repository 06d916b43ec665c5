//! sys_clone:
//! # Arguments
//! - `clone_flags`: low byte is the exit signal, the rest are `CLONE_*` flags.
//! - `new_sp`: New stack pointer, pointer to the lowest byte of stack.
//!
//! Only the fork form of clone is accepted: no flags, an exit signal of
//! `SIGCHLD` (or none) and no new stack. The tid pointers and tls only matter
//! with flags set, so they are not decoded.
use crate::imp::task::*;
use axerrno::{LinuxError, LinuxResult};
use core::ffi::c_ulong;
use linux_raw_sys::general::{CSIGNAL, SIGCHLD};
use reaper_core::{Kernel, KernelServices};
use syscall_trace::syscall_trace;

#[syscall_trace]
pub fn sys_clone<S: KernelServices>(
    kernel: &Kernel<S>,
    clone_flags: c_ulong,
    new_sp: c_ulong,
) -> LinuxResult<isize> {
    if u64::from(clone_flags) >> 32 != 0 {
        warn!("[clone] unsupported flags {:#x}", clone_flags);
        return Err(LinuxError::EINVAL);
    }
    let flags = clone_flags as u32;
    let exit_signal = flags & CSIGNAL;
    let clone_flags = CloneFlags::from_bits_retain(flags & !CSIGNAL);

    if exit_signal != 0 && exit_signal != SIGCHLD {
        warn!("[clone] unsupported exit signal {}", exit_signal);
        return Err(LinuxError::EINVAL);
    }
    if !clone_flags.is_empty() {
        warn!("[clone] unsupported flags {:?}", clone_flags);
        return Err(LinuxError::EINVAL);
    }
    if new_sp != 0 {
        warn!("[clone] a new stack is not supported for fork");
        return Err(LinuxError::EINVAL);
    }
    sys_fork_impl(kernel)
}

#[syscall_trace]
pub fn sys_fork<S: KernelServices>(kernel: &Kernel<S>) -> LinuxResult<isize> {
    sys_fork_impl(kernel)
}

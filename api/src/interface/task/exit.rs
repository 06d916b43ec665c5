use crate::imp::task::sys_exit_impl;
use axerrno::LinuxResult;
use core::ffi::c_int;
use reaper_core::{Kernel, KernelServices};
use syscall_trace::syscall_trace;

#[syscall_trace]
pub fn sys_exit<S: KernelServices>(kernel: &Kernel<S>, status: c_int) -> LinuxResult<isize> {
    sys_exit_impl(kernel, status)
}

/// Processes are single-threaded, so this is `exit`.
#[syscall_trace]
pub fn sys_exit_group<S: KernelServices>(
    kernel: &Kernel<S>,
    status: c_int,
) -> LinuxResult<isize> {
    sys_exit_impl(kernel, status)
}

use axerrno::LinuxResult;
use reaper_core::{Kernel, KernelServices};
use reaper_process::NO_PARENT;
use syscall_trace::syscall_trace;

#[syscall_trace]
pub fn sys_getpid<S: KernelServices>(kernel: &Kernel<S>) -> LinuxResult<isize> {
    Ok(kernel.current_pid() as _)
}

/// Orphans, and the root process, report a parent of 0.
#[syscall_trace]
pub fn sys_getppid<S: KernelServices>(kernel: &Kernel<S>) -> LinuxResult<isize> {
    let pid = kernel.current_pid();
    Ok(match kernel.processes().parent_of(pid) {
        Some(parent) if parent != NO_PARENT => parent as _,
        _ => 0,
    })
}

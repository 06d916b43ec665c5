use crate::ptr::UserOutPtr;
use axerrno::{LinuxError, LinuxResult};
use bitflags::bitflags;
use linux_raw_sys::general::{
    __WALL, __WCLONE, __WNOTHREAD, WCONTINUED, WEXITED, WNOHANG, WNOWAIT, WUNTRACED,
};
use reaper_core::{Kernel, KernelServices};
use syscall_trace::syscall_trace;

bitflags! {
    /// Wait options. None of them is supported: waiting always blocks until
    /// the named child has exited, then reaps it.
    #[derive(Debug)]
    struct WaitOptions: u32 {
        /// Do not block when there are no processes wishing to report status.
        const WNOHANG = WNOHANG;
        /// Report the status of selected processes which are stopped due to a
        /// `SIGTTIN`, `SIGTTOU`, `SIGTSTP`, or `SIGSTOP` signal.
        const WUNTRACED = WUNTRACED;
        /// Report the status of selected processes which have terminated.
        const WEXITED = WEXITED;
        /// Report the status of selected processes that have continued from a
        /// job control stop by receiving a `SIGCONT` signal.
        const WCONTINUED = WCONTINUED;
        /// Don't reap, just poll status.
        const WNOWAIT = WNOWAIT;

        /// Don't wait on children of other threads in this group
        const WNOTHREAD = __WNOTHREAD;
        /// Wait on all children, regardless of type
        const WALL = __WALL;
        /// Wait for "clone" children only.
        const WCLONE = __WCLONE;
    }
}

/// Wait for the child `pid` of the calling process to exit and reap it.
///
/// The encoded exit status is stored through `exit_code_ptr` unless it is
/// null. A failed store is reported as `EFAULT`, but the child is reaped
/// either way.
#[syscall_trace]
pub fn sys_waitpid<S: KernelServices>(
    kernel: &Kernel<S>,
    pid: i32,
    exit_code_ptr: UserOutPtr<i32>,
    options: u32,
) -> LinuxResult<isize> {
    if options != 0 {
        warn!(
            "[wait] unsupported wait options: {:?}",
            WaitOptions::from_bits_retain(options)
        );
        return Err(LinuxError::EINVAL);
    }
    // wildcard and process-group waits
    if pid <= 0 {
        return Err(LinuxError::ESRCH);
    }

    let parent = kernel.current_pid();
    let status = kernel.processes().wait(parent, pid as _)?;
    if !exit_code_ptr.is_null() {
        exit_code_ptr
            .write(kernel.services(), status.raw())
            .inspect_err(|_| {
                warn!(
                    "[wait] process {} reaped child {} but could not store its status",
                    parent, pid
                )
            })?;
    }
    Ok(pid as _)
}

/// `wait4` without resource usage reporting.
#[syscall_trace]
pub fn sys_wait4<S: KernelServices>(
    kernel: &Kernel<S>,
    pid: i32,
    exit_code_ptr: UserOutPtr<i32>,
    options: u32,
    rusage: usize,
) -> LinuxResult<isize> {
    if rusage != 0 {
        debug!("[wait] rusage at {:#x} is not filled in", rusage);
    }
    sys_waitpid(kernel, pid, exit_code_ptr, options)
}

use axerrno::LinuxResult;
use bitflags::bitflags;
use linux_raw_sys::general::*;
use reaper_core::{Kernel, KernelServices};

bitflags! {
    /// Options for use with [`sys_clone`](crate::interface::task::sys_clone).
    ///
    /// Only plain fork is supported; the flags are named so rejected requests
    /// can be logged readably.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct CloneFlags: u32 {
        /// The calling process and the child process run in the same
        /// memory space.
        const VM = CLONE_VM;
        /// The caller and the child process share the same filesystem
        /// information.
        const FS = CLONE_FS;
        /// The calling process and the child process share the same file
        /// descriptor table.
        const FILES = CLONE_FILES;
        /// The calling process and the child process share the same table
        /// of signal handlers.
        const SIGHAND = CLONE_SIGHAND;
        /// The execution of the calling process is suspended until the
        /// child releases its virtual memory resources.
        const VFORK = CLONE_VFORK;
        /// The parent of the new child will be the same as that of the
        /// calling process.
        const PARENT = CLONE_PARENT;
        /// The child is placed in the same thread group as the calling
        /// process.
        const THREAD = CLONE_THREAD;
        /// The TLS (Thread Local Storage) descriptor is set to tls.
        const SETTLS = CLONE_SETTLS;
        /// Store the child thread ID in the parent's memory.
        const PARENT_SETTID = CLONE_PARENT_SETTID;
        /// Clear (zero) the child thread ID in child memory when the child
        /// exits.
        const CHILD_CLEARTID = CLONE_CHILD_CLEARTID;
        /// Store the child thread ID in the child's memory.
        const CHILD_SETTID = CLONE_CHILD_SETTID;
    }
}

/// Create a child process running a copy of the caller.
///
/// The parent gets the child's pid, the child resumes from the same syscall
/// with 0. Either the child is registered and runnable, or nothing of it is
/// left behind.
pub fn sys_fork_impl<S: KernelServices>(kernel: &Kernel<S>) -> LinuxResult<isize> {
    let services = kernel.services();
    let parent = kernel.current_pid();

    // duplicate trap frame and address space before touching the table:
    // both may sleep
    let trap_frame = services.read_trap_frame();
    let addr_space = services.clone_addr_space(parent)?;
    let child_tf = services.duplicate_context(&trap_frame, 0)?;

    let pid = kernel.processes().fork(parent)?;
    if let Err(err) = services.spawn_task(pid, child_tf, addr_space) {
        warn!("[fork] failed to start task of process {}: {:?}", pid, err);
        kernel.processes().abort_fork(pid);
        return Err(err);
    }
    info!("[fork] process {} forked child {}", parent, pid);
    Ok(pid as _)
}

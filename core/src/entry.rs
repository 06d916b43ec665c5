use crate::kernel::Kernel;
use crate::task::KernelServices;
use axerrno::LinuxResult;
use reaper_process::Pid;

/// Register the init process and start its task.
///
/// `uctx` and `uspace` are the entry context and address space of the loaded
/// init program. The init process has no parent; if its task cannot be
/// started, its record is dropped again.
pub fn run_init<S: KernelServices>(
    kernel: &Kernel<S>,
    uctx: S::TrapFrame,
    uspace: S::AddrSpace,
) -> LinuxResult<Pid> {
    let pid = kernel.config().init_pid;
    kernel.processes().spawn_root(pid);
    if let Err(err) = kernel.services().spawn_task(pid, uctx, uspace) {
        warn!("[task manager] failed to start init process: {:?}", err);
        kernel.processes().abort_fork(pid);
        return Err(err);
    }
    info!("[task manager] init process {} started", pid);
    Ok(pid)
}

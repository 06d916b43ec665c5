use reaper_core::{Kernel, KernelServices};

/// Terminate the calling process.
///
/// The exit status is published (waking any waiting parent) before the
/// address space is torn down. Nothing can be rolled back past that point,
/// so a teardown failure brings the kernel down.
pub fn sys_exit_impl<S: KernelServices>(kernel: &Kernel<S>, exit_code: i32) -> ! {
    let pid = kernel.current_pid();
    info!("[exit] process {} exiting with code {}", pid, exit_code);
    kernel.processes().exit(pid, exit_code);

    let services = kernel.services();
    if let Err(err) = services.teardown_addr_space(pid) {
        panic!(
            "[exit] failed to tear down address space of process {}: {:?}",
            pid, err
        );
    }
    services.exit_current(exit_code)
}

use crate::config::KernelConfig;
use crate::task::KernelServices;
use reaper_process::{Pid, ProcessManager};

/// The process subsystem of one kernel instance.
///
/// Syscalls receive it by reference instead of reaching for globals, so
/// several kernels (one per test, say) can coexist.
pub struct Kernel<S: KernelServices> {
    processes: ProcessManager<S::WaitQueue>,
    services: S,
    config: KernelConfig,
}

impl<S: KernelServices> Kernel<S> {
    pub fn new(config: KernelConfig, services: S, wait_queue: S::WaitQueue) -> Self {
        Self {
            processes: ProcessManager::new(config.process, wait_queue),
            services,
            config,
        }
    }

    pub fn processes(&self) -> &ProcessManager<S::WaitQueue> {
        &self.processes
    }

    pub fn services(&self) -> &S {
        &self.services
    }

    pub fn config(&self) -> &KernelConfig {
        &self.config
    }

    pub fn current_pid(&self) -> Pid {
        self.services.current_pid()
    }
}

use reaper_process::{Pid, ProcessConfig};

/// Pid of the init process.
pub const INIT_PID: Pid = 1;

#[derive(Debug, Clone, Copy)]
pub struct KernelConfig {
    /// Pid the first user process is registered under.
    pub init_pid: Pid,
    pub process: ProcessConfig,
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            init_pid: INIT_PID,
            process: ProcessConfig::default(),
        }
    }
}

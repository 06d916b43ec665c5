use crate::Pid;

/// First pid handed out by `fork`; pid 1 belongs to the init process.
pub const FIRST_PID: Pid = 2;
/// Largest pid handed out. Pids are positive `pid_t` values.
pub const MAX_PID: Pid = i32::MAX as Pid;
/// Default number of records (live and zombie) the table holds.
pub const MAX_PROCESSES: usize = 32768;

/// What happens to the children of an exiting process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrphanPolicy {
    /// Zombie children are reclaimed on the spot; live children lose their
    /// parent and are reclaimed as soon as they exit. Nobody can wait on them.
    Detach,
    /// Children, live or zombie, are handed to the given reaper process, which
    /// collects them like its own. Falls back to `Detach` if the reaper is the
    /// exiting process or is not alive.
    Reparent(Pid),
}

#[derive(Debug, Clone, Copy)]
pub struct ProcessConfig {
    pub first_pid: Pid,
    pub max_pid: Pid,
    pub max_processes: usize,
    pub orphan_policy: OrphanPolicy,
}

impl Default for ProcessConfig {
    fn default() -> Self {
        Self {
            first_pid: FIRST_PID,
            max_pid: MAX_PID,
            max_processes: MAX_PROCESSES,
            orphan_policy: OrphanPolicy::Detach,
        }
    }
}

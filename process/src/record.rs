use crate::status::ExitStatus;
use crate::{NO_PARENT, Pid};

/// Bookkeeping entry of one process.
///
/// A record is alive until `mark_exited` stores the exit status; from then on
/// it is a zombie until it is removed from the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessRecord {
    pid: Pid,
    parent: Pid,
    exit_status: Option<ExitStatus>,
}

impl ProcessRecord {
    pub fn new(pid: Pid, parent: Pid) -> Self {
        Self {
            pid,
            parent,
            exit_status: None,
        }
    }

    pub fn get_pid(&self) -> Pid {
        self.pid
    }

    /// Parent id, or [`NO_PARENT`] for the init process and for orphans.
    pub fn get_parent(&self) -> Pid {
        self.parent
    }

    pub fn is_orphan(&self) -> bool {
        self.parent == NO_PARENT
    }

    pub fn is_alive(&self) -> bool {
        self.exit_status.is_none()
    }

    pub fn is_zombie(&self) -> bool {
        self.exit_status.is_some()
    }

    /// `None` while the process is alive.
    pub fn exit_status(&self) -> Option<ExitStatus> {
        self.exit_status
    }

    pub(crate) fn set_parent(&mut self, parent: Pid) {
        self.parent = parent;
    }

    /// Records the exit status. A process exits once.
    pub(crate) fn mark_exited(&mut self, status: ExitStatus) {
        assert!(
            self.exit_status.is_none(),
            "[process] process {} is already exited",
            self.pid
        );
        self.exit_status = Some(status);
    }
}

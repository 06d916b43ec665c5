use crate::condvar::{Condvar, WaitQueue};
use crate::config::{OrphanPolicy, ProcessConfig};
use crate::pid::PidAllocator;
use crate::record::ProcessRecord;
use crate::status::ExitStatus;
use crate::table::ProcessTable;
use crate::{NO_PARENT, Pid};
use alloc::vec::Vec;
use axerrno::{LinuxError, LinuxResult};
use spin::Mutex;

struct Inner {
    table: ProcessTable,
    pids: PidAllocator,
}

/// Owner of the process table, the pid allocator and the child-exit condition
/// variable.
///
/// One lock covers all of them. Every operation runs its whole
/// check-then-act sequence under a single hold of that lock; `wait` is the
/// only operation that gives it up midway, while parked on `child_exit`.
pub struct ProcessManager<Q> {
    inner: Mutex<Inner>,
    child_exit: Condvar<Q>,
    max_processes: usize,
    orphan_policy: OrphanPolicy,
}

impl<Q: WaitQueue> ProcessManager<Q> {
    pub fn new(config: ProcessConfig, queue: Q) -> Self {
        Self {
            inner: Mutex::new(Inner {
                table: ProcessTable::new(),
                pids: PidAllocator::new(config.first_pid, config.max_pid),
            }),
            child_exit: Condvar::new(queue),
            max_processes: config.max_processes,
            orphan_policy: config.orphan_policy,
        }
    }

    /// Register a process with no parent, like the `init` process.
    pub fn spawn_root(&self, pid: Pid) {
        assert_ne!(pid, NO_PARENT, "[process] pid {} is reserved", NO_PARENT);
        let mut inner = self.inner.lock();
        inner.table.insert(ProcessRecord::new(pid, NO_PARENT));
        inner.pids.reserve(pid);
        info!("[process] root process {} registered", pid);
    }

    /// Allocate a pid and register it as a live child of `parent`.
    ///
    /// The record exists before the child can run, so a wait on the returned
    /// pid is well defined from the start. If the child never gets to run,
    /// the caller must undo this with [`abort_fork`](Self::abort_fork).
    ///
    /// Errors: `ESRCH` if `parent` is not a live process, `EAGAIN` if the
    /// table is at capacity, `ENOSPC` if no pid is free.
    pub fn fork(&self, parent: Pid) -> LinuxResult<Pid> {
        let mut inner = self.inner.lock();
        let Inner { table, pids } = &mut *inner;
        if !table.get(parent).is_some_and(ProcessRecord::is_alive) {
            warn!("[process] fork from unknown process {}", parent);
            return Err(LinuxError::ESRCH);
        }
        if table.len() >= self.max_processes {
            return Err(LinuxError::EAGAIN);
        }
        let pid = pids
            .alloc(|pid| table.contains(pid))
            .ok_or(LinuxError::ENOSPC)?;
        table.insert(ProcessRecord::new(pid, parent));
        debug!("[process] process {} forked child {}", parent, pid);
        Ok(pid)
    }

    /// Drop the record of a child whose fork failed after [`fork`](Self::fork).
    pub fn abort_fork(&self, pid: Pid) {
        let mut inner = self.inner.lock();
        let table = &mut inner.table;
        assert!(
            table.get(pid).is_some_and(ProcessRecord::is_alive) && table.find_child(pid).is_none(),
            "[process] process {} is not a pending fork",
            pid
        );
        table.remove(pid);
        debug!("[process] fork of {} rolled back", pid);
    }

    /// Record that `pid` exited with `exit_code` and wake every waiter.
    ///
    /// Children of the exiting process are handled according to the orphan
    /// policy. A process nobody can wait on any more (its parent is gone) is
    /// reclaimed right away. Exiting a process twice is a bug and panics.
    pub fn exit(&self, pid: Pid, exit_code: i32) {
        let status = ExitStatus::encode(exit_code);
        let mut inner = self.inner.lock();
        let table = &mut inner.table;
        let Some(record) = table.get_mut(pid) else {
            warn!("[process] untracked process {} exited", pid);
            return;
        };
        record.mark_exited(status);
        let orphan = record.is_orphan();
        info!("[process] process {} {}", pid, status);

        self.release_children(table, pid);
        if orphan {
            // nobody left to reap it
            table.remove(pid);
            debug!("[process] process {} reclaimed on exit", pid);
        }
        self.child_exit.notify_all();
    }

    /// Block until `child` of `parent` has exited, then reap it and return its
    /// status.
    ///
    /// Errors: `ESRCH` if there is no record for `child` (never existed, or
    /// already reaped), `ECHILD` if `child` is not a child of `parent`.
    pub fn wait(&self, parent: Pid, child: Pid) -> LinuxResult<ExitStatus> {
        let mut inner = self.inner.lock();
        loop {
            let record = inner.table.get(child).ok_or(LinuxError::ESRCH)?;
            if parent == NO_PARENT || record.get_parent() != parent {
                return Err(LinuxError::ECHILD);
            }
            if let Some(status) = record.exit_status() {
                inner.table.remove(child);
                info!("[process] process {} reaped child {} ({})", parent, child, status);
                return Ok(status);
            }
            // woken by every exit; most wakeups are for someone else
            inner = self.child_exit.wait(&self.inner, inner);
        }
    }

    fn release_children(&self, table: &mut ProcessTable, pid: Pid) {
        let reaper = match self.orphan_policy {
            OrphanPolicy::Reparent(reaper)
                if reaper != pid && table.get(reaper).is_some_and(ProcessRecord::is_alive) =>
            {
                Some(reaper)
            }
            _ => None,
        };
        while let Some(child) = table.find_child(pid) {
            let zombie = table.get(child).is_some_and(ProcessRecord::is_zombie);
            match reaper {
                Some(reaper) => {
                    table.reparent(child, reaper);
                    debug!("[process] process {} handed to reaper {}", child, reaper);
                }
                None if zombie => {
                    table.remove(child);
                    debug!("[process] zombie {} reclaimed with its parent", child);
                }
                None => {
                    table.reparent(child, NO_PARENT);
                    debug!("[process] process {} orphaned", child);
                }
            }
        }
    }

    /// Parent of `pid`; `Some(NO_PARENT)` for the root and orphans.
    pub fn parent_of(&self, pid: Pid) -> Option<Pid> {
        self.inner.lock().table.get(pid).map(ProcessRecord::get_parent)
    }

    /// `None` if `pid` has no record.
    pub fn is_zombie(&self, pid: Pid) -> Option<bool> {
        self.inner.lock().table.get(pid).map(ProcessRecord::is_zombie)
    }

    pub fn contains(&self, pid: Pid) -> bool {
        self.inner.lock().table.contains(pid)
    }

    pub fn children_of(&self, pid: Pid) -> Vec<Pid> {
        self.inner.lock().table.children_of(pid).collect()
    }

    /// Number of records, live and zombie.
    pub fn len(&self) -> usize {
        self.inner.lock().table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

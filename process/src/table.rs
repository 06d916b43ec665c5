use crate::record::ProcessRecord;
use crate::{NO_PARENT, Pid};
use alloc::collections::{BTreeMap, BTreeSet};

/// Registry of process records keyed by pid, with a parent -> children index.
///
/// The table does no locking of its own. It is only reachable through the
/// [`ProcessManager`](crate::ProcessManager)'s lock guard, so a multi-step
/// check-then-act sequence on it is atomic as long as the guard is held.
#[derive(Default)]
pub struct ProcessTable {
    records: BTreeMap<Pid, ProcessRecord>,
    // orphans (parent == NO_PARENT) are not indexed
    children: BTreeMap<Pid, BTreeSet<Pid>>,
}

impl ProcessTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new record. The pid must not be registered already.
    pub fn insert(&mut self, record: ProcessRecord) {
        let pid = record.get_pid();
        let parent = record.get_parent();
        if self.records.contains_key(&pid) {
            panic!("[process] process with id {} already exists", pid);
        }
        if parent != NO_PARENT {
            self.children.entry(parent).or_default().insert(pid);
        }
        self.records.insert(pid, record);
    }

    pub fn get(&self, pid: Pid) -> Option<&ProcessRecord> {
        self.records.get(&pid)
    }

    pub fn get_mut(&mut self, pid: Pid) -> Option<&mut ProcessRecord> {
        self.records.get_mut(&pid)
    }

    pub fn contains(&self, pid: Pid) -> bool {
        self.records.contains_key(&pid)
    }

    /// Any one child (live or zombie) of `parent`.
    pub fn find_child(&self, parent: Pid) -> Option<Pid> {
        self.children
            .get(&parent)
            .and_then(|children| children.first().copied())
    }

    /// All children of `parent`, in pid order.
    pub fn children_of(&self, parent: Pid) -> impl Iterator<Item = Pid> + '_ {
        self.children
            .get(&parent)
            .into_iter()
            .flat_map(|children| children.iter().copied())
    }

    /// Move `pid` under `new_parent` ([`NO_PARENT`] detaches it).
    pub fn reparent(&mut self, pid: Pid, new_parent: Pid) {
        let Some(record) = self.records.get_mut(&pid) else {
            panic!("[process] reparenting unknown process {}", pid);
        };
        let old_parent = record.get_parent();
        record.set_parent(new_parent);
        self.unlink_child(old_parent, pid);
        if new_parent != NO_PARENT {
            self.children.entry(new_parent).or_default().insert(pid);
        }
    }

    /// Remove and return the record of `pid`.
    ///
    /// The record's own children must have been reparented or removed first.
    pub fn remove(&mut self, pid: Pid) -> Option<ProcessRecord> {
        let record = self.records.remove(&pid)?;
        self.unlink_child(record.get_parent(), pid);
        assert!(
            !self.children.contains_key(&pid),
            "[process] process {} removed while it still has children",
            pid
        );
        Some(record)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn unlink_child(&mut self, parent: Pid, pid: Pid) {
        if parent == NO_PARENT {
            return;
        }
        if let Some(children) = self.children.get_mut(&parent) {
            children.remove(&pid);
            if children.is_empty() {
                self.children.remove(&parent);
            }
        }
    }
}

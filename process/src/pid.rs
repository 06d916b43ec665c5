use crate::{NO_PARENT, Pid};

/// Hands out process ids in increasing order, wrapping to the bottom of the
/// range once the top is passed.
///
/// The allocator lives inside the table lock: `alloc` is given a predicate
/// telling it which ids are still held by a record, so an id is never reused
/// while its record (live or zombie) exists.
pub struct PidAllocator {
    next: Pid,
    first: Pid,
    last: Pid,
}

impl PidAllocator {
    /// Create an allocator over `first..=last`.
    pub fn new(first: Pid, last: Pid) -> Self {
        assert!(
            first != NO_PARENT && first <= last,
            "[process] invalid pid range {}..={}",
            first,
            last
        );
        Self {
            next: first,
            first,
            last,
        }
    }

    /// Returns the next id not reported as `in_use`, or `None` if every id in
    /// the range is taken.
    pub fn alloc(&mut self, in_use: impl Fn(Pid) -> bool) -> Option<Pid> {
        let span = (self.last - self.first) as u64 + 1;
        for _ in 0..span {
            let pid = self.next;
            self.next = if pid == self.last { self.first } else { pid + 1 };
            if !in_use(pid) {
                return Some(pid);
            }
        }
        None
    }

    /// Marks `pid` as taken by a process registered from outside the counter
    /// (the init process), so the counter moves past it.
    pub fn reserve(&mut self, pid: Pid) {
        if pid >= self.next && pid <= self.last {
            self.next = if pid == self.last { self.first } else { pid + 1 };
        }
    }
}

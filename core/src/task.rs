use axerrno::LinuxResult;
use reaper_process::{Pid, WaitQueue};

/// Saved user register state of a task, as captured on syscall entry.
pub trait UserContext: Clone + Send + 'static {
    /// The `index`-th syscall argument register.
    fn arg(&self, index: usize) -> usize;

    /// Set the value the task sees returned from the syscall.
    fn set_retval(&mut self, value: usize);
}

/// Services the process subsystem borrows from the rest of the kernel.
///
/// None of these are called with the process table lock held: address-space
/// copies and teardown may sleep.
pub trait KernelServices: Send + Sync + 'static {
    type TrapFrame: UserContext;
    type AddrSpace: Send + 'static;
    /// The scheduler's wait queue, used to park `wait` callers.
    type WaitQueue: WaitQueue;

    /// Pid of the process the calling task belongs to.
    fn current_pid(&self) -> Pid;

    /// The trap frame saved on the current task's kernel stack.
    fn read_trap_frame(&self) -> Self::TrapFrame;

    /// Copy-on-fork duplicate of `pid`'s address space. `ENOMEM` on failure.
    fn clone_addr_space(&self, pid: Pid) -> LinuxResult<Self::AddrSpace>;

    /// Independent copy of `tf` that returns `retval` from the syscall when
    /// resumed. `ENOMEM` on failure.
    fn duplicate_context(
        &self,
        tf: &Self::TrapFrame,
        retval: usize,
    ) -> LinuxResult<Self::TrapFrame>;

    /// Create a runnable task for process `pid`, resuming in user space at
    /// `tf` with `aspace` installed. `EAGAIN` if no task can be created; the
    /// inputs are dropped in that case.
    fn spawn_task(
        &self,
        pid: Pid,
        tf: Self::TrapFrame,
        aspace: Self::AddrSpace,
    ) -> LinuxResult<()>;

    /// Deactivate and destroy the address space of `pid`.
    fn teardown_addr_space(&self, pid: Pid) -> LinuxResult<()>;

    /// Detach the current task from its process and terminate it.
    fn exit_current(&self, exit_code: i32) -> !;

    /// Copy `src` to user memory at `dst`. `EFAULT` on a bad address.
    fn copy_to_user(&self, dst: usize, src: &[u8]) -> LinuxResult<()>;
}

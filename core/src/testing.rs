//! Host-side stand-ins for the kernel services.
//!
//! Each simulated task is an OS thread with its pid in a thread-local. A task
//! that calls `exit_current` unwinds with a [`TaskExit`] payload, which
//! [`run_as`] turns back into [`TaskOutcome::Exited`].

use crate::config::KernelConfig;
use crate::entry::run_init;
use crate::kernel::Kernel;
use crate::task::{KernelServices, UserContext};
use alloc::collections::BTreeMap;
use alloc::sync::Arc;
use alloc::vec::Vec;
use axerrno::{LinuxError, LinuxResult};
use core::cell::Cell;
use reaper_process::{NO_PARENT, Pid, StdWaitQueue};
use spin::Mutex;
use std::boxed::Box;
use std::panic::{self, AssertUnwindSafe};
use std::thread::{self, JoinHandle};

/// User addresses below this fault.
pub const USER_BASE: usize = 0x1000;

std::thread_local! {
    static CURRENT: Cell<Pid> = const { Cell::new(NO_PARENT) };
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MockTrapFrame {
    pub args: [usize; 6],
    pub retval: usize,
}

impl MockTrapFrame {
    pub fn with_args(args: &[usize]) -> Self {
        let mut tf = Self::default();
        tf.args[..args.len()].copy_from_slice(args);
        tf
    }
}

impl UserContext for MockTrapFrame {
    fn arg(&self, index: usize) -> usize {
        self.args[index]
    }

    fn set_retval(&mut self, value: usize) {
        self.retval = value;
    }
}

/// Address space copied from `owner`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockAddrSpace {
    pub owner: Pid,
}

/// Service call to fail once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailPoint {
    CloneAddrSpace,
    DuplicateContext,
    SpawnTask,
    TeardownAddrSpace,
}

#[derive(Debug, Clone)]
pub struct SpawnedTask {
    pub pid: Pid,
    pub trap_frame: MockTrapFrame,
    pub addr_space: MockAddrSpace,
}

/// Unwind payload of a task that called `exit_current`.
#[derive(Debug)]
pub struct TaskExit {
    pub pid: Pid,
    pub exit_code: i32,
}

#[derive(Debug, PartialEq, Eq)]
pub enum TaskOutcome<R> {
    Returned(R),
    Exited(i32),
}

#[derive(Default)]
pub struct MockServices {
    fail_next: Mutex<Option<FailPoint>>,
    spawned: Mutex<Vec<SpawnedTask>>,
    torn_down: Mutex<Vec<Pid>>,
    user_memory: Mutex<BTreeMap<usize, Vec<u8>>>,
}

impl MockServices {
    pub fn fail_next(&self, point: FailPoint) {
        *self.fail_next.lock() = Some(point);
    }

    pub fn spawned(&self) -> Vec<SpawnedTask> {
        self.spawned.lock().clone()
    }

    pub fn spawned_task(&self, pid: Pid) -> Option<SpawnedTask> {
        self.spawned.lock().iter().find(|task| task.pid == pid).cloned()
    }

    pub fn torn_down(&self) -> Vec<Pid> {
        self.torn_down.lock().clone()
    }

    pub fn read_user_i32(&self, addr: usize) -> Option<i32> {
        let memory = self.user_memory.lock();
        let bytes = memory.get(&addr)?;
        Some(i32::from_ne_bytes(bytes.as_slice().try_into().ok()?))
    }

    fn should_fail(&self, point: FailPoint) -> bool {
        let mut fail_next = self.fail_next.lock();
        if *fail_next == Some(point) {
            *fail_next = None;
            return true;
        }
        false
    }
}

impl KernelServices for MockServices {
    type TrapFrame = MockTrapFrame;
    type AddrSpace = MockAddrSpace;
    type WaitQueue = StdWaitQueue;

    fn current_pid(&self) -> Pid {
        CURRENT.with(Cell::get)
    }

    fn read_trap_frame(&self) -> MockTrapFrame {
        MockTrapFrame::default()
    }

    fn clone_addr_space(&self, pid: Pid) -> LinuxResult<MockAddrSpace> {
        if self.should_fail(FailPoint::CloneAddrSpace) {
            return Err(LinuxError::ENOMEM);
        }
        Ok(MockAddrSpace { owner: pid })
    }

    fn duplicate_context(
        &self,
        tf: &MockTrapFrame,
        retval: usize,
    ) -> LinuxResult<MockTrapFrame> {
        if self.should_fail(FailPoint::DuplicateContext) {
            return Err(LinuxError::ENOMEM);
        }
        let mut new_tf = tf.clone();
        new_tf.set_retval(retval);
        Ok(new_tf)
    }

    fn spawn_task(
        &self,
        pid: Pid,
        trap_frame: MockTrapFrame,
        addr_space: MockAddrSpace,
    ) -> LinuxResult<()> {
        if self.should_fail(FailPoint::SpawnTask) {
            return Err(LinuxError::EAGAIN);
        }
        self.spawned.lock().push(SpawnedTask {
            pid,
            trap_frame,
            addr_space,
        });
        Ok(())
    }

    fn teardown_addr_space(&self, pid: Pid) -> LinuxResult<()> {
        if self.should_fail(FailPoint::TeardownAddrSpace) {
            return Err(LinuxError::EIO);
        }
        self.torn_down.lock().push(pid);
        Ok(())
    }

    fn exit_current(&self, exit_code: i32) -> ! {
        let pid = self.current_pid();
        panic::resume_unwind(Box::new(TaskExit { pid, exit_code }))
    }

    fn copy_to_user(&self, dst: usize, src: &[u8]) -> LinuxResult<()> {
        if dst < USER_BASE {
            return Err(LinuxError::EFAULT);
        }
        self.user_memory.lock().insert(dst, src.to_vec());
        Ok(())
    }
}

pub type MockKernel = Kernel<MockServices>;

/// A kernel with its init process running.
pub fn boot(config: KernelConfig) -> Arc<MockKernel> {
    let kernel = Kernel::new(config, MockServices::default(), StdWaitQueue::default());
    let init_pid = config.init_pid;
    run_init(
        &kernel,
        MockTrapFrame::default(),
        MockAddrSpace { owner: init_pid },
    )
    .expect("init failed to start");
    Arc::new(kernel)
}

/// Run `f` on the current thread as a task of process `pid`.
pub fn run_as<R>(pid: Pid, f: impl FnOnce() -> R) -> TaskOutcome<R> {
    CURRENT.with(|current| current.set(pid));
    let outcome = match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(value) => TaskOutcome::Returned(value),
        Err(payload) => match payload.downcast::<TaskExit>() {
            Ok(exit) => TaskOutcome::Exited(exit.exit_code),
            Err(payload) => panic::resume_unwind(payload),
        },
    };
    CURRENT.with(|current| current.set(NO_PARENT));
    outcome
}

/// Run `f` on a new thread as a task of process `pid`.
pub fn spawn_as<R, F>(pid: Pid, f: F) -> JoinHandle<TaskOutcome<R>>
where
    R: Send + 'static,
    F: FnOnce() -> R + Send + 'static,
{
    thread::spawn(move || run_as(pid, f))
}

#![allow(dead_code)]

use std::sync::Arc;

use axerrno::LinuxResult;
use reaper_api::interface::task::{sys_exit, sys_fork, sys_wait4};
use reaper_api::ptr::UserOutPtr;
use reaper_core::KernelConfig;
use reaper_core::testing::{MockKernel, TaskOutcome, boot, run_as};
use reaper_process::Pid;

pub use reaper_core::config::INIT_PID;

/// A valid user address for the wait status.
pub const STATUS_ADDR: usize = 0x8000;

pub fn new_kernel() -> Arc<MockKernel> {
    boot(KernelConfig::default())
}

pub fn fork(kernel: &MockKernel, parent: Pid) -> Pid {
    match run_as(parent, || sys_fork(kernel)) {
        TaskOutcome::Returned(Ok(pid)) => pid as Pid,
        other => panic!("fork from {} failed: {:?}", parent, other),
    }
}

pub fn exit(kernel: &MockKernel, pid: Pid, code: i32) {
    let outcome: TaskOutcome<_> = run_as(pid, || sys_exit(kernel, code));
    assert_eq!(outcome, TaskOutcome::Exited(code));
}

pub fn wait(kernel: &MockKernel, parent: Pid, child: i32, status_addr: usize) -> LinuxResult<isize> {
    match run_as(parent, || sys_wait4(kernel, child, UserOutPtr::from(status_addr), 0, 0)) {
        TaskOutcome::Returned(result) => result,
        TaskOutcome::Exited(code) => panic!("waiter {} exited with {}", parent, code),
    }
}

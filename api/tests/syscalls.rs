mod common;

use std::ffi::c_ulong;
use std::thread;
use std::time::Duration;

use axerrno::LinuxError;
use common::*;
use linux_raw_sys::general::{CLONE_VM, SIGCHLD, WNOHANG};
use reaper_api::interface::task::*;
use reaper_api::ptr::UserOutPtr;
use reaper_core::testing::{FailPoint, TaskOutcome, run_as, spawn_as};
use reaper_process::Pid;

#[test]
fn fork_returns_child_pid_and_child_sees_zero() {
    let kernel = new_kernel();
    let child = fork(&kernel, INIT_PID);

    assert_eq!(kernel.processes().parent_of(child), Some(INIT_PID));
    let task = kernel.services().spawned_task(child).unwrap();
    assert_eq!(task.trap_frame.retval, 0);
    assert_eq!(task.addr_space.owner, INIT_PID);
}

#[test]
fn wait_after_exit() {
    let kernel = new_kernel();
    let child = fork(&kernel, INIT_PID);
    exit(&kernel, child, 7);

    assert_eq!(kernel.processes().is_zombie(child), Some(true));
    assert_eq!(kernel.services().torn_down(), vec![child]);

    let result = wait(&kernel, INIT_PID, child as i32, STATUS_ADDR);
    assert_eq!(result, Ok(child as isize));
    assert_eq!(kernel.services().read_user_i32(STATUS_ADDR), Some(7 << 8));
    assert!(!kernel.processes().contains(child));
}

#[test]
fn wait_blocks_until_exit() {
    let kernel = new_kernel();
    let child = fork(&kernel, INIT_PID);

    let waiter = {
        let kernel = kernel.clone();
        spawn_as(INIT_PID, move || wait(&kernel, INIT_PID, child as i32, STATUS_ADDR))
    };
    thread::sleep(Duration::from_millis(50));
    assert!(!waiter.is_finished());

    exit(&kernel, child, 42);
    let result = waiter.join().unwrap();
    assert_eq!(result, TaskOutcome::Returned(Ok(child as isize)));
    assert_eq!(kernel.services().read_user_i32(STATUS_ADDR), Some(42 << 8));
}

#[test]
fn exit_code_is_truncated_to_a_byte() {
    let kernel = new_kernel();
    let child = fork(&kernel, INIT_PID);
    exit(&kernel, child, 0x1ff);

    wait(&kernel, INIT_PID, child as i32, STATUS_ADDR).unwrap();
    assert_eq!(kernel.services().read_user_i32(STATUS_ADDR), Some(0xff << 8));
}

#[test]
fn parent_exits_before_child() {
    let kernel = new_kernel();
    let parent = fork(&kernel, INIT_PID);
    let child = fork(&kernel, parent);

    exit(&kernel, parent, 0);
    assert_eq!(kernel.processes().parent_of(child), Some(0));
    let getppid = run_as(child, || sys_getppid(&*kernel));
    assert_eq!(getppid, TaskOutcome::Returned(Ok(0)));

    // an orphan reclaims itself
    exit(&kernel, child, 1);
    assert!(!kernel.processes().contains(child));
    assert_eq!(kernel.services().torn_down(), vec![parent, child]);

    // the parent is still waitable by init
    assert_eq!(wait(&kernel, INIT_PID, parent as i32, 0), Ok(parent as isize));
}

#[test]
fn getpid_and_getppid() {
    let kernel = new_kernel();
    let child = fork(&kernel, INIT_PID);

    assert_eq!(
        run_as(child, || sys_getpid(&*kernel)),
        TaskOutcome::Returned(Ok(child as isize))
    );
    assert_eq!(
        run_as(child, || sys_getppid(&*kernel)),
        TaskOutcome::Returned(Ok(INIT_PID as isize))
    );
    assert_eq!(
        run_as(INIT_PID, || sys_getppid(&*kernel)),
        TaskOutcome::Returned(Ok(0))
    );
}

#[test]
fn null_status_pointer_still_reaps() {
    let kernel = new_kernel();
    let child = fork(&kernel, INIT_PID);
    exit(&kernel, child, 3);

    assert_eq!(wait(&kernel, INIT_PID, child as i32, 0), Ok(child as isize));
    assert!(!kernel.processes().contains(child));
}

#[test]
fn bad_status_pointer_faults_after_reaping() {
    let kernel = new_kernel();
    let child = fork(&kernel, INIT_PID);
    exit(&kernel, child, 3);

    assert_eq!(wait(&kernel, INIT_PID, child as i32, 0x10), Err(LinuxError::EFAULT));
    assert!(!kernel.processes().contains(child));
    assert_eq!(
        wait(&kernel, INIT_PID, child as i32, STATUS_ADDR),
        Err(LinuxError::ESRCH)
    );
}

#[test]
fn wait_options_are_rejected() {
    let kernel = new_kernel();
    let child = fork(&kernel, INIT_PID);
    exit(&kernel, child, 0);

    let result = run_as(INIT_PID, || {
        sys_waitpid(&*kernel, child as i32, UserOutPtr::from(STATUS_ADDR), WNOHANG)
    });
    assert_eq!(result, TaskOutcome::Returned(Err(LinuxError::EINVAL)));
    // nothing was reaped
    assert_eq!(kernel.processes().is_zombie(child), Some(true));
}

#[test]
fn wait_relationship_errors() {
    let kernel = new_kernel();
    let child = fork(&kernel, INIT_PID);
    let grandchild = fork(&kernel, child);

    assert_eq!(wait(&kernel, INIT_PID, 999, STATUS_ADDR), Err(LinuxError::ESRCH));
    assert_eq!(wait(&kernel, INIT_PID, -1, STATUS_ADDR), Err(LinuxError::ESRCH));
    assert_eq!(wait(&kernel, INIT_PID, 0, STATUS_ADDR), Err(LinuxError::ESRCH));
    assert_eq!(
        wait(&kernel, INIT_PID, grandchild as i32, STATUS_ADDR),
        Err(LinuxError::ECHILD)
    );
    assert_eq!(wait(&kernel, child, INIT_PID as i32, STATUS_ADDR), Err(LinuxError::ECHILD));
}

#[test]
fn clone_accepts_only_fork() {
    let kernel = new_kernel();

    let forked = run_as(INIT_PID, || sys_clone(&*kernel, SIGCHLD as _, 0));
    let TaskOutcome::Returned(Ok(child)) = forked else {
        panic!("clone failed: {:?}", forked);
    };
    assert_eq!(kernel.processes().parent_of(child as Pid), Some(INIT_PID));

    let with_vm = run_as(INIT_PID, || sys_clone(&*kernel, (CLONE_VM | SIGCHLD) as _, 0));
    assert_eq!(with_vm, TaskOutcome::Returned(Err(LinuxError::EINVAL)));
    let with_stack = run_as(INIT_PID, || sys_clone(&*kernel, SIGCHLD as _, 0x7fff_0000));
    assert_eq!(with_stack, TaskOutcome::Returned(Err(LinuxError::EINVAL)));
    let upper_flags = run_as(INIT_PID, || {
        sys_clone(&*kernel, (1 << 32) | SIGCHLD as c_ulong, 0)
    });
    assert_eq!(upper_flags, TaskOutcome::Returned(Err(LinuxError::EINVAL)));
    let other_signal = run_as(INIT_PID, || sys_clone(&*kernel, 10, 0));
    assert_eq!(other_signal, TaskOutcome::Returned(Err(LinuxError::EINVAL)));

    assert_eq!(kernel.processes().len(), 2);
}

#[test]
fn failed_fork_leaves_nothing_behind() {
    let kernel = new_kernel();
    let cases = [
        (FailPoint::CloneAddrSpace, LinuxError::ENOMEM),
        (FailPoint::DuplicateContext, LinuxError::ENOMEM),
        (FailPoint::SpawnTask, LinuxError::EAGAIN),
    ];
    for (point, error) in cases {
        kernel.services().fail_next(point);
        let result = run_as(INIT_PID, || sys_fork(&*kernel));
        assert_eq!(result, TaskOutcome::Returned(Err(error)), "{:?}", point);
        assert_eq!(kernel.processes().len(), 1, "{:?}", point);
        assert!(kernel.processes().children_of(INIT_PID).is_empty());
    }
    // only init ever got a task
    assert_eq!(kernel.services().spawned().len(), 1);

    let child = fork(&kernel, INIT_PID);
    assert_eq!(kernel.processes().parent_of(child), Some(INIT_PID));
}

#[test]
#[should_panic(expected = "failed to tear down address space")]
fn teardown_failure_is_fatal() {
    let kernel = new_kernel();
    let child = fork(&kernel, INIT_PID);
    kernel.services().fail_next(FailPoint::TeardownAddrSpace);
    let _ = run_as(child, || sys_exit(&*kernel, 0));
}

#[test]
fn exit_group_exits() {
    let kernel = new_kernel();
    let child = fork(&kernel, INIT_PID);

    let outcome = run_as(child, || sys_exit_group(&*kernel, 9));
    assert_eq!(outcome, TaskOutcome::Exited(9));
    wait(&kernel, INIT_PID, child as i32, STATUS_ADDR).unwrap();
    assert_eq!(kernel.services().read_user_i32(STATUS_ADDR), Some(9 << 8));
}

#[test]
fn concurrent_families() {
    const FAMILIES: usize = 8;
    const CHILDREN: usize = 16;

    let kernel = new_kernel();
    let parents: Vec<Pid> = (0..FAMILIES).map(|_| fork(&kernel, INIT_PID)).collect();

    let handles: Vec<_> = parents
        .iter()
        .enumerate()
        .map(|(family, &parent)| {
            let kernel = kernel.clone();
            spawn_as(parent, move || {
                let status_addr = STATUS_ADDR + family * 0x100;
                for code in 0..CHILDREN as i32 {
                    let child = fork(&kernel, parent);
                    let exiter = {
                        let kernel = kernel.clone();
                        spawn_as(child, move || sys_exit(&*kernel, code))
                    };
                    assert_eq!(
                        wait(&kernel, parent, child as i32, status_addr),
                        Ok(child as isize)
                    );
                    assert_eq!(exiter.join().unwrap(), TaskOutcome::Exited(code));
                    assert_eq!(kernel.services().read_user_i32(status_addr), Some(code << 8));
                }
            })
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), TaskOutcome::Returned(()));
    }

    // init and the family heads
    assert_eq!(kernel.processes().len(), 1 + FAMILIES);
}

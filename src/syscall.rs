use axerrno::{LinuxError, LinuxResult};
use reaper_api::interface::task::*;
use reaper_core::{Kernel, KernelServices, UserContext};
use syscalls::Sysno;

/// Run syscall `syscall_num` for the current task.
///
/// Arguments are taken from `tf`. The result is the value to hand back to
/// user space: non-negative on success, `-errno` on failure. `exit` and
/// `exit_group` do not return.
pub fn handle_syscall<S: KernelServices>(
    kernel: &Kernel<S>,
    tf: &S::TrapFrame,
    syscall_num: usize,
) -> isize {
    let Some(sysno) = Sysno::new(syscall_num) else {
        warn!("[syscall] invalid syscall number {}, ENOSYS", syscall_num);
        return -(LinuxError::ENOSYS.code() as isize);
    };
    debug!("[syscall] <{:?}> begin", sysno);
    let result: LinuxResult<isize> = match sysno {
        Sysno::getpid => sys_getpid(kernel),
        Sysno::getppid => sys_getppid(kernel),
        Sysno::exit => sys_exit(kernel, tf.arg(0) as _),
        Sysno::exit_group => sys_exit_group(kernel, tf.arg(0) as _),
        #[cfg(target_arch = "x86_64")]
        Sysno::fork => sys_fork(kernel),
        Sysno::clone => sys_clone(kernel, tf.arg(0) as _, tf.arg(1) as _),
        Sysno::wait4 => sys_wait4(
            kernel,
            tf.arg(0) as _,
            tf.arg(1).into(),
            tf.arg(2) as _,
            tf.arg(3),
        ),
        _ => stub_unimplemented(sysno),
    };
    let ans = result.unwrap_or_else(|err| -(err.code() as isize));
    debug!("[syscall] <{:?}> return {}", sysno, ans);
    ans
}

fn stub_unimplemented(sysno: Sysno) -> LinuxResult<isize> {
    warn!("Unimplemented syscall: {:?}, ENOSYS", sysno);
    Err(LinuxError::ENOSYS)
}

mod clone;
mod exit;

pub use self::clone::*;
pub use self::exit::*;
pub use crate::imp::task::{sys_getpid, sys_getppid, sys_wait4, sys_waitpid};

use core::fmt;

/// Wait status of a terminated process, in the layout `wait(2)` reports it.
///
/// Only normal exits are produced here: the exit code sits in bits 8..16 and
/// the low byte (terminating signal) is zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitStatus(i32);

impl ExitStatus {
    /// Encodes the code passed to `exit`. Only the low 8 bits survive, as on Linux.
    pub const fn encode(exit_code: i32) -> Self {
        Self((exit_code & 0xff) << 8)
    }

    /// The exit code as the child passed it, truncated to 8 bits (`WEXITSTATUS`).
    pub const fn exit_code(self) -> i32 {
        (self.0 >> 8) & 0xff
    }

    /// The raw status word copied out to user space.
    pub const fn raw(self) -> i32 {
        self.0
    }
}

impl fmt::Display for ExitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "exited({})", self.exit_code())
    }
}

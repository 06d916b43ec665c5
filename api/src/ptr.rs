use alloc::format;
use alloc::string::String;
use axerrno::{LinuxError, LinuxResult};
use core::ffi::c_int;
use core::marker::PhantomData;
use reaper_core::KernelServices;

/// Pointer into user memory that the kernel writes through.
///
/// It is never dereferenced directly: writes go through the kernel's
/// user-copy service, which reports bad addresses as `EFAULT`.
#[derive(Debug)]
pub struct UserOutPtr<T> {
    address: usize,
    _marker: PhantomData<T>,
}

impl<T> Clone for UserOutPtr<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for UserOutPtr<T> {}

impl<T> From<usize> for UserOutPtr<T> {
    fn from(address: usize) -> Self {
        Self {
            address,
            _marker: PhantomData,
        }
    }
}

impl<T> UserOutPtr<T> {
    pub fn null() -> Self {
        Self::from(0)
    }

    pub fn address(&self) -> usize {
        self.address
    }

    pub fn is_null(&self) -> bool {
        self.address == 0
    }

    /// Format used by `#[syscall_trace]`.
    pub fn fmt_trace(&self) -> String {
        if self.is_null() {
            String::from("NULL")
        } else {
            format!("{:#x}", self.address)
        }
    }
}

impl UserOutPtr<c_int> {
    pub fn write<S: KernelServices>(&self, services: &S, value: c_int) -> LinuxResult<()> {
        if self.is_null() {
            return Err(LinuxError::EFAULT);
        }
        services.copy_to_user(self.address, &value.to_ne_bytes())
    }
}

use std::fs::File;
use std::io::{Error, Result};
use std::os::fd::{AsRawFd, FromRawFd, IntoRawFd};

use super::Attr;

pub fn perf_event_open(attr: &Attr, pid: i32, cpu: i32, group_fd: i32, flags: u64) -> Result<File> {
    let num = libc::SYS_perf_event_open;
    let fd = unsafe { libc::syscall(num, attr as *const Attr, pid, cpu, group_fd, flags) };
    if fd != -1 {
        Ok(unsafe { File::from_raw_fd(fd as _) })
    } else {
        Err(Error::last_os_error())
    }
}

// `prctl(PR_TASK_PERF_EVENTS_{ENABLE,DISABLE})` toggles every counter
// opened by the calling task, including the inherited ones.
pub fn prctl(option: i32) -> Result<()> {
    let zero: libc::c_ulong = 0;
    let result = unsafe { libc::prctl(option, zero, zero, zero, zero) };
    if result != -1 {
        Ok(())
    } else {
        Err(Error::last_os_error())
    }
}

pub fn task_enable() -> Result<()> {
    prctl(libc::PR_TASK_PERF_EVENTS_ENABLE)
}

pub fn task_disable() -> Result<()> {
    prctl(libc::PR_TASK_PERF_EVENTS_DISABLE)
}

pub fn read(file: &File, buf: &mut [u8]) -> Result<usize> {
    let fd = file.as_raw_fd();
    let count = buf.len();
    let buf = buf.as_mut_ptr() as _;
    let bytes = unsafe { libc::read(fd, buf, count) };
    if bytes != -1 {
        Ok(bytes as _)
    } else {
        Err(Error::last_os_error())
    }
}

// Dropping a `File` swallows the `close` result, we want to see it.
pub fn close(file: File) -> Result<()> {
    let fd = file.into_raw_fd();
    let result = unsafe { libc::close(fd) };
    if result != -1 {
        Ok(())
    } else {
        Err(Error::last_os_error())
    }
}

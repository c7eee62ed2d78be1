//! The kernel side of a session.
//!
//! [`Session`][crate::session::Session] only talks to the performance
//! monitoring facility through [`Pmu`], [`Linux`] is the real thing.

#[cfg(test)]
pub(crate) mod test;

use std::fs::File;
use std::io::Result;

use tracing::debug;

use crate::catalog::CounterDef;
use crate::config::{attr, Opts};
use crate::ffi::{bindings as b, syscall};

pub trait Pmu {
    /// An open counter, exclusively owned by the session that opened it.
    type Handle;

    /// Opens a stopped counter for the calling process on any CPU.
    fn open(&mut self, def: &CounterDef, opts: &Opts) -> Result<Self::Handle>;

    /// Starts every counter of the calling task.
    fn enable_all(&mut self) -> Result<()>;

    /// Stops every counter of the calling task.
    fn disable_all(&mut self) -> Result<()>;

    /// Reads the counter record into `buf`, returns the number of bytes read.
    fn read(&mut self, handle: &Self::Handle, buf: &mut [u8]) -> Result<usize>;

    fn close(&mut self, handle: Self::Handle) -> Result<()>;
}

impl<P: Pmu + ?Sized> Pmu for &mut P {
    type Handle = P::Handle;

    fn open(&mut self, def: &CounterDef, opts: &Opts) -> Result<Self::Handle> {
        (**self).open(def, opts)
    }

    fn enable_all(&mut self) -> Result<()> {
        (**self).enable_all()
    }

    fn disable_all(&mut self) -> Result<()> {
        (**self).disable_all()
    }

    fn read(&mut self, handle: &Self::Handle, buf: &mut [u8]) -> Result<usize> {
        (**self).read(handle, buf)
    }

    fn close(&mut self, handle: Self::Handle) -> Result<()> {
        (**self).close(handle)
    }
}

/// `perf_event_open(2)` and friends.
///
/// Every call fails with [`Unsupported`][std::io::ErrorKind::Unsupported]
/// outside Linux and Android.
#[derive(Clone, Copy, Debug, Default)]
pub struct Linux;

impl Pmu for Linux {
    type Handle = File;

    fn open(&mut self, def: &CounterDef, opts: &Opts) -> Result<File> {
        let attr = attr::from(def.event(), opts);
        // Calling process, any CPU, no group.
        let file = syscall!(perf_event_open, &attr, 0, -1, -1, b::PERF_FLAG_FD_CLOEXEC)?;
        debug!(counter = def.name, config = def.config, "opened counter");
        Ok(file)
    }

    fn enable_all(&mut self) -> Result<()> {
        syscall!(task_enable)
    }

    fn disable_all(&mut self) -> Result<()> {
        syscall!(task_disable)
    }

    fn read(&mut self, handle: &File, buf: &mut [u8]) -> Result<usize> {
        syscall!(read, handle, buf)
    }

    fn close(&mut self, handle: File) -> Result<()> {
        syscall!(close, handle)
    }
}

use std::collections::{HashMap, HashSet};
use std::io::{Error, ErrorKind, Result};

use super::Pmu;
use crate::catalog::CounterDef;
use crate::config::Opts;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    Open(&'static str),
    EnableAll,
    DisableAll,
    Read(u32),
    Close(u32),
}

/// Records every call and answers from a script.
#[derive(Debug, Default)]
pub struct Script {
    pub calls: Vec<Call>,
    /// Record returned by a read, a zeroed full record if missing.
    pub records: HashMap<u32, Vec<u8>>,
    pub fail_open: Option<&'static str>,
    pub fail_enable: bool,
    pub fail_disable: bool,
    pub fail_read: Option<ErrorKind>,
    pub fail_close: bool,
    pub open: HashSet<u32>,
    next: u32,
}

impl Script {
    pub fn open_def(&mut self, name: &str) -> Result<u32> {
        let def = CounterDef::find(name).ok_or(ErrorKind::NotFound)?;
        self.open(def, &Opts::default())
    }

    pub fn set_record(&mut self, handle: u32, record: Vec<u8>) {
        self.records.insert(handle, record);
    }

    pub fn count(&self, call: &Call) -> usize {
        self.calls.iter().filter(|c| *c == call).count()
    }
}

impl Pmu for Script {
    type Handle = u32;

    fn open(&mut self, def: &CounterDef, _: &Opts) -> Result<u32> {
        self.calls.push(Call::Open(def.name));
        if self.fail_open == Some(def.name) {
            return Err(Error::from(ErrorKind::PermissionDenied));
        }
        self.next += 1;
        self.open.insert(self.next);
        Ok(self.next)
    }

    fn enable_all(&mut self) -> Result<()> {
        self.calls.push(Call::EnableAll);
        match self.fail_enable {
            true => Err(Error::from(ErrorKind::PermissionDenied)),
            false => Ok(()),
        }
    }

    fn disable_all(&mut self) -> Result<()> {
        self.calls.push(Call::DisableAll);
        match self.fail_disable {
            true => Err(Error::from(ErrorKind::PermissionDenied)),
            false => Ok(()),
        }
    }

    fn read(&mut self, handle: &u32, buf: &mut [u8]) -> Result<usize> {
        self.calls.push(Call::Read(*handle));
        if let Some(kind) = self.fail_read {
            return Err(Error::from(kind));
        }
        let zeroed = vec![0; 24];
        let record = self.records.get(handle).unwrap_or(&zeroed);
        let len = record.len().min(buf.len());
        buf[..len].copy_from_slice(&record[..len]);
        Ok(len)
    }

    fn close(&mut self, handle: u32) -> Result<()> {
        self.calls.push(Call::Close(handle));
        assert!(self.open.remove(&handle), "handle {handle} closed twice");
        match self.fail_close {
            true => Err(Error::from(ErrorKind::Interrupted)),
            false => Ok(()),
        }
    }
}

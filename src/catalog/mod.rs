#[cfg(test)]
mod test;

use crate::error::{Error, Result};
use crate::event::hw::{Cache, Hardware, Op, OpResult, Type};
use crate::event::sw::Software;
use crate::event::{Event, Family};

/// A known counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CounterDef {
    pub name: &'static str,
    pub family: Family,
    pub config: u64,
    pub default_enabled: bool,
}

impl CounterDef {
    const fn new(name: &'static str, event: Event, default_enabled: bool) -> Self {
        Self {
            name,
            family: event.family,
            config: event.config,
            default_enabled,
        }
    }

    pub fn event(&self) -> Event {
        Event {
            family: self.family,
            config: self.config,
        }
    }

    /// Looks up a counter by its name.
    pub fn find(name: &str) -> Option<&'static Self> {
        CATALOG.iter().find(|def| def.name == name)
    }
}

pub const CATALOG_LEN: usize = 61;

macro_rules! sw {
    ($name:literal, $ev:ident, $on:literal) => {
        CounterDef::new($name, Software::$ev.event(), $on)
    };
}

macro_rules! hw {
    ($name:literal, $ev:ident, $on:literal) => {
        CounterDef::new($name, Hardware::$ev.event(), $on)
    };
}

macro_rules! cache {
    ($name:literal, $ty:ident, $op:ident, $result:ident, $on:literal) => {
        CounterDef::new(
            $name,
            Cache::new(Type::$ty, Op::$op, OpResult::$result).event(),
            $on,
        )
    };
}

/// Every counter this crate knows about, in report order.
#[rustfmt::skip]
pub static CATALOG: [CounterDef; CATALOG_LEN] = [
    sw!("cpu-clock",               CpuClock,       true ),
    sw!("task-clock",              TaskClock,      true ),
    sw!("page-faults",             PageFault,      true ),
    sw!("context-switches",        CtxSwitch,      true ),
    sw!("cpu-migrations",          CpuMigration,   true ),
    sw!("page-fault-minor",        MinorPageFault, true ),
    sw!("page-fault-major",        MajorPageFault, false),
    sw!("alignment-faults",        AlignFault,     false),
    sw!("emulation-faults",        EmuFault,       false),

    hw!("cpu-cycles",              CpuCycle,             true ),
    hw!("instructions",            Instr,                true ),
    hw!("cache-references",        CacheAccess,          false),
    hw!("cache-misses",            CacheMiss,            true ),
    hw!("branch-instructions",     BranchInstr,          false),
    hw!("branch-misses",           BranchMiss,           false),
    hw!("bus-cycles",              BusCycle,             false),
    hw!("stalled-cycles-frontend", FrontendStalledCycle, false),
    hw!("stalled-cycles-backend",  BackendStalledCycle,  false),
    hw!("ref-cpu-cycles",          RefCpuCycle,          false),

    cache!("L1D-read-access",      L1d,  Read,     Access, false),
    cache!("L1D-read-miss",        L1d,  Read,     Miss,   true ),
    cache!("L1D-write-access",     L1d,  Write,    Access, false),
    cache!("L1D-write-miss",       L1d,  Write,    Miss,   false),
    cache!("L1D-prefetch-access",  L1d,  Prefetch, Access, false),
    cache!("L1D-prefetch-miss",    L1d,  Prefetch, Miss,   false),
    cache!("L1I-read-access",      L1i,  Read,     Access, false),
    cache!("L1I-read-miss",        L1i,  Read,     Miss,   true ),
    cache!("L1I-write-access",     L1i,  Write,    Access, false),
    cache!("L1I-write-miss",       L1i,  Write,    Miss,   false),
    cache!("L1I-prefetch-access",  L1i,  Prefetch, Access, false),
    cache!("L1I-prefetch-miss",    L1i,  Prefetch, Miss,   false),
    cache!("LL-read-access",       Ll,   Read,     Access, false),
    cache!("LL-read-miss",         Ll,   Read,     Miss,   false),
    cache!("LL-write-access",      Ll,   Write,    Access, false),
    cache!("LL-write-miss",        Ll,   Write,    Miss,   false),
    cache!("LL-prefetch-access",   Ll,   Prefetch, Access, false),
    cache!("LL-prefetch-miss",     Ll,   Prefetch, Miss,   false),
    cache!("DTLB-read-access",     Dtlb, Read,     Access, false),
    cache!("DTLB-read-miss",       Dtlb, Read,     Miss,   false),
    cache!("DTLB-write-access",    Dtlb, Write,    Access, false),
    cache!("DTLB-write-miss",      Dtlb, Write,    Miss,   false),
    cache!("DTLB-prefetch-access", Dtlb, Prefetch, Access, false),
    cache!("DTLB-prefetch-miss",   Dtlb, Prefetch, Miss,   false),
    cache!("ITLB-read-access",     Itlb, Read,     Access, false),
    cache!("ITLB-read-miss",       Itlb, Read,     Miss,   false),
    cache!("ITLB-write-access",    Itlb, Write,    Access, false),
    cache!("ITLB-write-miss",      Itlb, Write,    Miss,   false),
    cache!("ITLB-prefetch-access", Itlb, Prefetch, Access, false),
    cache!("ITLB-prefetch-miss",   Itlb, Prefetch, Miss,   false),
    cache!("BPU-read-access",      Bpu,  Read,     Access, false),
    cache!("BPU-read-miss",        Bpu,  Read,     Miss,   false),
    cache!("BPU-write-access",     Bpu,  Write,    Access, false),
    cache!("BPU-write-miss",       Bpu,  Write,    Miss,   false),
    cache!("BPU-prefetch-access",  Bpu,  Prefetch, Access, false),
    cache!("BPU-prefetch-miss",    Bpu,  Prefetch, Miss,   false),
    cache!("NODE-read-access",     Node, Read,     Access, false),
    cache!("NODE-read-miss",       Node, Read,     Miss,   false),
    cache!("NODE-write-access",    Node, Write,    Access, false),
    cache!("NODE-write-miss",      Node, Write,    Miss,   false),
    cache!("NODE-prefetch-access", Node, Prefetch, Access, false),
    cache!("NODE-prefetch-miss",   Node, Prefetch, Miss,   false),
];

/// Enabled flags over [`CATALOG`].
///
/// Starts from each counter's `default_enabled`. The flags are only read
/// when a session arms its counters, so changes made while a session is
/// running take effect at the next arming.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Catalog {
    enabled: [bool; CATALOG_LEN],
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            enabled: CATALOG.map(|def| def.default_enabled),
        }
    }
}

impl Catalog {
    /// Catalog with every counter disabled.
    pub fn none() -> Self {
        Self {
            enabled: [false; CATALOG_LEN],
        }
    }

    pub fn enable(&mut self, name: &str) -> Result<()> {
        self.set(name, true)
    }

    pub fn disable(&mut self, name: &str) -> Result<()> {
        self.set(name, false)
    }

    fn set(&mut self, name: &str, on: bool) -> Result<()> {
        let index = Self::index_of(name).ok_or_else(|| Error::UnknownCounter(name.to_owned()))?;
        self.enabled[index] = on;
        Ok(())
    }

    pub fn is_enabled(&self, name: &str) -> Result<bool> {
        let index = Self::index_of(name).ok_or_else(|| Error::UnknownCounter(name.to_owned()))?;
        Ok(self.enabled[index])
    }

    /// Number of enabled counters.
    pub fn enabled(&self) -> usize {
        self.enabled.iter().filter(|on| **on).count()
    }

    /// All counters with their enabled flag, in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static CounterDef, bool)> + '_ {
        CATALOG.iter().zip(self.enabled.iter().copied())
    }

    fn index_of(name: &str) -> Option<usize> {
        CATALOG.iter().position(|def| def.name == name)
    }
}

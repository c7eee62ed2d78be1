#[cfg(test)]
mod test;

use super::{Event, Family};
use crate::ffi::bindings as b;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hardware {
    CpuCycle,
    BusCycle,
    RefCpuCycle,

    CacheMiss,
    CacheAccess,

    BranchMiss,
    BranchInstr,

    BackendStalledCycle,
    FrontendStalledCycle,

    Instr,
}

impl Hardware {
    pub const fn event(self) -> Event {
        let config = match self {
            Self::CpuCycle => b::PERF_COUNT_HW_CPU_CYCLES,
            Self::BusCycle => b::PERF_COUNT_HW_BUS_CYCLES,
            Self::RefCpuCycle => b::PERF_COUNT_HW_REF_CPU_CYCLES,

            Self::CacheMiss => b::PERF_COUNT_HW_CACHE_MISSES,
            Self::CacheAccess => b::PERF_COUNT_HW_CACHE_REFERENCES,

            Self::BranchMiss => b::PERF_COUNT_HW_BRANCH_MISSES,
            Self::BranchInstr => b::PERF_COUNT_HW_BRANCH_INSTRUCTIONS,

            Self::BackendStalledCycle => b::PERF_COUNT_HW_STALLED_CYCLES_BACKEND,
            Self::FrontendStalledCycle => b::PERF_COUNT_HW_STALLED_CYCLES_FRONTEND,

            Self::Instr => b::PERF_COUNT_HW_INSTRUCTIONS,
        };

        Event {
            family: Family::Hardware,
            config,
        }
    }
}

super::into_event!(Hardware);

/// Cache unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Type {
    L1d,
    L1i,
    Ll,
    Dtlb,
    Itlb,
    Bpu,
    Node,
}

impl Type {
    const fn id(self) -> u64 {
        match self {
            Self::L1d => b::PERF_COUNT_HW_CACHE_L1D,
            Self::L1i => b::PERF_COUNT_HW_CACHE_L1I,
            Self::Ll => b::PERF_COUNT_HW_CACHE_LL,
            Self::Dtlb => b::PERF_COUNT_HW_CACHE_DTLB,
            Self::Itlb => b::PERF_COUNT_HW_CACHE_ITLB,
            Self::Bpu => b::PERF_COUNT_HW_CACHE_BPU,
            Self::Node => b::PERF_COUNT_HW_CACHE_NODE,
        }
    }

    const fn from_id(id: u64) -> Option<Self> {
        let ty = match id {
            b::PERF_COUNT_HW_CACHE_L1D => Self::L1d,
            b::PERF_COUNT_HW_CACHE_L1I => Self::L1i,
            b::PERF_COUNT_HW_CACHE_LL => Self::Ll,
            b::PERF_COUNT_HW_CACHE_DTLB => Self::Dtlb,
            b::PERF_COUNT_HW_CACHE_ITLB => Self::Itlb,
            b::PERF_COUNT_HW_CACHE_BPU => Self::Bpu,
            b::PERF_COUNT_HW_CACHE_NODE => Self::Node,
            _ => return None,
        };
        Some(ty)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    Read,
    Write,
    Prefetch,
}

impl Op {
    const fn id(self) -> u64 {
        match self {
            Self::Read => b::PERF_COUNT_HW_CACHE_OP_READ,
            Self::Write => b::PERF_COUNT_HW_CACHE_OP_WRITE,
            Self::Prefetch => b::PERF_COUNT_HW_CACHE_OP_PREFETCH,
        }
    }

    const fn from_id(id: u64) -> Option<Self> {
        let op = match id {
            b::PERF_COUNT_HW_CACHE_OP_READ => Self::Read,
            b::PERF_COUNT_HW_CACHE_OP_WRITE => Self::Write,
            b::PERF_COUNT_HW_CACHE_OP_PREFETCH => Self::Prefetch,
            _ => return None,
        };
        Some(op)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpResult {
    Miss,
    Access,
}

impl OpResult {
    const fn id(self) -> u64 {
        match self {
            Self::Miss => b::PERF_COUNT_HW_CACHE_RESULT_MISS,
            Self::Access => b::PERF_COUNT_HW_CACHE_RESULT_ACCESS,
        }
    }

    const fn from_id(id: u64) -> Option<Self> {
        let result = match id {
            b::PERF_COUNT_HW_CACHE_RESULT_MISS => Self::Miss,
            b::PERF_COUNT_HW_CACHE_RESULT_ACCESS => Self::Access,
            _ => return None,
        };
        Some(result)
    }
}

/// Hardware cache event.
///
/// The kernel reads the config of `PERF_TYPE_HW_CACHE` as three bytes:
/// `unit | (op << 8) | (result << 16)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cache {
    pub ty: Type,
    pub op: Op,
    pub result: OpResult,
}

impl Cache {
    pub const fn new(ty: Type, op: Op, result: OpResult) -> Self {
        Self { ty, op, result }
    }

    pub const fn config(self) -> u64 {
        self.ty.id() | (self.op.id() << 8) | (self.result.id() << 16)
    }

    /// Splits a packed config back into its fields.
    ///
    /// Returns `None` if any byte is out of range or bits above the third byte are set.
    pub const fn unpack(config: u64) -> Option<Self> {
        if config >> 24 != 0 {
            return None;
        }
        let (Some(ty), Some(op), Some(result)) = (
            Type::from_id(config & 0xff),
            Op::from_id((config >> 8) & 0xff),
            OpResult::from_id((config >> 16) & 0xff),
        ) else {
            return None;
        };
        Some(Self { ty, op, result })
    }

    pub const fn event(self) -> Event {
        Event {
            family: Family::HardwareCache,
            config: self.config(),
        }
    }
}

super::into_event!(Cache);

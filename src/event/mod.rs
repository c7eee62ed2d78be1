pub mod hw;
pub mod sw;

use crate::ffi::bindings as b;

/// Counter family.
///
/// Decides how the kernel interprets [`Event::config`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Family {
    /// Events counted by the kernel itself (clocks, faults, switches).
    Software,
    /// Generic events of the CPU performance monitoring unit.
    Hardware,
    /// Cache, TLB and branch predictor events, see [`hw::Cache`].
    HardwareCache,
}

impl Family {
    pub(crate) const fn as_type(self) -> u32 {
        match self {
            Self::Software => b::PERF_TYPE_SOFTWARE,
            Self::Hardware => b::PERF_TYPE_HARDWARE,
            Self::HardwareCache => b::PERF_TYPE_HW_CACHE,
        }
    }
}

/// Family plus family-specific config code, everything needed to open a counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Event {
    pub family: Family,
    pub config: u64,
}

macro_rules! into_event {
    ($ty:ty) => {
        impl From<$ty> for crate::event::Event {
            fn from(value: $ty) -> Self {
                value.event()
            }
        }
    };
}
use into_event;

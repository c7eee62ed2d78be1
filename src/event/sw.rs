use super::{Event, Family};
use crate::ffi::bindings as b;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Software {
    CpuClock,
    TaskClock,

    PageFault,
    MinorPageFault,
    MajorPageFault,

    EmuFault,
    AlignFault,

    CtxSwitch,
    CpuMigration,
}

impl Software {
    pub const fn event(self) -> Event {
        let config = match self {
            Self::CpuClock => b::PERF_COUNT_SW_CPU_CLOCK,
            Self::TaskClock => b::PERF_COUNT_SW_TASK_CLOCK,

            Self::PageFault => b::PERF_COUNT_SW_PAGE_FAULTS,
            Self::MinorPageFault => b::PERF_COUNT_SW_PAGE_FAULTS_MIN,
            Self::MajorPageFault => b::PERF_COUNT_SW_PAGE_FAULTS_MAJ,

            Self::EmuFault => b::PERF_COUNT_SW_EMULATION_FAULTS,
            Self::AlignFault => b::PERF_COUNT_SW_ALIGNMENT_FAULTS,

            Self::CtxSwitch => b::PERF_COUNT_SW_CONTEXT_SWITCHES,
            Self::CpuMigration => b::PERF_COUNT_SW_CPU_MIGRATIONS,
        };

        Event {
            family: Family::Software,
            config,
        }
    }
}

super::into_event!(Software);

#[cfg(test)]
mod test;

mod stat;

pub use stat::*;
use tracing::trace;

use crate::error::{Error, Result};
use crate::pmu::Pmu;

/// Performs exactly one read of the counter record behind `handle`.
pub fn read<P: Pmu>(pmu: &mut P, handle: &P::Handle) -> Result<Stat> {
    let mut buf = [0; Stat::SIZE];
    let bytes = pmu.read(handle, &mut buf).map_err(Error::ReadFailed)?;
    let stat = Stat::from_bytes(&buf[..bytes.min(Stat::SIZE)])?;
    trace!(
        count = stat.count,
        time_enabled = stat.time_enabled,
        time_running = stat.time_running,
        "counter record"
    );
    Ok(stat)
}

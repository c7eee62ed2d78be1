use crate::error::{Error, Result};

/// One counter record.
///
/// `time_enabled` and `time_running` diverge when more counters are
/// enabled than the PMU has slots and the kernel multiplexes them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Stat {
    pub count: u64,
    pub time_enabled: u64,
    pub time_running: u64,
}

impl Stat {
    // https://github.com/torvalds/linux/blob/v6.13/include/uapi/linux/perf_event.h#L344
    // struct read_format {
    //     u64 value;
    //     u64 time_enabled; /* PERF_FORMAT_TOTAL_TIME_ENABLED */
    //     u64 time_running; /* PERF_FORMAT_TOTAL_TIME_RUNNING */
    // };
    pub const SIZE: usize = 3 * size_of::<u64>();

    /// Decodes a record in the kernel's (native) byte order.
    ///
    /// Trailing bytes past [`Self::SIZE`] are ignored.
    pub fn from_bytes(buf: &[u8]) -> Result<Self> {
        if buf.len() < Self::SIZE {
            return Err(Error::ShortRead {
                expected: Self::SIZE,
                actual: buf.len(),
            });
        }

        let field = |n: usize| {
            let mut bytes = [0; size_of::<u64>()];
            bytes.copy_from_slice(&buf[n * 8..(n + 1) * 8]);
            u64::from_ne_bytes(bytes)
        };

        Ok(Self {
            count: field(0),
            time_enabled: field(1),
            time_running: field(2),
        })
    }

    /// Fraction of the enabled time the counter was actually on the PMU.
    ///
    /// `1.0` if the counter was never enabled.
    pub fn scale(&self) -> f64 {
        if self.time_enabled == 0 {
            return 1.0;
        }
        self.time_running as f64 / self.time_enabled as f64
    }

    /// The count weighted by [`Self::scale`].
    pub fn scaled(&self) -> f64 {
        self.count as f64 * self.scale()
    }
}

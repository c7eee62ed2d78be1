use super::Opts;
use crate::event::Event;
use crate::ffi::{bindings as b, Attr};

/// Read format of every counter: the value followed by the two
/// multiplexing times, see [`Stat`][crate::count::Stat].
pub(crate) const READ_FORMAT: u64 =
    b::PERF_FORMAT_TOTAL_TIME_ENABLED | b::PERF_FORMAT_TOTAL_TIME_RUNNING;

pub(crate) fn from(event: Event, opts: &Opts) -> Attr {
    let mut attr = Attr {
        size: b::PERF_ATTR_SIZE_VER1,
        ..Default::default()
    };

    attr.type_ = event.family.as_type();
    attr.config = event.config;
    attr.read_format = READ_FORMAT;

    // Counters are created stopped, `prctl` starts and stops all of them at once.
    let mut flags = b::ATTR_DISABLED;

    macro_rules! when {
        ($bool:expr, $flag:ident) => {
            if $bool {
                flags |= b::$flag;
            }
        };
    }
    when!(opts.inherit, ATTR_INHERIT);
    when!(opts.exclude.user, ATTR_EXCLUDE_USER);
    when!(opts.exclude.kernel, ATTR_EXCLUDE_KERNEL);
    when!(opts.exclude.hv, ATTR_EXCLUDE_HV);

    attr.flags = flags;
    attr
}

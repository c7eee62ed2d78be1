use std::io;

use super::{read, Stat};
use crate::catalog::CounterDef;
use crate::config::Opts;
use crate::error::Error;
use crate::pmu::test::{Call, Script};
use crate::pmu::Pmu;

fn record(count: u64, time_enabled: u64, time_running: u64) -> Vec<u8> {
    [count, time_enabled, time_running]
        .iter()
        .flat_map(|v| v.to_ne_bytes())
        .collect()
}

#[test]
fn test_decode_fields() {
    let stat = Stat::from_bytes(&record(7, 11, 13)).unwrap();
    assert_eq!(
        stat,
        Stat {
            count: 7,
            time_enabled: 11,
            time_running: 13,
        }
    );
}

#[test]
fn test_decode_ignores_trailing_bytes() {
    let mut buf = record(1, 2, 3);
    buf.extend([0xff; 8]);
    assert_eq!(Stat::from_bytes(&buf).unwrap().time_running, 3);
}

#[test]
fn test_short_record() {
    let buf = record(1, 2, 3);
    let err = Stat::from_bytes(&buf[..16]).unwrap_err();
    assert!(matches!(
        err,
        Error::ShortRead {
            expected: 24,
            actual: 16
        }
    ));
    assert!(!err.is_usage());
}

#[test]
fn test_multiplexed_scale_is_real_valued() {
    let stat = Stat {
        count: 1000,
        time_enabled: 100,
        time_running: 50,
    };
    assert_eq!(stat.scale(), 0.5);
    assert_eq!(stat.scaled(), 500.0);
}

#[test]
fn test_never_scheduled_scale() {
    let stat = Stat {
        count: 42,
        time_enabled: 0,
        time_running: 0,
    };
    assert_eq!(stat.scale(), 1.0);
    assert_eq!(stat.scaled(), 42.0);
}

#[test]
fn test_read_once() {
    let mut pmu = Script::default();
    let handle = pmu.open_def("cpu-cycles").unwrap();
    pmu.set_record(handle, record(1000, 100, 50));

    let stat = read(&mut pmu, &handle).unwrap();
    assert_eq!(stat.count, 1000);
    assert_eq!(
        pmu.calls.iter().filter(|c| matches!(c, Call::Read(_))).count(),
        1
    );
}

#[test]
fn test_read_short() {
    let mut pmu = Script::default();
    let handle = pmu.open_def("instructions").unwrap();
    pmu.set_record(handle, record(1, 1, 1)[..8].to_vec());

    let err = read(&mut pmu, &handle).unwrap_err();
    assert!(matches!(err, Error::ShortRead { actual: 8, .. }));
}

#[test]
fn test_read_failed() {
    let mut pmu = Script::default();
    let handle = pmu.open_def("instructions").unwrap();
    pmu.fail_read = Some(io::ErrorKind::PermissionDenied);

    let err = read(&mut pmu, &handle).unwrap_err();
    assert!(matches!(err, Error::ReadFailed(ref e) if e.kind() == io::ErrorKind::PermissionDenied));
}

// Claims more bytes than it was given room for.
struct Oversized;

impl Pmu for Oversized {
    type Handle = ();

    fn open(&mut self, _: &CounterDef, _: &Opts) -> io::Result<()> {
        Ok(())
    }

    fn enable_all(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn disable_all(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn read(&mut self, _: &(), buf: &mut [u8]) -> io::Result<usize> {
        buf.copy_from_slice(&record(9, 4, 2));
        Ok(buf.len() + 8)
    }

    fn close(&mut self, _: ()) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_read_oversized_count() {
    let stat = read(&mut Oversized, &()).unwrap();
    assert_eq!(
        stat,
        Stat {
            count: 9,
            time_enabled: 4,
            time_running: 2,
        }
    );
}


use std::marker::PhantomData;
use std::mem;
use std::time::{Duration, Instant};

use arrayvec::ArrayVec;
use tracing::{debug, warn};

use crate::catalog::{Catalog, CounterDef, CATALOG_LEN};
use crate::config::Opts;
use crate::count::{self, Stat};
use crate::error::{Error, Result};
use crate::pmu::{Linux, Pmu};
use crate::report::{ReadFailure, Report, Row};

/// Source of the instants the elapsed time is measured with.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// [`Instant::now`].
#[derive(Clone, Copy, Debug, Default)]
pub struct Monotonic;

impl Clock for Monotonic {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    /// No counter is open.
    Uninitialized,
    /// Counters are open and stopped.
    Paused,
    /// Counters are open and counting since the instant.
    Running { since: Instant },
}

/// Runtime state of one catalog entry.
struct CounterState<H> {
    def: &'static CounterDef,
    enabled: bool,
    handle: Option<H>,
    value: f64,
    active: f64,
}

impl<H> CounterState<H> {
    fn new(def: &'static CounterDef, enabled: bool) -> Self {
        Self {
            def,
            enabled,
            handle: None,
            value: 0.0,
            active: 0.0,
        }
    }

    fn accumulate(&mut self, stat: &Stat) {
        self.value += stat.scaled();
        self.active = stat.scale();
    }
}

/// A measurement over a span of the calling process.
///
/// ```text
/// Uninitialized --activate--> Running --pause--> Paused --activate--> Running
///       ^                                                               |
///       +---------------------------terminate---------------------------+
/// ```
///
/// Counters are opened on the first [`activate`][Self::activate], keep counting
/// across pauses (the kernel keeps their enabled and running times), and are
/// read once and closed by [`terminate`][Self::terminate]. The session can be
/// activated again afterwards, the catalog flags are kept.
///
/// Starting and stopping is done with `prctl(PR_TASK_PERF_EVENTS_*)`, which
/// applies to every counter of the calling task.
///
/// # Threads
///
/// Counters measure the thread that armed them (and the tasks it spawns
/// afterwards), and `prctl` only reaches counters owned by the calling
/// thread. A session is therefore bound to the thread that created it and
/// is not `Send`:
///
/// ```rust,compile_fail
/// use perf_session::catalog::Catalog;
/// use perf_session::session::Session;
///
/// let session = Session::new(Catalog::default());
/// std::thread::spawn(move || drop(session));
/// ```
///
/// # Examples
///
/// ```rust,no_run
/// use perf_session::catalog::Catalog;
/// use perf_session::session::Session;
///
/// let mut catalog = Catalog::none();
/// catalog.enable("cpu-cycles").unwrap();
/// catalog.enable("instructions").unwrap();
///
/// let mut session = Session::new(catalog);
/// session.activate().unwrap();
/// std::hint::black_box((0..1_000_000u64).sum::<u64>());
/// let report = session.terminate().unwrap();
///
/// println!("{}", report);
/// ```
pub struct Session<P: Pmu = Linux, C: Clock = Monotonic> {
    catalog: Catalog,
    opts: Opts,
    pmu: P,
    clock: C,
    phase: Phase,
    total: Duration,
    states: ArrayVec<CounterState<P::Handle>, CATALOG_LEN>,
    // Pause and resume from another thread would return `Ok` and change
    // nothing, the counters belong to the arming thread.
    _thread: PhantomData<*const ()>,
}

impl Session {
    pub fn new(catalog: Catalog) -> Self {
        Self::with_opts(catalog, Opts::default())
    }

    pub fn with_opts(catalog: Catalog, opts: Opts) -> Self {
        Self::with_pmu(catalog, opts, Linux, Monotonic)
    }
}

impl<P: Pmu, C: Clock> Session<P, C> {
    pub fn with_pmu(catalog: Catalog, opts: Opts, pmu: P, clock: C) -> Self {
        Self {
            catalog,
            opts,
            pmu,
            clock,
            phase: Phase::Uninitialized,
            total: Duration::ZERO,
            states: ArrayVec::new(),
            _thread: PhantomData,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Changes take effect at the next arming.
    pub fn catalog_mut(&mut self) -> &mut Catalog {
        &mut self.catalog
    }

    pub fn pmu(&self) -> &P {
        &self.pmu
    }

    pub fn pmu_mut(&mut self) -> &mut P {
        &mut self.pmu
    }

    pub fn is_initialized(&self) -> bool {
        self.phase != Phase::Uninitialized
    }

    pub fn is_running(&self) -> bool {
        matches!(self.phase, Phase::Running { .. })
    }

    /// Time spent running so far, the current span included.
    pub fn elapsed(&self) -> Duration {
        match self.phase {
            Phase::Running { since } => self.total + self.clock.now().duration_since(since),
            _ => self.total,
        }
    }

    /// Starts (or resumes) counting.
    ///
    /// The first call opens a counter for every enabled catalog entry. If one
    /// of them cannot be opened, the ones opened before it are closed again
    /// and the session stays uninitialized.
    pub fn activate(&mut self) -> Result<()> {
        match self.phase {
            Phase::Running { .. } => return Err(Error::AlreadyRunning),
            Phase::Uninitialized => self.arm()?,
            Phase::Paused => (),
        }

        self.pmu.enable_all().map_err(Error::EnableFailed)?;
        self.phase = Phase::Running {
            since: self.clock.now(),
        };
        debug!(elapsed = ?self.total, "counting");

        Ok(())
    }

    /// Stops counting, does nothing if not running.
    pub fn pause(&mut self) -> Result<()> {
        let since = match self.phase {
            Phase::Uninitialized => return Err(Error::NotInitialized),
            Phase::Paused => return Ok(()),
            Phase::Running { since } => since,
        };

        self.pmu.disable_all().map_err(Error::DisableFailed)?;
        self.total += self.clock.now().duration_since(since);
        self.phase = Phase::Paused;
        debug!(elapsed = ?self.total, "paused");

        Ok(())
    }

    /// Stops counting, reads and closes every counter and returns the report.
    ///
    /// A counter that cannot be read keeps the value it had and is listed in
    /// [`Report::failures`].
    pub fn terminate(&mut self) -> Result<Report> {
        if self.phase == Phase::Uninitialized {
            return Err(Error::NotInitialized);
        }
        self.pause()?;

        let mut failures = vec![];
        for state in self.states.iter_mut() {
            let Some(handle) = state.handle.as_ref() else {
                continue;
            };
            match count::read(&mut self.pmu, handle) {
                Ok(stat) => state.accumulate(&stat),
                Err(error) => failures.push(ReadFailure {
                    name: state.def.name,
                    error,
                }),
            }
        }

        let rows = self
            .states
            .iter()
            .filter(|state| state.enabled)
            .map(|state| Row {
                name: state.def.name,
                value: state.value,
                active: state.active,
            })
            .collect();
        let report = Report {
            elapsed: self.total,
            rows,
            failures,
        };
        debug!(elapsed = ?report.elapsed, counters = report.rows.len(), "terminated");

        self.release();
        Ok(report)
    }

    fn arm(&mut self) -> Result<()> {
        self.release();
        self.states
            .extend(self.catalog.iter().map(|(def, on)| CounterState::new(def, on)));

        let mut failed = None;
        for state in self.states.iter_mut().filter(|state| state.enabled) {
            match self.pmu.open(state.def, &self.opts) {
                Ok(handle) => state.handle = Some(handle),
                Err(source) => {
                    failed = Some(Error::HandleOpenFailed {
                        name: state.def.name,
                        source,
                    });
                    break;
                }
            }
        }
        if let Some(err) = failed {
            self.release();
            return Err(err);
        }

        self.phase = Phase::Paused;
        debug!(counters = self.catalog.enabled(), "armed");

        Ok(())
    }

    // Closes every open counter and clears all runtime state.
    fn release(&mut self) {
        for state in mem::take(&mut self.states) {
            let Some(handle) = state.handle else {
                continue;
            };
            if let Err(error) = self.pmu.close(handle) {
                warn!(counter = state.def.name, %error, "failed to close counter");
            }
        }
        self.total = Duration::ZERO;
        self.phase = Phase::Uninitialized;
    }
}

impl<P: Pmu, C: Clock> Drop for Session<P, C> {
    fn drop(&mut self) {
        self.release();
    }
}

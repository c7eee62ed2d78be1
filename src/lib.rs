//! Measure a span of the current process with Linux performance counters.
//!
//! Pick counters from the [catalog][catalog::CATALOG], run the code of
//! interest inside a [`Session`][session::Session] and get a
//! [`Report`][report::Report] with every count corrected for multiplexing.
//!
//! ## Example
//!
//! ```rust,no_run
//! use perf_session::catalog::Catalog;
//! use perf_session::session::Session;
//!
//! let mut catalog = Catalog::default();
//! catalog.enable("branch-misses").unwrap();
//! catalog.disable("cpu-clock").unwrap();
//!
//! let mut session = Session::new(catalog);
//!
//! session.activate().unwrap();
//! fn fib(n: usize) -> usize {
//!     match n {
//!         0 => 0,
//!         1 => 1,
//!         n => fib(n - 1) + fib(n - 2),
//!     }
//! }
//! std::hint::black_box(fib(30));
//! session.pause().unwrap();
//!
//! // Not measured.
//! std::thread::sleep(std::time::Duration::from_millis(10));
//!
//! session.activate().unwrap();
//! std::hint::black_box(fib(25));
//! let report = session.terminate().unwrap();
//!
//! print!("{}", report);
//! ```
//!
//! ## Multiplexing
//!
//! When more counters are enabled than the PMU has slots, the kernel
//! time-shares the slots. Every value in the report is the raw count weighted
//! by `time_running / time_enabled` of its counter, the same ratio reported
//! as [`Row::active`][report::Row::active].

pub mod catalog;
pub mod config;
pub mod count;
pub mod error;
pub mod event;
mod ffi;
pub mod pmu;
pub mod report;
pub mod session;

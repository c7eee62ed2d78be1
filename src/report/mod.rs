
use std::fmt::{self, Display, Formatter};
use std::time::Duration;

use crate::error::Error;

/// Final values of one counter.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Row {
    pub name: &'static str,
    /// Accumulated count, weighted by the active fraction.
    pub value: f64,
    /// Fraction of the enabled time the counter was scheduled on the PMU, in `[0, 1]`.
    pub active: f64,
}

/// A counter whose final record could not be read.
#[derive(Debug)]
pub struct ReadFailure {
    pub name: &'static str,
    pub error: Error,
}

/// Outcome of a [`Session`][crate::session::Session].
#[derive(Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Report {
    /// Time spent running, pauses excluded.
    pub elapsed: Duration,
    /// Enabled counters in catalog order.
    pub rows: Vec<Row>,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub failures: Vec<ReadFailure>,
}

impl Report {
    pub fn get(&self, name: &str) -> Option<&Row> {
        self.rows.iter().find(|row| row.name == name)
    }
}

const RULE: &str = "---------------------------------------------------------------";

impl Display for Report {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "| {:<25} | {:<18} | Measurement time", "Event", "Value")?;
        writeln!(f, "{}", RULE)?;
        writeln!(
            f,
            "| {:<25} | {:<18} | (100.00%)",
            "time (seconds)",
            grouped(self.elapsed.as_secs_f64())
        )?;
        for row in &self.rows {
            writeln!(
                f,
                "| {:<25} | {:<18} | ({:.2}%)",
                row.name,
                grouped(row.value),
                row.active * 100.0
            )?;
        }
        for failure in &self.failures {
            writeln!(f, "! {}: {}", failure.name, failure.error)?;
        }
        Ok(())
    }
}

// Two decimals with `,` between thousands: 1234567.891 -> "1,234,567.89".
fn grouped(value: f64) -> String {
    let text = format!("{:.2}", value);
    let (sign, text) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (int, frac) = text.split_once('.').unwrap_or((text, ""));

    let mut out = String::with_capacity(text.len() + int.len() / 3 + 1);
    out.push_str(sign);
    for (i, digit) in int.chars().enumerate() {
        if i > 0 && (int.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(digit);
    }
    if !frac.is_empty() {
        out.push('.');
        out.push_str(frac);
    }
    out
}

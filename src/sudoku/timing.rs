#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
use itertools::Itertools;
use std::fmt::Display;
use std::time::Duration;

pub const DEFAULT_THRESHOLD: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Continue,
    /// No solution was found or the solve ran past the threshold.
    Problem,
}

/// Wall-clock time per puzzle of a benchmark run.
///
/// Times are only observed; a slow solve is flagged once it has finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timings {
    elapsed: Vec<Duration>,
    threshold: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}

impl Timings {
    #[must_use]
    pub const fn new(threshold: Duration) -> Self {
        Self {
            elapsed: Vec::new(),
            threshold,
        }
    }

    pub fn record(&mut self, elapsed: Duration, solutions: usize) -> Verdict {
        self.elapsed.push(elapsed);
        if solutions == 0 || elapsed > self.threshold {
            Verdict::Problem
        } else {
            Verdict::Continue
        }
    }

    #[must_use]
    pub fn elapsed(&self) -> &[Duration] {
        &self.elapsed
    }

    #[must_use]
    pub fn total(&self) -> Duration {
        self.elapsed.iter().sum()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.elapsed.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elapsed.is_empty()
    }
}

/// Seconds, e.g. `[0.012, 1.500]`.
impl Display for Timings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}]",
            self.elapsed
                .iter()
                .map(|d| format!("{:.3}", d.as_secs_f64()))
                .join(", ")
        )
    }
}

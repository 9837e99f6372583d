//! Accumulated timings for named frame passes

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

#[derive(Default)]
pub struct PassProfiler {
    timings: BTreeMap<&'static str, Duration>,
}

impl PassProfiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f`, adding its wall time to the total for `name`.
    pub fn time_pass<F, R>(&mut self, name: &'static str, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        let start = Instant::now();
        let result = f();
        *self.timings.entry(name).or_insert(Duration::ZERO) += start.elapsed();
        result
    }

    pub fn total(&self, name: &str) -> Duration {
        self.timings.get(name).copied().unwrap_or(Duration::ZERO)
    }

    pub fn reset(&mut self) {
        self.timings.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, Duration)> + '_ {
        self.timings.iter().map(|(name, total)| (*name, *total))
    }
}

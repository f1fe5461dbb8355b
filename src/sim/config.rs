use std::{env, num::NonZeroU64, str::FromStr};

use log::warn;
use rand::prelude::*;

use super::job::{ProcessSpec, Workload};
use crate::{core::state::Ticks, error::SimResult};

/// Parameters for a synthetic Bernoulli workload: at every tick in
/// `0..ticks` a process arrives with probability `p_arrival`, and is short
/// with probability `p_short`.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkloadConfig {
    pub ticks: Ticks,
    pub p_arrival: f64,
    pub p_short: f64,
    pub short_burst: Ticks,
    pub long_burst: Ticks,
    // Priorities are drawn uniformly from 0..priority_levels
    pub priority_levels: i64,
    pub quantum: NonZeroU64,
    pub seed: u64,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            ticks: 20,
            p_arrival: 0.3,
            p_short: 0.3,
            short_burst: 2,
            long_burst: 6,
            priority_levels: 5,
            quantum: NonZeroU64::MIN.saturating_add(1),
            seed: 0,
        }
    }
}

impl WorkloadConfig {
    /// Defaults overridden by `SCHED_SEED`, `SCHED_TICKS` and `SCHED_QUANTUM`.
    /// Unparsable values are ignored with a warning.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(seed) = env_var("SCHED_SEED") {
            config.seed = seed;
        }
        if let Some(ticks) = env_var("SCHED_TICKS") {
            config.ticks = ticks;
        }
        if let Some(quantum) = env_var("SCHED_QUANTUM") {
            config.quantum = quantum;
        }
        config
    }

    /// Draws a reproducible workload; the same seed always yields the same
    /// processes. Fails with `EmptyInput` if no process arrived.
    pub fn generate(&self) -> SimResult<Workload> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut specs = Vec::new();

        for t in 0..self.ticks {
            if rng.random::<f64>() < self.p_arrival {
                let burst = if rng.random::<f64>() < self.p_short {
                    self.short_burst
                } else {
                    self.long_burst
                };
                let priority = rng.random_range(0..self.priority_levels.max(1));

                specs.push(
                    ProcessSpec::new(format!("P{}", specs.len() + 1), t, burst)
                        .with_priority(priority),
                );
            }
        }

        Workload::from_specs(specs)
    }
}

fn env_var<T: FromStr>(key: &str) -> Option<T> {
    let raw = env::var(key).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("ignoring {key}={raw:?}: not a valid value");
            None
        }
    }
}

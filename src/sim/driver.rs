use std::{fmt, num::NonZeroU64, str::FromStr};

use super::{job::Workload, result::ScheduleResult};
use crate::{
    core::driver::SchedCore,
    error::{Field, SimError, SimResult},
    scheduler::{
        Fcfs, NonPreemptivePriority, PreemptivePriority, RoundRobin, ShortestJobFirst,
        ShortestRemainingTimeFirst,
    },
};

/// The six supported policies, as a caller would pick one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    Fcfs,
    Npp,
    Pp,
    Rr { quantum: NonZeroU64 },
    Sjf,
    Srtf,
}

impl Algorithm {
    pub fn round_robin(quantum: i64) -> SimResult<Self> {
        u64::try_from(quantum)
            .ok()
            .and_then(NonZeroU64::new)
            .map(|quantum| Self::Rr { quantum })
            .ok_or(SimError::InvalidValue {
                field: Field::TimeQuantum,
                index: None,
                value: quantum,
            })
    }

    /// Every policy, with `quantum` for round robin.
    pub fn all(quantum: NonZeroU64) -> [Self; 6] {
        [
            Self::Fcfs,
            Self::Npp,
            Self::Pp,
            Self::Rr { quantum },
            Self::Sjf,
            Self::Srtf,
        ]
    }

    pub fn needs_priorities(&self) -> bool {
        matches!(self, Self::Npp | Self::Pp)
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Fcfs => "fcfs",
            Self::Npp => "npp",
            Self::Pp => "pp",
            Self::Rr { .. } => "rr",
            Self::Sjf => "sjf",
            Self::Srtf => "srtf",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fcfs => write!(f, "First Come First Serve (FCFS)"),
            Self::Npp => write!(f, "Non-Preemptive Priority (NPP)"),
            Self::Pp => write!(f, "Preemptive Priority (PP)"),
            Self::Rr { quantum } => write!(f, "Round Robin (RR, quantum {quantum})"),
            Self::Sjf => write!(f, "Shortest Job First (SJF)"),
            Self::Srtf => write!(f, "Shortest Remaining Time First (SRTF)"),
        }
    }
}

/// Parses short codes, case-insensitively: `fcfs`, `npp`, `pp`, `sjf`,
/// `srtf`, and `rr:<quantum>`.
impl FromStr for Algorithm {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_lowercase();
        match code.as_str() {
            "fcfs" => Ok(Self::Fcfs),
            "npp" => Ok(Self::Npp),
            "pp" => Ok(Self::Pp),
            "sjf" => Ok(Self::Sjf),
            "srtf" => Ok(Self::Srtf),
            _ => {
                let quantum = code
                    .strip_prefix("rr:")
                    .and_then(|q| q.parse::<i64>().ok())
                    .ok_or_else(|| SimError::UnknownAlgorithm {
                        code: s.to_string(),
                    })?;
                Self::round_robin(quantum)
            }
        }
    }
}

/// Runs `algorithm` over an already validated workload.
pub fn simulate(workload: &Workload, algorithm: Algorithm) -> SimResult<ScheduleResult> {
    if algorithm.needs_priorities() {
        workload.require_priorities()?;
    }

    let result = match algorithm {
        Algorithm::Fcfs => SchedCore::new(workload, Fcfs).run(),
        Algorithm::Npp => SchedCore::new(workload, NonPreemptivePriority).run(),
        Algorithm::Pp => SchedCore::new(workload, PreemptivePriority).run(),
        Algorithm::Rr { quantum } => SchedCore::new(workload, RoundRobin::new(quantum)).run(),
        Algorithm::Sjf => SchedCore::new(workload, ShortestJobFirst).run(),
        Algorithm::Srtf => SchedCore::new(workload, ShortestRemainingTimeFirst).run(),
    };
    Ok(result)
}

pub fn fcfs<S: AsRef<str>>(
    arrival_times: &[i64],
    burst_times: &[i64],
    names: &[S],
) -> SimResult<ScheduleResult> {
    let workload = Workload::from_columns(arrival_times, burst_times, names)?;
    simulate(&workload, Algorithm::Fcfs)
}

pub fn npp<S: AsRef<str>>(
    arrival_times: &[i64],
    burst_times: &[i64],
    priorities: &[i64],
    names: &[S],
) -> SimResult<ScheduleResult> {
    let workload =
        Workload::from_columns(arrival_times, burst_times, names)?.with_priorities(priorities)?;
    simulate(&workload, Algorithm::Npp)
}

pub fn pp<S: AsRef<str>>(
    arrival_times: &[i64],
    burst_times: &[i64],
    priorities: &[i64],
    names: &[S],
) -> SimResult<ScheduleResult> {
    let workload =
        Workload::from_columns(arrival_times, burst_times, names)?.with_priorities(priorities)?;
    simulate(&workload, Algorithm::Pp)
}

pub fn rr<S: AsRef<str>>(
    arrival_times: &[i64],
    burst_times: &[i64],
    time_quantum: i64,
    names: &[S],
) -> SimResult<ScheduleResult> {
    let algorithm = Algorithm::round_robin(time_quantum)?;
    let workload = Workload::from_columns(arrival_times, burst_times, names)?;
    simulate(&workload, algorithm)
}

pub fn sjf<S: AsRef<str>>(
    arrival_times: &[i64],
    burst_times: &[i64],
    names: &[S],
) -> SimResult<ScheduleResult> {
    let workload = Workload::from_columns(arrival_times, burst_times, names)?;
    simulate(&workload, Algorithm::Sjf)
}

pub fn srtf<S: AsRef<str>>(
    arrival_times: &[i64],
    burst_times: &[i64],
    names: &[S],
) -> SimResult<ScheduleResult> {
    let workload = Workload::from_columns(arrival_times, burst_times, names)?;
    simulate(&workload, Algorithm::Srtf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::ProcessSpec;

    #[test]
    fn parses_codes() {
        assert_eq!("FCFS".parse::<Algorithm>(), Ok(Algorithm::Fcfs));
        assert_eq!(" srtf ".parse::<Algorithm>(), Ok(Algorithm::Srtf));
        assert_eq!(
            "rr:3".parse::<Algorithm>(),
            Ok(Algorithm::Rr {
                quantum: NonZeroU64::new(3).unwrap()
            })
        );
        assert!(matches!(
            "rr:0".parse::<Algorithm>(),
            Err(SimError::InvalidValue {
                field: Field::TimeQuantum,
                ..
            })
        ));
        assert!(matches!(
            "lottery".parse::<Algorithm>(),
            Err(SimError::UnknownAlgorithm { .. })
        ));
    }

    #[test]
    fn round_robin_rejects_non_positive_quantum() {
        for quantum in [0, -2] {
            assert_eq!(
                rr(&[0], &[1], quantum, &["A"]),
                Err(SimError::InvalidValue {
                    field: Field::TimeQuantum,
                    index: None,
                    value: quantum,
                })
            );
        }
    }

    #[test]
    fn workloads_past_the_clock_range_fail_instead_of_running() {
        assert!(matches!(
            fcfs(&[0, 0, 0], &[i64::MAX; 3], &["A", "B", "C"]),
            Err(SimError::InvalidValue {
                field: Field::BurstTime,
                ..
            })
        ));

        let late = Workload::from_specs(vec![ProcessSpec::new("A", u64::MAX, 1)])
            .and_then(|workload| simulate(&workload, Algorithm::Fcfs));
        assert!(matches!(
            late,
            Err(SimError::InvalidValue {
                field: Field::BurstTime,
                index: Some(0),
                ..
            })
        ));

        let result = fcfs(&[0, 0], &[i64::MAX - 1, 1], &["A", "B"]).unwrap();
        assert_eq!(result.makespan(), i64::MAX as u64);
    }

    #[test]
    fn priority_policies_need_priorities() {
        let workload = Workload::from_columns(&[0], &[1], &["A"]).unwrap();
        for algorithm in [Algorithm::Npp, Algorithm::Pp] {
            assert!(matches!(
                simulate(&workload, algorithm),
                Err(SimError::InvalidInputLength {
                    field: Field::Priority,
                    expected: 1,
                    found: 0,
                })
            ));
        }
        assert!(simulate(&workload, Algorithm::Sjf).is_ok());
    }

    #[test]
    fn mismatched_priorities_are_rejected_before_running() {
        assert_eq!(
            pp(&[0, 1], &[1, 1], &[1], &["A", "B"]),
            Err(SimError::InvalidInputLength {
                field: Field::Priority,
                expected: 2,
                found: 1,
            })
        );
    }

    #[test]
    fn display_uses_long_names() {
        let rr = Algorithm::round_robin(2).unwrap();
        assert_eq!(rr.to_string(), "Round Robin (RR, quantum 2)");
        assert_eq!(rr.code(), "rr");
    }
}

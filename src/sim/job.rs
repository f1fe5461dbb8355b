use rustc_hash::FxHashSet;

use crate::{
    core::state::Ticks,
    error::{Field, SimError, SimResult},
};

/// One process as supplied by the caller. Immutable once a run starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessSpec {
    pub name: String,
    pub arrival_time: Ticks,
    pub burst_time: Ticks,
    /// Lower value means higher priority. Only priority policies read it.
    pub priority: Option<i64>,
}

impl ProcessSpec {
    pub fn new(name: impl Into<String>, arrival_time: Ticks, burst_time: Ticks) -> Self {
        Self {
            name: name.into(),
            arrival_time,
            burst_time,
            priority: None,
        }
    }

    pub fn with_priority(mut self, priority: i64) -> Self {
        self.priority = Some(priority);
        self
    }
}

/// A validated, non-empty set of processes with unique names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workload {
    specs: Vec<ProcessSpec>,
}

impl Workload {
    /// Builds a workload from parallel columns, one entry per process.
    pub fn from_columns<S: AsRef<str>>(
        arrival_times: &[i64],
        burst_times: &[i64],
        names: &[S],
    ) -> SimResult<Self> {
        let expected = names.len();
        check_len(Field::ArrivalTime, expected, arrival_times.len())?;
        check_len(Field::BurstTime, expected, burst_times.len())?;

        let mut specs = Vec::with_capacity(expected);
        for (index, name) in names.iter().enumerate() {
            let arrival = arrival_times[index];
            let burst = burst_times[index];
            if arrival < 0 {
                return Err(SimError::InvalidValue {
                    field: Field::ArrivalTime,
                    index: Some(index),
                    value: arrival,
                });
            }
            if burst <= 0 {
                return Err(SimError::InvalidValue {
                    field: Field::BurstTime,
                    index: Some(index),
                    value: burst,
                });
            }
            specs.push(ProcessSpec::new(name.as_ref(), arrival as Ticks, burst as Ticks));
        }

        Self::from_specs(specs)
    }

    /// Wraps records the caller already holds, checking the same invariants
    /// as [`Workload::from_columns`].
    ///
    /// The clock never passes the latest arrival plus the total burst, so that
    /// bound has to fit in [`Ticks`]. Burst times also rank SJF and SRTF
    /// queues as `i64` and may not exceed `i64::MAX`.
    pub fn from_specs(specs: Vec<ProcessSpec>) -> SimResult<Self> {
        if specs.is_empty() {
            return Err(SimError::EmptyInput);
        }

        let mut seen = FxHashSet::default();
        for (index, spec) in specs.iter().enumerate() {
            let burst = i64::try_from(spec.burst_time).unwrap_or(i64::MAX);
            if spec.burst_time == 0 || spec.burst_time > i64::MAX as Ticks {
                return Err(SimError::InvalidValue {
                    field: Field::BurstTime,
                    index: Some(index),
                    value: burst,
                });
            }
            if !seen.insert(spec.name.as_str()) {
                return Err(SimError::DuplicateName {
                    name: spec.name.clone(),
                });
            }
        }

        let latest_arrival = specs.iter().map(|s| s.arrival_time).max().unwrap_or(0);
        specs
            .iter()
            .enumerate()
            .try_fold(latest_arrival, |horizon, (index, spec)| {
                horizon
                    .checked_add(spec.burst_time)
                    .ok_or(SimError::InvalidValue {
                        field: Field::BurstTime,
                        index: Some(index),
                        value: spec.burst_time as i64,
                    })
            })?;

        Ok(Self { specs })
    }

    /// Attaches one priority per process, in the same order as the names.
    pub fn with_priorities(mut self, priorities: &[i64]) -> SimResult<Self> {
        check_len(Field::Priority, self.specs.len(), priorities.len())?;
        for (spec, &priority) in self.specs.iter_mut().zip(priorities) {
            spec.priority = Some(priority);
        }
        Ok(self)
    }

    /// Fails unless every process carries a priority.
    pub fn require_priorities(&self) -> SimResult<()> {
        let found = self.specs.iter().filter(|s| s.priority.is_some()).count();
        check_len(Field::Priority, self.specs.len(), found)
    }

    pub fn specs(&self) -> &[ProcessSpec] {
        &self.specs
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    pub fn total_burst(&self) -> Ticks {
        self.specs.iter().map(|s| s.burst_time).sum()
    }
}

fn check_len(field: Field, expected: usize, found: usize) -> SimResult<()> {
    if expected == found {
        Ok(())
    } else {
        Err(SimError::InvalidInputLength {
            field,
            expected,
            found,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_input() {
        let names: [&str; 0] = [];
        assert_eq!(
            Workload::from_columns(&[], &[], &names),
            Err(SimError::EmptyInput)
        );
    }

    #[test]
    fn rejects_mismatched_columns() {
        assert_eq!(
            Workload::from_columns(&[0, 1], &[1], &["A", "B"]),
            Err(SimError::InvalidInputLength {
                field: Field::BurstTime,
                expected: 2,
                found: 1,
            })
        );
        assert_eq!(
            Workload::from_columns(&[0], &[1, 1], &["A", "B"]),
            Err(SimError::InvalidInputLength {
                field: Field::ArrivalTime,
                expected: 2,
                found: 1,
            })
        );
    }

    #[test]
    fn rejects_bad_values() {
        assert_eq!(
            Workload::from_columns(&[0, -1], &[1, 1], &["A", "B"]),
            Err(SimError::InvalidValue {
                field: Field::ArrivalTime,
                index: Some(1),
                value: -1,
            })
        );
        assert_eq!(
            Workload::from_columns(&[0, 0], &[1, 0], &["A", "B"]),
            Err(SimError::InvalidValue {
                field: Field::BurstTime,
                index: Some(1),
                value: 0,
            })
        );
        assert!(Workload::from_specs(vec![ProcessSpec::new("A", 0, 0)]).is_err());
    }

    #[test]
    fn rejects_bursts_the_clock_cannot_hold() {
        assert_eq!(
            Workload::from_columns(&[0, 0, 0], &[i64::MAX; 3], &["A", "B", "C"]),
            Err(SimError::InvalidValue {
                field: Field::BurstTime,
                index: Some(2),
                value: i64::MAX,
            })
        );
        assert_eq!(
            Workload::from_specs(vec![ProcessSpec::new("A", u64::MAX, 1)]),
            Err(SimError::InvalidValue {
                field: Field::BurstTime,
                index: Some(0),
                value: 1,
            })
        );
        assert_eq!(
            Workload::from_specs(vec![ProcessSpec::new("A", 0, u64::MAX)]),
            Err(SimError::InvalidValue {
                field: Field::BurstTime,
                index: Some(0),
                value: i64::MAX,
            })
        );

        let edge = Workload::from_specs(vec![
            ProcessSpec::new("A", u64::MAX - 2, 1),
            ProcessSpec::new("B", 0, 1),
        ])
        .unwrap();
        assert_eq!(edge.total_burst(), 2);
    }

    #[test]
    fn rejects_duplicate_names() {
        assert_eq!(
            Workload::from_columns(&[0, 0], &[1, 1], &["A", "A"]),
            Err(SimError::DuplicateName {
                name: "A".to_string()
            })
        );
    }

    #[test]
    fn priorities_must_cover_every_process() {
        let workload = Workload::from_columns(&[0, 0], &[1, 1], &["A", "B"]).unwrap();
        assert!(workload.require_priorities().is_err());
        assert!(workload.clone().with_priorities(&[1]).is_err());

        let workload = workload.with_priorities(&[2, 1]).unwrap();
        assert!(workload.require_priorities().is_ok());
        assert_eq!(workload.specs()[1].priority, Some(1));
    }

    #[test]
    fn keeps_input_order() {
        let workload = Workload::from_columns(&[3, 0], &[1, 2], &["late", "early"]).unwrap();
        let names: Vec<&str> = workload.specs().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["late", "early"]);
        assert_eq!(workload.total_burst(), 3);
    }
}

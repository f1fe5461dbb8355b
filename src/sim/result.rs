use average::{Estimate, Mean};
use rustc_hash::FxHashMap;

use crate::core::state::{SimCtx, Ticks};

/// Gantt entry: `job` held the CPU without interruption over `[start, stop)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionSegment {
    pub job: String,
    pub start: Ticks,
    pub stop: Ticks,
}

impl ExecutionSegment {
    pub fn new(job: impl Into<String>, start: Ticks, stop: Ticks) -> Self {
        Self {
            job: job.into(),
            start,
            stop,
        }
    }

    pub fn duration(&self) -> Ticks {
        self.stop - self.start
    }
}

/// Completion metrics for one process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolvedProcess {
    pub job: String,
    pub arrival_time: Ticks,
    pub burst_time: Ticks,
    pub priority: Option<i64>,
    pub finish_time: Ticks,
    /// `finish_time - arrival_time`
    pub turnaround_time: Ticks,
    /// `turnaround_time - burst_time`
    pub waiting_time: Ticks,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScheduleResult {
    /// One entry per process, sorted by arrival time then name
    pub solved_processes: Vec<SolvedProcess>,
    /// Chronological; idle periods are gaps, never entries
    pub timeline: Vec<ExecutionSegment>,
}

impl ScheduleResult {
    pub(crate) fn from_ctx(ctx: &SimCtx) -> Self {
        let mut solved_processes: Vec<SolvedProcess> = ctx
            .procs
            .iter()
            .map(|proc| {
                let spec = &proc.spec;
                let finish_time = proc
                    .finish_time
                    .expect("Results requested before every process retired");
                let turnaround_time = finish_time - spec.arrival_time;
                debug_assert!(
                    turnaround_time >= spec.burst_time,
                    "{} waited a negative amount of time",
                    spec.name
                );

                SolvedProcess {
                    job: spec.name.clone(),
                    arrival_time: spec.arrival_time,
                    burst_time: spec.burst_time,
                    priority: spec.priority,
                    finish_time,
                    turnaround_time,
                    waiting_time: turnaround_time - spec.burst_time,
                }
            })
            .collect();
        solved_processes.sort_by(|a, b| {
            a.arrival_time
                .cmp(&b.arrival_time)
                .then_with(|| a.job.cmp(&b.job))
        });

        let timeline = ctx
            .timeline
            .iter()
            .map(|span| ExecutionSegment::new(&ctx.proc(span.pid).spec.name, span.start, span.stop))
            .collect();

        Self {
            solved_processes,
            timeline,
        }
    }

    pub fn solved(&self, job: &str) -> Option<&SolvedProcess> {
        self.solved_processes.iter().find(|p| p.job == job)
    }

    pub fn average_turnaround_time(&self) -> f64 {
        avg(self.solved_processes.iter().map(|p| p.turnaround_time as f64))
    }

    pub fn average_waiting_time(&self) -> f64 {
        avg(self.solved_processes.iter().map(|p| p.waiting_time as f64))
    }

    /// Time at which the last process finished.
    pub fn makespan(&self) -> Ticks {
        self.timeline.last().map_or(0, |s| s.stop)
    }

    /// CPU time each job received, summed over its segments.
    pub fn service_by_job(&self) -> FxHashMap<&str, Ticks> {
        let mut served = FxHashMap::default();
        for segment in &self.timeline {
            *served.entry(segment.job.as_str()).or_insert(0) += segment.duration();
        }
        served
    }

    /// Job names in the order they were given the CPU, one per segment.
    pub fn dispatch_order(&self) -> Vec<&str> {
        self.timeline.iter().map(|s| s.job.as_str()).collect()
    }
}

fn avg(iter: impl Iterator<Item = f64>) -> f64 {
    iter.collect::<Mean>().estimate()
}

#[cfg(test)]
mod tests {
    use crate::sim::fcfs;

    #[test]
    fn averages_and_service() {
        let result = fcfs(&[0, 1, 2], &[5, 3, 2], &["A", "B", "C"]).unwrap();

        assert!((result.average_turnaround_time() - 20.0 / 3.0).abs() < 1e-9);
        assert!((result.average_waiting_time() - 10.0 / 3.0).abs() < 1e-9);
        assert_eq!(result.makespan(), 10);

        let served = result.service_by_job();
        assert_eq!(served["A"], 5);
        assert_eq!(served["B"], 3);
        assert_eq!(served["C"], 2);
    }

    #[test]
    fn solved_sorted_by_arrival_then_name() {
        let result = fcfs(&[2, 0, 0], &[1, 1, 1], &["a", "c", "b"]).unwrap();
        let order: Vec<&str> = result.solved_processes.iter().map(|p| p.job.as_str()).collect();
        assert_eq!(order, vec!["b", "c", "a"]);
    }
}

use super::{Policy, ProcId, Rank, ReadyQueue, SimCtx, Ticks, ticks_key};

/// Non-preemptive shortest job first. Ties go to the earlier arrival, then to
/// the lexically smaller name.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShortestJobFirst;

impl Policy for ShortestJobFirst {
    fn name(&self) -> &'static str {
        "SJF"
    }

    fn ready_queue(&self) -> ReadyQueue {
        ReadyQueue::new_priq()
    }

    fn rank(&self, ctx: &SimCtx, pid: ProcId) -> Option<Rank> {
        let proc = ctx.proc(pid);
        Some(Rank(
            ticks_key(proc.spec.burst_time),
            proc.spec.arrival_time,
            proc.name_order,
        ))
    }

    fn slice(&self, ctx: &SimCtx, pid: ProcId) -> Ticks {
        ctx.proc(pid).remaining
    }
}

#[cfg(test)]
mod tests {
    use crate::sim::{ExecutionSegment, sjf};

    fn seg(job: &str, start: u64, stop: u64) -> ExecutionSegment {
        ExecutionSegment::new(job, start, stop)
    }

    #[test]
    fn shortest_burst_first() {
        let result = sjf(&[0, 0, 0], &[6, 2, 4], &["A", "B", "C"]).unwrap();

        assert_eq!(result.dispatch_order(), vec!["B", "C", "A"]);
        assert_eq!(result.solved("B").unwrap().finish_time, 2);
        assert_eq!(result.solved("C").unwrap().finish_time, 6);
        assert_eq!(result.solved("A").unwrap().finish_time, 12);
    }

    #[test]
    fn running_job_is_never_interrupted() {
        let result = sjf(&[0, 1], &[8, 1], &["long", "short"]).unwrap();
        assert_eq!(result.timeline, vec![seg("long", 0, 8), seg("short", 8, 9)]);
    }

    #[test]
    fn first_dispatch_is_earliest_arrival() {
        let result = sjf(&[2, 0, 3], &[1, 9, 2], &["A", "B", "C"]).unwrap();
        assert_eq!(result.dispatch_order(), vec!["B", "A", "C"]);
    }

    #[test]
    fn equal_bursts_break_ties_by_arrival_then_name() {
        let result = sjf(&[0, 1, 1, 1], &[3, 2, 2, 2], &["Z", "b", "a", "c"]).unwrap();
        assert_eq!(result.dispatch_order(), vec!["Z", "a", "b", "c"]);
    }

    #[test]
    fn skips_idle_gap() {
        let result = sjf(&[0, 5], &[2, 2], &["A", "B"]).unwrap();
        assert_eq!(result.timeline, vec![seg("A", 0, 2), seg("B", 5, 7)]);
    }

    #[test]
    fn idle_jump_picks_shortest_of_simultaneous_arrivals() {
        let result = sjf(&[0, 4, 4], &[1, 3, 2], &["A", "B", "C"]).unwrap();
        assert_eq!(
            result.timeline,
            vec![seg("A", 0, 1), seg("C", 4, 6), seg("B", 6, 9)]
        );
    }
}

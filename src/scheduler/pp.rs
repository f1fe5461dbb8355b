use super::{Policy, ProcId, Rank, ReadyQueue, SimCtx, Ticks, priority_rank};

/// Preemptive priority. Decisions happen every tick, so a better-priority
/// arrival takes the CPU at the first tick boundary after it arrives.
/// Processes with equal priority and arrival take turns tick by tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct PreemptivePriority;

impl Policy for PreemptivePriority {
    fn name(&self) -> &'static str {
        "PP"
    }

    fn ready_queue(&self) -> ReadyQueue {
        ReadyQueue::new_priq()
    }

    fn rank(&self, ctx: &SimCtx, pid: ProcId) -> Option<Rank> {
        // A process coming back from its tick queues behind equal-ranked peers
        Some(priority_rank(ctx, pid, ctx.enqueue_seq()))
    }

    fn slice(&self, _ctx: &SimCtx, _pid: ProcId) -> Ticks {
        1
    }
}

#[cfg(test)]
mod tests {
    use crate::sim::{ExecutionSegment, pp};

    fn seg(job: &str, start: u64, stop: u64) -> ExecutionSegment {
        ExecutionSegment::new(job, start, stop)
    }

    #[test]
    fn higher_priority_arrival_preempts() {
        let result = pp(&[0, 2], &[5, 2], &[2, 1], &["A", "B"]).unwrap();

        assert_eq!(
            result.timeline,
            vec![seg("A", 0, 2), seg("B", 2, 4), seg("A", 4, 7)]
        );
        let a = result.solved("A").unwrap();
        assert_eq!((a.finish_time, a.turnaround_time, a.waiting_time), (7, 7, 2));
        let b = result.solved("B").unwrap();
        assert_eq!((b.finish_time, b.turnaround_time, b.waiting_time), (4, 2, 0));
    }

    #[test]
    fn equal_priority_does_not_preempt() {
        let result = pp(&[0, 1], &[3, 3], &[1, 1], &["A", "B"]).unwrap();
        assert_eq!(result.timeline, vec![seg("A", 0, 3), seg("B", 3, 6)]);
    }

    #[test]
    fn equal_priority_and_arrival_alternate_each_tick() {
        let result = pp(&[0, 0], &[2, 2], &[1, 1], &["A", "B"]).unwrap();

        assert_eq!(
            result.timeline,
            vec![seg("A", 0, 1), seg("B", 1, 2), seg("A", 2, 3), seg("B", 3, 4)]
        );
        assert_eq!(result.solved("A").unwrap().finish_time, 3);
        assert_eq!(result.solved("B").unwrap().finish_time, 4);
    }

    #[test]
    fn alternation_only_among_equal_ranks() {
        let result = pp(&[0, 0, 0], &[2, 2, 1], &[1, 1, 0], &["A", "B", "C"]).unwrap();
        assert_eq!(
            result.timeline,
            vec![seg("C", 0, 1), seg("A", 1, 2), seg("B", 2, 3), seg("A", 3, 4), seg("B", 4, 5)]
        );
    }

    #[test]
    fn ticks_merge_into_one_segment() {
        let result = pp(&[0], &[6], &[0], &["solo"]).unwrap();
        assert_eq!(result.timeline, vec![seg("solo", 0, 6)]);
    }

    #[test]
    fn nested_preemptions_resume_in_priority_order() {
        let result = pp(&[0, 1, 2], &[4, 2, 1], &[3, 2, 1], &["A", "B", "C"]).unwrap();
        assert_eq!(
            result.timeline,
            vec![
                seg("A", 0, 1),
                seg("B", 1, 2),
                seg("C", 2, 3),
                seg("B", 3, 4),
                seg("A", 4, 7),
            ]
        );
    }
}

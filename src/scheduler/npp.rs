use super::{Policy, ProcId, Rank, ReadyQueue, SimCtx, Ticks, priority_rank};

/// Non-preemptive priority: among arrived processes the lowest priority value
/// runs next, to completion. Every process needs a priority; [`crate::simulate`]
/// checks this before a run starts.
#[derive(Debug, Clone, Copy, Default)]
pub struct NonPreemptivePriority;

impl Policy for NonPreemptivePriority {
    fn name(&self) -> &'static str {
        "NPP"
    }

    fn ready_queue(&self) -> ReadyQueue {
        ReadyQueue::new_priq()
    }

    fn rank(&self, ctx: &SimCtx, pid: ProcId) -> Option<Rank> {
        Some(priority_rank(ctx, pid, pid))
    }

    fn slice(&self, ctx: &SimCtx, pid: ProcId) -> Ticks {
        ctx.proc(pid).remaining
    }
}

#[cfg(test)]
mod tests {
    use crate::sim::{ExecutionSegment, npp};

    #[test]
    fn lower_value_wins_once_arrived() {
        let result = npp(&[0, 1, 2], &[4, 3, 2], &[3, 2, 1], &["A", "B", "C"]).unwrap();

        // A already holds the CPU when B and C arrive
        assert_eq!(
            result.timeline,
            vec![
                ExecutionSegment::new("A", 0, 4),
                ExecutionSegment::new("C", 4, 6),
                ExecutionSegment::new("B", 6, 9),
            ]
        );
        assert_eq!(result.solved("B").unwrap().waiting_time, 5);
    }

    #[test]
    fn equal_priority_falls_back_to_arrival_then_input_order() {
        let result = npp(&[1, 0, 0, 0], &[1, 1, 1, 1], &[0, 5, 0, 0], &["W", "X", "Y", "Z"]).unwrap();
        assert_eq!(result.dispatch_order(), vec!["Y", "Z", "W", "X"]);
    }

    #[test]
    fn negative_priorities_are_allowed() {
        let result = npp(&[0, 0], &[1, 1], &[0, -1], &["A", "B"]).unwrap();
        assert_eq!(result.dispatch_order(), vec!["B", "A"]);
    }
}

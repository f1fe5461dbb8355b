use super::{Policy, ProcId, Rank, ReadyQueue, SimCtx, Ticks, ticks_key};

/// Preemptive shortest remaining time first.
///
/// Instead of re-deciding every tick, a dispatched process runs until the
/// earlier of its completion or the first arrival whose burst is strictly
/// shorter than what the running process will have left at that moment.
/// Ties on remaining time go to the earlier arrival, then the smaller name.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShortestRemainingTimeFirst;

impl ShortestRemainingTimeFirst {
    /// First arrival after now that would take the CPU from `pid`.
    fn next_preemption(ctx: &SimCtx, pid: ProcId) -> Option<Ticks> {
        let finish = ctx.now + ctx.proc(pid).remaining;
        ctx.pending()
            .take_while(|p| p.spec.arrival_time < finish)
            .find(|p| p.spec.burst_time < finish - p.spec.arrival_time)
            .map(|p| p.spec.arrival_time)
    }
}

impl Policy for ShortestRemainingTimeFirst {
    fn name(&self) -> &'static str {
        "SRTF"
    }

    fn ready_queue(&self) -> ReadyQueue {
        ReadyQueue::new_priq()
    }

    fn rank(&self, ctx: &SimCtx, pid: ProcId) -> Option<Rank> {
        let proc = ctx.proc(pid);
        Some(Rank(
            ticks_key(proc.remaining),
            proc.spec.arrival_time,
            proc.name_order,
        ))
    }

    fn slice(&self, ctx: &SimCtx, pid: ProcId) -> Ticks {
        match Self::next_preemption(ctx, pid) {
            Some(at) => at - ctx.now,
            None => ctx.proc(pid).remaining,
        }
    }
}

use super::state::{ProcState, SimCtx};

/// Checks context invariants between steps. All checks are debug assertions,
/// so release builds only pay for the step counter.
#[derive(Debug, Default)]
pub struct Observer {
    step: u64,
}

impl Observer {
    pub fn new() -> Self {
        Self { step: 0 }
    }

    pub fn steps(&self) -> u64 {
        self.step
    }

    pub fn observe(&mut self, ctx: &SimCtx) {
        self.step += 1;

        if let Some(pid) = ctx.running {
            debug_assert_eq!(
                ctx.proc(pid).state,
                ProcState::Running,
                "running process {pid} must be Running"
            );
            debug_assert!(
                !ctx.ready.contains(pid),
                "Running process {pid} must not appear in the ready queue"
            );
        }

        for pid in ctx.ready.ids() {
            debug_assert_eq!(
                ctx.proc(pid).state,
                ProcState::Ready,
                "Queued process {pid} must be Ready"
            );
        }

        for proc in &ctx.procs {
            debug_assert!(
                proc.remaining <= proc.spec.burst_time,
                "Process {} has more work left than its burst",
                proc.id
            );
            debug_assert_eq!(
                proc.state == ProcState::Retired,
                proc.finish_time.is_some(),
                "Process {} finish time out of sync with its state",
                proc.id
            );
        }

        for pair in ctx.timeline.windows(2) {
            debug_assert!(
                pair[0].stop <= pair[1].start,
                "Spans {:?} and {:?} overlap or are out of order",
                pair[0],
                pair[1]
            );
            debug_assert!(
                pair[0].pid != pair[1].pid || pair[0].stop != pair[1].start,
                "Adjacent spans {:?} and {:?} should have been merged",
                pair[0],
                pair[1]
            );
        }
        if let Some(last) = ctx.timeline.last() {
            debug_assert!(last.stop <= ctx.now, "Timeline runs ahead of the clock");
        }
    }

    /// Final accounting once every process has retired: each process received
    /// exactly its burst and never finished before arrival plus burst.
    pub fn finish(&self, ctx: &SimCtx) {
        let mut served = vec![0; ctx.procs.len()];
        for span in &ctx.timeline {
            debug_assert!(span.stop > span.start, "Empty span {span:?}");
            served[span.pid] += span.stop - span.start;
        }

        for proc in &ctx.procs {
            debug_assert_eq!(
                served[proc.id], proc.spec.burst_time,
                "Process {} served {} ticks for a burst of {}",
                proc.id, served[proc.id], proc.spec.burst_time
            );
            debug_assert!(
                proc.finish_time
                    .is_some_and(|t| t >= proc.spec.arrival_time + proc.spec.burst_time),
                "Process {} finished too early",
                proc.id
            );
        }
    }
}

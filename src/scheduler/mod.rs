pub mod fcfs;
pub mod npp;
pub mod pp;
pub mod rr;
pub mod sjf;
pub mod srtf;

use crate::core::{
    Ticks,
    state::{ProcId, Rank, ReadyQueue, SimCtx},
};
pub use fcfs::Fcfs;
pub use npp::NonPreemptivePriority;
pub use pp::PreemptivePriority;
pub use rr::RoundRobin;
pub use sjf::ShortestJobFirst;
pub use srtf::ShortestRemainingTimeFirst;

/// A scheduling policy plugged into [`crate::core::SchedCore`].
///
/// The driver owns the clock and the ready queue; a policy only decides the
/// queue flavour, how queued processes are ordered, and how long a dispatched
/// process runs before the next decision.
pub trait Policy {
    fn name(&self) -> &'static str;

    fn ready_queue(&self) -> ReadyQueue;

    /// Ordering key for ranked queues. FIFO policies return `None`.
    fn rank(&self, _ctx: &SimCtx, _pid: ProcId) -> Option<Rank> {
        None
    }

    /// Ticks `pid` runs before the next decision; at least 1 and at most its
    /// remaining time.
    fn slice(&self, ctx: &SimCtx, pid: ProcId) -> Ticks;
}

/// Static priority with arrival as the first tie-break. `order` settles the
/// rest and must be unique per queued process.
pub(crate) fn priority_rank(ctx: &SimCtx, pid: ProcId, order: usize) -> Rank {
    let proc = ctx.proc(pid);
    let priority = proc
        .spec
        .priority
        .expect("Priority policies require a priority for every process");
    Rank(priority, proc.spec.arrival_time, order)
}

pub(crate) fn ticks_key(ticks: Ticks) -> i64 {
    i64::try_from(ticks).unwrap_or(i64::MAX)
}

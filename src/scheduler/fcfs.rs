use super::{Policy, ProcId, ReadyQueue, SimCtx, Ticks};

/// First-come-first-served: arrival order, each process runs to completion.
#[derive(Debug, Clone, Copy, Default)]
pub struct Fcfs;

impl Policy for Fcfs {
    fn name(&self) -> &'static str {
        "FCFS"
    }

    fn ready_queue(&self) -> ReadyQueue {
        ReadyQueue::new_fifo()
    }

    fn slice(&self, ctx: &SimCtx, pid: ProcId) -> Ticks {
        ctx.proc(pid).remaining
    }
}

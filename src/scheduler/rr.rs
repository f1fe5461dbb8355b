use std::num::NonZeroU64;

use super::{Policy, ProcId, ReadyQueue, SimCtx, Ticks};

/// Round robin over a FIFO ready queue with a fixed time quantum.
#[derive(Debug, Clone, Copy)]
pub struct RoundRobin {
    quantum: NonZeroU64,
}

impl RoundRobin {
    pub fn new(quantum: NonZeroU64) -> Self {
        Self { quantum }
    }
}

impl Policy for RoundRobin {
    fn name(&self) -> &'static str {
        "RR"
    }

    fn ready_queue(&self) -> ReadyQueue {
        ReadyQueue::new_fifo()
    }

    fn slice(&self, ctx: &SimCtx, pid: ProcId) -> Ticks {
        ctx.proc(pid).remaining.min(self.quantum.get())
    }
}

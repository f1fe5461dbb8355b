use crate::core::{ProcId, Ticks};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimEvent {
    Arrived {
        pid: ProcId,
        at: Ticks,
    },
    Dispatched {
        pid: ProcId,
        at: Ticks,
        slice: Ticks,
    },
    // Slice ended with work left; the process went back to the ready queue
    Preempted {
        pid: ProcId,
        at: Ticks,
        remaining: Ticks,
    },
    Retired {
        pid: ProcId,
        finish: Ticks,
    },
    // Nothing ready; clock jumped to the next arrival
    Idle {
        from: Ticks,
        to: Ticks,
    },
}

use keyed_priority_queue::KeyedPriorityQueue;
use std::collections::VecDeque;

use crate::sim::ProcessSpec;

// Index into the validated process list, in input order
pub type ProcId = usize;
pub type Ticks = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcState {
    Pending,
    Ready,
    Running,
    Retired,
}

/// Dispatch key for ranked ready queues. The smallest rank runs first; the
/// last component must be unique among queued processes so that ties never
/// depend on heap order.
#[derive(PartialEq, Eq, Hash, Debug, Copy, Clone)]
pub struct Rank(pub i64, pub Ticks, pub usize);

// KeyedPriorityQueue is a max-heap, so we need to flip-flop Rank's Ord
impl PartialOrd for Rank {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Rank {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (other.0, other.1, other.2).cmp(&(self.0, self.1, self.2))
    }
}

#[derive(Debug)]
pub struct Proc {
    pub id: ProcId,
    pub spec: ProcessSpec,
    pub state: ProcState,
    pub remaining: Ticks,
    pub finish_time: Option<Ticks>,
    // Position of `spec.name` among all names, lexically
    pub name_order: usize,
}

/// Uninterrupted CPU occupancy by one process over `[start, stop)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub pid: ProcId,
    pub start: Ticks,
    pub stop: Ticks,
}

#[derive(Debug)]
pub enum ReadyQueue {
    Fifo {
        procs: VecDeque<ProcId>,
    },
    Priq {
        procs: KeyedPriorityQueue<ProcId, Rank>,
    },
}

impl ReadyQueue {
    pub fn new_fifo() -> Self {
        Self::Fifo {
            procs: VecDeque::new(),
        }
    }

    pub fn new_priq() -> Self {
        Self::Priq {
            procs: KeyedPriorityQueue::new(),
        }
    }

    pub fn push(&mut self, pid: ProcId, rank: Option<Rank>) {
        debug_assert!(!self.contains(pid), "Process {pid} already queued");
        match self {
            Self::Fifo { procs } => procs.push_back(pid),
            Self::Priq { procs } => {
                procs.push(
                    pid,
                    rank.expect("Attempted to push to a ranked queue with no rank"),
                );
            }
        }
    }

    pub fn pop(&mut self) -> Option<ProcId> {
        match self {
            Self::Fifo { procs } => procs.pop_front(),
            Self::Priq { procs } => procs.pop().map(|p| p.0),
        }
    }

    pub fn contains(&self, pid: ProcId) -> bool {
        match self {
            Self::Fifo { procs } => procs.contains(&pid),
            Self::Priq { procs } => procs.get_priority(&pid).is_some(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Fifo { procs } => procs.len(),
            Self::Priq { procs } => procs.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn ids(&self) -> Vec<ProcId> {
        match self {
            Self::Fifo { procs } => procs.iter().copied().collect(),
            Self::Priq { procs } => procs.iter().map(|p| *p.0).collect(),
        }
    }
}

/// Everything one simulation run mutates: the clock, the remaining-time
/// table, the ready queue and the timeline built so far.
#[derive(Debug)]
pub struct SimCtx {
    pub now: Ticks,
    pub procs: Vec<Proc>,
    pub ready: ReadyQueue,
    pub running: Option<ProcId>,
    pub timeline: Vec<Span>,

    // Process ids sorted by (arrival_time, id); everything before the cursor
    // has been admitted
    arrivals: Vec<ProcId>,
    arrival_cursor: usize,
    retired: usize,
    // Pushes onto the ready queue so far, admissions and requeues alike
    enqueues: usize,
}

impl SimCtx {
    pub fn new(specs: Vec<ProcessSpec>, ready: ReadyQueue) -> Self {
        let mut by_name: Vec<ProcId> = (0..specs.len()).collect();
        by_name.sort_by(|&a, &b| specs[a].name.cmp(&specs[b].name).then(a.cmp(&b)));
        let mut name_order = vec![0; specs.len()];
        for (order, &pid) in by_name.iter().enumerate() {
            name_order[pid] = order;
        }

        let procs: Vec<Proc> = specs
            .into_iter()
            .enumerate()
            .map(|(id, spec)| Proc {
                id,
                remaining: spec.burst_time,
                spec,
                state: ProcState::Pending,
                finish_time: None,
                name_order: name_order[id],
            })
            .collect();

        // Stable sort keeps input order among equal arrivals
        let mut arrivals: Vec<ProcId> = (0..procs.len()).collect();
        arrivals.sort_by_key(|&pid| procs[pid].spec.arrival_time);

        let now = arrivals
            .first()
            .map(|&pid| procs[pid].spec.arrival_time)
            .unwrap_or(0);

        Self {
            now,
            procs,
            ready,
            running: None,
            timeline: Vec::new(),
            arrivals,
            arrival_cursor: 0,
            retired: 0,
            enqueues: 0,
        }
    }

    pub fn proc(&self, pid: ProcId) -> &Proc {
        &self.procs[pid]
    }

    pub fn proc_mut(&mut self, pid: ProcId) -> &mut Proc {
        &mut self.procs[pid]
    }

    /// Processes that have not arrived yet, in arrival order.
    pub fn pending(&self) -> impl Iterator<Item = &Proc> {
        self.arrivals[self.arrival_cursor..]
            .iter()
            .map(|&pid| &self.procs[pid])
    }

    pub fn next_arrival(&self) -> Option<Ticks> {
        self.pending().next().map(|p| p.spec.arrival_time)
    }

    /// Moves every process with `arrival_time <= now` from Pending to Ready and
    /// returns them in arrival order. Enqueueing is left to the caller.
    pub fn take_arrivals(&mut self) -> Vec<ProcId> {
        let mut arrived = Vec::new();
        while let Some(&pid) = self.arrivals.get(self.arrival_cursor) {
            if self.procs[pid].spec.arrival_time > self.now {
                break;
            }
            self.arrival_cursor += 1;
            self.mark_ready(pid);
            arrived.push(pid);
        }
        arrived
    }

    /// Sequence number the next push onto the ready queue will carry.
    pub fn enqueue_seq(&self) -> usize {
        self.enqueues
    }

    pub fn enqueue(&mut self, pid: ProcId, rank: Option<Rank>) {
        self.ready.push(pid, rank);
        self.enqueues += 1;
    }

    pub fn jump_to(&mut self, time: Ticks) {
        debug_assert!(time >= self.now, "Clock cannot move backwards");
        self.now = time;
    }

    pub fn mark_ready(&mut self, pid: ProcId) {
        let proc = self.proc_mut(pid);
        debug_assert!(
            proc.state != ProcState::Retired,
            "Retired process {pid} cannot become ready"
        );
        proc.state = ProcState::Ready;
        if self.running == Some(pid) {
            self.running = None;
        }
    }

    pub fn set_running(&mut self, pid: ProcId) {
        debug_assert!(
            !self.ready.contains(pid),
            "Running process {pid} must not be queued"
        );
        debug_assert!(self.running.is_none(), "CPU already running a process");

        self.running = Some(pid);
        self.proc_mut(pid).state = ProcState::Running;
    }

    /// Runs `pid` for `slice` ticks starting now. A span that continues the
    /// previous span of the same process is merged into it.
    pub fn run(&mut self, pid: ProcId, slice: Ticks) {
        debug_assert_eq!(self.running, Some(pid), "Process {pid} is not running");
        let start = self.now;
        let stop = start + slice;

        match self.timeline.last_mut() {
            Some(last) if last.pid == pid && last.stop == start => last.stop = stop,
            _ => self.timeline.push(Span { pid, start, stop }),
        }

        let proc = self.proc_mut(pid);
        proc.remaining = proc
            .remaining
            .checked_sub(slice)
            .expect("Slice longer than remaining time");
        self.now = stop;
    }

    pub fn retire(&mut self, pid: ProcId) {
        debug_assert!(
            !self.ready.contains(pid),
            "Retiring process {pid} that is still queued"
        );
        let now = self.now;
        let proc = self.proc_mut(pid);
        debug_assert_eq!(proc.remaining, 0, "Process {pid} retired with work left");

        proc.state = ProcState::Retired;
        proc.finish_time = Some(now);
        self.running = None;
        self.retired += 1;
    }

    pub fn all_retired(&self) -> bool {
        self.retired == self.procs.len()
    }
}

use log::{debug, trace};

use super::{
    event::SimEvent,
    observer::Observer,
    state::{ProcId, SimCtx},
};
use crate::{
    scheduler::Policy,
    sim::{ScheduleResult, Workload},
};

/// One simulation run: a fresh context driven by a single policy.
pub struct SchedCore<P: Policy> {
    pub ctx: SimCtx,
    pub policy: P,
    observer: Observer,
}

impl<P: Policy> SchedCore<P> {
    pub fn new(workload: &Workload, policy: P) -> Self {
        let ctx = SimCtx::new(workload.specs().to_vec(), policy.ready_queue());
        Self {
            ctx,
            policy,
            observer: Observer::new(),
        }
    }

    /// Makes one scheduling decision and returns what happened.
    ///
    /// 1. Admit everything that has arrived by now
    /// 2. If nothing is ready, jump to the next arrival
    /// 3. Otherwise dispatch the policy's pick for the policy's slice, then
    ///    retire it or (after admitting arrivals during the slice) requeue it
    pub fn step(&mut self) -> Vec<SimEvent> {
        let mut events = Vec::new();
        self.admit_arrivals(&mut events);

        if self.ctx.all_retired() {
            return events;
        }

        let pid = match self.ctx.ready.pop() {
            Some(pid) => pid,
            None => {
                let from = self.ctx.now;
                let to = self
                    .ctx
                    .next_arrival()
                    .expect("Unfinished work with an empty ready queue must have a pending arrival");
                self.ctx.jump_to(to);
                events.push(SimEvent::Idle { from, to });
                self.observer.observe(&self.ctx);
                return events;
            }
        };

        self.ctx.set_running(pid);
        let slice = self.policy.slice(&self.ctx, pid);
        debug_assert!(
            slice > 0 && slice <= self.ctx.proc(pid).remaining,
            "{} chose slice {slice} for process {pid}",
            self.policy.name()
        );
        events.push(SimEvent::Dispatched {
            pid,
            at: self.ctx.now,
            slice,
        });
        self.ctx.run(pid, slice);

        let remaining = self.ctx.proc(pid).remaining;
        if remaining == 0 {
            self.ctx.retire(pid);
            events.push(SimEvent::Retired {
                pid,
                finish: self.ctx.now,
            });
        } else {
            // Arrivals during the slice queue ahead of the preempted process
            self.admit_arrivals(&mut events);
            self.ctx.mark_ready(pid);
            self.enqueue(pid);
            events.push(SimEvent::Preempted {
                pid,
                at: self.ctx.now,
                remaining,
            });
        }

        self.observer.observe(&self.ctx);
        events
    }

    /// Steps until every process has retired.
    pub fn run(mut self) -> ScheduleResult {
        debug!(
            "{}: simulating {} processes from t={}",
            self.policy.name(),
            self.ctx.procs.len(),
            self.ctx.now
        );

        while !self.ctx.all_retired() {
            for event in self.step() {
                match event {
                    SimEvent::Dispatched { pid, at, slice } => debug!(
                        "{}: t={at} dispatch {} for {slice}",
                        self.policy.name(),
                        self.ctx.proc(pid).spec.name
                    ),
                    SimEvent::Retired { pid, finish } => debug!(
                        "{}: t={finish} retire {}",
                        self.policy.name(),
                        self.ctx.proc(pid).spec.name
                    ),
                    _ => trace!("{}: {event:?}", self.policy.name()),
                }
            }
        }

        self.observer.finish(&self.ctx);
        debug!(
            "{}: done at t={} after {} steps",
            self.policy.name(),
            self.ctx.now,
            self.observer.steps()
        );
        ScheduleResult::from_ctx(&self.ctx)
    }

    fn admit_arrivals(&mut self, events: &mut Vec<SimEvent>) {
        for pid in self.ctx.take_arrivals() {
            events.push(SimEvent::Arrived {
                pid,
                at: self.ctx.proc(pid).spec.arrival_time,
            });
            self.enqueue(pid);
        }
    }

    fn enqueue(&mut self, pid: ProcId) {
        let rank = self.policy.rank(&self.ctx, pid);
        self.ctx.enqueue(pid, rank);
    }
}

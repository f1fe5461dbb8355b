//! Discrete-time model of classical CPU scheduling policies.
//!
//! Every policy runs on the same driver loop ([`crate::core::SchedCore`]) and only
//! decides queue order and slice length. The [`sim`] module holds the caller
//! facing side: input validation, one entry point per policy, and results.

pub mod core;
pub mod error;
pub mod scheduler;
pub mod sim;

pub use error::{SimError, SimResult};
pub use scheduler::Policy;
pub use sim::{
    Algorithm, ExecutionSegment, ProcessSpec, ScheduleResult, SolvedProcess, Workload,
    WorkloadConfig, fcfs, npp, pp, rr, simulate, sjf, srtf,
};

pub mod config;
pub mod driver;
pub mod job;
pub mod result;

pub use config::WorkloadConfig;
pub use driver::{Algorithm, fcfs, npp, pp, rr, simulate, sjf, srtf};
pub use job::{ProcessSpec, Workload};
pub use result::{ExecutionSegment, ScheduleResult, SolvedProcess};

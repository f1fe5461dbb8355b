pub mod driver;
pub mod event;
pub mod observer;
pub mod state;

pub use driver::SchedCore;
pub use event::SimEvent;
pub use observer::Observer;
pub use state::{Proc, ProcId, ProcState, Rank, ReadyQueue, SimCtx, Span, Ticks};

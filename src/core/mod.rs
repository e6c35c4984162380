pub mod driver;
pub mod event;
pub mod observer;
pub mod queue;
pub mod recorder;
pub mod state;

pub use driver::{Simulation, simulate};
pub use event::SimEvent;
pub use queue::{FifoQueue, Rank, RankedQueue};
pub use recorder::{Outcome, ProcessStats, ScheduleEntry};
pub use state::{Pid, ProcKey, ProcState, Process, SimState, Ticks};

pub mod config;
pub mod core;
pub mod error;
pub mod scheduler;
pub mod sim;

pub use crate::core::{Outcome, Pid, Process, ScheduleEntry, Simulation, Ticks};
pub use error::{Error, Result};
pub use scheduler::Policy;
pub use sim::Algorithm;

pub mod fcfs;
pub mod rr;
pub mod sjf;
pub mod srtf;

use crate::core::{ProcKey, ProcState, SimState, Ticks};
pub use rr::RoundRobin;
pub use sjf::{Estimate, Sjf};
pub use srtf::Srtf;

pub const DEFAULT_QUANTUM: Ticks = 2;
pub const DEFAULT_ALPHA: f64 = 0.5;

/// A selection rule plugged into `core::Simulation`. The policy owns the
/// ready queue; the simulation owns the clock and the processes.
pub trait Policy {
    fn name(&self) -> &'static str;

    /// Adds an arrived, requeued or preempted process to the ready queue.
    fn enqueue(&mut self, st: &SimState, proc: ProcKey);

    /// Removes and returns the next process to run on an idle CPU.
    fn dispatch(&mut self, st: &SimState) -> Option<ProcKey>;

    fn queued(&self) -> usize;

    fn is_queued(&self, proc: ProcKey) -> bool;

    /// Start of the interval charged as waiting time when `proc` is
    /// dispatched.
    fn waiting_since(&self, proc: &ProcState) -> Ticks {
        proc.last_scheduled.unwrap_or(proc.arrival())
    }

    /// Called once `proc` is on the CPU.
    fn running(&mut self, _st: &mut SimState, _proc: ProcKey) {}

    /// Called after `proc` executed one unit.
    fn tick(&mut self, _st: &SimState, _proc: ProcKey) {}

    fn slice_expired(&self, _st: &SimState, _proc: ProcKey) -> bool {
        false
    }

    /// Given the arrivals of this tick, returns one to run in place of
    /// `current`, already removed from the ready queue.
    fn preempt(
        &mut self,
        _st: &SimState,
        _current: ProcKey,
        _arrivals: &[ProcKey],
    ) -> Option<ProcKey> {
        None
    }

    fn completed(&mut self, _st: &SimState, _proc: ProcKey) {}
}

use rustc_hash::FxHashMap;
use std::cmp::Ordering;

use super::Policy;
use crate::{
    core::{Pid, ProcKey, ProcState, RankedQueue, SimState, Ticks},
    error::{Error, Result},
};

/// Estimate given to a process the first time it is seen.
pub const INITIAL_ESTIMATE: f64 = 5.0;

/// Predicted burst length. Totally ordered so it can rank a ready queue.
#[derive(Debug, Clone, Copy)]
pub struct Estimate(pub f64);

impl PartialEq for Estimate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Estimate {}

impl PartialOrd for Estimate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Estimate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Non-preemptive shortest job first on exponentially smoothed burst
/// estimates: `next = alpha * actual + (1 - alpha) * previous`.
#[derive(Debug)]
pub struct Sjf {
    alpha: f64,
    estimates: FxHashMap<Pid, f64>,
    ready: RankedQueue<Estimate>,
}

impl Sjf {
    pub fn new(alpha: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&alpha) {
            return Err(Error::InvalidAlpha(alpha));
        }
        Ok(Self {
            alpha,
            estimates: FxHashMap::default(),
            ready: RankedQueue::default(),
        })
    }

    pub fn estimate(&self, pid: Pid) -> Option<f64> {
        self.estimates.get(&pid).copied()
    }
}

impl Policy for Sjf {
    fn name(&self) -> &'static str {
        "SJF"
    }

    fn enqueue(&mut self, st: &SimState, proc: ProcKey) {
        let state = st.proc(proc);
        let estimate = *self
            .estimates
            .entry(state.pid())
            .or_insert(INITIAL_ESTIMATE);
        self.ready.push(proc, Estimate(estimate), state.arrival());
    }

    fn dispatch(&mut self, _st: &SimState) -> Option<ProcKey> {
        self.ready.pop()
    }

    fn queued(&self) -> usize {
        self.ready.len()
    }

    fn is_queued(&self, proc: ProcKey) -> bool {
        self.ready.contains(proc)
    }

    // Charged from arrival on every dispatch
    fn waiting_since(&self, proc: &ProcState) -> Ticks {
        proc.arrival()
    }

    fn running(&mut self, st: &mut SimState, proc: ProcKey) {
        let now = st.now;
        st.proc_mut(proc).last_scheduled = Some(now);
    }

    fn completed(&mut self, st: &SimState, proc: ProcKey) {
        let state = st.proc(proc);
        let started = state.last_scheduled.unwrap_or(state.arrival());
        let actual = st.now.saturating_sub(started) as f64;

        let estimate = self
            .estimates
            .entry(state.pid())
            .or_insert(INITIAL_ESTIMATE);
        let previous = *estimate;
        *estimate = self.alpha * actual + (1.0 - self.alpha) * previous;
        log::trace!(
            "process {} ran {actual}, estimate {previous} -> {}",
            state.pid(),
            *estimate
        );
    }
}

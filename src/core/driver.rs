use super::{
    observer::Observer,
    recorder::Outcome,
    state::{Process, SimState},
};
use crate::{
    error::Result,
    scheduler::Policy,
};

/// Tick-driven simulation of one policy over a private snapshot of the
/// process list.
pub struct Simulation<P: Policy> {
    pub state: SimState,
    pub policy: P,
    observer: Observer,
}

impl<P: Policy> Simulation<P> {
    pub fn new(processes: &[Process], policy: P) -> Result<Self> {
        let state = SimState::new(processes)?;
        Ok(Self {
            state,
            policy,
            observer: Observer::new(),
        })
    }

    pub fn is_done(&self) -> bool {
        self.state.current.is_none() && self.policy.queued() == 0 && !self.state.has_pending()
    }

    pub fn run(&mut self) {
        log::debug!(
            "{}: simulating {} processes",
            self.policy.name(),
            self.state.procs.len()
        );
        self.state.skip_to_next_arrival();
        while !self.is_done() {
            self.step();
        }
        log::debug!(
            "{}: finished at t={} after {} ticks",
            self.policy.name(),
            self.state.now,
            self.observer.steps()
        );
    }

    /// Advances the clock by one tick.
    pub fn step(&mut self) {
        let st = &mut self.state;

        // Retire a finished process or take back an expired slice
        if let Some(current) = st.current {
            if st.proc(current).remaining == 0 {
                st.retire_current();
                self.policy.completed(st, current);
            } else if self.policy.slice_expired(st, current) {
                st.requeue_current();
                self.policy.enqueue(st, current);
            }
        }

        let arrivals = st.admit_all();
        for &proc in &arrivals {
            self.policy.enqueue(st, proc);
        }

        match st.current {
            None => dispatch_next(st, &mut self.policy),
            Some(current) if !arrivals.is_empty() => {
                if let Some(next) = self.policy.preempt(st, current, &arrivals) {
                    let since = self.policy.waiting_since(st.proc(next));
                    if let Some(prev) = st.preempt(next, since) {
                        self.policy.enqueue(st, prev);
                    }
                    self.policy.running(st, next);
                }
            }
            Some(_) => {}
        }

        // Zero-burst processes finish the moment they get the CPU
        while let Some(current) = st.current {
            if st.proc(current).remaining > 0 {
                break;
            }
            st.retire_current();
            self.policy.completed(st, current);
            dispatch_next(st, &mut self.policy);
        }

        if let Some(current) = st.current {
            st.execute();
            self.policy.tick(st, current);
        }

        self.observer.observe(st, &self.policy);

        st.advance_time(1);
        if st.current.is_none() && self.policy.queued() == 0 {
            st.skip_to_next_arrival();
        }
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    pub fn into_outcome(self) -> Outcome {
        self.state.into_outcome(self.policy.name())
    }
}

fn dispatch_next<P: Policy>(st: &mut SimState, policy: &mut P) {
    if let Some(next) = policy.dispatch(st) {
        let since = policy.waiting_since(st.proc(next));
        st.dispatch(next, since);
        policy.running(st, next);
    }
}

/// Runs `policy` to completion over its own copy of `processes`.
pub fn simulate<P: Policy>(processes: &[Process], policy: P) -> Result<Outcome> {
    let mut sim = Simulation::new(processes, policy)?;
    sim.run();
    Ok(sim.into_outcome())
}

use crate::{
    core::{Outcome, Process, SimState},
    error::Result,
};

pub const NAME: &str = "FCFS";

/// First-come-first-served over the input order. The list is not sorted:
/// callers pass processes ordered by arrival time.
pub fn schedule(processes: &[Process]) -> Result<Outcome> {
    let mut st = SimState::new(processes)?;
    log::debug!("{NAME}: simulating {} processes", processes.len());

    while let Some(next) = st.admit_next() {
        let arrival = st.proc(next).arrival();
        st.dispatch(next, arrival);
        st.run_to_completion();
    }

    Ok(st.into_outcome(NAME))
}

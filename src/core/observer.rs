use super::state::SimState;
use crate::scheduler::Policy;

/// Debug-build invariant checks run after every tick.
#[derive(Debug, Default)]
pub struct Observer {
    step: u64,
}

impl Observer {
    pub fn new() -> Self {
        Self { step: 0 }
    }

    pub fn steps(&self) -> u64 {
        self.step
    }

    pub fn observe<P: Policy>(&mut self, st: &SimState, policy: &P) {
        self.step += 1;

        if let Some(key) = st.current {
            let proc = st.proc(key);
            debug_assert!(
                !policy.is_queued(key),
                "running process {} must not be queued",
                proc.pid()
            );
            debug_assert!(
                !proc.is_finished(),
                "finished process {} is on the CPU",
                proc.pid()
            );
        }

        for (key, proc) in &st.procs {
            debug_assert!(
                proc.remaining <= proc.process.burst_time,
                "process {} gained work",
                proc.pid()
            );
            if proc.is_finished() {
                debug_assert!(
                    !policy.is_queued(key),
                    "finished process {} still queued",
                    proc.pid()
                );
            }
        }
    }
}

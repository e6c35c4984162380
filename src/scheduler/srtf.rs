use super::Policy;
use crate::core::{ProcKey, RankedQueue, SimState, Ticks};

/// Shortest remaining time first. An idle CPU takes the queued process with
/// the least remaining time; a running process is only preempted by an
/// arrival of the same tick with strictly less remaining time.
#[derive(Debug, Default)]
pub struct Srtf {
    ready: RankedQueue<Ticks>,
}

impl Srtf {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Policy for Srtf {
    fn name(&self) -> &'static str {
        "SRTF"
    }

    fn enqueue(&mut self, st: &SimState, proc: ProcKey) {
        let state = st.proc(proc);
        self.ready.push(proc, state.remaining, state.arrival());
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

    fn preempt(
        &mut self,
        st: &SimState,
        current: ProcKey,
        arrivals: &[ProcKey],
    ) -> Option<ProcKey> {
        let (best, rank) = self.ready.best_of(arrivals)?;
        let running = st.proc(current).remaining;
        if rank.key >= running {
            return None;
        }

        log::trace!(
            "t={} process {} ({} left) preempts {} ({} left)",
            st.now,
            st.proc(best).pid(),
            rank.key,
            st.proc(current).pid(),
            running
        );
        self.ready.remove(best);
        Some(best)
    }
}

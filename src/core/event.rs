use crate::core::{Pid, Ticks};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimEvent {
    Admitted {
        time: Ticks,
        pid: Pid,
    },
    Dispatched {
        time: Ticks,
        pid: Pid,
    },
    // Quantum expired, back to the tail of the ready queue
    Requeued {
        time: Ticks,
        pid: Pid,
    },
    Preempted {
        time: Ticks,
        pid: Pid,
        by: Pid,
    },
    Completed {
        time: Ticks,
        pid: Pid,
    },
}

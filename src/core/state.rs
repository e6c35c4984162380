use rustc_hash::FxHashSet;
use slotmap::{SlotMap, new_key_type};

use super::{
    event::SimEvent,
    recorder::{Outcome, ProcessStats, Recorder},
};
use crate::error::{Error, Result};

pub type Pid = u64;
pub type Ticks = u64;
new_key_type! {
    pub struct ProcKey;
}

/// One line of the problem description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Process {
    pub id: Pid,
    pub arrival_time: Ticks,
    pub burst_time: Ticks,
}

impl Process {
    pub fn new(id: Pid, arrival_time: Ticks, burst_time: Ticks) -> Self {
        Self {
            id,
            arrival_time,
            burst_time,
        }
    }
}

/// Mutable per-run state of a process. Every field is initialized from the
/// owning `Process` when a run starts, nothing carries over between runs.
#[derive(Debug, Clone)]
pub struct ProcState {
    pub process: Process,
    pub remaining: Ticks,
    // RR/SRTF: when the process was last put back on the ready queue.
    // SJF: when the process was last dispatched.
    pub last_scheduled: Option<Ticks>,
    pub waited: Ticks,
    pub first_run: Option<Ticks>,
    pub completion: Option<Ticks>,
}

impl ProcState {
    fn new(process: Process) -> Self {
        Self {
            process,
            remaining: process.burst_time,
            last_scheduled: None,
            waited: 0,
            first_run: None,
            completion: None,
        }
    }

    pub fn pid(&self) -> Pid {
        self.process.id
    }

    pub fn arrival(&self) -> Ticks {
        self.process.arrival_time
    }

    pub fn is_finished(&self) -> bool {
        self.completion.is_some()
    }
}

/// Rejects input that breaks the unique-pid precondition.
pub fn check_unique_ids(processes: &[Process]) -> Result<()> {
    let mut seen = FxHashSet::default();
    for process in processes {
        if !seen.insert(process.id) {
            return Err(Error::DuplicateProcessId(process.id));
        }
    }
    Ok(())
}

#[derive(Debug)]
pub struct SimState {
    pub now: Ticks,
    pub procs: SlotMap<ProcKey, ProcState>,
    pub current: Option<ProcKey>,
    // Input order, used for reporting
    order: Vec<ProcKey>,
    // Not yet arrived, in input order
    pending: Vec<ProcKey>,
    recorder: Recorder,
    cpu_time: Ticks,
}

impl SimState {
    pub fn new(processes: &[Process]) -> Result<Self> {
        check_unique_ids(processes)?;

        let mut procs = SlotMap::with_capacity_and_key(processes.len());
        let order: Vec<ProcKey> = processes
            .iter()
            .map(|&process| procs.insert(ProcState::new(process)))
            .collect();

        Ok(Self {
            now: 0,
            procs,
            current: None,
            pending: order.clone(),
            order,
            recorder: Recorder::default(),
            cpu_time: 0,
        })
    }

    pub fn proc(&self, key: ProcKey) -> &ProcState {
        &self.procs[key]
    }

    pub fn proc_mut(&mut self, key: ProcKey) -> &mut ProcState {
        &mut self.procs[key]
    }

    /// Removes and returns at most one pending process arriving exactly now,
    /// the first one in input order.
    pub fn admit(&mut self) -> Option<ProcKey> {
        let now = self.now;
        let index = self
            .pending
            .iter()
            .position(|&key| self.procs[key].arrival() == now)?;
        let key = self.pending.remove(index);

        let pid = self.procs[key].pid();
        self.recorder.emit(SimEvent::Admitted { time: now, pid });
        Some(key)
    }

    /// Admits every process arriving now, in input order.
    pub fn admit_all(&mut self) -> Vec<ProcKey> {
        let mut admitted = Vec::new();
        while let Some(key) = self.admit() {
            admitted.push(key);
        }
        admitted
    }

    /// Removes the first pending process in input order, moving the clock
    /// forward to its arrival if it has not arrived yet.
    pub fn admit_next(&mut self) -> Option<ProcKey> {
        if self.pending.is_empty() {
            return None;
        }
        let key = self.pending.remove(0);
        let proc = &self.procs[key];
        self.now = self.now.max(proc.arrival());

        let pid = proc.pid();
        self.recorder.emit(SimEvent::Admitted {
            time: self.now,
            pid,
        });
        Some(key)
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn next_arrival(&self) -> Option<Ticks> {
        self.pending
            .iter()
            .map(|&key| self.procs[key].arrival())
            .min()
    }

    pub fn advance_time(&mut self, delta: Ticks) {
        self.now = self.now.saturating_add(delta);
    }

    /// Skips an idle gap: moves the clock to the next arrival if that is
    /// later than now.
    pub fn skip_to_next_arrival(&mut self) {
        if let Some(next) = self.next_arrival() {
            if next > self.now {
                log::trace!("t={} idle until t={}", self.now, next);
                self.now = next;
            }
        }
    }

    /// Puts `key` on the CPU, charging it the time since `waiting_since`.
    pub fn dispatch(&mut self, key: ProcKey, waiting_since: Ticks) {
        debug_assert!(self.current.is_none(), "CPU already running a process");

        let now = self.now;
        let proc = &mut self.procs[key];
        proc.waited += now.saturating_sub(waiting_since);
        proc.first_run.get_or_insert(now);
        let pid = proc.pid();

        self.current = Some(key);
        self.recorder.switch_to(now, pid);
        self.recorder.emit(SimEvent::Dispatched { time: now, pid });
    }

    /// Takes the running process off the CPU so it can be queued again.
    pub fn requeue_current(&mut self) -> Option<ProcKey> {
        let key = self.current.take()?;
        let now = self.now;
        let proc = &mut self.procs[key];
        proc.last_scheduled = Some(now);

        let pid = proc.pid();
        self.recorder.emit(SimEvent::Requeued { time: now, pid });
        Some(key)
    }

    /// Swaps the running process for `by`. Returns the preempted process,
    /// which the caller must put back on its ready queue.
    pub fn preempt(&mut self, by: ProcKey, waiting_since: Ticks) -> Option<ProcKey> {
        let key = self.current.take()?;
        let now = self.now;
        let proc = &mut self.procs[key];
        proc.last_scheduled = Some(now);

        let pid = proc.pid();
        let by_pid = self.procs[by].pid();
        self.recorder.emit(SimEvent::Preempted {
            time: now,
            pid,
            by: by_pid,
        });
        self.dispatch(by, waiting_since);
        Some(key)
    }

    pub fn retire_current(&mut self) -> Option<ProcKey> {
        let key = self.current.take()?;
        let now = self.now;
        let proc = &mut self.procs[key];
        debug_assert_eq!(proc.remaining, 0, "retiring unfinished process");
        proc.completion = Some(now);

        let pid = proc.pid();
        self.recorder.emit(SimEvent::Completed { time: now, pid });
        Some(key)
    }

    /// Runs the current process for one unit of work.
    pub fn execute(&mut self) {
        if let Some(key) = self.current {
            let proc = &mut self.procs[key];
            if proc.remaining > 0 {
                proc.remaining -= 1;
                self.cpu_time += 1;
            }
        }
    }

    /// Runs the current process until it finishes and retires it.
    pub fn run_to_completion(&mut self) -> Option<ProcKey> {
        let key = self.current?;
        let remaining = std::mem::take(&mut self.procs[key].remaining);
        self.cpu_time += remaining;
        self.advance_time(remaining);
        self.retire_current()
    }

    pub fn into_outcome(self, policy: &'static str) -> Outcome {
        let stats = self
            .order
            .iter()
            .map(|&key| ProcessStats::from(&self.procs[key]))
            .collect();
        self.recorder.finish(policy, stats, self.cpu_time)
    }
}

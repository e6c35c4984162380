use std::fmt;

use average::Estimate;

use super::{
    event::SimEvent,
    state::{Pid, ProcState, Ticks},
};

/// The CPU switched to `pid` at `time`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleEntry {
    pub time: Ticks,
    pub pid: Pid,
}

impl From<(Ticks, Pid)> for ScheduleEntry {
    fn from((time, pid): (Ticks, Pid)) -> Self {
        Self { time, pid }
    }
}

impl fmt::Display for ScheduleEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.time, self.pid)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessStats {
    pub pid: Pid,
    pub arrival: Ticks,
    pub burst: Ticks,
    pub waited: Ticks,
    pub first_run: Option<Ticks>,
    pub completion: Option<Ticks>,
}

impl From<&ProcState> for ProcessStats {
    fn from(proc: &ProcState) -> Self {
        Self {
            pid: proc.pid(),
            arrival: proc.arrival(),
            burst: proc.process.burst_time,
            waited: proc.waited,
            first_run: proc.first_run,
            completion: proc.completion,
        }
    }
}

impl ProcessStats {
    pub fn turnaround(&self) -> Option<Ticks> {
        self.completion.map(|done| done - self.arrival)
    }

    pub fn response(&self) -> Option<Ticks> {
        self.first_run.map(|start| start - self.arrival)
    }
}

#[derive(Debug, Default)]
pub struct Recorder {
    schedule: Vec<ScheduleEntry>,
    events: Vec<SimEvent>,
}

impl Recorder {
    /// Records a context switch. Switching to the process that already holds
    /// the last entry continues its run and adds nothing.
    pub fn switch_to(&mut self, time: Ticks, pid: Pid) {
        if self.schedule.last().is_some_and(|last| last.pid == pid) {
            return;
        }
        self.schedule.push(ScheduleEntry { time, pid });
    }

    pub fn emit(&mut self, event: SimEvent) {
        log::trace!("{event:?}");
        self.events.push(event);
    }

    pub fn schedule(&self) -> &[ScheduleEntry] {
        &self.schedule
    }

    pub fn finish(
        self,
        policy: &'static str,
        stats: Vec<ProcessStats>,
        cpu_time: Ticks,
    ) -> Outcome {
        Outcome {
            policy,
            schedule: self.schedule,
            stats,
            events: self.events,
            cpu_time,
        }
    }
}

/// Result of one policy run.
#[derive(Debug, Clone)]
pub struct Outcome {
    pub policy: &'static str,
    pub schedule: Vec<ScheduleEntry>,
    /// One entry per input process, in input order.
    pub stats: Vec<ProcessStats>,
    pub events: Vec<SimEvent>,
    /// Units of work executed by the CPU.
    pub cpu_time: Ticks,
}

impl Outcome {
    pub fn total_waiting_time(&self) -> Ticks {
        self.stats.iter().map(|s| s.waited).sum()
    }

    /// Total waiting time over the process count, zero for an empty list.
    pub fn average_waiting_time(&self) -> f64 {
        if self.stats.is_empty() {
            return 0.0;
        }
        self.total_waiting_time() as f64 / self.stats.len() as f64
    }

    pub fn average_turnaround_time(&self) -> f64 {
        mean(self.stats.iter().filter_map(|s| s.turnaround()).map(|t| t as f64))
    }

    pub fn average_response_time(&self) -> f64 {
        mean(self.stats.iter().filter_map(|s| s.response()).map(|t| t as f64))
    }

    /// Time at which the last process completed.
    pub fn makespan(&self) -> Ticks {
        self.stats
            .iter()
            .filter_map(|s| s.completion)
            .max()
            .unwrap_or(0)
    }

    /// The schedule as `(time, pid)` pairs.
    pub fn switches(&self) -> Vec<(Ticks, Pid)> {
        self.schedule.iter().map(|e| (e.time, e.pid)).collect()
    }

    pub fn pids(&self) -> Vec<Pid> {
        self.schedule.iter().map(|entry| entry.pid).collect()
    }
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let mean: average::Mean = values.collect();
    if mean.is_empty() { 0.0 } else { mean.estimate() }
}

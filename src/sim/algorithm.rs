use std::fmt;

use crate::{
    core::{Outcome, Process, Ticks, simulate},
    error::Result,
    scheduler::{DEFAULT_ALPHA, DEFAULT_QUANTUM, RoundRobin, Sjf, Srtf, fcfs},
};

/// A scheduling policy together with its parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Algorithm {
    Fcfs,
    RoundRobin { quantum: Ticks },
    Srtf,
    Sjf { alpha: f64 },
}

impl Algorithm {
    /// The four policies with the given parameters, in report order.
    pub fn all(quantum: Ticks, alpha: f64) -> [Algorithm; 4] {
        [
            Self::Fcfs,
            Self::RoundRobin { quantum },
            Self::Srtf,
            Self::Sjf { alpha },
        ]
    }

    pub fn defaults() -> [Algorithm; 4] {
        Self::all(DEFAULT_QUANTUM, DEFAULT_ALPHA)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Fcfs => fcfs::NAME,
            Self::RoundRobin { .. } => "RR",
            Self::Srtf => "SRTF",
            Self::Sjf { .. } => "SJF",
        }
    }

    /// Rejects parameters no run could start with.
    pub fn validate(&self) -> Result<()> {
        match *self {
            Self::RoundRobin { quantum } => RoundRobin::new(quantum).map(drop),
            Self::Sjf { alpha } => Sjf::new(alpha).map(drop),
            Self::Fcfs | Self::Srtf => Ok(()),
        }
    }

    /// Simulates this policy over a private copy of `processes`.
    pub fn run(&self, processes: &[Process]) -> Result<Outcome> {
        self.validate()?;
        let outcome = match *self {
            Self::Fcfs => fcfs::schedule(processes)?,
            Self::RoundRobin { quantum } => simulate(processes, RoundRobin::new(quantum)?)?,
            Self::Srtf => simulate(processes, Srtf::new())?,
            Self::Sjf { alpha } => simulate(processes, Sjf::new(alpha)?)?,
        };
        log::debug!(
            "{self}: {} switches, average waiting time {:.2}",
            outcome.schedule.len(),
            outcome.average_waiting_time()
        );
        Ok(outcome)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RoundRobin { quantum } => write!(f, "RR(quantum={quantum})"),
            Self::Sjf { alpha } => write!(f, "SJF(alpha={alpha})"),
            other => f.write_str(other.name()),
        }
    }
}

/// Runs every algorithm over the same input. Parameters are all validated
/// before the first run.
pub fn run_all(algorithms: &[Algorithm], processes: &[Process]) -> Result<Vec<Outcome>> {
    for algorithm in algorithms {
        algorithm.validate()?;
    }
    algorithms
        .iter()
        .map(|algorithm| algorithm.run(processes))
        .collect()
}

use log::{LevelFilter, Metadata, Record};
use std::{fs::File, io::BufReader, process::ExitCode};

use sched_sim::{
    Error, Process,
    config::{Config, LOG_ENV},
    sim::{self, bernoulli_processes, read_processes, write_outcome_file},
};

/// Writes `[LEVEL] message` lines to stderr.
struct StderrLogger;

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn init_logger(level: LevelFilter) {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

fn main() -> ExitCode {
    let config = match Config::from_args(std::env::args().skip(1)) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };
    init_logger(config.log_level(std::env::var(LOG_ENV).ok().as_deref()));

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config) -> Result<(), Error> {
    let processes = load(config)?;
    for process in &processes {
        log::info!(
            "process {}: arrival {}, burst {}",
            process.id,
            process.arrival_time,
            process.burst_time
        );
    }

    let outcomes = sim::run_all(&config.algorithms(), &processes)?;
    for outcome in &outcomes {
        let path = write_outcome_file(&config.out_dir, outcome)?;
        log::info!(
            "{}: average waiting time {:.2}, turnaround {:.2}, response {:.2} -> {}",
            outcome.policy,
            outcome.average_waiting_time(),
            outcome.average_turnaround_time(),
            outcome.average_response_time(),
            path.display()
        );
    }
    Ok(())
}

fn load(config: &Config) -> Result<Vec<Process>, Error> {
    if let Some(generate) = config.generate {
        log::info!(
            "generating workload over {} ticks, seed {}",
            generate.ticks,
            generate.seed
        );
        return Ok(bernoulli_processes(generate.ticks, 0.3, 0.3, 2, 6, generate.seed));
    }

    log::info!("reading {}", config.input.display());
    let file = File::open(&config.input)?;
    read_processes(BufReader::new(file))
}

pub mod algorithm;
pub mod report;
pub mod workload;

pub use algorithm::{Algorithm, run_all};
pub use report::{render_outcome, write_outcome, write_outcome_file};
pub use workload::{bernoulli_processes, parse_processes, read_processes};

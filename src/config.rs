use log::LevelFilter;
use std::path::PathBuf;

use crate::{
    core::Ticks,
    error::{Error, Result},
    scheduler::{DEFAULT_ALPHA, DEFAULT_QUANTUM},
    sim::Algorithm,
};

pub const USAGE: &str = "usage: sched-sim [INPUT] [--out DIR] [--quantum N] [--alpha A] \
                         [--generate TICKS] [--seed S] [-v]...";

/// Environment variable consulted for the log level when no `-v` is given.
pub const LOG_ENV: &str = "SCHED_SIM_LOG";

/// Parameters of a random workload, used instead of the input file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Generate {
    pub ticks: Ticks,
    pub seed: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub input: PathBuf,
    pub out_dir: PathBuf,
    pub quantum: Ticks,
    pub alpha: f64,
    pub generate: Option<Generate>,
    pub verbosity: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: PathBuf::from("input.txt"),
            out_dir: PathBuf::from("."),
            quantum: DEFAULT_QUANTUM,
            alpha: DEFAULT_ALPHA,
            generate: None,
            verbosity: 0,
        }
    }
}

impl Config {
    /// Parses arguments, program name excluded.
    pub fn from_args<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut config = Self::default();
        let mut seed = 0;
        let mut ticks = None;
        let mut input = None;

        let mut args = args.into_iter().map(Into::into);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--out" | "-o" => config.out_dir = PathBuf::from(value(&arg, args.next())?),
                "--quantum" | "-q" => config.quantum = number(&arg, args.next())?,
                "--alpha" | "-a" => config.alpha = number(&arg, args.next())?,
                "--generate" | "-g" => ticks = Some(number(&arg, args.next())?),
                "--seed" | "-s" => seed = number(&arg, args.next())?,
                "-h" | "--help" => return Err(Error::Usage(USAGE.to_string())),
                flag if flag.starts_with("-v") && flag[1..].chars().all(|c| c == 'v') => {
                    config.verbosity = config.verbosity.saturating_add((flag.len() - 1) as u8);
                }
                flag if flag.starts_with('-') => {
                    return Err(Error::Usage(format!("unknown option {flag}\n{USAGE}")));
                }
                _ if input.is_some() => {
                    return Err(Error::Usage(format!("unexpected argument {arg}\n{USAGE}")));
                }
                _ => input = Some(PathBuf::from(&arg)),
            }
        }

        if let Some(path) = input {
            config.input = path;
        }
        config.generate = ticks.map(|ticks| Generate { ticks, seed });
        for algorithm in config.algorithms() {
            algorithm.validate()?;
        }
        Ok(config)
    }

    pub fn algorithms(&self) -> [Algorithm; 4] {
        Algorithm::all(self.quantum, self.alpha)
    }

    /// `-v` flags win over the environment; the default is `warn`.
    pub fn log_level(&self, env: Option<&str>) -> LevelFilter {
        match self.verbosity {
            0 => env
                .and_then(|level| level.parse().ok())
                .unwrap_or(LevelFilter::Warn),
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

fn value(flag: &str, value: Option<String>) -> Result<String> {
    value.ok_or_else(|| Error::Usage(format!("{flag} expects a value\n{USAGE}")))
}

fn number<T: std::str::FromStr>(flag: &str, raw: Option<String>) -> Result<T> {
    let raw = value(flag, raw)?;
    raw.parse()
        .map_err(|_| Error::Usage(format!("{flag}: cannot parse {raw:?}\n{USAGE}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_parameters() {
        let config = Config::from_args(Vec::<String>::new()).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.quantum, 2);
        assert_eq!(config.alpha, 0.5);
    }

    #[test]
    fn parses_all_options() {
        let config = Config::from_args([
            "procs.txt", "--out", "out", "-q", "4", "--alpha", "0.25", "-g", "100", "-s", "9",
            "-vv",
        ])
        .unwrap();

        assert_eq!(config.input, PathBuf::from("procs.txt"));
        assert_eq!(config.out_dir, PathBuf::from("out"));
        assert_eq!(config.quantum, 4);
        assert_eq!(config.alpha, 0.25);
        assert_eq!(config.generate, Some(Generate { ticks: 100, seed: 9 }));
        assert_eq!(config.log_level(None), LevelFilter::Debug);
    }

    #[test]
    fn invalid_policy_parameters_are_rejected() {
        assert!(matches!(
            Config::from_args(["--quantum", "0"]),
            Err(Error::InvalidQuantum(0))
        ));
        assert!(matches!(
            Config::from_args(["--alpha", "1.5"]),
            Err(Error::InvalidAlpha(_))
        ));
        assert!(matches!(Config::from_args(["--quantum"]), Err(Error::Usage(_))));
        assert!(matches!(Config::from_args(["--bogus"]), Err(Error::Usage(_))));
        assert!(matches!(Config::from_args(["a", "b"]), Err(Error::Usage(_))));
    }

    #[test]
    fn log_level_falls_back_to_environment() {
        let config = Config::default();
        assert_eq!(config.log_level(Some("debug")), LevelFilter::Debug);
        assert_eq!(config.log_level(Some("nonsense")), LevelFilter::Warn);
        assert_eq!(config.log_level(None), LevelFilter::Warn);
    }
}

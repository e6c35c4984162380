use rand::prelude::*;
use std::io::BufRead;

use crate::{
    core::{Process, Ticks},
    error::{Error, Result},
};

/// Reads `id arrival burst` records, one per line. Blank lines are skipped.
pub fn read_processes(reader: impl BufRead) -> Result<Vec<Process>> {
    let mut processes = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        processes.push(parse_record(index + 1, &line)?);
    }
    Ok(processes)
}

pub fn parse_processes(input: &str) -> Result<Vec<Process>> {
    read_processes(input.as_bytes())
}

fn parse_record(line: usize, record: &str) -> Result<Process> {
    let fields: Vec<&str> = record.split_whitespace().collect();
    let &[id, arrival, burst] = fields.as_slice() else {
        return Err(Error::MalformedRecord {
            line,
            fields: fields.len(),
        });
    };

    let number = |field: &str| {
        field.parse::<u64>().map_err(|_| Error::InvalidNumber {
            line,
            field: field.to_string(),
        })
    };
    Ok(Process::new(number(id)?, number(arrival)?, number(burst)?))
}

/// Random but reproducible workload: at each of `ticks` ticks a process
/// arrives with probability `p_arrival`, and is short with probability
/// `p_short`. Ids count up from 1 in arrival order.
pub fn bernoulli_processes(
    ticks: Ticks,
    p_arrival: f64,
    p_short: f64,
    short_burst: Ticks,
    long_burst: Ticks,
    seed: u64,
) -> Vec<Process> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut processes = Vec::new();

    for t in 0..ticks {
        if rng.random::<f64>() < p_arrival {
            let burst = if rng.random::<f64>() < p_short {
                short_burst
            } else {
                long_burst
            };
            processes.push(Process::new(processes.len() as u64 + 1, t, burst));
        }
    }

    processes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_records_and_skips_blank_lines() {
        let processes = parse_processes("0 0 9\n\n1 1 8\n  2 2 2  \n").unwrap();
        assert_eq!(
            processes,
            vec![
                Process::new(0, 0, 9),
                Process::new(1, 1, 8),
                Process::new(2, 2, 2)
            ]
        );
    }

    #[test]
    fn wrong_field_count_names_the_line() {
        let err = parse_processes("1 0 3\n2 1\n").unwrap_err();
        assert!(matches!(err, Error::MalformedRecord { line: 2, fields: 2 }));

        let err = parse_processes("1 0 3 4\n").unwrap_err();
        assert!(matches!(err, Error::MalformedRecord { line: 1, fields: 4 }));
    }

    #[test]
    fn negative_numbers_are_rejected() {
        let err = parse_processes("1 -2 3\n").unwrap_err();
        assert!(matches!(err, Error::InvalidNumber { line: 1, ref field } if field == "-2"));
    }

    #[test]
    fn generator_is_reproducible() {
        let a = bernoulli_processes(200, 0.3, 0.3, 2, 6, 7);
        let b = bernoulli_processes(200, 0.3, 0.3, 2, 6, 7);
        assert_eq!(a, b);
        assert!(!a.is_empty());
        assert!(a.windows(2).all(|w| w[0].arrival_time < w[1].arrival_time));
        assert!(a.iter().all(|p| p.burst_time == 2 || p.burst_time == 6));
    }
}

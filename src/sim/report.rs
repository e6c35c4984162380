use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::{core::Outcome, error::Result};

/// Writes one `(time, pid)` line per context switch followed by the average
/// waiting time rounded to two decimals.
pub fn write_outcome(mut out: impl Write, outcome: &Outcome) -> Result<()> {
    for entry in &outcome.schedule {
        writeln!(out, "{entry}")?;
    }
    writeln!(out, "average waiting time {:.2} ", outcome.average_waiting_time())?;
    out.flush()?;
    Ok(())
}

pub fn render_outcome(outcome: &Outcome) -> String {
    let mut buf = Vec::new();
    write_outcome(&mut buf, outcome).expect("writing to a Vec cannot fail");
    String::from_utf8_lossy(&buf).into_owned()
}

/// Writes `<dir>/<POLICY>.txt` and returns its path.
pub fn write_outcome_file(dir: &Path, outcome: &Outcome) -> Result<PathBuf> {
    let path = dir.join(format!("{}.txt", outcome.policy));
    let file = File::create(&path)?;
    write_outcome(BufWriter::new(file), outcome)?;
    Ok(path)
}

//! Flat CSV output: one latency per row, single unlabeled numeric column.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::BenchError;
use crate::sample::TimingSample;

/// Default result file name, encoding the run parameters. The optional
/// label distinguishes target servers (e.g. `HAPI`).
pub fn file_name(label: Option<&str>, workers: usize, requests: usize) -> String {
    match label {
        Some(label) => format!("benchmark_{label}_{workers}_{requests}.csv"),
        None => format!("benchmark_{workers}_{requests}.csv"),
    }
}

/// Create or overwrite `path` with one row per sample. Failed samples render
/// as `NaN`.
pub fn write_samples(path: &Path, samples: &[TimingSample]) -> Result<(), BenchError> {
    let write = |path: &Path| -> std::io::Result<()> {
        let mut out = BufWriter::new(File::create(path)?);
        for sample in samples {
            writeln!(out, "{}", sample.seconds())?;
        }
        out.flush()
    };
    write(path).map_err(|source| BenchError::Write {
        path: path.display().to_string(),
        source,
    })
}

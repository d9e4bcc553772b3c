//! Plain-text histogram and mode list formats
//!
//! Histograms are whitespace or newline separated numbers, one token per bin.
//! Mode lists are written one interval per line as `start end`.

use crate::types::{Histogram, Interval};
use acontrario_core::Result;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tracing::debug;

/// Read a histogram from whitespace-separated numeric tokens
///
/// Reading stops at the first token that is not a number; the bins read so
/// far form the histogram, which is then validated.
pub fn read_histogram<R: BufRead>(reader: R) -> Result<Histogram> {
    let mut counts = Vec::new();
    'lines: for line in reader.lines() {
        let line = line?;
        for token in line.split_whitespace() {
            match token.parse::<f64>() {
                Ok(value) => counts.push(value),
                Err(_) => {
                    debug!("stopping at non-numeric token {token:?} after {} bins", counts.len());
                    break 'lines;
                }
            }
        }
    }

    debug!("read {} histogram bins", counts.len());
    Histogram::new(counts)
}

/// Read a histogram from a text file
pub fn read_histogram_file<P: AsRef<Path>>(path: P) -> Result<Histogram> {
    let file = File::open(path.as_ref())?;
    read_histogram(BufReader::new(file))
}

/// Write intervals as `start end` lines, in the given order
pub fn write_modes<W: Write>(mut writer: W, modes: &[Interval]) -> Result<()> {
    for mode in modes {
        writeln!(writer, "{} {}", mode.start, mode.end)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write intervals to a text file, replacing any previous content
pub fn write_modes_file<P: AsRef<Path>>(path: P, modes: &[Interval]) -> Result<()> {
    let file = File::create(path.as_ref())?;
    write_modes(BufWriter::new(file), modes)
}

//! Interactive dataset prompt.

use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::Result;

use crate::curator::{Curator, validate_dataset_dir};
use crate::report::write_report;

const PROMPT: &str = "Enter path to dataset directory (or press Enter to quit): ";

/// Repeatedly asks for a dataset directory and curates it.
///
/// Stops on empty input or end of input. Invalid paths are reported and the
/// loop asks again. Returns the number of directories curated.
///
/// # Errors
///
/// Returns an error only when reading input or writing output fails.
pub fn run_interactive<R, W>(mut input: R, out: &mut W, curator: &Curator) -> Result<usize>
where
    R: BufRead,
    W: Write,
{
    writeln!(out, "Pokemon Dataset Curator")?;
    writeln!(out, "{}", "-".repeat(50))?;

    let mut runs = 0;
    loop {
        write!(out, "\n{PROMPT}")?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            break;
        }
        let dataset_dir = line.trim();
        if dataset_dir.is_empty() {
            writeln!(out, "Exiting.")?;
            break;
        }

        let path = Path::new(dataset_dir);
        if let Err(e) = validate_dataset_dir(path) {
            writeln!(out, "Error: {e}")?;
            continue;
        }

        match curator.curate(path) {
            Ok(report) => {
                if report.folders_found > 0 {
                    writeln!(out, "Found {} dataset folders.", report.folders_found)?;
                }
                write_report(out, &report)?;
                runs += 1;
            }
            Err(e) => writeln!(out, "Error: {e}")?,
        }
    }

    Ok(runs)
}

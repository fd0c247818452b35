//! Curation run summary and its terminal rendering.

use std::fmt;
use std::io::{self, Write};
use std::path::PathBuf;

// ANSI color codes for terminal output
const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

/// Why a folder was left untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The folder name follows no recognized convention.
    UnrecognizedFormat,
    /// The name validator does not know the subject.
    UnknownName,
    /// The folder was a candidate but could not be read.
    Failed(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::UnrecognizedFormat => f.write_str("unrecognized format"),
            SkipReason::UnknownName => f.write_str("name not in database"),
            SkipReason::Failed(message) => write!(f, "failed: {message}"),
        }
    }
}

/// A folder that was not curated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnprocessedFolder {
    pub name: String,
    pub reason: SkipReason,
}

/// A tag file that could not be rewritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFailure {
    pub path: PathBuf,
    pub error: String,
}

/// A folder rename that was applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rename {
    pub from: String,
    pub to: String,
}

/// Outcome of one curation pass over a dataset directory.
#[derive(Debug, Default)]
pub struct CurationReport {
    pub folders_found: usize,
    /// Candidate folders whose tag files were processed.
    pub curated: usize,
    pub renamed: Vec<Rename>,
    pub files_processed: usize,
    /// Files whose content actually changed.
    pub files_rewritten: usize,
    pub unprocessed: Vec<UnprocessedFolder>,
    pub file_failures: Vec<FileFailure>,
    pub warnings: Vec<String>,
}

impl CurationReport {
    /// True when every folder was curated and no file failed.
    pub fn is_clean(&self) -> bool {
        self.unprocessed.is_empty() && self.file_failures.is_empty()
    }

    pub(crate) fn skip(&mut self, name: impl Into<String>, reason: SkipReason) {
        self.unprocessed.push(UnprocessedFolder {
            name: name.into(),
            reason,
        });
    }
}

/// Writes the human-readable summary of a run.
pub fn write_report<W: Write>(out: &mut W, report: &CurationReport) -> io::Result<()> {
    if report.folders_found == 0 {
        writeln!(out, "No folders found in the specified directory.")?;
        return Ok(());
    }

    writeln!(out)?;
    writeln!(out, "{BOLD}Curation Complete{RESET}")?;
    writeln!(out, "  Folders:   {:>6} found", report.folders_found)?;
    writeln!(
        out,
        "  Curated:   {}{:>6}{}",
        GREEN, report.curated, RESET
    )?;
    writeln!(out, "  Renamed:   {:>6}", report.renamed.len())?;
    writeln!(
        out,
        "  Files:     {:>6} processed {DIM}({} rewritten){RESET}",
        report.files_processed, report.files_rewritten
    )?;

    for rename in &report.renamed {
        writeln!(out, "  {DIM}{} -> {}{RESET}", rename.from, rename.to)?;
    }

    if !report.warnings.is_empty() {
        writeln!(out)?;
        writeln!(out, "{YELLOW}Warnings ({}){RESET}:", report.warnings.len())?;
        for warning in &report.warnings {
            writeln!(out, "  - {warning}")?;
        }
    }

    if !report.file_failures.is_empty() {
        writeln!(out)?;
        writeln!(
            out,
            "{RED}File errors ({}){RESET}:",
            report.file_failures.len()
        )?;
        for failure in &report.file_failures {
            writeln!(out, "  - {}: {}", failure.path.display(), failure.error)?;
        }
    }

    writeln!(out)?;
    if report.unprocessed.is_empty() {
        writeln!(out, "{GREEN}All folders processed successfully.{RESET}")?;
    } else {
        writeln!(
            out,
            "{YELLOW}{} unprocessed folder(s):{RESET}",
            report.unprocessed.len()
        )?;
        for folder in &report.unprocessed {
            writeln!(out, "Could not process: {} ({})", folder.name, folder.reason)?;
        }
    }

    Ok(())
}

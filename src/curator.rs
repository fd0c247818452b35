//! Dataset directory curation.
//!
//! A pass over a dataset directory:
//! - classifies every immediate subfolder and validates its subject name
//! - renames candidate folders to their canonical name
//! - rewrites every `.txt` caption file inside each candidate folder
//!
//! Folders and files are handled one at a time in name order. Per-folder and
//! per-file failures are recorded in the [`CurationReport`] and never stop
//! the pass. Running two passes over the same directory concurrently is not
//! supported: renames and overwrites would race.

use std::collections::HashMap;
use std::fs;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::canonical::{canonical_folder_name, should_rename};
use crate::classifier::classify;
use crate::config::AbsorbSet;
use crate::models::SubjectName;
use crate::pokedex::NameValidator;
use crate::report::{CurationReport, FileFailure, Rename, SkipReason};
use crate::tags::TagProcessor;

/// Extension of caption files, compared case-sensitively.
pub const TAG_FILE_EXTENSION: &str = "txt";

/// Errors that stop a curation pass before any folder is touched.
#[derive(Debug, Error)]
pub enum CurateError {
    /// The dataset path does not exist.
    #[error("Directory '{}' does not exist.", .0.display())]
    NotFound(PathBuf),

    /// The dataset path exists but is not a directory.
    #[error("'{}' is not a directory.", .0.display())]
    NotADirectory(PathBuf),

    /// The dataset directory listing could not be read.
    #[error("Failed to read directory '{}': {source}", .path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl CurateError {
    /// True for errors caused by the path the user typed.
    pub fn is_user_error(&self) -> bool {
        matches!(self, CurateError::NotFound(_) | CurateError::NotADirectory(_))
    }
}

/// Checks that `path` names an existing directory.
///
/// # Errors
///
/// Returns [`CurateError::NotFound`] or [`CurateError::NotADirectory`].
pub fn validate_dataset_dir(path: &Path) -> Result<(), CurateError> {
    if !path.exists() {
        return Err(CurateError::NotFound(path.to_path_buf()));
    }
    if !path.is_dir() {
        return Err(CurateError::NotADirectory(path.to_path_buf()));
    }
    Ok(())
}

/// Builder for constructing [`Curator`] instances.
///
/// # Examples
///
/// ```
/// use citron::{AbsorbSet, CuratorBuilder};
///
/// let curator = CuratorBuilder::new()
///     .absorb(AbsorbSet::from_tags(["no humans"]))
///     .validator(|name: &str| name == "Pikachu")
///     .progress(false)
///     .build();
/// ```
#[derive(Default)]
pub struct CuratorBuilder {
    absorb: AbsorbSet,
    validator: Option<Box<dyn NameValidator>>,
    progress: bool,
}

impl CuratorBuilder {
    /// Creates a builder with an empty absorb set and progress bar disabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the tags dropped from every caption.
    pub fn absorb(mut self, absorb: AbsorbSet) -> Self {
        self.absorb = absorb;
        self
    }

    /// Sets the authority consulted for subject names.
    pub fn validator(mut self, validator: impl NameValidator + 'static) -> Self {
        self.validator = Some(Box::new(validator));
        self
    }

    /// Shows a folder progress bar while curating.
    pub fn progress(mut self, enabled: bool) -> Self {
        self.progress = enabled;
        self
    }

    /// Builds the `Curator`.
    ///
    /// # Panics
    ///
    /// Panics if `validator()` was not called before `build()`.
    pub fn build(self) -> Curator {
        Curator {
            absorb: self.absorb,
            validator: self
                .validator
                .expect("validator must be set via validator() method"),
            progress: self.progress,
        }
    }
}

/// A folder that passed classification and validation.
struct Candidate {
    path: PathBuf,
    name: String,
    subject: SubjectName,
}

/// Curates dataset directories.
pub struct Curator {
    absorb: AbsorbSet,
    validator: Box<dyn NameValidator>,
    progress: bool,
}

impl Curator {
    /// Runs one curation pass over `dir`.
    ///
    /// # Errors
    ///
    /// Fails only when `dir` is not a readable directory. Everything that goes
    /// wrong below that level is recorded in the returned report.
    pub fn curate(&self, dir: &Path) -> Result<CurationReport, CurateError> {
        validate_dataset_dir(dir)?;
        let folders = list_subfolders(dir)?;

        let mut report = CurationReport {
            folders_found: folders.len(),
            ..Default::default()
        };
        if folders.is_empty() {
            info!(dir = %dir.display(), "no folders found");
            return Ok(report);
        }
        info!(dir = %dir.display(), count = folders.len(), "found dataset folders");

        let candidates = self.select_candidates(folders, &mut report);
        let renames = rename_candidates(&candidates, &mut report);

        let bar = self.progress_bar(candidates.len());
        for candidate in candidates {
            let path = renames.get(&candidate.path).unwrap_or(&candidate.path);
            bar.set_message(candidate.name.clone());
            match self.curate_folder(path, &candidate.subject, &mut report) {
                Ok(()) => report.curated += 1,
                Err(e) => {
                    error!(folder = %path.display(), error = %e, "failed to process folder");
                    report.skip(candidate.name, SkipReason::Failed(e.to_string()));
                }
            }
            bar.inc(1);
        }
        bar.finish_and_clear();

        Ok(report)
    }

    fn select_candidates(
        &self,
        folders: Vec<PathBuf>,
        report: &mut CurationReport,
    ) -> Vec<Candidate> {
        let mut candidates = Vec::new();
        for path in folders {
            let name = folder_name(&path);
            match classify(&name) {
                None => {
                    debug!(folder = %name, "unrecognized folder format");
                    report.skip(name, SkipReason::UnrecognizedFormat);
                }
                Some(subject) if !self.validator.is_known(&subject.capitalized()) => {
                    debug!(folder = %name, subject = %subject, "subject not in database");
                    report.skip(name, SkipReason::UnknownName);
                }
                Some(subject) => candidates.push(Candidate {
                    path,
                    name,
                    subject,
                }),
            }
        }
        candidates
    }

    /// Rewrites every caption file directly inside `folder`.
    ///
    /// Only a failure to list the folder is returned; per-file failures are
    /// logged and recorded.
    fn curate_folder(
        &self,
        folder: &Path,
        subject: &SubjectName,
        report: &mut CurationReport,
    ) -> io::Result<()> {
        for file in list_tag_files(folder)? {
            match self.curate_file(&file, subject) {
                Ok(rewritten) => {
                    report.files_processed += 1;
                    if rewritten {
                        report.files_rewritten += 1;
                    }
                }
                Err(e) => {
                    let message = format!("{e:#}");
                    error!(file = %file.display(), error = %message, "failed to process tag file");
                    report.file_failures.push(FileFailure {
                        path: file,
                        error: message,
                    });
                }
            }
        }
        Ok(())
    }

    /// Processes one caption file, returning whether its content changed.
    fn curate_file(&self, path: &Path, subject: &SubjectName) -> Result<bool> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let processed = TagProcessor::process_tags(raw.trim(), subject, &self.absorb);
        if processed == raw {
            return Ok(false);
        }
        fs::write(path, &processed)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(true)
    }

    /// Folder progress on stdout; hidden when disabled or stdout is not a
    /// terminal.
    fn progress_bar(&self, len: usize) -> ProgressBar {
        if !self.progress || !io::stdout().is_terminal() {
            return ProgressBar::hidden();
        }
        let bar = ProgressBar::with_draw_target(Some(len as u64), ProgressDrawTarget::stdout());
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} folders {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        bar
    }
}

/// Renames candidates to their canonical names and returns old → new paths.
///
/// A rename whose target already exists is skipped with a warning and the
/// folder keeps its original path.
fn rename_candidates(
    candidates: &[Candidate],
    report: &mut CurationReport,
) -> HashMap<PathBuf, PathBuf> {
    let mut renames = HashMap::new();

    for candidate in candidates {
        if !should_rename(&candidate.name, &candidate.subject) {
            continue;
        }
        let target_name = canonical_folder_name(&candidate.subject);
        let target = candidate
            .path
            .parent()
            .map(|parent| parent.join(&target_name))
            .unwrap_or_else(|| PathBuf::from(&target_name));

        if target.exists() {
            let message = format!(
                "Cannot rename {} to {} - target already exists.",
                candidate.name, target_name
            );
            warn!(folder = %candidate.name, target = %target_name, "rename target already exists");
            report.warnings.push(message);
            continue;
        }

        match fs::rename(&candidate.path, &target) {
            Ok(()) => {
                info!(from = %candidate.name, to = %target_name, "renamed folder");
                report.renamed.push(Rename {
                    from: candidate.name.clone(),
                    to: target_name,
                });
                renames.insert(candidate.path.clone(), target);
            }
            Err(e) => {
                warn!(folder = %candidate.name, error = %e, "failed to rename folder");
                report
                    .warnings
                    .push(format!("Error renaming {}: {e}", candidate.name));
            }
        }
    }

    renames
}

/// Lists immediate subdirectories of `dir`, sorted by name.
fn list_subfolders(dir: &Path) -> Result<Vec<PathBuf>, CurateError> {
    let entries = fs::read_dir(dir).map_err(|source| CurateError::ReadDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut folders = Vec::new();
    for entry in entries {
        match entry {
            Ok(entry) if entry.path().is_dir() => folders.push(entry.path()),
            Ok(_) => {}
            Err(e) => warn!(dir = %dir.display(), error = %e, "skipping unreadable entry"),
        }
    }
    folders.sort();
    Ok(folders)
}

/// Lists `.txt` files directly inside `folder`, sorted by name.
///
/// Only a failure to open `folder` is returned; unreadable entries are
/// logged and skipped.
fn list_tag_files(folder: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(folder)? {
        match entry {
            Ok(entry) if is_tag_file(&entry.path()) => files.push(entry.path()),
            Ok(_) => {}
            Err(e) => warn!(folder = %folder.display(), error = %e, "skipping unreadable entry"),
        }
    }
    files.sort();
    Ok(files)
}

/// Regular file with the exact `.txt` extension.
fn is_tag_file(path: &Path) -> bool {
    path.is_file() && path.extension().and_then(|ext| ext.to_str()) == Some(TAG_FILE_EXTENSION)
}

fn folder_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

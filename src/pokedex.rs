//! Reference name database used to validate dataset subjects.
//!
//! The curator only needs a yes/no answer per name, expressed by the
//! [`NameValidator`] trait. [`Pokedex`] is the SQLite-backed implementation
//! the CLI uses; tests usually pass a closure instead.

mod schema;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rusqlite::Connection;
use tracing::{debug, warn};

use schema::POKEDEX_SCHEMA;

/// Environment variable overriding the database location.
pub const POKEDEX_ENV_VAR: &str = "CITRON_POKEDEX";

/// Answers whether a capitalized subject name is a known entry.
pub trait NameValidator {
    fn is_known(&self, name: &str) -> bool;
}

impl<F> NameValidator for F
where
    F: Fn(&str) -> bool,
{
    fn is_known(&self, name: &str) -> bool {
        self(name)
    }
}

/// SQLite table of known subject names.
///
/// Names are stored as given and matched case-insensitively.
///
/// # Examples
///
/// ```
/// use citron::pokedex::{NameValidator, Pokedex};
///
/// # fn main() -> anyhow::Result<()> {
/// let dex = Pokedex::in_memory()?;
/// dex.insert("Pikachu")?;
/// assert!(dex.is_known("pikachu"));
/// assert!(!dex.is_known("Agumon"));
/// # Ok(())
/// # }
/// ```
pub struct Pokedex {
    conn: Connection,
}

impl Pokedex {
    /// Opens an in-memory database with the schema initialized.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let dex = Self { conn };
        dex.initialize_schema()?;
        Ok(dex)
    }

    /// Opens a file-based database, creating it if it does not exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open pokedex database: {}", path.display()))?;
        let dex = Self { conn };
        dex.initialize_schema()?;
        Ok(dex)
    }

    fn initialize_schema(&self) -> Result<()> {
        self.conn.execute_batch(POKEDEX_SCHEMA)?;
        Ok(())
    }

    /// Adds a name. Returns false when it was already present.
    pub fn insert(&self, name: &str) -> Result<bool> {
        let name = name.trim();
        if name.is_empty() {
            anyhow::bail!("Pokedex name cannot be empty");
        }
        let inserted = self.conn.execute(
            "INSERT OR IGNORE INTO species (name) VALUES (?1)",
            [name],
        )?;
        Ok(inserted > 0)
    }

    /// Adds many names in one transaction, returning how many were new.
    ///
    /// Blank names are skipped.
    pub fn import<I, S>(&self, names: I) -> Result<usize>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tx = self.conn.unchecked_transaction()?;
        let mut inserted = 0;
        {
            let mut stmt = tx.prepare("INSERT OR IGNORE INTO species (name) VALUES (?1)")?;
            for name in names {
                let name = name.as_ref().trim();
                if name.is_empty() {
                    continue;
                }
                inserted += stmt.execute([name])?;
            }
        }
        tx.commit()?;
        debug!(inserted, "imported pokedex names");
        Ok(inserted)
    }

    /// Imports a plain-text name list, one name per line.
    ///
    /// Lines starting with `#` are comments.
    pub fn import_file(&self, path: &Path) -> Result<usize> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read name list: {}", path.display()))?;
        let names = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.starts_with('#'));
        self.import(names)
    }

    /// Case-insensitive lookup.
    pub fn contains(&self, name: &str) -> Result<bool> {
        let exists = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM species WHERE name = ?1)",
            [name.trim()],
            |row| row.get(0),
        )?;
        Ok(exists)
    }

    /// Number of names stored.
    pub fn count(&self) -> Result<i64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM species", [], |row| row.get(0))?;
        Ok(count)
    }
}

impl NameValidator for Pokedex {
    fn is_known(&self, name: &str) -> bool {
        match self.contains(name) {
            Ok(found) => found,
            Err(e) => {
                warn!(name, error = %e, "pokedex lookup failed");
                false
            }
        }
    }
}

/// Gets the cross-platform database path.
///
/// Returns the path as `{data_dir}/citron/pokedex.db` where `data_dir` is:
/// - Linux: `~/.local/share`
/// - macOS: `~/Library/Application Support`
/// - Windows: `C:\Users\<user>\AppData\Roaming`
///
/// # Errors
///
/// Returns an error if the data directory cannot be determined.
pub fn default_pokedex_path() -> Result<PathBuf> {
    let data_dir =
        dirs::data_dir().ok_or_else(|| anyhow::anyhow!("Failed to determine data directory"))?;

    Ok(data_dir.join("citron").join("pokedex.db"))
}

/// Picks the database path: explicit path, then config, then
/// `CITRON_POKEDEX`, then [`default_pokedex_path`].
pub fn resolve_pokedex_path(
    explicit: Option<&Path>,
    configured: Option<&Path>,
) -> Result<PathBuf> {
    if let Some(path) = explicit.or(configured) {
        return Ok(path.to_path_buf());
    }
    match std::env::var(POKEDEX_ENV_VAR) {
        Ok(path) if !path.trim().is_empty() => Ok(PathBuf::from(path)),
        _ => default_pokedex_path(),
    }
}

/// Ensures the parent directory of the database file exists.
///
/// # Errors
///
/// Returns an error if directory creation fails.
pub fn ensure_parent_directory(db_path: &Path) -> Result<()> {
    if let Some(parent) = db_path.parent() {
        fs::create_dir_all(parent).with_context(|| {
            format!("Failed to create database directory: {}", parent.display())
        })?;
    }
    Ok(())
}

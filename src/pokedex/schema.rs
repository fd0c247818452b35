/// Schema for the reference name table.
///
/// Uses CREATE TABLE IF NOT EXISTS for idempotent execution.
pub const POKEDEX_SCHEMA: &str = r#"
-- Known subject names (case-insensitive)
CREATE TABLE IF NOT EXISTS species (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL UNIQUE COLLATE NOCASE
);
"#;

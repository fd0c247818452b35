use std::fmt;

use serde::{Deserialize, Serialize};

use super::SubjectName;

/// Naming convention a dataset folder was recognized under.
///
/// Variants are listed in the priority order the classifier tries them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FolderFormat {
    /// `<name>Pokedex_IXL`, the canonical shape.
    PokedexSuffix,
    /// `<name>_(pokemon)`
    ParenthesizedSuffix,
    /// `<name>_pokemon`
    PlainSuffix,
    /// A bare `<name>` with no suffix.
    BareName,
}

impl fmt::Display for FolderFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FolderFormat::PokedexSuffix => "pokedex suffix",
            FolderFormat::ParenthesizedSuffix => "parenthesized suffix",
            FolderFormat::PlainSuffix => "plain suffix",
            FolderFormat::BareName => "bare name",
        };
        f.write_str(label)
    }
}

/// A folder name the classifier recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedFolder {
    pub raw: String,
    pub format: FolderFormat,
    pub subject: SubjectName,
}

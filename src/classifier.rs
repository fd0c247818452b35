//! Folder-name classification.
//!
//! A dataset folder is recognized when its name follows one of four naming
//! conventions, tried in fixed priority order:
//!
//! 1. `<name>Pokedex_IXL` (suffix matched case-insensitively)
//! 2. `<name>_(pokemon)`
//! 3. `<name>_pokemon`
//! 4. a bare `<name>` that mentions neither `pokedex` nor `(pokemon)`
//!
//! `<name>` is one or more ASCII letters, digits, underscores or hyphens.
//! The extracted subject is always lowercase.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::{ClassifiedFolder, FolderFormat, SubjectName};

static POKEDEX_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z0-9_-]+)(?i:Pokedex_IXL)$").unwrap_or_else(|_| unreachable!())
});

static PARENTHESIZED_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z0-9_-]+)(?i:_\(pokemon\))$").unwrap_or_else(|_| unreachable!())
});

static PLAIN_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z0-9_-]+)(?i:_pokemon)$").unwrap_or_else(|_| unreachable!())
});

static BARE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").unwrap_or_else(|_| unreachable!()));

/// Extracts the lowercase subject name from a folder name.
///
/// Returns `None` when the name follows none of the recognized conventions.
///
/// # Examples
///
/// ```
/// use citron::classifier::classify;
///
/// assert_eq!(classify("PikachuPokedex_IXL").unwrap().as_str(), "pikachu");
/// assert_eq!(classify("eevee_(pokemon)").unwrap().as_str(), "eevee");
/// assert_eq!(classify("Mr-Mime").unwrap().as_str(), "mr-mime");
/// assert!(classify("pikachu (shiny)").is_none());
/// ```
#[must_use]
pub fn classify(folder_name: &str) -> Option<SubjectName> {
    classify_folder(folder_name).map(|folder| folder.subject)
}

/// Like [`classify`], but also reports which convention matched.
#[must_use]
pub fn classify_folder(folder_name: &str) -> Option<ClassifiedFolder> {
    let suffixed = [
        (&*POKEDEX_SUFFIX, FolderFormat::PokedexSuffix),
        (&*PARENTHESIZED_SUFFIX, FolderFormat::ParenthesizedSuffix),
        (&*PLAIN_SUFFIX, FolderFormat::PlainSuffix),
    ];

    for (pattern, format) in suffixed {
        if let Some(name) = pattern.captures(folder_name).and_then(|caps| caps.get(1)) {
            return Some(ClassifiedFolder {
                raw: folder_name.to_string(),
                format,
                subject: SubjectName::new(name.as_str()),
            });
        }
    }

    // The bare fallback must not swallow names that failed a stricter shape.
    let lowered = folder_name.to_lowercase();
    if BARE_NAME.is_match(folder_name)
        && !lowered.contains("pokedex")
        && !lowered.contains("(pokemon)")
    {
        return Some(ClassifiedFolder {
            raw: folder_name.to_string(),
            format: FolderFormat::BareName,
            subject: SubjectName::new(folder_name),
        });
    }

    None
}

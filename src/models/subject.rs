use std::fmt;

use serde::{Deserialize, Serialize};

/// Canonical identifier of a dataset subject, always stored lowercase.
///
/// Extracted from folder names by the classifier and used both for external
/// validation (in its capitalized form) and for building the trigger tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubjectName(String);

impl SubjectName {
    /// Creates a subject name, lowercasing the input.
    ///
    /// # Examples
    ///
    /// ```
    /// use citron::SubjectName;
    ///
    /// let name = SubjectName::new("Mr-Mime");
    /// assert_eq!(name.as_str(), "mr-mime");
    /// ```
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(name.as_ref().to_lowercase())
    }

    /// Returns the lowercase name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the name with only its first character uppercased.
    ///
    /// This is the form handed to the name validator.
    ///
    /// ```
    /// use citron::SubjectName;
    ///
    /// assert_eq!(SubjectName::new("mr-mime").capitalized(), "Mr-mime");
    /// ```
    pub fn capitalized(&self) -> String {
        capitalize_word(&self.0)
    }

    /// Splits the name into words on `_` and `-`.
    ///
    /// Consecutive separators yield empty words, which capitalize to nothing.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.0.split(['_', '-'])
    }

    /// Capitalizes every word and joins them with no separator.
    ///
    /// ```
    /// use citron::SubjectName;
    ///
    /// assert_eq!(SubjectName::new("tapu_koko").word_capitalized(), "TapuKoko");
    /// assert_eq!(SubjectName::new("mr-mime").word_capitalized(), "MrMime");
    /// ```
    pub fn word_capitalized(&self) -> String {
        self.words().map(capitalize_word).collect()
    }

    /// Returns the tag a booru-style caption uses to name this subject,
    /// `<name>_(pokemon)`.
    pub fn self_tag(&self) -> String {
        format!("{}_(pokemon)", self.0)
    }
}

impl fmt::Display for SubjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SubjectName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Uppercases the first character of `word` and lowercases the rest.
fn capitalize_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

//! Canonical folder names and trigger tags.

use crate::models::SubjectName;

/// Literal suffix of every canonical folder name.
pub const FOLDER_SUFFIX: &str = "Pokedex_IXL";

const TRIGGER_PREFIX: &str = "zz";
const TRIGGER_SUFFIX: &str = "C1tr0n";

/// Renders the standardized folder name for a subject.
///
/// # Examples
///
/// ```
/// use citron::SubjectName;
/// use citron::canonical::canonical_folder_name;
///
/// let name = SubjectName::new("mr-mime");
/// assert_eq!(canonical_folder_name(&name), "MrMimePokedex_IXL");
/// ```
#[must_use]
pub fn canonical_folder_name(subject: &SubjectName) -> String {
    format!("{}{FOLDER_SUFFIX}", subject.word_capitalized())
}

/// Returns true when `folder_name` differs from the canonical rendering.
///
/// The comparison is exact, so `snorlaxpokedex_ixl` still needs a rename.
#[must_use]
pub fn should_rename(folder_name: &str, subject: &SubjectName) -> bool {
    folder_name != canonical_folder_name(subject)
}

/// Builds the mixed-case trigger tag that marks a subject's captions.
///
/// ```
/// use citron::SubjectName;
/// use citron::canonical::trigger_tag;
///
/// assert_eq!(trigger_tag(&SubjectName::new("eevee")), "zzEeveeC1tr0n");
/// ```
#[must_use]
pub fn trigger_tag(subject: &SubjectName) -> String {
    format!(
        "{TRIGGER_PREFIX}{}{TRIGGER_SUFFIX}",
        subject.word_capitalized()
    )
}

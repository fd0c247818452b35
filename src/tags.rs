//! Caption tag-list processing.

use std::collections::HashSet;

use crate::canonical::trigger_tag;
use crate::config::AbsorbSet;
use crate::models::SubjectName;

/// Rewrites comma-separated caption tag lists.
///
/// All tags are lowercased, emptied entries and duplicates are dropped, and the
/// subject's mixed-case trigger tag is placed first unless the list already
/// carries it in some casing.
pub struct TagProcessor;

impl TagProcessor {
    /// Splits a tag line on commas, trimming and lowercasing each entry.
    ///
    /// Empty entries are dropped; order and duplicates are kept.
    ///
    /// # Examples
    ///
    /// ```
    /// use citron::TagProcessor;
    ///
    /// assert_eq!(TagProcessor::parse_tags(" Cute,, Collar ,"), vec!["cute", "collar"]);
    /// ```
    #[must_use]
    pub fn parse_tags(line: &str) -> Vec<String> {
        line.split(',')
            .map(|tag| tag.trim().to_lowercase())
            .filter(|tag| !tag.is_empty())
            .collect()
    }

    /// Produces the cleaned caption line for one file.
    ///
    /// # Processing rules
    ///
    /// - Splits on `,`, trims and lowercases every entry, drops empty ones
    /// - Drops the subject's own `<name>_(pokemon)` tag
    /// - Drops any tag in the absorb set
    /// - Deduplicates case-insensitively, keeping the first occurrence
    /// - Prepends the trigger tag (`zz<Name>C1tr0n`) unless an entry already
    ///   matches it case-insensitively; an existing trigger is lowercased like
    ///   every other tag and keeps its position
    /// - Joins with `", "`
    ///
    /// A freshly prepended trigger is lowercased by the next application, so
    /// the output is stable from the second application on.
    ///
    /// # Examples
    ///
    /// ```
    /// use citron::{AbsorbSet, SubjectName, TagProcessor};
    ///
    /// let out = TagProcessor::process_tags(
    ///     "Eevee_(pokemon), cute, Eevee_(pokemon), collar",
    ///     &SubjectName::new("eevee"),
    ///     &AbsorbSet::default(),
    /// );
    /// assert_eq!(out, "zzEeveeC1tr0n, cute, collar");
    /// ```
    #[must_use]
    pub fn process_tags(line: &str, subject: &SubjectName, absorb: &AbsorbSet) -> String {
        let trigger = trigger_tag(subject);
        let trigger_key = trigger.to_lowercase();
        let self_tag = subject.self_tag();

        let mut seen = HashSet::new();
        let mut tags: Vec<String> = Self::parse_tags(line)
            .into_iter()
            .filter(|tag| *tag != self_tag && !absorb.contains(tag))
            .filter(|tag| seen.insert(tag.clone()))
            .collect();

        if !seen.contains(&trigger_key) {
            tags.insert(0, trigger);
        }

        tags.join(", ")
    }
}

//! Aggregate figures over a set of entries.

use std::collections::HashMap;

use serde::Serialize;

use crate::domain::Entry;

/// Compact view of the most liked entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FavoriteEntry {
    pub title: String,
    pub author: String,
    pub likes: i64,
}

/// Author with the largest number of entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopAuthor {
    pub author: String,
    #[serde(rename = "blogs")]
    pub entries: usize,
}

/// Sum of likes across `entries`; zero when empty. Clamps at the `i64`
/// bounds instead of overflowing.
pub fn total_likes(entries: &[Entry]) -> i64 {
    entries
        .iter()
        .map(Entry::likes)
        .fold(0_i64, i64::saturating_add)
}

/// Entry with the most likes. The earliest one wins a tie.
///
/// # Examples
/// ```
/// use bloglist::domain::favorite_entry;
///
/// assert_eq!(favorite_entry(&[]), None);
/// ```
pub fn favorite_entry(entries: &[Entry]) -> Option<FavoriteEntry> {
    let mut best: Option<&Entry> = None;
    for entry in entries {
        if best.is_none_or(|current| entry.likes() > current.likes()) {
            best = Some(entry);
        }
    }
    best.map(|entry| FavoriteEntry {
        title: entry.title().to_owned(),
        author: entry.author().to_owned(),
        likes: entry.likes(),
    })
}

/// Author credited with the most entries. Ties go to whoever reached the
/// count first in input order.
pub fn most_entries(entries: &[Entry]) -> Option<TopAuthor> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut top: Option<(&str, usize)> = None;
    for entry in entries {
        let count = counts.entry(entry.author()).or_default();
        *count += 1;
        if top.is_none_or(|(_, best)| *count > best) {
            top = Some((entry.author(), *count));
        }
    }
    top.map(|(author, entries)| TopAuthor {
        author: author.to_owned(),
        entries,
    })
}

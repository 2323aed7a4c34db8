//! Directory matching ladder.
//!
//! Names are resolved against a snapshot by trying, in order: exact
//! equality, substring containment in either direction, and equality of the
//! first two characters. The first rung that produces a hit wins and ties
//! go to the earliest entry in snapshot order. There is no scoring.

use tracing::debug;

use crate::models::directory::{Business, DirectoryEntry};

/// Which rung of the ladder produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    Exact,
    Contains,
    Prefix,
}

/// A directory entry chosen for a query.
#[derive(Debug, PartialEq)]
pub struct DirectoryMatch<'a, E> {
    pub entry: &'a E,
    pub kind: MatchKind,
}

impl<E> Clone for DirectoryMatch<'_, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for DirectoryMatch<'_, E> {}

const PREFIX_CHARS: usize = 2;

/// Match a name against directory entries using the full ladder.
pub fn match_entry<'a, E: DirectoryEntry>(
    query: &str,
    entries: &'a [E],
) -> Option<DirectoryMatch<'a, E>> {
    match_with(query, entries, &[MatchKind::Exact, MatchKind::Contains, MatchKind::Prefix])
}

/// Resolve the business an order was placed for.
///
/// Each suffix candidate (in discovery order) is tried against the exact
/// and containment rungs. Without candidates, the whole text is checked
/// for a directory name it contains verbatim.
pub fn match_business<'a>(
    text: &str,
    candidates: &[String],
    businesses: &'a [Business],
) -> Option<DirectoryMatch<'a, Business>> {
    if candidates.is_empty() {
        return businesses
            .iter()
            .find(|b| !b.name().trim().is_empty() && text.contains(b.name().trim()))
            .map(|entry| DirectoryMatch {
                entry,
                kind: MatchKind::Contains,
            });
    }

    candidates
        .iter()
        .find_map(|c| match_with(c, businesses, &[MatchKind::Exact, MatchKind::Contains]))
}

fn match_with<'a, E: DirectoryEntry>(
    query: &str,
    entries: &'a [E],
    rungs: &[MatchKind],
) -> Option<DirectoryMatch<'a, E>> {
    let query = query.trim();
    if query.is_empty() {
        return None;
    }

    for &kind in rungs {
        let hit = entries.iter().find(|e| {
            let name = e.name().trim();
            !name.is_empty() && is_match(kind, query, name, e.aliases())
        });

        if let Some(entry) = hit {
            debug!(query, matched = entry.name(), ?kind, "directory match");
            return Some(DirectoryMatch { entry, kind });
        }
    }

    debug!(query, "no directory match");
    None
}

fn is_match(kind: MatchKind, query: &str, name: &str, aliases: &[String]) -> bool {
    match kind {
        MatchKind::Exact => name == query || aliases.iter().any(|a| a.trim() == query),
        MatchKind::Contains => name.contains(query) || query.contains(name),
        MatchKind::Prefix => {
            let head = |s: &str| s.chars().take(PREFIX_CHARS).collect::<String>();
            query.chars().count() >= PREFIX_CHARS
                && name.chars().count() >= PREFIX_CHARS
                && head(query) == head(name)
        }
    }
}

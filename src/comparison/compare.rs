use indexmap::IndexSet;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

use super::status::{ClassifiedEntry, ClassifiedList};
use crate::domain::AnimeId;
use crate::models::AnimeEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonCategory {
    BothSeen,
    OnlySeenByA,
    OnlySeenByB,
    BothPlanning,
}

impl ComparisonCategory {
    pub const ALL: [Self; 4] = [
        Self::BothSeen,
        Self::OnlySeenByA,
        Self::OnlySeenByB,
        Self::BothPlanning,
    ];

    /// Section heading shown above the category's titles.
    #[must_use]
    pub fn heading(self, user_a: &str, user_b: &str) -> String {
        match self {
            Self::BothSeen => "Anime You've Both Seen".to_string(),
            Self::OnlySeenByA => format!("Anime Only {user_a} Has Seen"),
            Self::OnlySeenByB => format!("Anime Only {user_b} Has Seen"),
            Self::BothPlanning => "Anime You Both Plan To Watch".to_string(),
        }
    }

    /// The same category seen from the other user's side.
    #[must_use]
    pub const fn swapped(self) -> Self {
        match self {
            Self::OnlySeenByA => Self::OnlySeenByB,
            Self::OnlySeenByB => Self::OnlySeenByA,
            other => other,
        }
    }
}

impl fmt::Display for ComparisonCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::BothSeen => "both_seen",
            Self::OnlySeenByA => "only_seen_by_a",
            Self::OnlySeenByB => "only_seen_by_b",
            Self::BothPlanning => "both_planning",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonResult {
    pub category: ComparisonCategory,
    pub entries: Vec<AnimeEntry>,
}

impl ComparisonResult {
    #[must_use]
    pub fn ids(&self) -> Vec<AnimeId> {
        self.entries.iter().map(|e| e.id).collect()
    }
}

fn id_set(
    entries: &[ClassifiedEntry],
    keep: impl Fn(&ClassifiedEntry) -> bool,
) -> IndexSet<AnimeId> {
    entries
        .iter()
        .filter(|&e| keep(e))
        .map(ClassifiedEntry::id)
        .collect()
}

fn resolve<'a>(
    lookup: &HashMap<AnimeId, &AnimeEntry>,
    ids: impl Iterator<Item = &'a AnimeId>,
) -> Vec<AnimeEntry> {
    ids.filter_map(|id| lookup.get(id).map(|&entry| entry.clone()))
        .collect()
}

/// Computes the non-empty comparison categories for two classified lists.
///
/// Categories come out in a fixed order (both seen, only A, only B, both
/// planning); ids inside a category follow the first list they were taken
/// from. Empty categories are omitted.
#[must_use]
pub fn compare(list_a: &ClassifiedList, list_b: &ClassifiedList) -> Vec<ComparisonResult> {
    let mut lookup: HashMap<AnimeId, &AnimeEntry> =
        HashMap::with_capacity(list_a.entries().len() + list_b.entries().len());
    for classified in list_a.entries().iter().chain(list_b.entries()) {
        lookup.insert(classified.id(), classified.entry());
    }

    let seen_a = id_set(list_a.entries(), ClassifiedEntry::is_seen);
    let seen_b = id_set(list_b.entries(), ClassifiedEntry::is_seen);

    let planning_a = id_set(list_a.entries(), ClassifiedEntry::is_planning);
    let planning_b = id_set(list_b.entries(), ClassifiedEntry::is_planning);

    [
        (
            ComparisonCategory::BothSeen,
            resolve(&lookup, seen_a.intersection(&seen_b)),
        ),
        (
            ComparisonCategory::OnlySeenByA,
            resolve(&lookup, seen_a.difference(&seen_b)),
        ),
        (
            ComparisonCategory::OnlySeenByB,
            resolve(&lookup, seen_b.difference(&seen_a)),
        ),
        (
            ComparisonCategory::BothPlanning,
            resolve(&lookup, planning_a.intersection(&planning_b)),
        ),
    ]
    .into_iter()
    .filter(|(_, entries)| !entries.is_empty())
    .map(|(category, entries)| ComparisonResult { category, entries })
    .collect()
}

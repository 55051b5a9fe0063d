use indexmap::IndexMap;
use indexmap::map::Entry;
use tracing::debug;

use crate::domain::AnimeId;
use crate::models::{AnimeEntry, UserList};

/// Collapses entries sharing an id, keeping the first occurrence in input order.
///
/// The same media shows up more than once when a user files it under a custom
/// list as well as its status list.
#[must_use]
pub fn normalize(entries: Vec<AnimeEntry>) -> Vec<AnimeEntry> {
    let mut by_id: IndexMap<AnimeId, AnimeEntry> = IndexMap::with_capacity(entries.len());

    for entry in entries {
        match by_id.entry(entry.id) {
            Entry::Occupied(_) => {
                debug!(anime_id = %entry.id, status = %entry.status, "Dropping duplicate entry");
            }
            Entry::Vacant(slot) => {
                slot.insert(entry);
            }
        }
    }

    by_id.into_values().collect()
}

/// [`normalize`] applied to a whole user list.
#[must_use]
pub fn normalize_list(list: UserList) -> UserList {
    let UserList {
        username,
        user_id,
        entries,
    } = list;

    UserList {
        username,
        user_id,
        entries: normalize(entries),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(entries: &[AnimeEntry]) -> Vec<i32> {
        entries.iter().map(|e| e.id.value()).collect()
    }

    #[test]
    fn test_first_occurrence_wins() {
        let entries = vec![
            AnimeEntry::new(5, "completed", "Mushishi"),
            AnimeEntry::new(5, "dropped", "Mushishi"),
        ];

        let normalized = normalize(entries);
        assert_eq!(normalized.len(), 1);
        assert_eq!(normalized[0].status, "completed");
    }

    #[test]
    fn test_preserves_first_seen_order() {
        let entries = vec![
            AnimeEntry::new(3, "CURRENT", "C"),
            AnimeEntry::new(1, "PLANNING", "A"),
            AnimeEntry::new(3, "COMPLETED", "C"),
            AnimeEntry::new(2, "PAUSED", "B"),
            AnimeEntry::new(1, "DROPPED", "A"),
        ];

        let normalized = normalize(entries);
        assert_eq!(ids(&normalized), vec![3, 1, 2]);
        assert_eq!(normalized[0].status, "CURRENT");
        assert_eq!(normalized[1].status, "PLANNING");
    }

    #[test]
    fn test_empty_input() {
        assert!(normalize(Vec::new()).is_empty());
    }

    #[test]
    fn test_normalize_list_keeps_identity() {
        let list = UserList::new(
            "alice",
            7,
            vec![
                AnimeEntry::new(1, "CURRENT", "A"),
                AnimeEntry::new(1, "CURRENT", "A"),
            ],
        );

        let normalized = normalize_list(list);
        assert_eq!(normalized.username, "alice");
        assert_eq!(normalized.user_id.value(), 7);
        assert_eq!(ids(&normalized.entries), vec![1]);
    }
}

use serde::{Serialize, Serializer};
use std::fmt;
use tracing::{debug_span, warn};

use crate::domain::{AnimeId, UserId};
use crate::models::{AnimeEntry, UserList};

/// A list status after case-folding.
///
/// AniList also knows `REPEATING`; it is not part of the recognized set and is
/// therefore reported as [`WatchStatus::Unrecognized`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum WatchStatus {
    Current,
    Completed,
    Dropped,
    Paused,
    Planning,
    Unrecognized(String),
}

impl WatchStatus {
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let status = raw.to_lowercase();
        match status.as_str() {
            "current" => Self::Current,
            "completed" => Self::Completed,
            "dropped" => Self::Dropped,
            "paused" => Self::Paused,
            "planning" => Self::Planning,
            _ => Self::Unrecognized(status),
        }
    }

    /// Whether the user has watched, or is watching, at least part of the title.
    #[must_use]
    pub const fn is_seen(&self) -> bool {
        matches!(
            self,
            Self::Current | Self::Completed | Self::Dropped | Self::Paused
        )
    }

    #[must_use]
    pub const fn is_planning(&self) -> bool {
        matches!(self, Self::Planning)
    }

    #[must_use]
    pub const fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Current => "current",
            Self::Completed => "completed",
            Self::Dropped => "dropped",
            Self::Paused => "paused",
            Self::Planning => "planning",
            Self::Unrecognized(raw) => raw,
        }
    }
}

impl fmt::Display for WatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for WatchStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

/// An entry whose status has been interpreted.
///
/// Only [`classify`] and [`classify_list`] build these, so the seen flag
/// always agrees with the parsed status.
///
/// ```compile_fail
/// use anidiff::comparison::{ClassifiedEntry, WatchStatus};
/// use anidiff::models::AnimeEntry;
///
/// let entry = ClassifiedEntry {
///     entry: AnimeEntry::new(1, "PLANNING", "X"),
///     watch_status: WatchStatus::Planning,
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedEntry {
    entry: AnimeEntry,
    watch_status: WatchStatus,
}

impl ClassifiedEntry {
    #[must_use]
    pub const fn id(&self) -> AnimeId {
        self.entry.id
    }

    #[must_use]
    pub const fn entry(&self) -> &AnimeEntry {
        &self.entry
    }

    #[must_use]
    pub const fn watch_status(&self) -> &WatchStatus {
        &self.watch_status
    }

    #[must_use]
    pub const fn is_seen(&self) -> bool {
        self.watch_status.is_seen()
    }

    #[must_use]
    pub const fn is_planning(&self) -> bool {
        self.watch_status.is_planning()
    }
}

/// An entry whose status matched neither the seen nor the planning set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusAnomaly {
    pub username: String,
    pub anime_id: AnimeId,
    pub status: String,
}

/// A user list in which every entry has been classified.
///
/// The only way to obtain one is [`classify_list`]:
///
/// ```compile_fail
/// use anidiff::comparison::ClassifiedList;
///
/// let list = ClassifiedList {
///     username: "alice".to_string(),
///     user_id: 1.into(),
///     entries: Vec::new(),
///     anomalies: Vec::new(),
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedList {
    username: String,
    user_id: UserId,
    entries: Vec<ClassifiedEntry>,
    anomalies: Vec<StatusAnomaly>,
}

impl ClassifiedList {
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    #[must_use]
    pub fn entries(&self) -> &[ClassifiedEntry] {
        &self.entries
    }

    #[must_use]
    pub fn anomalies(&self) -> &[StatusAnomaly] {
        &self.anomalies
    }

    #[must_use]
    pub fn into_anomalies(self) -> Vec<StatusAnomaly> {
        self.anomalies
    }
}

/// Parses an entry's status. Unknown statuses count as unseen and are
/// logged, they never abort processing.
#[must_use]
pub fn classify(entry: AnimeEntry) -> ClassifiedEntry {
    classify_for(None, entry)
}

fn classify_for(username: Option<&str>, entry: AnimeEntry) -> ClassifiedEntry {
    let watch_status = WatchStatus::parse(&entry.status);

    if let WatchStatus::Unrecognized(status) = &watch_status {
        warn!(
            event = "status_anomaly",
            username = %username.unwrap_or_default(),
            anime_id = %entry.id,
            status = %status,
            "Unrecognized list status, treating as unseen"
        );
        metrics::counter!("anidiff_status_anomalies_total").increment(1);
    }

    ClassifiedEntry {
        entry,
        watch_status,
    }
}

/// Classifies every entry of `list`, collecting anomalies alongside.
#[must_use]
pub fn classify_list(list: UserList) -> ClassifiedList {
    let span = debug_span!("classify", username = %list.username);
    let _guard = span.enter();

    let UserList {
        username,
        user_id,
        entries,
    } = list;

    let entries: Vec<ClassifiedEntry> = entries
        .into_iter()
        .map(|entry| classify_for(Some(&username), entry))
        .collect();

    let anomalies = entries
        .iter()
        .filter(|e| !e.watch_status.is_recognized())
        .map(|e| StatusAnomaly {
            username: username.clone(),
            anime_id: e.id(),
            status: e.watch_status.to_string(),
        })
        .collect();

    ClassifiedList {
        username,
        user_id,
        entries,
        anomalies,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_seen_statuses_any_case() {
        for status in ["Completed", "DROPPED", "paused", "Current", "COMPLETED", "current"] {
            let classified = classify(AnimeEntry::new(1, status, "X"));
            assert!(classified.is_seen(), "{status} should be seen");
            assert!(classified.watch_status().is_recognized());
        }
    }

    #[test]
    fn test_planning_is_unseen() {
        for status in ["planning", "PLANNING", "Planning"] {
            let classified = classify(AnimeEntry::new(1, status, "X"));
            assert!(!classified.is_seen());
            assert!(classified.is_planning());
        }
    }

    #[test]
    fn test_unrecognized_status_is_unseen_anomaly() {
        let classified = classify(AnimeEntry::new(1, "REPEATING", "X"));
        assert!(!classified.is_seen());
        assert!(!classified.is_planning());
        assert_eq!(
            *classified.watch_status(),
            WatchStatus::Unrecognized("repeating".to_string())
        );
    }

    #[test]
    fn test_classify_list_collects_anomalies() {
        let list = UserList::new(
            "bob",
            2,
            vec![
                AnimeEntry::new(1, "COMPLETED", "A"),
                AnimeEntry::new(2, "REPEATING", "B"),
                AnimeEntry::new(3, "", "C"),
            ],
        );

        let classified = classify_list(list);
        assert_eq!(classified.entries().len(), 3);
        assert_eq!(classified.anomalies().len(), 2);
        assert_eq!(classified.anomalies()[0].username, "bob");
        assert_eq!(classified.anomalies()[0].anime_id, AnimeId::new(2));
        assert_eq!(classified.anomalies()[0].status, "repeating");
        assert_eq!(classified.anomalies()[1].status, "");
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&WatchStatus::parse("PAUSED")).unwrap();
        assert_eq!(json, "\"paused\"");
    }

    #[test]
    fn test_seen_and_planning_never_overlap() {
        for status in ["COMPLETED", "current", "Dropped", "PAUSED", "planning", "REPEATING", ""] {
            let classified = classify(AnimeEntry::new(1, status, "X"));
            assert!(
                !(classified.is_seen() && classified.is_planning()),
                "{status} is both seen and planning"
            );
            assert_eq!(classified.is_seen(), classified.watch_status().is_seen());
        }
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_anomaly_warning_names_the_user_at_info_level() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::INFO)
            .finish();

        let list = UserList::new("carol", 3, vec![AnimeEntry::new(7, "REPEATING", "X")]);
        tracing::subscriber::with_default(subscriber, || {
            let _ = classify_list(list);
        });

        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("status_anomaly"), "{output}");
        assert!(output.contains("username=carol"), "{output}");
        assert!(output.contains("anime_id=7"), "{output}");
    }
}

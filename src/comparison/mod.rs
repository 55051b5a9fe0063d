//! The comparison engine: normalization, status classification and the
//! set comparison between two users' lists.
//!
//! Everything in here is synchronous and free of I/O. Lists are owned by a
//! single run and dropped afterwards.

pub mod compare;
pub mod normalize;
pub mod status;

pub use compare::{ComparisonCategory, ComparisonResult, compare};
pub use normalize::{normalize, normalize_list};
pub use status::{
    ClassifiedEntry, ClassifiedList, StatusAnomaly, WatchStatus, classify, classify_list,
};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::UserId;
use crate::models::UserList;

#[derive(Debug, Clone, Serialize)]
pub struct UserSummary {
    pub username: String,
    pub user_id: UserId,
    pub entry_count: usize,
}

impl From<&ClassifiedList> for UserSummary {
    fn from(list: &ClassifiedList) -> Self {
        Self {
            username: list.username().to_string(),
            user_id: list.user_id(),
            entry_count: list.entries().len(),
        }
    }
}

/// Outcome of one comparison run, ready for a presentation layer.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonReport {
    pub user_a: UserSummary,
    pub user_b: UserSummary,
    pub results: Vec<ComparisonResult>,
    pub anomalies: Vec<StatusAnomaly>,
    pub generated_at: DateTime<Utc>,
}

impl ComparisonReport {
    #[must_use]
    pub fn result(&self, category: ComparisonCategory) -> Option<&ComparisonResult> {
        self.results.iter().find(|r| r.category == category)
    }

    /// Heading for `category` with this report's usernames filled in.
    #[must_use]
    pub fn heading(&self, category: ComparisonCategory) -> String {
        category.heading(&self.user_a.username, &self.user_b.username)
    }
}

/// Normalizes and classifies both lists independently, then compares them.
#[must_use]
pub fn run_comparison(list_a: UserList, list_b: UserList) -> ComparisonReport {
    let classified_a = classify_list(normalize_list(list_a));
    let classified_b = classify_list(normalize_list(list_b));

    let results = compare(&classified_a, &classified_b);
    let user_a = UserSummary::from(&classified_a);
    let user_b = UserSummary::from(&classified_b);

    let mut anomalies = classified_a.into_anomalies();
    anomalies.extend(classified_b.into_anomalies());

    ComparisonReport {
        user_a,
        user_b,
        results,
        anomalies,
        generated_at: Utc::now(),
    }
}

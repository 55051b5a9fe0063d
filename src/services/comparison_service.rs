//! Orchestrates a comparison run: fetch both lists, then hand them to the
//! comparison engine.

use futures::future::try_join;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tracing::{info, instrument};

use crate::clients::{AnimeListSource, ClientError};
use crate::comparison::{ComparisonReport, run_comparison};
use crate::models::UserList;

/// Errors that stop a comparison run before the engine is invoked.
#[derive(Debug, Error)]
pub enum ComparisonError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Failed to load list for {username}: {source}")]
    Fetch {
        username: String,
        #[source]
        source: ClientError,
    },
}

impl ComparisonError {
    fn from_client(username: &str, err: ClientError) -> Self {
        if err.is_not_found() {
            Self::UserNotFound(username.to_string())
        } else {
            Self::Fetch {
                username: username.to_string(),
                source: err,
            }
        }
    }
}

#[derive(Clone)]
pub struct ComparisonService {
    source: Arc<dyn AnimeListSource>,
}

impl ComparisonService {
    #[must_use]
    pub fn new(source: Arc<dyn AnimeListSource>) -> Self {
        Self { source }
    }

    async fn load(&self, username: &str) -> Result<UserList, ComparisonError> {
        self.source
            .load_user(username)
            .await
            .map_err(|e| ComparisonError::from_client(username, e))
    }

    /// Loads both users concurrently and compares their lists.
    ///
    /// Either both lists load and a full report comes back, or the run fails
    /// with the first error.
    ///
    /// # Errors
    ///
    /// - [`ComparisonError::InvalidInput`] for a blank username
    /// - [`ComparisonError::UserNotFound`] when a username does not resolve
    /// - [`ComparisonError::Fetch`] on transport or GraphQL failures
    #[instrument(skip(self))]
    pub async fn compare_users(
        &self,
        user_a: &str,
        user_b: &str,
    ) -> Result<ComparisonReport, ComparisonError> {
        let user_a = user_a.trim();
        let user_b = user_b.trim();

        if user_a.is_empty() || user_b.is_empty() {
            return Err(ComparisonError::InvalidInput(
                "both usernames are required".to_string(),
            ));
        }

        let start = Instant::now();
        let (list_a, list_b) = try_join(self.load(user_a), self.load(user_b)).await?;

        let report = run_comparison(list_a, list_b);

        metrics::counter!("anidiff_comparisons_total").increment(1);
        info!(
            event = "comparison_finished",
            categories = report.results.len(),
            anomalies = report.anomalies.len(),
            duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
            "Comparison finished"
        );

        Ok(report)
    }
}

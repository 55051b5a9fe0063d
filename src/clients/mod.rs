//! Remote data sources for user anime lists.

pub mod anilist;

pub use anilist::AnilistClient;

use thiserror::Error;
use tracing::info;

use crate::domain::UserId;
use crate::models::{AnimeEntry, UserList};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("GraphQL error (HTTP {status}): {message}")]
    GraphQl { status: u16, message: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl ClientError {
    /// True when the error means the username does not exist, as opposed to a
    /// transport or service failure.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::UserNotFound(_))
    }
}

/// Anything that can turn a username into that user's anime list.
#[async_trait::async_trait]
pub trait AnimeListSource: Send + Sync {
    /// Resolves a username to its numeric user id.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::UserNotFound`] when no such user exists.
    async fn resolve_user(&self, username: &str) -> Result<UserId, ClientError>;

    /// Fetches every list entry of a user, in list order, duplicates included.
    async fn fetch_anime_list(&self, user_id: UserId) -> Result<Vec<AnimeEntry>, ClientError>;

    /// Resolves `username` and fetches the full list.
    async fn load_user(&self, username: &str) -> Result<UserList, ClientError> {
        let user_id = self.resolve_user(username).await?;
        let entries = self.fetch_anime_list(user_id).await?;

        info!(
            username = %username,
            user_id = %user_id,
            entries = entries.len(),
            "Loaded anime list"
        );

        Ok(UserList::new(username, user_id, entries))
    }
}

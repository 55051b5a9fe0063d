use serde::{Deserialize, Serialize};

use crate::domain::{AnimeId, UserId};

/// One row of a user's anime list as delivered by the remote service.
///
/// `status` is kept exactly as received (AniList sends `COMPLETED`,
/// `PLANNING`, ...); interpretation happens in the classifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimeEntry {
    pub id: AnimeId,
    pub status: String,
    pub title: String,
    pub image_url: String,
    pub image_color: Option<String>,
}

impl AnimeEntry {
    /// Minimal entry with no artwork, mostly useful when building lists by hand.
    pub fn new(
        id: impl Into<AnimeId>,
        status: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            status: status.into(),
            title: title.into(),
            image_url: String::new(),
            image_color: None,
        }
    }
}

/// A user's raw anime list for a single comparison run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserList {
    pub username: String,
    pub user_id: UserId,
    pub entries: Vec<AnimeEntry>,
}

impl UserList {
    pub fn new(
        username: impl Into<String>,
        user_id: impl Into<UserId>,
        entries: Vec<AnimeEntry>,
    ) -> Self {
        Self {
            username: username.into(),
            user_id: user_id.into(),
            entries,
        }
    }
}

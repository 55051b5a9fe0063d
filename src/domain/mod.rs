//! Domain primitives shared by the client, comparison engine and surfaces.
//!
//! AniList hands out plain integers for both media and users. The newtypes
//! below keep the two from being mixed up when a media id and a user id flow
//! through the same code path.

use serde::{Deserialize, Serialize};
use std::fmt;

/// AniList media identifier, the primary key of an anime entry.
///
/// # Examples
///
/// ```rust
/// use anidiff::domain::AnimeId;
///
/// let id = AnimeId::new(21);
/// assert_eq!(id.value(), 21);
/// assert_eq!(id.to_string(), "21");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct AnimeId(i32);

impl AnimeId {
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn value(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for AnimeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for AnimeId {
    fn from(id: i32) -> Self {
        Self::new(id)
    }
}

impl From<AnimeId> for i32 {
    fn from(id: AnimeId) -> Self {
        id.0
    }
}

/// AniList user identifier, resolved from a username.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct UserId(i32);

impl UserId {
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn value(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for UserId {
    fn from(id: i32) -> Self {
        Self::new(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_serialize_as_plain_integers() {
        let json = serde_json::to_string(&AnimeId::new(154_587)).unwrap();
        assert_eq!(json, "154587");

        let user: UserId = serde_json::from_str("42").unwrap();
        assert_eq!(user.value(), 42);
    }
}

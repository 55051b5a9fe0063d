use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use super::{AnimeListSource, ClientError};
use crate::config::AnilistConfig;
use crate::domain::{AnimeId, UserId};
use crate::models::AnimeEntry;

const USER_QUERY: &str = r"
    query ($name: String) {
        User(name: $name) {
            id
        }
    }
";

const LIST_QUERY: &str = r"
    query ($id: Int) {
        MediaListCollection(userId: $id, type: ANIME) {
            lists {
                name
                entries {
                    mediaId
                    status
                    media {
                        coverImage { medium color }
                        title { romaji }
                    }
                }
            }
        }
    }
";

#[derive(Serialize)]
struct GraphQLRequest<'a, V> {
    query: &'a str,
    variables: V,
}

#[derive(Serialize)]
struct NameVar<'a> {
    name: &'a str,
}

#[derive(Serialize)]
struct IdVar {
    id: i32,
}

#[derive(Deserialize)]
struct GraphQLResponse<T> {
    data: Option<T>,
    errors: Option<Vec<GraphQLError>>,
}

#[derive(Deserialize)]
struct GraphQLError {
    message: String,
}

#[derive(Deserialize)]
struct UserData {
    #[serde(rename = "User")]
    user: Option<UserNode>,
}

#[derive(Deserialize)]
struct UserNode {
    id: i32,
}

#[derive(Deserialize)]
struct ListData {
    #[serde(rename = "MediaListCollection")]
    collection: Option<MediaListCollection>,
}

#[derive(Deserialize)]
struct MediaListCollection {
    #[serde(default)]
    lists: Vec<MediaList>,
}

#[derive(Deserialize)]
struct MediaList {
    name: Option<String>,
    #[serde(default)]
    entries: Vec<MediaListEntry>,
}

#[derive(Deserialize)]
struct MediaListEntry {
    #[serde(rename = "mediaId")]
    media_id: i32,
    status: Option<String>,
    media: Option<Media>,
}

#[derive(Deserialize)]
struct Media {
    #[serde(rename = "coverImage")]
    cover_image: Option<CoverImage>,
    title: Option<Title>,
}

#[derive(Deserialize)]
struct CoverImage {
    medium: Option<String>,
    color: Option<String>,
}

#[derive(Deserialize)]
struct Title {
    romaji: Option<String>,
}

impl From<MediaListEntry> for AnimeEntry {
    fn from(entry: MediaListEntry) -> Self {
        let (title, cover) = entry
            .media
            .map(|m| (m.title.and_then(|t| t.romaji), m.cover_image))
            .unwrap_or_default();
        let (image_url, image_color) = cover
            .map(|c| (c.medium.unwrap_or_default(), c.color))
            .unwrap_or_default();

        Self {
            id: AnimeId::new(entry.media_id),
            status: entry.status.unwrap_or_default(),
            title: title.unwrap_or_default(),
            image_url,
            image_color,
        }
    }
}

/// Client for the public AniList GraphQL endpoint.
#[derive(Clone)]
pub struct AnilistClient {
    client: Client,
    api_url: String,
}

impl AnilistClient {
    /// Fails when the HTTP client cannot be built, e.g. for a user agent that
    /// is not a valid header value.
    pub fn new(config: &AnilistConfig) -> Result<Self, ClientError> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
        })
    }

    async fn query<V, T>(&self, query: &str, variables: V) -> Result<T, ClientError>
    where
        V: Serialize + Send,
        T: DeserializeOwned + Send,
    {
        let request_body = GraphQLRequest { query, variables };

        let response = self
            .client
            .post(&self.api_url)
            .header("Accept", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        let body: GraphQLResponse<T> = response.json().await?;

        if let Some(errors) = body.errors.filter(|e| !e.is_empty()) {
            let message = errors
                .into_iter()
                .map(|e| e.message)
                .collect::<Vec<_>>()
                .join("; ");
            warn!(status = status.as_u16(), error = %message, "AniList returned GraphQL errors");
            return Err(ClientError::GraphQl {
                status: status.as_u16(),
                message,
            });
        }

        if !status.is_success() {
            return Err(ClientError::GraphQl {
                status: status.as_u16(),
                message: status.to_string(),
            });
        }

        body.data
            .ok_or_else(|| ClientError::MalformedResponse("response has no data".to_string()))
    }
}

#[async_trait::async_trait]
impl AnimeListSource for AnilistClient {
    async fn resolve_user(&self, username: &str) -> Result<UserId, ClientError> {
        let data: UserData = match self.query(USER_QUERY, NameVar { name: username }).await {
            Ok(data) => data,
            Err(ClientError::GraphQl { status: 404, .. }) => {
                return Err(ClientError::UserNotFound(username.to_string()));
            }
            Err(e) => return Err(e),
        };

        data.user
            .map(|u| UserId::new(u.id))
            .ok_or_else(|| ClientError::UserNotFound(username.to_string()))
    }

    async fn fetch_anime_list(&self, user_id: UserId) -> Result<Vec<AnimeEntry>, ClientError> {
        let data: ListData = self
            .query(
                LIST_QUERY,
                IdVar {
                    id: user_id.value(),
                },
            )
            .await?;

        let lists = data.collection.map(|c| c.lists).unwrap_or_default();

        let mut entries = Vec::new();
        for list in lists {
            debug!(
                user_id = %user_id,
                list = list.name.as_deref().unwrap_or("?"),
                entries = list.entries.len(),
                "Flattening list"
            );
            entries.extend(list.entries.into_iter().map(AnimeEntry::from));
        }

        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_response_flattens_in_order() {
        let json = r##"{
            "data": {
                "MediaListCollection": {
                    "lists": [
                        {
                            "name": "Completed",
                            "entries": [
                                {
                                    "mediaId": 1,
                                    "status": "COMPLETED",
                                    "media": {
                                        "coverImage": { "medium": "https://img/1.jpg", "color": "#e4a15d" },
                                        "title": { "romaji": "Cowboy Bebop" }
                                    }
                                }
                            ]
                        },
                        {
                            "name": "Favourites",
                            "entries": [
                                {
                                    "mediaId": 1,
                                    "status": "COMPLETED",
                                    "media": {
                                        "coverImage": { "medium": "https://img/1.jpg", "color": null },
                                        "title": { "romaji": "Cowboy Bebop" }
                                    }
                                },
                                { "mediaId": 2, "status": "PLANNING", "media": null }
                            ]
                        }
                    ]
                }
            }
        }"##;

        let response: GraphQLResponse<ListData> = serde_json::from_str(json).unwrap();
        let entries: Vec<AnimeEntry> = response
            .data
            .and_then(|d| d.collection)
            .unwrap()
            .lists
            .into_iter()
            .flat_map(|l| l.entries)
            .map(AnimeEntry::from)
            .collect();

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].title, "Cowboy Bebop");
        assert_eq!(entries[0].image_url, "https://img/1.jpg");
        assert_eq!(entries[0].image_color.as_deref(), Some("#e4a15d"));
        assert_eq!(entries[1].image_color, None);
        assert_eq!(entries[2].id, AnimeId::new(2));
        assert_eq!(entries[2].status, "PLANNING");
        assert!(entries[2].title.is_empty());
    }

    #[test]
    fn test_user_not_found_payload() {
        let json = r#"{
            "errors": [{ "message": "Not Found.", "status": 404 }],
            "data": { "User": null }
        }"#;

        let response: GraphQLResponse<UserData> = serde_json::from_str(json).unwrap();
        assert_eq!(response.errors.unwrap()[0].message, "Not Found.");
        assert!(response.data.unwrap().user.is_none());
    }

    #[test]
    fn test_client_builds_from_default_config() {
        assert!(AnilistClient::new(&AnilistConfig::default()).is_ok());
    }

    #[test]
    fn test_invalid_user_agent_is_an_error() {
        let config = AnilistConfig {
            user_agent: "AniDiff\n1.0".to_string(),
            ..AnilistConfig::default()
        };

        let result = AnilistClient::new(&config);
        assert!(matches!(result, Err(ClientError::Http(_))));
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A post as returned by the feed and detail endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: u64,
    pub user_id: u64,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    /// Absent in some create responses; normalized to empty.
    #[serde(default)]
    pub images: Vec<PostImage>,
    #[serde(default)]
    pub user: Option<PostAuthor>,
}

/// Image attachment embedded in a post.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PostImage {
    pub id: u64,
    pub url: String,
    #[serde(default)]
    pub original_name: Option<String>,
}

/// Author summary embedded in a post.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PostAuthor {
    pub id: u64,
    pub nickname: String,
    #[serde(default)]
    pub profile_image: Option<String>,
}

/// Payload for `POST /posts`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_ids: Option<Vec<u64>>,
}

/// Partial update for `PATCH /posts/:id`. `None` fields are omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_ids: Option<Vec<u64>>,
}

/// One page of the feed, normalized regardless of which of the four wire
/// shapes the backend used (see [`crate::envelope::decode_posts_page`]).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PostsPage {
    pub data: Vec<Post>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
}

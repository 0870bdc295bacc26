use mosaic_core::entities::{Ack, CreatePostRequest, Post, PostsPage, UpdatePostRequest};
use mosaic_core::envelope::{decode_posts_page, unwrap_envelope};
use mosaic_core::{validate, ApiError};

use crate::endpoints;
use crate::http::{ApiClient, RequestSpec};

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 10;

/// Client for the `/posts` endpoints.
#[derive(Clone)]
pub struct PostsApi {
    client: ApiClient,
}

impl PostsApi {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// `GET /posts?page&limit&userId` — one page of the feed.
    ///
    /// `page` defaults to 1, `limit` to 10; `user_id` filters to one author.
    ///
    /// # Errors
    ///
    /// Any transport/application error; `ResponseFormat` if the body matches
    /// none of the known list shapes.
    pub async fn list(
        &self,
        page: Option<u32>,
        limit: Option<u32>,
        user_id: Option<u64>,
    ) -> Result<PostsPage, ApiError> {
        let page = page.unwrap_or(DEFAULT_PAGE);
        let limit = limit.unwrap_or(DEFAULT_LIMIT);

        let mut spec = RequestSpec::get(endpoints::POSTS)
            .with_query("page", page)
            .with_query("limit", limit);
        if let Some(user_id) = user_id {
            spec = spec.with_query("userId", user_id);
        }

        let value = self.client.send(spec).await?;
        decode_posts_page(value, page, limit)
    }

    /// `GET /posts/:id`.
    ///
    /// # Errors
    ///
    /// Any transport/application error.
    pub async fn get(&self, id: u64) -> Result<Post, ApiError> {
        let value = self
            .client
            .send(RequestSpec::get(endpoints::post_by_id(id)))
            .await?;
        unwrap_envelope(value)
    }

    /// `POST /posts`.
    ///
    /// # Errors
    ///
    /// `ApiError::Validation` for a blank title/content or too many images,
    /// before any network call; otherwise any transport/application error.
    pub async fn create(&self, title: &str, content: &str, image_ids: &[u64]) -> Result<Post, ApiError> {
        validate::post_input(title, content, image_ids.len())?;
        let request = CreatePostRequest {
            title: title.trim().to_string(),
            content: content.trim().to_string(),
            image_ids: if image_ids.is_empty() {
                None
            } else {
                Some(image_ids.to_vec())
            },
        };
        let value = self
            .client
            .send(RequestSpec::post_json(endpoints::POSTS, &request)?)
            .await?;
        unwrap_envelope(value)
    }

    /// `PATCH /posts/:id` — partial update, `None` fields untouched.
    ///
    /// # Errors
    ///
    /// `ApiError::Validation` when a provided field fails the post rules;
    /// otherwise any transport/application error.
    pub async fn update(&self, id: u64, update: &UpdatePostRequest) -> Result<Post, ApiError> {
        if update.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
            return Err(ApiError::Validation("title is required".into()));
        }
        if update
            .content
            .as_deref()
            .is_some_and(|c| c.trim().is_empty())
        {
            return Err(ApiError::Validation("content is required".into()));
        }
        if update
            .image_ids
            .as_ref()
            .is_some_and(|ids| ids.len() > validate::MAX_IMAGES_PER_POST)
        {
            return Err(ApiError::Validation(format!(
                "a post can have at most {} images",
                validate::MAX_IMAGES_PER_POST
            )));
        }

        let value = self
            .client
            .send(RequestSpec::patch_json(endpoints::post_by_id(id), update)?)
            .await?;
        unwrap_envelope(value)
    }

    /// `DELETE /posts/:id`.
    ///
    /// # Errors
    ///
    /// Any transport/application error.
    pub async fn delete(&self, id: u64) -> Result<Ack, ApiError> {
        let value = self
            .client
            .send(RequestSpec::delete(endpoints::post_by_id(id)))
            .await?;
        super::ack_from(value)
    }
}

//! Entity structs mirroring the backend wire contract.
//!
//! Field names are camelCase on the wire (`rename_all`); timestamps are
//! RFC 3339 strings parsed into `chrono` types.

mod auth;
mod image;
mod post;
mod user;

pub use auth::{AuthResponse, LoginRequest, RefreshTokenRequest, RegisterRequest, UserInfo};
pub use image::ImageRecord;
pub use post::{
    CreatePostRequest, Post, PostAuthor, PostImage, PostsPage, UpdatePostRequest,
};
pub use user::{Ack, UpdateProfileRequest, User};

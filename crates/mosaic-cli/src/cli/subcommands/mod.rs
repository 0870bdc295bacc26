pub mod auth;
pub mod image;
pub mod post;
pub mod profile;

pub use auth::AuthCommands;
pub use image::ImageCommands;
pub use post::PostCommands;
pub use profile::ProfileCommands;

use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Image commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ImageCommands {
    /// Upload an image file (JPEG, PNG, GIF, or WebP, up to 5MB).
    Upload(ImageUploadArgs),
    /// List your uploaded images.
    List,
    /// Delete an image.
    Delete(ImageIdArgs),
}

#[derive(Clone, Debug, Args)]
pub struct ImageUploadArgs {
    /// Path to the image file.
    pub path: PathBuf,
}

#[derive(Clone, Debug, Args)]
pub struct ImageIdArgs {
    /// Image id.
    pub id: u64,
}

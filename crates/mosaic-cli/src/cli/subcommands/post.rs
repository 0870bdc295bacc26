use clap::{Args, Subcommand};

/// Post commands.
#[derive(Clone, Debug, Subcommand)]
pub enum PostCommands {
    /// Create a post.
    Create(PostCreateArgs),
    /// Show one post.
    Show(PostIdArgs),
    /// Update a post; omitted flags are left untouched.
    Edit(PostEditArgs),
    /// Delete a post.
    Delete(PostIdArgs),
}

#[derive(Clone, Debug, Args)]
pub struct PostIdArgs {
    /// Post id.
    pub id: u64,
}

#[derive(Clone, Debug, Args)]
pub struct PostCreateArgs {
    /// Post title.
    #[arg(long)]
    pub title: String,
    /// Post body.
    #[arg(long)]
    pub content: String,
    /// Attach an already-uploaded image by id (repeatable, up to 5).
    #[arg(long = "image")]
    pub image: Vec<u64>,
}

#[derive(Clone, Debug, Args)]
pub struct PostEditArgs {
    /// Post id.
    pub id: u64,
    /// New title.
    #[arg(long)]
    pub title: Option<String>,
    /// New body.
    #[arg(long)]
    pub content: Option<String>,
    /// Replace the attached image set (repeatable).
    #[arg(long = "image")]
    pub image: Option<Vec<u64>>,
}

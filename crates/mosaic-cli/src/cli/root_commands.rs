use clap::{Args, Subcommand};

use crate::cli::subcommands::{AuthCommands, ImageCommands, PostCommands, ProfileCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Authentication and session.
    Auth {
        #[command(subcommand)]
        action: AuthCommands,
    },
    /// Your own profile.
    Profile {
        #[command(subcommand)]
        action: ProfileCommands,
    },
    /// Look up another user.
    User(UserShowArgs),
    /// Browse the post feed.
    Feed(FeedArgs),
    /// Posts.
    Post {
        #[command(subcommand)]
        action: PostCommands,
    },
    /// Images.
    Image {
        #[command(subcommand)]
        action: ImageCommands,
    },
}

#[derive(Clone, Debug, Args)]
pub struct UserShowArgs {
    /// User id.
    pub id: u64,
}

#[derive(Clone, Debug, Args)]
pub struct FeedArgs {
    /// Page number (1-based, default 1).
    #[arg(long)]
    pub page: Option<u32>,
    /// Posts per page (default 10).
    #[arg(long)]
    pub limit: Option<u32>,
    /// Only posts by this user id.
    #[arg(long)]
    pub user: Option<u64>,
}

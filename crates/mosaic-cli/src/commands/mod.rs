use crate::bootstrap::AppContext;
use crate::cli::{Commands, GlobalFlags};

pub mod auth;
pub mod feed;
pub mod image;
pub mod post;
pub mod profile;
pub mod user;

pub async fn dispatch(
    command: Commands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Auth { action } => auth::handle(&action, ctx, flags).await,
        Commands::Profile { action } => profile::handle(&action, ctx, flags).await,
        Commands::User(args) => user::handle(&args, ctx, flags).await,
        Commands::Feed(args) => feed::handle(&args, ctx, flags).await,
        Commands::Post { action } => post::handle(&action, ctx, flags).await,
        Commands::Image { action } => image::handle(&action, ctx, flags).await,
    }
}

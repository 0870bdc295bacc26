use mosaic_client::PostsApi;

use crate::bootstrap::AppContext;
use crate::cli::root_commands::FeedArgs;
use crate::cli::GlobalFlags;
use crate::output::output;

pub async fn handle(args: &FeedArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let page = PostsApi::new(ctx.client.clone())
        .list(args.page, args.limit, args.user)
        .await?;
    output(&page, flags.format)
}

use mosaic_client::UsersApi;

use crate::bootstrap::AppContext;
use crate::cli::root_commands::UserShowArgs;
use crate::cli::GlobalFlags;
use crate::output::output;

pub async fn handle(
    args: &UserShowArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let user = UsersApi::new(ctx.client.clone()).user_by_id(args.id).await?;
    output(&user, flags.format)
}

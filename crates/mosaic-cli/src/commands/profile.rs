use mosaic_core::entities::UpdateProfileRequest;

use crate::bootstrap::AppContext;
use crate::cli::subcommands::profile::{ProfileCommands, ProfileEditArgs};
use crate::cli::GlobalFlags;
use crate::output::output;

pub async fn handle(
    action: &ProfileCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        ProfileCommands::Show => show(ctx, flags),
        ProfileCommands::Edit(args) => edit(args, ctx, flags).await,
    }
}

fn show(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let user = ctx
        .session
        .current_user()
        .ok_or_else(|| anyhow::anyhow!("not logged in. Run 'mosaic auth login' first."))?;
    output(&user, flags.format)
}

async fn edit(args: &ProfileEditArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    if args.nickname.is_none() && args.bio.is_none() && args.profile_image.is_none() {
        anyhow::bail!("profile edit: provide at least one of --nickname, --bio, --profile-image");
    }

    let update = UpdateProfileRequest {
        nickname: args.nickname.clone(),
        bio: args.bio.clone(),
        profile_image: args.profile_image.clone(),
    };
    let user = ctx.session.update_profile(&update).await?;
    output(&user, flags.format)
}

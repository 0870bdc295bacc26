use mosaic_client::PostsApi;
use mosaic_core::entities::UpdatePostRequest;

use crate::bootstrap::AppContext;
use crate::cli::subcommands::post::{PostCommands, PostCreateArgs, PostEditArgs, PostIdArgs};
use crate::cli::GlobalFlags;
use crate::output::output;

pub async fn handle(
    action: &PostCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let posts = PostsApi::new(ctx.client.clone());
    match action {
        PostCommands::Create(args) => create(args, &posts, flags).await,
        PostCommands::Show(args) => show(args, &posts, flags).await,
        PostCommands::Edit(args) => edit(args, &posts, flags).await,
        PostCommands::Delete(args) => delete(args, &posts, flags).await,
    }
}

async fn create(args: &PostCreateArgs, posts: &PostsApi, flags: &GlobalFlags) -> anyhow::Result<()> {
    let post = posts
        .create(&args.title, &args.content, &args.image)
        .await?;
    output(&post, flags.format)
}

async fn show(args: &PostIdArgs, posts: &PostsApi, flags: &GlobalFlags) -> anyhow::Result<()> {
    let post = posts.get(args.id).await?;
    output(&post, flags.format)
}

async fn edit(args: &PostEditArgs, posts: &PostsApi, flags: &GlobalFlags) -> anyhow::Result<()> {
    if args.title.is_none() && args.content.is_none() && args.image.is_none() {
        anyhow::bail!("post edit: provide at least one of --title, --content, --image");
    }

    let update = UpdatePostRequest {
        title: args.title.clone(),
        content: args.content.clone(),
        image_ids: args.image.clone(),
    };
    let post = posts.update(args.id, &update).await?;
    output(&post, flags.format)
}

async fn delete(args: &PostIdArgs, posts: &PostsApi, flags: &GlobalFlags) -> anyhow::Result<()> {
    let ack = posts.delete(args.id).await?;
    output(&ack, flags.format)
}

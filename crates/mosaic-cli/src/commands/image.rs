use mosaic_client::ImagesApi;

use crate::bootstrap::AppContext;
use crate::cli::subcommands::image::{ImageCommands, ImageIdArgs, ImageUploadArgs};
use crate::cli::GlobalFlags;
use crate::output::output;

pub async fn handle(
    action: &ImageCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let images = ImagesApi::new(ctx.client.clone());
    match action {
        ImageCommands::Upload(args) => upload(args, &images, flags).await,
        ImageCommands::List => list(&images, flags).await,
        ImageCommands::Delete(args) => delete(args, &images, flags).await,
    }
}

async fn upload(
    args: &ImageUploadArgs,
    images: &ImagesApi,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let record = images.upload_path(&args.path).await?;
    output(&record, flags.format)
}

async fn list(images: &ImagesApi, flags: &GlobalFlags) -> anyhow::Result<()> {
    let records = images.my_images().await?;
    output(&records, flags.format)
}

async fn delete(args: &ImageIdArgs, images: &ImagesApi, flags: &GlobalFlags) -> anyhow::Result<()> {
    let ack = images.delete(args.id).await?;
    output(&ack, flags.format)
}

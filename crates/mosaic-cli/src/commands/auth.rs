use serde::Serialize;

use crate::bootstrap::AppContext;
use crate::cli::subcommands::auth::{AuthCommands, AuthLoginArgs, AuthRegisterArgs};
use crate::cli::GlobalFlags;
use crate::output::output;

#[derive(Serialize)]
struct AuthSessionResponse {
    authenticated: bool,
    user_id: u64,
    email: String,
    nickname: String,
}

#[derive(Serialize)]
struct AuthStatusResponse {
    authenticated: bool,
    user: Option<String>,
    email: Option<String>,
    has_stored_tokens: bool,
    note: Option<String>,
}

#[derive(Serialize)]
struct AuthLogoutResponse {
    logged_out: bool,
}

pub async fn handle(
    action: &AuthCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        AuthCommands::Login(args) => login(args, ctx, flags).await,
        AuthCommands::Register(args) => register(args, ctx, flags).await,
        AuthCommands::Logout => logout(ctx, flags).await,
        AuthCommands::Status => status(ctx, flags),
    }
}

async fn login(args: &AuthLoginArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let user = ctx.session.login(&args.email, &args.password).await?;
    output(
        &AuthSessionResponse {
            authenticated: true,
            user_id: user.id,
            email: user.email,
            nickname: user.nickname,
        },
        flags.format,
    )
}

async fn register(
    args: &AuthRegisterArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let user = ctx
        .session
        .register(&args.email, &args.password, &args.nickname)
        .await?;
    output(
        &AuthSessionResponse {
            authenticated: true,
            user_id: user.id,
            email: user.email,
            nickname: user.nickname,
        },
        flags.format,
    )
}

async fn logout(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    ctx.session.logout().await;
    output(&AuthLogoutResponse { logged_out: true }, flags.format)
}

fn status(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let status = match ctx.session.current_user() {
        Some(user) => AuthStatusResponse {
            authenticated: true,
            user: Some(user.nickname),
            email: Some(user.email),
            has_stored_tokens: true,
            note: None,
        },
        None => AuthStatusResponse {
            authenticated: false,
            user: None,
            email: None,
            has_stored_tokens: ctx.client.tokens().has_both(),
            note: Some("not logged in. Run 'mosaic auth login' first.".into()),
        },
    };
    output(&status, flags.format)
}

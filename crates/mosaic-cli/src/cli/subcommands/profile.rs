use clap::{Args, Subcommand};

/// Own-profile commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ProfileCommands {
    /// Show the authenticated user's profile.
    Show,
    /// Update profile fields; omitted flags are left untouched.
    Edit(ProfileEditArgs),
}

#[derive(Clone, Debug, Args)]
pub struct ProfileEditArgs {
    /// New display name (2-50 characters).
    #[arg(long)]
    pub nickname: Option<String>,
    /// New bio text.
    #[arg(long)]
    pub bio: Option<String>,
    /// New profile image URL.
    #[arg(long)]
    pub profile_image: Option<String>,
}

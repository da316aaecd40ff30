use anyhow::Result;
use clap::Args;

use crate::cli::output::format_comment_section;
use crate::common::QueryWindow;
use crate::config::Config;
use crate::controller::{CommentsController, CommentsParams, CommentsState};
use crate::gateway::CommentGateway;

use super::wait_for_load;

#[derive(Args)]
pub struct ListArgs {
    /// Topic to list comments for, e.g. a post slug
    #[arg(short, long)]
    pub topic: String,

    /// Project id (defaults to $COMMONT_PROJECT_ID)
    #[arg(short, long)]
    pub project: Option<String>,

    /// Number of comments to fetch
    #[arg(long)]
    pub take: Option<u32>,

    /// Number of comments to skip
    #[arg(long)]
    pub skip: Option<u32>,
}

pub async fn handle_list<G: CommentGateway>(
    gateway: G,
    config: &Config,
    args: ListArgs,
) -> Result<()> {
    let state = load_comments(gateway, config, args).await?;

    print!("{}", format_comment_section(&state));
    Ok(())
}

pub(crate) async fn load_comments<G: CommentGateway>(
    gateway: G,
    config: &Config,
    args: ListArgs,
) -> Result<CommentsState> {
    let project = config.project(args.project)?;
    let params = CommentsParams::new(project, args.topic)
        .with_window(QueryWindow::new(args.take, args.skip));

    let controller = CommentsController::new(gateway, params);
    Ok(wait_for_load(&controller).await)
}

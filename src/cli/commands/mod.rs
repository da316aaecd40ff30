use anyhow::Result;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

mod add;
mod list;

pub use add::{AddArgs, handle_add};
pub use list::{ListArgs, handle_list};

use crate::cli::output::LOADING_MESSAGE;
use crate::common::{EnvProvider, SystemEnvProvider};
use crate::config::Config;
use crate::controller::{CommentsController, CommentsState};
use crate::gateway::{CommentGateway, HttpGateway};

#[derive(Parser)]
#[command(name = "commont")]
#[command(about = "Read and post comments on a Commont topic")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Comments service base URL (defaults to $COMMONT_API_URL or https://www.commont.app)
    #[arg(long, global = true)]
    pub api_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List comments for a topic
    List(ListArgs),
    /// Post a comment to a topic
    Add(AddArgs),
}

pub async fn run_command(cli: Cli) -> Result<()> {
    run_command_with_env(cli, SystemEnvProvider).await
}

pub(crate) async fn run_command_with_env(cli: Cli, env_provider: impl EnvProvider) -> Result<()> {
    let config = Config::from_env(&env_provider)?.with_api_url(cli.api_url)?;
    let gateway = HttpGateway::from_config(&config)?;
    log::debug!("Using comments service at {}", gateway.base_url());

    match cli.command {
        Commands::List(args) => handle_list(gateway, &config, args).await,
        Commands::Add(args) => handle_add(gateway, &config, args).await,
    }
}

/// Wait for the controller's current fetch to finish, with a spinner on
/// interactive terminals.
pub(crate) async fn wait_for_load<G: CommentGateway>(
    controller: &CommentsController<G>,
) -> CommentsState {
    let spinner = ProgressBar::new_spinner();
    if let Ok(spinner_style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(spinner_style);
    }
    spinner.set_message(LOADING_MESSAGE);
    spinner.enable_steady_tick(Duration::from_millis(100));

    let state = controller.wait_until(|s| !s.loading).await;

    spinner.finish_and_clear();
    state
}

use anyhow::Result;
use clap::Args;

use crate::cli::output::{
    format_comment_section, info_message, success_message, warning_message,
};
use crate::common::{CommentStatus, NewComment};
use crate::config::Config;
use crate::controller::{CommentsController, CommentsParams, CommentsState};
use crate::gateway::CommentGateway;

use super::wait_for_load;

#[derive(Args)]
pub struct AddArgs {
    /// Comment text
    pub content: String,

    /// Topic to comment on, e.g. a post slug
    #[arg(short, long)]
    pub topic: String,

    /// Project id (defaults to $COMMONT_PROJECT_ID)
    #[arg(short, long)]
    pub project: Option<String>,

    /// Author name (defaults to $COMMONT_AUTHOR, then $USER)
    #[arg(short, long)]
    pub author: Option<String>,
}

/// Outcome of a submission made through the CLI.
pub(crate) struct Submission {
    pub status: CommentStatus,
    pub state: CommentsState,
}

pub async fn handle_add<G: CommentGateway>(
    gateway: G,
    config: &Config,
    args: AddArgs,
) -> Result<()> {
    let submission = submit_comment(gateway, config, args).await?;

    print!("{}", format_comment_section(&submission.state));
    println!();

    match submission.status {
        CommentStatus::Added => println!("{}", success_message("Comment added")),
        CommentStatus::DeliveredAwaitingApproval => println!(
            "{}",
            info_message("Comment delivered; it will appear once approved")
        ),
        CommentStatus::Failed | CommentStatus::Sending => {
            let reason = submission
                .state
                .error
                .unwrap_or_else(|| "unknown error".to_string());
            anyhow::bail!("Could not add comment: {}", reason);
        }
    }

    Ok(())
}

pub(crate) async fn submit_comment<G: CommentGateway>(
    gateway: G,
    config: &Config,
    args: AddArgs,
) -> Result<Submission> {
    let project = config.project(args.project)?;
    let author = config.author(args.author);

    let controller = CommentsController::new(gateway, CommentsParams::new(project, args.topic));
    let loaded = wait_for_load(&controller).await;
    if let Some(ref error) = loaded.error {
        eprintln!(
            "{}",
            warning_message(&format!("Could not load existing comments: {}", error))
        );
    }

    let id = controller.add_comment(NewComment::new(author, args.content));
    let state = controller
        .wait_until(|s| s.status_of(id).is_none_or(CommentStatus::is_terminal))
        .await;

    let status = state
        .status_of(id)
        .ok_or_else(|| anyhow::anyhow!("Submitted comment is no longer in view"))?;

    Ok(Submission { status, state })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::test_helpers::{FakeCommentService, MISSING_PARAMETERS};

    fn add_args(topic: &str, author: Option<&str>, content: &str) -> AddArgs {
        AddArgs {
            content: content.to_string(),
            topic: topic.to_string(),
            project: Some("test-1".to_string()),
            author: author.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_add_comment() {
        let service = FakeCommentService::seeded();
        let submission = submit_comment(
            service.clone(),
            &Config::default(),
            add_args("test", Some("Tester"), "What's up?"),
        )
        .await
        .unwrap();

        assert_eq!(submission.status, CommentStatus::Added);
        assert_eq!(submission.state.count, 4);
        assert_eq!(submission.state.comments[0].content, "What's up?");

        let formatted = format_comment_section(&submission.state);
        assert!(formatted.starts_with("4 comments"));
        assert!(formatted.contains("What's up?"));
    }

    #[tokio::test]
    async fn test_add_comment_uses_configured_author() {
        let config = Config {
            author: "Mary".to_string(),
            ..Config::default()
        };
        let submission = submit_comment(
            FakeCommentService::seeded(),
            &config,
            add_args("test", None, "Hello again"),
        )
        .await
        .unwrap();

        assert_eq!(submission.state.comments[0].author, "Mary");
    }

    #[tokio::test]
    async fn test_add_comment_awaiting_approval() {
        let service = FakeCommentService::seeded();
        service.hide_new_comments(true);

        let submission = submit_comment(
            service,
            &Config::default(),
            add_args("dogs", Some("Tester"), "Good boy"),
        )
        .await
        .unwrap();

        assert_eq!(submission.status, CommentStatus::DeliveredAwaitingApproval);
        assert_eq!(submission.state.count, 2);
    }

    #[tokio::test]
    async fn test_add_comment_rejected() {
        let submission = submit_comment(
            FakeCommentService::seeded(),
            &Config::default(),
            add_args("test", Some(""), "What's up?"),
        )
        .await
        .unwrap();

        assert_eq!(submission.status, CommentStatus::Failed);
        assert_eq!(submission.state.error.as_deref(), Some(MISSING_PARAMETERS));
    }

    #[tokio::test]
    async fn test_add_comment_to_empty_topic_keeps_fetch_error() {
        // The write endpoint accepts the comment, the earlier list error stays
        let submission = submit_comment(
            FakeCommentService::seeded(),
            &Config::default(),
            add_args("", Some("Tester"), "What's up?"),
        )
        .await
        .unwrap();

        assert_eq!(submission.status, CommentStatus::Added);
        assert_eq!(submission.state.error.as_deref(), Some(MISSING_PARAMETERS));
        assert_eq!(submission.state.count, 1);
    }

    #[tokio::test]
    async fn test_handle_add_fails_on_rejection() {
        let result = handle_add(
            FakeCommentService::seeded(),
            &Config::default(),
            add_args("test", Some("Tester"), ""),
        )
        .await;

        let err = result.unwrap_err();
        assert!(err.to_string().contains(MISSING_PARAMETERS));
    }
}

use chrono::Utc;
use console::{Color, style};
use std::time::Duration;

use crate::common::{Comment, CommentStatus};
use crate::controller::CommentsState;

pub const LOADING_MESSAGE: &str = "Loading comments...";

fn format_time_ago(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    if total_seconds < 60 {
        return format!(
            "{} second{}",
            total_seconds,
            if total_seconds == 1 { "" } else { "s" }
        );
    }

    let minutes = total_seconds / 60;
    if minutes < 60 {
        return format!("{} minute{}", minutes, if minutes == 1 { "" } else { "s" });
    }

    let hours = minutes / 60;
    if hours < 24 {
        return format!("{} hour{}", hours, if hours == 1 { "" } else { "s" });
    }

    let days = hours / 24;
    if days < 30 {
        return format!("{} day{}", days, if days == 1 { "" } else { "s" });
    }

    let months = days / 30;
    if months < 12 {
        return format!("{} month{}", months, if months == 1 { "" } else { "s" });
    }

    let years = months / 12;
    format!("{} year{}", years, if years == 1 { "" } else { "s" })
}

pub fn format_count(count: u64) -> String {
    if count == 1 {
        "1 comment".to_string()
    } else {
        format!("{} comments", count)
    }
}

pub fn format_comment_status(status: &CommentStatus) -> console::StyledObject<&'static str> {
    match status {
        CommentStatus::Sending => style("SENDING").fg(Color::Blue),
        CommentStatus::Added => style("ADDED").fg(Color::Green),
        CommentStatus::DeliveredAwaitingApproval => style("AWAITING APPROVAL").fg(Color::Yellow),
        CommentStatus::Failed => style("FAILED").fg(Color::Red).bold(),
    }
}

/// Date part of a comment header; unparseable dates are shown verbatim.
fn format_created_at(comment: &Comment) -> String {
    match comment.created_at_parsed() {
        Some(created_at) => {
            let since = Utc::now() - created_at;
            format!(
                "{} ({} ago)",
                created_at.format("%Y-%m-%d"),
                format_time_ago(since.to_std().unwrap_or_default())
            )
        }
        None => comment.created_at.clone(),
    }
}

pub fn format_comment(comment: &Comment) -> String {
    let mut output = String::new();

    let status_part = match &comment.status {
        Some(status) => format!(" [{}]", format_comment_status(status)),
        None => String::new(),
    };

    output.push_str(&format!(
        "{} ・ {}{}\n",
        style(&comment.author).green(),
        style(format_created_at(comment)).dim(),
        status_part
    ));
    output.push_str(&format!("  {}\n", comment.content));

    output
}

/// Count header, error line, then every comment in view.
pub fn format_comment_section(state: &CommentsState) -> String {
    let mut output = String::new();

    output.push_str(&format!("{}\n", style(format_count(state.count)).bold()));

    if let Some(ref error) = state.error {
        output.push_str(&format!("{}\n", style(format!("Error: {}", error)).red()));
    }

    if state.loading {
        output.push_str(&format!("{}\n", style(LOADING_MESSAGE).dim()));
        return output;
    }

    for comment in &state.comments {
        output.push('\n');
        output.push_str(&format_comment(comment));
    }

    output
}

pub fn success_message(message: &str) -> String {
    format!("{} {}", style("✓").green().bold(), message)
}

pub fn error_message(message: &str) -> String {
    format!("{} {}", style("✗").red().bold(), message)
}

pub fn warning_message(message: &str) -> String {
    format!("{} {}", style("⚠").yellow().bold(), message)
}

pub fn info_message(message: &str) -> String {
    format!("{} {}", style("ℹ").blue().bold(), message)
}

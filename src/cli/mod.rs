//! Terminal front-end: a list view and a submission form over
//! [`CommentsController`](crate::controller::CommentsController).

pub mod commands;
pub mod output;

pub use commands::{Cli, Commands, run_command};
pub use output::error_message;

//! Comments View-Model Controller.

pub mod comments;
pub mod liveness;
pub mod state;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use comments::{CommentsController, CommentsParams};
pub use liveness::Liveness;
pub use state::CommentsState;

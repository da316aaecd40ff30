//! Client for the Commont comments service.
//!
//! [`gateway`] maps the service's two HTTP endpoints onto typed requests and
//! results. [`controller`] layers a per-topic view-model on top of it with
//! optimistic submissions and change notification. [`cli`] is the
//! `commont` command-line front end.

pub mod cli;
pub mod common;
pub mod config;
pub mod controller;
pub mod gateway;

pub use common::{Comment, CommentStatus, CorrelationId, NewComment, QueryWindow};
pub use config::{Config, ConfigError};
pub use controller::{CommentsController, CommentsParams, CommentsState};
pub use gateway::{CommentGateway, GatewayError, GatewayResult, HttpGateway};

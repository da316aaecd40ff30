//! Remote Comment Gateway: stateless request/response mapping between the
//! controller and the comments service.

use std::future::Future;

pub mod errors;
pub mod http;
pub mod payload;

pub use errors::{GatewayError, GatewayResult};
pub use http::HttpGateway;
pub use payload::{
    AddCommentPayload, AddCommentResponse, FetchCommentsPayload, FetchCommentsResponse,
};

/// The two operations a controller needs from the comments service.
///
/// Implementations hold no per-controller state and may be shared by any
/// number of controllers. They report failures to the caller and never retry.
pub trait CommentGateway: Send + Sync + 'static {
    /// Retrieve a slice of the comments for `(project_id, topic)` together
    /// with the topic's total count.
    fn fetch_comments(
        &self,
        payload: FetchCommentsPayload,
    ) -> impl Future<Output = GatewayResult<FetchCommentsResponse>> + Send;

    /// Submit a new comment and return the service's confirmed record.
    fn add_comment(
        &self,
        payload: AddCommentPayload,
    ) -> impl Future<Output = GatewayResult<AddCommentResponse>> + Send;
}

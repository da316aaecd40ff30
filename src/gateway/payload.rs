use serde::{Deserialize, Serialize};

use crate::common::{Comment, QueryWindow, RemoteComment};

/// Parameters of a list query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchCommentsPayload {
    pub project_id: String,
    pub topic: String,
    pub window: QueryWindow,
}

impl FetchCommentsPayload {
    /// Full query string parameters: `projectId`, `topic`, then the window.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("projectId", self.project_id.clone()),
            ("topic", self.topic.clone()),
        ];
        params.extend(self.window.query_pairs());
        params
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchCommentsResponse {
    pub comments: Vec<Comment>,
    pub count: u64,
}

/// Body of a submission, sent verbatim as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddCommentPayload {
    pub project_id: String,
    pub topic: String,
    pub content: String,
    pub author: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddCommentResponse {
    pub comment: RemoteComment,
}

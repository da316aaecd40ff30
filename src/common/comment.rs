use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Delivery state of a comment held on the client.
///
/// A freshly submitted comment is [`CommentStatus::Sending`]. Once the service
/// answers it becomes [`CommentStatus::Added`] (visible),
/// [`CommentStatus::DeliveredAwaitingApproval`] (held for moderation) or
/// [`CommentStatus::Failed`] (the request errored; callers may offer a retry,
/// which is a brand new submission).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CommentStatus {
    Sending,
    Added,
    DeliveredAwaitingApproval,
    Failed,
}

impl CommentStatus {
    /// Every status except `Sending` is final.
    pub fn is_terminal(self) -> bool {
        !matches!(self, CommentStatus::Sending)
    }
}

impl fmt::Display for CommentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommentStatus::Sending => write!(f, "sending"),
            CommentStatus::Added => write!(f, "added"),
            CommentStatus::DeliveredAwaitingApproval => write!(f, "delivered-awaiting-approval"),
            CommentStatus::Failed => write!(f, "failed"),
        }
    }
}

impl std::str::FromStr for CommentStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sending" => Ok(CommentStatus::Sending),
            "added" => Ok(CommentStatus::Added),
            "delivered-awaiting-approval" | "awaiting-approval" => {
                Ok(CommentStatus::DeliveredAwaitingApproval)
            }
            "failed" => Ok(CommentStatus::Failed),
            _ => Err(anyhow::anyhow!("Invalid comment status: {}", s)),
        }
    }
}

/// Client-generated identifier attached to an optimistic comment so the
/// service's answer can be matched back to the exact entry that was inserted,
/// even when two submissions carry identical text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CorrelationId(Uuid);

impl CorrelationId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CorrelationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub author: String,
    pub content: String,
    pub topic: String,
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<CommentStatus>,
    /// Set only on entries created locally by an optimistic submission.
    #[serde(skip)]
    pub local_id: Option<CorrelationId>,
}

impl Comment {
    /// Build the optimistic entry for a submission that has not reached the
    /// service yet.
    pub fn pending(id: CorrelationId, author: String, content: String, topic: String) -> Self {
        Self {
            author,
            content,
            topic,
            created_at: Utc::now().to_rfc2822(),
            status: Some(CommentStatus::Sending),
            local_id: Some(id),
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == Some(CommentStatus::Sending)
    }

    /// Parse `created_at`, which the service renders in whatever textual form
    /// its runtime prefers.
    pub fn created_at_parsed(&self) -> Option<DateTime<Utc>> {
        let raw = self.created_at.trim();
        DateTime::parse_from_rfc3339(raw)
            .or_else(|_| DateTime::parse_from_rfc2822(raw))
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
    }
}

/// A comment as confirmed by the write endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteComment {
    #[serde(flatten)]
    pub comment: Comment,
    #[serde(default)]
    pub hidden: bool,
}

impl RemoteComment {
    /// Convert into the entry that replaces the optimistic one.
    pub fn into_reconciled(self) -> Comment {
        let status = if self.hidden {
            CommentStatus::DeliveredAwaitingApproval
        } else {
            CommentStatus::Added
        };
        Comment {
            status: Some(status),
            local_id: None,
            ..self.comment
        }
    }
}

/// The author-supplied part of a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub author: String,
    pub content: String,
}

impl NewComment {
    pub fn new(author: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            content: content.into(),
        }
    }
}

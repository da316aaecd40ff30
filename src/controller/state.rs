use crate::common::{Comment, CommentStatus, CorrelationId};
use crate::gateway::FetchCommentsResponse;

/// Point-in-time view of a controller's data.
///
/// `count` is the service's total for the topic (plus local submissions not
/// yet reflected there), so it can exceed `comments.len()` when a take/skip
/// window is active.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentsState {
    pub comments: Vec<Comment>,
    pub count: u64,
    pub loading: bool,
    pub error: Option<String>,
}

impl CommentsState {
    /// The optimistic entry created for a given submission, if still present.
    pub fn find_local(&self, id: CorrelationId) -> Option<&Comment> {
        self.comments.iter().find(|c| c.local_id == Some(id))
    }

    /// Status of a given submission, if its entry is still present.
    pub fn status_of(&self, id: CorrelationId) -> Option<CommentStatus> {
        self.find_local(id).and_then(|c| c.status)
    }

    pub fn has_pending(&self) -> bool {
        self.comments.iter().any(Comment::is_pending)
    }

    pub(crate) fn begin_fetch(&mut self) {
        self.loading = true;
    }

    pub(crate) fn apply_page(&mut self, page: FetchCommentsResponse) {
        self.comments = page.comments;
        self.count = page.count;
        self.loading = false;
        self.error = None;
    }

    /// Previously loaded comments stay visible.
    pub(crate) fn apply_fetch_error(&mut self, message: String) {
        self.error = Some(message);
        self.loading = false;
    }

    pub(crate) fn prepend_pending(&mut self, comment: Comment) {
        self.comments.insert(0, comment);
        self.count += 1;
    }

    /// Swap the optimistic entry `id` for the confirmed record.
    pub(crate) fn reconcile(&mut self, id: CorrelationId, confirmed: Comment) -> bool {
        match self.comments.iter_mut().find(|c| c.local_id == Some(id)) {
            Some(entry) => {
                *entry = Comment {
                    local_id: Some(id),
                    ..confirmed
                };
                true
            }
            None => false,
        }
    }

    /// Record a rejected submission, keeping the entry's local content.
    pub(crate) fn mark_failed(&mut self, id: CorrelationId, message: String) -> bool {
        self.error = Some(message);
        match self.comments.iter_mut().find(|c| c.local_id == Some(id)) {
            Some(entry) => {
                entry.status = Some(CommentStatus::Failed);
                true
            }
            None => false,
        }
    }
}

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;

use super::liveness::Liveness;
use super::state::CommentsState;
use crate::common::{Comment, CorrelationId, NewComment, QueryWindow};
use crate::gateway::{AddCommentPayload, CommentGateway, FetchCommentsPayload};

/// What a controller is scoped to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentsParams {
    pub project_id: String,
    pub topic: String,
    pub window: QueryWindow,
}

impl CommentsParams {
    pub fn new(project_id: impl Into<String>, topic: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            topic: topic.into(),
            window: QueryWindow::default(),
        }
    }

    pub fn with_window(mut self, window: QueryWindow) -> Self {
        self.window = window;
        self
    }

    pub fn with_take(mut self, take: u32) -> Self {
        self.window = self.window.with_take(take);
        self
    }

    pub fn with_skip(mut self, skip: u32) -> Self {
        self.window = self.window.with_skip(skip);
        self
    }
}

/// State reachable from spawned continuations.
struct Shared<G> {
    gateway: G,
    project_id: String,
    topic: String,
    state: watch::Sender<CommentsState>,
    liveness: Liveness,
    latest_fetch: AtomicU64,
}

impl<G> Shared<G> {
    /// Apply `f` and notify subscribers, unless the controller is torn down.
    fn mutate(&self, what: &str, f: impl FnOnce(&mut CommentsState)) -> bool {
        if !self.liveness.is_live() {
            log::trace!("Discarding {} for torn-down controller ({})", what, self.topic);
            return false;
        }
        self.state.send_modify(f);
        true
    }
}

/// View-model for the comments of one `(project, topic)` pair.
///
/// The controller owns a [`CommentsState`] snapshot and keeps it in step with
/// the comments service through a [`CommentGateway`]. Consumers read the
/// snapshot with [`snapshot`](Self::snapshot) and observe changes through
/// [`subscribe`](Self::subscribe).
///
/// ## Lifecycle
///
/// - **Fetch**: on construction, on every [`set_window`](Self::set_window)
///   that changes `take`/`skip`, and on [`refetch`](Self::refetch). Only the
///   most recently issued fetch may update the state; older responses are
///   discarded.
/// - **Submit**: [`add_comment`](Self::add_comment) inserts a `sending` entry
///   and bumps `count` immediately, then swaps in the service's record
///   (`added` / `delivered-awaiting-approval`) or marks the entry `failed`.
/// - **Teardown**: [`teardown`](Self::teardown) (or drop) ends liveness.
///   Requests still in flight complete, but their results are discarded.
///
/// Every method that talks to the service spawns onto the current Tokio
/// runtime and must be called from within one.
///
/// ## Example Usage
///
/// ```rust,no_run
/// use commont::controller::{CommentsController, CommentsParams};
/// use commont::common::NewComment;
/// use commont::gateway::HttpGateway;
///
/// # async fn run() {
/// let gateway = HttpGateway::new("https://www.commont.app");
/// let controller = CommentsController::new(
///     gateway,
///     CommentsParams::new("my-project", "my-post-about-cats").with_take(10),
/// );
///
/// let state = controller.wait_until(|s| !s.loading).await;
/// println!("{} comments", state.count);
///
/// let id = controller.add_comment(NewComment::new("Jon Snow", "Nice cat!"));
/// let state = controller
///     .wait_until(|s| s.status_of(id).is_some_and(|st| st.is_terminal()))
///     .await;
/// println!("submission is {:?}", state.status_of(id));
/// # }
/// ```
pub struct CommentsController<G: CommentGateway> {
    shared: Arc<Shared<G>>,
    window: QueryWindow,
}

impl<G: CommentGateway> CommentsController<G> {
    /// Create a controller and start the initial fetch.
    pub fn new(gateway: G, params: CommentsParams) -> Self {
        let (state, _) = watch::channel(CommentsState::default());
        let controller = Self {
            shared: Arc::new(Shared {
                gateway,
                project_id: params.project_id,
                topic: params.topic,
                state,
                liveness: Liveness::new(),
                latest_fetch: AtomicU64::new(0),
            }),
            window: params.window,
        };
        controller.refetch();
        controller
    }

    pub fn project_id(&self) -> &str {
        &self.shared.project_id
    }

    pub fn topic(&self) -> &str {
        &self.shared.topic
    }

    pub fn window(&self) -> QueryWindow {
        self.window
    }

    pub fn is_live(&self) -> bool {
        self.shared.liveness.is_live()
    }

    pub fn snapshot(&self) -> CommentsState {
        self.shared.state.borrow().clone()
    }

    /// Receiver notified after every applied state change.
    pub fn subscribe(&self) -> watch::Receiver<CommentsState> {
        self.shared.state.subscribe()
    }

    /// Wait for a snapshot satisfying `predicate`; returns immediately if the
    /// current one already does. Never resolves if the controller is torn
    /// down before the predicate holds.
    pub async fn wait_until(&self, mut predicate: impl FnMut(&CommentsState) -> bool) -> CommentsState {
        let mut rx = self.subscribe();
        match rx.wait_for(|state| predicate(state)).await {
            Ok(state) => (*state).clone(),
            // Unreachable while `self` holds the sender
            Err(_) => self.snapshot(),
        }
    }

    /// Change the take/skip window, fetching again if it differs.
    pub fn set_window(&mut self, window: QueryWindow) {
        if self.window == window {
            return;
        }
        self.window = window;
        self.refetch();
    }

    /// Fetch the current window again.
    pub fn refetch(&self) {
        let shared = Arc::clone(&self.shared);
        let seq = shared.latest_fetch.fetch_add(1, Ordering::AcqRel) + 1;
        let payload = FetchCommentsPayload {
            project_id: shared.project_id.clone(),
            topic: shared.topic.clone(),
            window: self.window,
        };

        shared.mutate("loading flag", CommentsState::begin_fetch);
        log::debug!("Fetch #{} for topic '{}' issued", seq, shared.topic);

        tokio::spawn(async move {
            let result = shared.gateway.fetch_comments(payload).await;

            if shared.latest_fetch.load(Ordering::Acquire) != seq {
                log::debug!("Fetch #{} superseded; response discarded", seq);
                return;
            }

            match result {
                Ok(page) => {
                    log::debug!(
                        "Fetch #{} returned {} of {} comments",
                        seq,
                        page.comments.len(),
                        page.count
                    );
                    shared.mutate("fetched page", |state| state.apply_page(page));
                }
                Err(err) => {
                    log::warn!("Fetch #{} for topic '{}' failed: {}", seq, shared.topic, err);
                    shared.mutate("fetch error", |state| state.apply_fetch_error(err.to_string()));
                }
            }
        });
    }

    /// Submit a comment optimistically and return the id of its local entry.
    pub fn add_comment(&self, new_comment: NewComment) -> CorrelationId {
        let shared = Arc::clone(&self.shared);
        let id = CorrelationId::new();
        let NewComment { author, content } = new_comment;

        let pending = Comment::pending(id, author.clone(), content.clone(), shared.topic.clone());
        shared.mutate("optimistic comment", |state| state.prepend_pending(pending));

        let payload = AddCommentPayload {
            project_id: shared.project_id.clone(),
            topic: shared.topic.clone(),
            content,
            author,
        };

        tokio::spawn(async move {
            match shared.gateway.add_comment(payload).await {
                Ok(response) => {
                    let confirmed = response.comment.into_reconciled();
                    log::debug!("Comment {} confirmed as {:?}", id, confirmed.status);
                    shared.mutate("confirmed comment", |state| {
                        if !state.reconcile(id, confirmed) {
                            log::debug!("Comment {} no longer in view; confirmation dropped", id);
                        }
                    });
                }
                Err(err) => {
                    log::warn!("Comment {} rejected: {}", id, err);
                    shared.mutate("rejected comment", |state| {
                        state.mark_failed(id, err.to_string());
                    });
                }
            }
        });

        id
    }

    /// Stop applying results to this controller's state.
    pub fn teardown(&self) {
        if self.shared.liveness.end() {
            log::debug!("Controller for topic '{}' torn down", self.shared.topic);
        }
    }
}

impl<G: CommentGateway> Drop for CommentsController<G> {
    fn drop(&mut self) {
        self.teardown();
    }
}

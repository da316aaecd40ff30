//! Fixtures for exercising controllers without a network.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use chrono::Utc;
use tokio::sync::{mpsc, oneshot};

use crate::common::{Comment, RemoteComment};
use crate::gateway::{
    AddCommentPayload, AddCommentResponse, CommentGateway, FetchCommentsPayload,
    FetchCommentsResponse, GatewayError, GatewayResult,
};

pub const MISSING_PARAMETERS: &str = "Missing required parameters";

/// A server-sourced comment with no client status.
pub fn comment(author: &str, content: &str, topic: &str) -> Comment {
    Comment {
        author: author.to_string(),
        content: content.to_string(),
        topic: topic.to_string(),
        created_at: Utc::now().to_rfc3339(),
        status: None,
        local_id: None,
    }
}

/// One comment on `dogs`, three on `test`.
pub fn seed() -> Vec<Comment> {
    vec![
        comment("Aleksandra", "What a cute dog!", "dogs"),
        comment("Aleksandra", "Just testing", "test"),
        comment("Johnny Test", "Testing some more!", "test"),
        comment("Mary", "Thanks for your post", "test"),
    ]
}

pub fn seed_topic(topic: &str) -> Vec<Comment> {
    seed().into_iter().filter(|c| c.topic == topic).collect()
}

pub fn page(comments: Vec<Comment>, count: u64) -> FetchCommentsResponse {
    FetchCommentsResponse { comments, count }
}

pub fn confirmed(comment: Comment, hidden: bool) -> AddCommentResponse {
    AddCommentResponse {
        comment: RemoteComment { comment, hidden },
    }
}

/// Let spawned continuations that are ready run to completion.
pub async fn settle() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}

/// In-memory comments service with the same rules as the hosted one:
/// requests missing `projectId`/`topic` (or `author`/`content` on write) are
/// rejected with a 400, lists are filtered by topic and sliced by skip/take.
#[derive(Clone, Default)]
pub struct FakeCommentService {
    comments: Arc<Mutex<Vec<Comment>>>,
    hide_new: Arc<AtomicBool>,
}

impl FakeCommentService {
    pub fn seeded() -> Self {
        let service = Self::default();
        for c in seed() {
            service.insert(c);
        }
        service
    }

    pub fn insert(&self, comment: Comment) {
        self.comments.lock().unwrap().push(comment);
    }

    /// Hold subsequently submitted comments for moderation.
    pub fn hide_new_comments(&self, hide: bool) {
        self.hide_new.store(hide, Ordering::SeqCst);
    }

    fn missing_parameters() -> GatewayError {
        GatewayError::request_failed(400, MISSING_PARAMETERS)
    }
}

impl CommentGateway for FakeCommentService {
    async fn fetch_comments(
        &self,
        payload: FetchCommentsPayload,
    ) -> GatewayResult<FetchCommentsResponse> {
        if payload.project_id.is_empty() || payload.topic.is_empty() {
            return Err(Self::missing_parameters());
        }

        let matching: Vec<Comment> = self
            .comments
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.topic == payload.topic)
            .cloned()
            .collect();
        let count = matching.len() as u64;
        let skip = payload.window.effective_skip().unwrap_or(0) as usize;
        let comments = match payload.window.effective_take() {
            Some(take) => matching.into_iter().skip(skip).take(take as usize).collect(),
            None => matching.into_iter().skip(skip).collect(),
        };

        Ok(FetchCommentsResponse { comments, count })
    }

    async fn add_comment(&self, payload: AddCommentPayload) -> GatewayResult<AddCommentResponse> {
        if payload.author.is_empty() || payload.content.is_empty() {
            return Err(Self::missing_parameters());
        }

        let stored = comment(&payload.author, &payload.content, &payload.topic);
        self.insert(stored.clone());

        Ok(confirmed(stored, self.hide_new.load(Ordering::SeqCst)))
    }
}

pub struct FetchCall {
    pub payload: FetchCommentsPayload,
    respond: oneshot::Sender<GatewayResult<FetchCommentsResponse>>,
}

impl FetchCall {
    pub fn respond(self, result: GatewayResult<FetchCommentsResponse>) {
        let _ = self.respond.send(result);
    }
}

pub struct AddCall {
    pub payload: AddCommentPayload,
    respond: oneshot::Sender<GatewayResult<AddCommentResponse>>,
}

impl AddCall {
    pub fn respond(self, result: GatewayResult<AddCommentResponse>) {
        let _ = self.respond.send(result);
    }
}

enum GatedCall {
    Fetch(FetchCall),
    Add(AddCall),
}

/// Gateway whose calls stay unresolved until the test answers them.
#[derive(Clone)]
pub struct GatedGateway {
    calls: mpsc::UnboundedSender<GatedCall>,
}

/// Test-side end of a [`GatedGateway`].
pub struct GatedCalls {
    calls: mpsc::UnboundedReceiver<GatedCall>,
}

impl GatedGateway {
    pub fn new() -> (Self, GatedCalls) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { calls: tx }, GatedCalls { calls: rx })
    }
}

impl GatedCalls {
    async fn next(&mut self) -> GatedCall {
        self.calls
            .recv()
            .await
            .expect("gateway dropped with no call pending")
    }

    pub async fn next_fetch(&mut self) -> FetchCall {
        match self.next().await {
            GatedCall::Fetch(call) => call,
            GatedCall::Add(call) => panic!("expected a fetch, got a submission: {:?}", call.payload),
        }
    }

    pub async fn next_add(&mut self) -> AddCall {
        match self.next().await {
            GatedCall::Add(call) => call,
            GatedCall::Fetch(call) => panic!("expected a submission, got a fetch: {:?}", call.payload),
        }
    }

    /// No call is waiting to be answered.
    pub fn is_idle(&mut self) -> bool {
        self.calls.try_recv().is_err()
    }
}

impl CommentGateway for GatedGateway {
    async fn fetch_comments(
        &self,
        payload: FetchCommentsPayload,
    ) -> GatewayResult<FetchCommentsResponse> {
        let (respond, answer) = oneshot::channel();
        let _ = self.calls.send(GatedCall::Fetch(FetchCall { payload, respond }));
        answer.await.unwrap_or(Err(GatewayError::EmptyResponse))
    }

    async fn add_comment(&self, payload: AddCommentPayload) -> GatewayResult<AddCommentResponse> {
        let (respond, answer) = oneshot::channel();
        let _ = self.calls.send(GatedCall::Add(AddCall { payload, respond }));
        answer.await.unwrap_or(Err(GatewayError::EmptyResponse))
    }
}

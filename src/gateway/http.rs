use reqwest::header::{CONTENT_TYPE, HeaderValue};
use serde::de::DeserializeOwned;

use super::errors::{GatewayError, GatewayResult};
use super::payload::{
    AddCommentPayload, AddCommentResponse, FetchCommentsPayload, FetchCommentsResponse,
};
use super::CommentGateway;
use crate::config::Config;

/// [`CommentGateway`] backed by the Commont HTTP API.
///
/// - **Read**: `GET {base}/api/comments?projectId=..&topic=..[&skip=..][&take=..]`
/// - **Write**: `POST {base}/api/add-comment?projectId=..` with a JSON body
///
/// Any non-2xx status becomes [`GatewayError::RequestFailed`] carrying the
/// status reason phrase; the service's own JSON error body is ignored. A 2xx
/// response without a decodable body becomes [`GatewayError::EmptyResponse`].
/// Nothing is retried.
///
/// ```rust,no_run
/// use commont::gateway::{CommentGateway, FetchCommentsPayload, HttpGateway};
/// use commont::common::QueryWindow;
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let gateway = HttpGateway::new("https://www.commont.app");
/// let page = gateway
///     .fetch_comments(FetchCommentsPayload {
///         project_id: "my-project".to_string(),
///         topic: "my-post-about-cats".to_string(),
///         window: QueryWindow::default().with_take(10),
///     })
///     .await?;
/// println!("{} comments", page.count);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: reqwest::Client,
    base_url: String,
}

impl HttpGateway {
    pub const DEFAULT_BASE_URL: &'static str = "https://www.commont.app";

    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    /// Build a gateway honouring the configured base URL and timeout.
    pub fn from_config(config: &Config) -> GatewayResult<Self> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self::with_client(client, config.api_url.clone()))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl CommentGateway for HttpGateway {
    async fn fetch_comments(
        &self,
        payload: FetchCommentsPayload,
    ) -> GatewayResult<FetchCommentsResponse> {
        let url = self.endpoint("/api/comments");
        log::debug!("GET {} topic={} project={}", url, payload.topic, payload.project_id);

        let response = self
            .client
            .get(&url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .query(&payload.query_pairs())
            .send()
            .await?;

        decode_body(response).await
    }

    async fn add_comment(&self, payload: AddCommentPayload) -> GatewayResult<AddCommentResponse> {
        let url = self.endpoint("/api/add-comment");
        log::debug!("POST {} topic={} project={}", url, payload.topic, payload.project_id);

        let response = self
            .client
            .post(&url)
            .query(&[("projectId", payload.project_id.as_str())])
            .json(&payload)
            .send()
            .await?;

        decode_body(response).await
    }
}

/// Map a raw response onto the gateway's result contract.
async fn decode_body<T: DeserializeOwned>(response: reqwest::Response) -> GatewayResult<T> {
    let status = response.status();
    if !status.is_success() {
        log::warn!("{} responded {}", response.url(), status);
        return Err(GatewayError::from_status(status));
    }

    let body = response.bytes().await?;
    match serde_json::from_slice::<Option<T>>(&body) {
        Ok(Some(value)) => Ok(value),
        Ok(None) => Err(GatewayError::EmptyResponse),
        Err(err) => {
            log::warn!("Undecodable response body ({} bytes): {}", body.len(), err);
            Err(GatewayError::EmptyResponse)
        }
    }
}

// API client module: a small blocking HTTP client that talks to the
// resume-matching endpoint. The controller only sees the `MatchEndpoint`
// trait, so tests can swap the network out.

use crate::error::SubmitError;
use crate::model::{ErrorBody, SubmissionRequest, SubmissionResult};
use anyhow::{Context, Result};
use reqwest::blocking::Client;
use tracing::{debug, info, warn};

/// Raw reply from the endpoint: status code and body text, before any
/// interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointReply {
    pub status: u16,
    pub body: String,
}

impl EndpointReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The single network call of a submission.
///
/// Implementations return `Err` only when no response was obtained;
/// any status, accepting or not, comes back as an `EndpointReply`.
pub trait MatchEndpoint {
    fn post_submission(&self, request: &SubmissionRequest) -> Result<EndpointReply, SubmitError>;
}

/// Blocking reqwest client bound to one endpoint URL.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    endpoint_url: String,
}

impl ApiClient {
    pub fn new(endpoint_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .build()
            .context("Failed to build HTTP client")?;
        Ok(ApiClient {
            client,
            endpoint_url: endpoint_url.into(),
        })
    }

    pub fn endpoint_url(&self) -> &str {
        &self.endpoint_url
    }
}

impl MatchEndpoint for ApiClient {
    /// POST the request as JSON and hand back whatever the server said.
    fn post_submission(&self, request: &SubmissionRequest) -> Result<EndpointReply, SubmitError> {
        let network = |e: reqwest::Error| SubmitError::Network {
            url: self.endpoint_url.clone(),
            reason: e.to_string(),
        };

        info!(
            "Sending {} ({} bytes base64) to {}",
            request.file_name,
            request.file_content_base64.len(),
            self.endpoint_url
        );
        let res = self
            .client
            .post(&self.endpoint_url)
            .json(request)
            .send()
            .map_err(network)?;

        let status = res.status().as_u16();
        let body = res.text().map_err(network)?;
        debug!(status, body_len = body.len(), "Response received from endpoint");
        Ok(EndpointReply { status, body })
    }
}

/// Map a reply onto a match result or a submit error.
///
/// A rejecting status reads the optional `error` field leniently: an empty
/// or malformed body just means there is no server text. A success status
/// must carry a well-formed result.
pub fn interpret_reply(reply: &EndpointReply) -> Result<SubmissionResult, SubmitError> {
    if !reply.is_success() {
        let message = serde_json::from_str::<ErrorBody>(&reply.body)
            .ok()
            .and_then(|b| b.error);
        warn!(status = reply.status, error = ?message, "Server rejected submission");
        return Err(SubmitError::Server {
            status: reply.status,
            message,
        });
    }

    serde_json::from_str::<SubmissionResult>(&reply.body)
        .map_err(|e| SubmitError::Parse(e.to_string()))
}

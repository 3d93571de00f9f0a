// Thin reqwest client for the host platform's publish API. Posts and
// comments are published on behalf of the current user; failures bubble up
// as strings through the SharePublisher port and are never retried here.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::domain::ports::SharePublisher;

#[derive(Debug, Serialize)]
struct SubmitPostRequest<'a> {
    title: &'a str,
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct SubmitCommentRequest<'a> {
    post_id: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct PublishResponse {
    url: String,
}

#[derive(Clone)]
pub struct HostClient {
    http: reqwest::Client,
    base_url: String,
}

impl HostClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    async fn publish<T: Serialize>(&self, path: &str, payload: &T) -> Result<String, String> {
        let url = format!("{}{path}", self.base_url);
        let response = self
            .http
            .post(url)
            .json(payload)
            .send()
            .await
            .map_err(|e| format!("host request failed: {e}"))?;

        if !response.status().is_success() {
            return Err(format!("host returned {}", response.status()));
        }

        response
            .json::<PublishResponse>()
            .await
            .map(|r| r.url)
            .map_err(|e| format!("host response was malformed: {e}"))
    }
}

#[async_trait]
impl SharePublisher for HostClient {
    async fn publish_post(&self, title: &str, body: &str) -> Result<String, String> {
        self.publish("/api/posts", &SubmitPostRequest { title, text: body })
            .await
    }

    async fn publish_comment(&self, post_id: &str, body: &str) -> Result<String, String> {
        self.publish("/api/comments", &SubmitCommentRequest { post_id, text: body })
            .await
    }
}

// Reqwest adapter for the word-validity collaborator.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::domain::ports::WordJudge;

#[derive(Debug, Serialize)]
struct LookupRequest<'a> {
    word: &'a str,
}

#[derive(Debug, Deserialize)]
struct LookupResponse {
    exists: bool,
}

#[derive(Clone)]
pub struct DictionaryClient {
    http: reqwest::Client,
    base_url: String,
}

impl DictionaryClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }
}

#[async_trait]
impl WordJudge for DictionaryClient {
    async fn exists(&self, word: &str) -> Result<bool, String> {
        let url = format!("{}/api/dictionary/lookup", self.base_url);
        let response = self
            .http
            .post(url)
            .json(&LookupRequest { word })
            .send()
            .await
            .map_err(|e| format!("dictionary request failed: {e}"))?;

        if !response.status().is_success() {
            return Err(format!("dictionary returned {}", response.status()));
        }

        response
            .json::<LookupResponse>()
            .await
            .map(|r| r.exists)
            .map_err(|e| format!("dictionary response was malformed: {e}"))
    }
}

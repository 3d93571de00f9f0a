// Score sharing workflow: pick a caption, forward one publish request to the
// host platform. Failures are reported to the caller, never retried.

use crate::domain::errors::ShareError;
use crate::domain::ports::SharePublisher;
use rand::Rng;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareType {
    Post,
    Comment,
}

impl ShareType {
    /// Parses the wire value; anything else is a validation error.
    pub fn parse(value: &str) -> Result<Self, ShareError> {
        match value {
            "post" => Ok(ShareType::Post),
            "comment" => Ok(ShareType::Comment),
            _ => Err(ShareError::InvalidShareType),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ShareOutcome {
    pub message: String,
    pub url: String,
}

const CAPTION_TEMPLATES: [&str; 6] = [
    "The cat distribution system blessed me with {score} cats in Karma Katcher! Who says you can't catch luck?",
    "Just caught {score} virtual cats! The cat distribution system works in mysterious ways...",
    "Karma Katcher update: {score} cats successfully redistributed to loving homes (mine)!",
    "Breaking: Local human catches {score} cats from tree. Cat distribution system efficiency at all-time high!",
    "Tree shaking level: Expert. Cats caught: {score}. The cat distribution system chose me!",
    "Successfully intercepted {score} cats from the cat distribution system! My net game is strong",
];

/// Picks one caption template at random and embeds the score.
pub fn share_caption<R: Rng>(score: u32, rng: &mut R) -> String {
    let template = CAPTION_TEMPLATES[rng.gen_range(0..CAPTION_TEMPLATES.len())];
    let caption = template.replace("{score}", &score.to_string());
    format!("{caption}\n\nPlay Karma Katcher and test your luck with the cat distribution system!")
}

fn post_title(score: u32) -> String {
    format!("Caught {score} cats in Karma Katcher! The cat distribution system is real!")
}

pub struct ShareScore {
    publisher: Arc<dyn SharePublisher>,
}

impl ShareScore {
    pub fn new(publisher: Arc<dyn SharePublisher>) -> Self {
        Self { publisher }
    }

    pub async fn execute<R: Rng>(
        &self,
        score: u32,
        username: &str,
        share_type: ShareType,
        post_id: Option<String>,
        rng: &mut R,
    ) -> Result<ShareOutcome, ShareError> {
        let caption = share_caption(score, rng);

        let result = match share_type {
            ShareType::Post => self.publisher.publish_post(&post_title(score), &caption).await,
            ShareType::Comment => {
                let post_id = post_id.ok_or(ShareError::MissingPostId)?;
                self.publisher.publish_comment(&post_id, &caption).await
            }
        };

        match result {
            Ok(url) => {
                info!(score, username, ?share_type, %url, "score shared");
                Ok(ShareOutcome {
                    message: match share_type {
                        ShareType::Post => "Score shared as post successfully!".to_string(),
                        ShareType::Comment => "Score shared as comment successfully!".to_string(),
                    },
                    url,
                })
            }
            Err(e) => {
                warn!(score, username, error = %e, "share publish failed");
                Err(ShareError::PublishFailure)
            }
        }
    }
}

//! Telegram Bot API transport

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use super::MessageChannel;
use super::error::NotifyError;
use crate::config::NotifierConfig;

/// sendMessage request body
#[derive(Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'static str,
}

/// Bot API response envelope
#[derive(Deserialize)]
struct BotApiResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// Maps a Bot API reply to success or a rejection that keeps the HTTP
/// status. Error pages from proxies are often not JSON.
fn check_reply(status: StatusCode, body: &str) -> Result<(), NotifyError> {
    let parsed = serde_json::from_str::<BotApiResponse>(body).ok();
    if status.is_success() && parsed.as_ref().is_some_and(|reply| reply.ok) {
        return Ok(());
    }

    let description = parsed
        .and_then(|reply| reply.description)
        .unwrap_or_else(|| snippet(body));
    Err(NotifyError::Rejected(format!(
        "HTTP {}: {}",
        status.as_u16(),
        description
    )))
}

fn snippet(body: &str) -> String {
    const MAX_CHARS: usize = 120;
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "empty body".to_string();
    }
    trimmed.chars().take(MAX_CHARS).collect()
}

/// Sends chat messages through `{api_base}/bot{token}/sendMessage`.
pub struct TelegramChannel {
    client: reqwest::Client,
    send_url: String,
    chat_id: String,
}

impl TelegramChannel {
    pub fn new(config: &NotifierConfig) -> Result<Self, NotifyError> {
        if !config.is_enabled() {
            return Err(NotifyError::Disabled);
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;

        Ok(Self {
            client,
            send_url: format!(
                "{}/bot{}/sendMessage",
                config.api_base.trim_end_matches('/'),
                config.bot_token
            ),
            chat_id: config.chat_id.clone(),
        })
    }
}

#[async_trait]
impl MessageChannel for TelegramChannel {
    async fn send_message(&self, text: &str) -> Result<(), NotifyError> {
        let response = self
            .client
            .post(&self.send_url)
            .json(&SendMessageRequest {
                chat_id: &self.chat_id,
                text,
                parse_mode: "HTML",
            })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        check_reply(status, &body)?;

        debug!(chat_id = %self.chat_id, "Chat message delivered");
        Ok(())
    }
}

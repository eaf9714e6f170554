use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use crate::config::AppConfig;
use crate::{Error, Result};

const API_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Messaging channel operations the publisher depends on
#[async_trait::async_trait]
pub trait ChannelApi: Send + Sync {
    /// Send a message to the channel, returning its message id
    async fn send_message(&self, text: &str) -> Result<i64>;

    /// Pin a previously sent message
    async fn pin_message(&self, message_id: i64) -> Result<()>;
}

#[derive(Deserialize)]
struct ApiEnvelope<T> {
    ok: bool,
    description: Option<String>,
    result: Option<T>,
}

#[derive(Deserialize)]
struct SentMessage {
    message_id: i64,
}

/// Bot identity as reported by getMe
#[derive(Debug, Clone, Deserialize)]
pub struct BotProfile {
    pub first_name: String,
    #[serde(default)]
    pub username: Option<String>,
}

/// Telegram Bot API client for one target channel
pub struct TelegramBot {
    client: Client,
    bot_token: String,
    channel_id: String,
}

impl TelegramBot {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let bot_token = config
            .telegram
            .bot_token
            .clone()
            .ok_or_else(|| Error::Config("Telegram bot token not configured".to_string()))?;
        let channel_id = config
            .telegram
            .channel_id
            .clone()
            .ok_or_else(|| Error::Config("Telegram channel id not configured".to_string()))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(API_REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            bot_token,
            channel_id,
        })
    }

    fn method_url(&self, method: &str) -> String {
        format!("https://api.telegram.org/bot{}/{}", self.bot_token, method)
    }

    async fn call<T: serde::de::DeserializeOwned>(
        &self,
        method: &str,
        payload: serde_json::Value,
    ) -> Result<T> {
        let response = self
            .client
            .post(self.method_url(method))
            .json(&payload)
            .send()
            .await
            .map_err(|e| Error::Publish(format!("Telegram {method} request failed: {e}")))?;

        let envelope: ApiEnvelope<T> = response
            .json()
            .await
            .map_err(|e| Error::Publish(format!("Failed to parse Telegram {method} response: {e}")))?;

        if !envelope.ok {
            let reason = envelope.description.unwrap_or_else(|| "unknown error".to_string());
            return Err(Error::Publish(format!("Telegram {method} rejected: {reason}")));
        }

        envelope
            .result
            .ok_or_else(|| Error::Publish(format!("Telegram {method} returned no result")))
    }

    /// Bot identity lookup, used by the connectivity test
    pub async fn get_me(&self) -> Result<BotProfile> {
        self.call("getMe", json!({})).await
    }
}

#[async_trait::async_trait]
impl ChannelApi for TelegramBot {
    async fn send_message(&self, text: &str) -> Result<i64> {
        let sent: SentMessage = self
            .call(
                "sendMessage",
                json!({
                    "chat_id": self.channel_id,
                    "text": text,
                    "parse_mode": "Markdown",
                    "disable_web_page_preview": false,
                }),
            )
            .await?;

        tracing::debug!("Message sent, id {}", sent.message_id);
        Ok(sent.message_id)
    }

    async fn pin_message(&self, message_id: i64) -> Result<()> {
        let _: bool = self
            .call(
                "pinChatMessage",
                json!({
                    "chat_id": self.channel_id,
                    "message_id": message_id,
                    "disable_notification": true,
                }),
            )
            .await?;

        tracing::debug!("Message {} pinned", message_id);
        Ok(())
    }
}

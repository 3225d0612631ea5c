use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use super::types::{Notifier, NotifyError};

/// Discord REST API client
/// Posts channel messages with a bot token
pub struct DiscordNotifier {
    client: Client,
    bot_token: String,
    base_url: String,
}

#[derive(Serialize)]
struct MessagePayload<'a> {
    content: &'a str,
}

impl DiscordNotifier {
    pub fn new(bot_token: String) -> Self {
        Self {
            client: Client::new(),
            bot_token,
            base_url: "https://discord.com/api/v10".to_string(),
        }
    }

    fn message_url(&self, channel_id: u64) -> String {
        format!("{}/channels/{}/messages", self.base_url, channel_id)
    }
}

#[async_trait]
impl Notifier for DiscordNotifier {
    async fn send(&self, channel_id: u64, text: &str) -> Result<(), NotifyError> {
        let response = self
            .client
            .post(self.message_url(channel_id))
            .header("Authorization", format!("Bot {}", self.bot_token))
            .json(&MessagePayload { content: text })
            .send()
            .await
            .map_err(|e| NotifyError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(NotifyError::Api(response.status().as_u16()));
        }

        Ok(())
    }
}

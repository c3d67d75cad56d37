//! Outbound client for a Messages-style generative text API.

use assetboard_core::chat::ChatMessage;
use assetboard_core::error::CoreError;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::{Deserialize, Serialize};

use crate::config::ChatConfig;

const API_VERSION: &str = "2023-06-01";
const MESSAGES_PATH: &str = "/v1/messages";

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: &'a [ChatMessage],
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentBlock {
    Text { text: String },
    #[serde(other)]
    Other,
}

#[derive(Clone, Debug)]
pub struct ChatClient {
    http_client: reqwest::Client,
    api_base: String,
    model: String,
    max_tokens: u32,
}

impl ChatClient {
    /// Build a client from configuration. Returns `Ok(None)` when no API key
    /// is configured.
    pub fn from_config(config: &ChatConfig) -> Result<Option<Self>, CoreError> {
        let Some(api_key) = config.api_key.as_deref() else {
            return Ok(None);
        };

        let mut headers = HeaderMap::new();
        let key = HeaderValue::from_str(api_key)
            .map_err(|_| CoreError::Validation("CHAT_API_KEY is not a valid header".into()))?;
        headers.insert("x-api-key", key);
        headers.insert("anthropic-version", HeaderValue::from_static(API_VERSION));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http_client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| CoreError::Internal(format!("Failed to build chat client: {e}")))?;

        Ok(Some(Self {
            http_client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
        }))
    }

    /// Send one transcript and return the assistant's text reply.
    pub async fn complete(
        &self,
        system: &str,
        messages: &[ChatMessage],
    ) -> Result<String, CoreError> {
        let request = MessagesRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            system,
            messages,
        };
        tracing::debug!(
            model = %self.model,
            messages = messages.len(),
            system_len = system.len(),
            "Sending chat request"
        );

        let response = self
            .http_client
            .post(format!("{}{}", self.api_base, MESSAGES_PATH))
            .json(&request)
            .send()
            .await
            .map_err(|e| CoreError::Upstream(format!("Chat request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(%status, body = %body, "Chat API returned an error");
            return Err(CoreError::Upstream(format!("Chat API returned {status}")));
        }

        let body: MessagesResponse = response
            .json()
            .await
            .map_err(|e| CoreError::Upstream(format!("Invalid chat response: {e}")))?;

        let reply: Vec<String> = body
            .content
            .into_iter()
            .filter_map(|block| match block {
                ContentBlock::Text { text } => Some(text),
                ContentBlock::Other => None,
            })
            .collect();
        if reply.is_empty() {
            return Err(CoreError::Upstream("Chat response contained no text".into()));
        }
        Ok(reply.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_disables_client() {
        let client = ChatClient::from_config(&ChatConfig::default()).unwrap();
        assert!(client.is_none());
    }

    #[test]
    fn trailing_slash_is_trimmed_from_base() {
        let config = ChatConfig {
            api_key: Some("test-key".into()),
            api_base: "http://localhost:9999/".into(),
            ..Default::default()
        };
        let client = ChatClient::from_config(&config).unwrap().unwrap();
        assert_eq!(client.api_base, "http://localhost:9999");
    }

    #[test]
    fn response_ignores_non_text_blocks() {
        let body: MessagesResponse = serde_json::from_str(
            r#"{"content":[{"type":"tool_use","id":"x"},{"type":"text","text":"Two assets."}]}"#,
        )
        .unwrap();
        assert_eq!(body.content.len(), 2);
        assert!(matches!(&body.content[1], ContentBlock::Text { text } if text == "Two assets."));
    }
}

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{AnalysisResult, ContentAnalyzer};
use crate::ai::prompt::{
    build_commentary_prompt, build_summary_prompt, parse_commentary, truncate_chars,
    COMMENTARY_MAX_TOKENS, SUMMARY_MAX_CHARS,
};
use crate::trends::{Period, TrendingItem};
use crate::{Error, Result};

const AI_REQUEST_TIMEOUT_SECS: u64 = 120;

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Option<Vec<ChatChoice>>,
    error: Option<ApiError>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ApiError {
    message: String,
}

/// DeepSeek provider (OpenAI-compatible chat completions endpoint)
pub struct DeepSeekAnalyzer {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    language: String,
    summary_max_tokens: u32,
}

impl DeepSeekAnalyzer {
    pub fn new(
        api_key: &str,
        base_url: &str,
        model: &str,
        language: &str,
        summary_max_tokens: u32,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(AI_REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
            language: language.to_string(),
            summary_max_tokens,
        })
    }

    async fn chat(&self, prompt: &str, max_tokens: u32) -> Result<String> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            temperature: 0.7,
            max_tokens,
        };

        let url = format!("{}/chat/completions", self.base_url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Analysis(format!("DeepSeek request failed: {e}")))?;

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| Error::Analysis(format!("Failed to parse DeepSeek response: {e}")))?;

        if let Some(error) = chat_response.error {
            return Err(Error::Analysis(format!("DeepSeek API error: {}", error.message)));
        }

        let content = chat_response
            .choices
            .and_then(|c| c.into_iter().next())
            .and_then(|c| c.message.content)
            .unwrap_or_default();

        Ok(content)
    }
}

#[async_trait::async_trait]
impl ContentAnalyzer for DeepSeekAnalyzer {
    fn name(&self) -> &'static str {
        "deepseek"
    }

    async fn analyze(&self, items: &[TrendingItem], period: Period) -> Result<AnalysisResult> {
        let commentary_prompt = build_commentary_prompt(items, period, &self.language);
        let commentary_response = self.chat(&commentary_prompt, COMMENTARY_MAX_TOKENS).await?;
        let commentary = parse_commentary(&commentary_response);
        tracing::debug!(
            "DeepSeek returned commentary for {}/{} items",
            commentary.len(),
            items.len()
        );

        let summary_prompt = build_summary_prompt(items, period, &self.language);
        let summary = self.chat(&summary_prompt, self.summary_max_tokens).await?;

        Ok(AnalysisResult {
            summary: truncate_chars(summary.trim(), SUMMARY_MAX_CHARS).to_string(),
            commentary,
        })
    }
}

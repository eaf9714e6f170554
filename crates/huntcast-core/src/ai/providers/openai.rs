use async_openai::{
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};

use super::{AnalysisResult, ContentAnalyzer};
use crate::ai::prompt::{
    build_commentary_prompt, build_summary_prompt, parse_commentary, truncate_chars,
    COMMENTARY_MAX_TOKENS, SUMMARY_MAX_CHARS,
};
use crate::trends::{Period, TrendingItem};
use crate::{Error, Result};

/// OpenAI provider
pub struct OpenAiAnalyzer {
    client: Client<async_openai::config::OpenAIConfig>,
    model: String,
    language: String,
    summary_max_tokens: u32,
}

impl OpenAiAnalyzer {
    pub fn new(api_key: &str, model: &str, language: &str, summary_max_tokens: u32) -> Self {
        let config = async_openai::config::OpenAIConfig::new().with_api_key(api_key);
        let client = Client::with_config(config);

        Self {
            client,
            model: model.to_string(),
            language: language.to_string(),
            summary_max_tokens,
        }
    }

    async fn chat(&self, prompt: &str, max_tokens: u32) -> Result<String> {
        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(vec![ChatCompletionRequestMessage::User(
                ChatCompletionRequestUserMessageArgs::default()
                    .content(prompt)
                    .build()
                    .map_err(|e| Error::Analysis(e.to_string()))?,
            )])
            .max_tokens(max_tokens)
            .build()
            .map_err(|e| Error::Analysis(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| Error::Analysis(format!("OpenAI request failed: {e}")))?;

        let content = response
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .unwrap_or_default();

        Ok(content)
    }
}

#[async_trait::async_trait]
impl ContentAnalyzer for OpenAiAnalyzer {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn analyze(&self, items: &[TrendingItem], period: Period) -> Result<AnalysisResult> {
        let commentary_prompt = build_commentary_prompt(items, period, &self.language);
        let commentary_response = self.chat(&commentary_prompt, COMMENTARY_MAX_TOKENS).await?;
        let commentary = parse_commentary(&commentary_response);
        tracing::debug!(
            "OpenAI returned commentary for {}/{} items",
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

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
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

#[derive(Serialize)]
struct GeminiPart {
    text: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
    temperature: f32,
}

#[derive(Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<GeminiCandidate>>,
    error: Option<GeminiError>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: GeminiContentResponse,
}

#[derive(Deserialize)]
struct GeminiContentResponse {
    parts: Vec<GeminiPartResponse>,
}

#[derive(Deserialize)]
struct GeminiPartResponse {
    text: String,
}

#[derive(Deserialize)]
struct GeminiError {
    message: String,
}

/// Google Gemini provider
pub struct GeminiAnalyzer {
    client: Client,
    api_key: String,
    model: String,
    language: String,
    summary_max_tokens: u32,
}

impl GeminiAnalyzer {
    pub fn new(api_key: &str, model: &str, language: &str, summary_max_tokens: u32) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(AI_REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.to_string(),
            model: model.to_string(),
            language: language.to_string(),
            summary_max_tokens,
        })
    }

    async fn chat(&self, prompt: &str, max_tokens: u32) -> Result<String> {
        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent?key={}",
            self.model, self.api_key
        );

        let request = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                max_output_tokens: max_tokens,
                temperature: 0.7,
            },
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Analysis(format!("Gemini request failed: {e}")))?;

        let gemini_response: GeminiResponse = response
            .json()
            .await
            .map_err(|e| Error::Analysis(format!("Failed to parse Gemini response: {e}")))?;

        if let Some(error) = gemini_response.error {
            return Err(Error::Analysis(format!("Gemini API error: {}", error.message)));
        }

        let content = gemini_response
            .candidates
            .and_then(|c| c.into_iter().next())
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .unwrap_or_default();

        Ok(content)
    }
}

#[async_trait::async_trait]
impl ContentAnalyzer for GeminiAnalyzer {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn analyze(&self, items: &[TrendingItem], period: Period) -> Result<AnalysisResult> {
        let commentary_prompt = build_commentary_prompt(items, period, &self.language);
        let commentary_response = self.chat(&commentary_prompt, COMMENTARY_MAX_TOKENS).await?;
        let commentary = parse_commentary(&commentary_response);
        tracing::debug!(
            "Gemini returned commentary for {}/{} items",
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

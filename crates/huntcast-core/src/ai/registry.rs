use std::sync::Arc;

use super::prompt::ai_language;
use super::providers::{ContentAnalyzer, DeepSeekAnalyzer, GeminiAnalyzer, OpenAiAnalyzer};
use crate::config::AppConfig;
use crate::{Error, Result};

/// Maps a configured provider name to a concrete analyzer. Resolution
/// happens once at startup; the returned instance is reused for the
/// process lifetime.
pub struct ProviderRegistry;

impl ProviderRegistry {
    pub fn supported() -> &'static [&'static str] {
        &["deepseek", "openai", "gemini"]
    }

    /// Resolve the configured provider. Unknown names and missing/empty
    /// credentials are configuration errors.
    pub fn resolve(config: &AppConfig) -> Result<Arc<dyn ContentAnalyzer>> {
        let language = ai_language(&config.ai.output_language);
        let summary_max_tokens = config.ai.summary_max_tokens.max(1);

        match config.ai.provider.as_str() {
            "deepseek" => {
                let api_key = required_key(&config.ai.deepseek_api_key, "DeepSeek API key")?;
                Ok(Arc::new(DeepSeekAnalyzer::new(
                    api_key,
                    &config.ai.deepseek_base_url,
                    &config.ai.deepseek_model,
                    language,
                    summary_max_tokens,
                )?))
            }
            "openai" => {
                let api_key = required_key(&config.ai.openai_api_key, "OpenAI API key")?;
                Ok(Arc::new(OpenAiAnalyzer::new(
                    api_key,
                    &config.ai.openai_model,
                    language,
                    summary_max_tokens,
                )))
            }
            "gemini" => {
                let api_key = required_key(&config.ai.gemini_api_key, "Gemini API key")?;
                Ok(Arc::new(GeminiAnalyzer::new(
                    api_key,
                    &config.ai.gemini_model,
                    language,
                    summary_max_tokens,
                )?))
            }
            other => Err(Error::Config(format!(
                "Unknown AI provider: {other} (supported: {})",
                Self::supported().join(", ")
            ))),
        }
    }
}

fn required_key<'a>(key: &'a Option<String>, what: &str) -> Result<&'a str> {
    key.as_deref()
        .filter(|k| !k.trim().is_empty())
        .ok_or_else(|| Error::Config(format!("{what} not configured")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_unknown_provider_is_config_error() {
        let mut config = AppConfig::default();
        config.ai.provider = "skynet".into();
        assert!(matches!(
            ProviderRegistry::resolve(&config),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn resolve_without_credential_is_config_error() {
        let mut config = AppConfig::default();
        config.ai.provider = "openai".into();
        assert!(matches!(
            ProviderRegistry::resolve(&config),
            Err(Error::Config(_))
        ));

        config.ai.openai_api_key = Some(String::new());
        assert!(matches!(
            ProviderRegistry::resolve(&config),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn resolve_known_provider_with_credential() {
        let mut config = AppConfig::default();
        config.ai.provider = "openai".into();
        config.ai.openai_api_key = Some("sk-test".into());
        let analyzer = ProviderRegistry::resolve(&config).unwrap();
        assert_eq!(analyzer.name(), "openai");
    }
}

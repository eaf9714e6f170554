use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub product_hunt: ProductHuntConfig,
    #[serde(default)]
    pub ai: AiConfig,
    #[serde(default)]
    pub telegram: TelegramConfig,
    #[serde(default)]
    pub schedule: ScheduleConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductHuntConfig {
    /// Product Hunt developer token
    #[serde(default)]
    pub developer_token: Option<String>,
    /// GraphQL API endpoint
    #[serde(default = "default_ph_api_url")]
    pub api_url: String,
    /// Item cap for the daily digest
    #[serde(default = "default_daily_limit")]
    pub daily_limit: u32,
    /// Item cap for the weekly digest
    #[serde(default = "default_periodic_limit")]
    pub weekly_limit: u32,
    /// Item cap for the monthly digest
    #[serde(default = "default_periodic_limit")]
    pub monthly_limit: u32,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for ProductHuntConfig {
    fn default() -> Self {
        Self {
            developer_token: None,
            api_url: default_ph_api_url(),
            daily_limit: default_daily_limit(),
            weekly_limit: default_periodic_limit(),
            monthly_limit: default_periodic_limit(),
            request_timeout_secs: default_timeout(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    /// AI provider: "deepseek", "openai", "gemini"
    #[serde(default = "default_ai_provider")]
    pub provider: String,
    /// Output language code ("en", "zh")
    #[serde(default = "default_output_language")]
    pub output_language: String,
    /// DeepSeek API key
    #[serde(default)]
    pub deepseek_api_key: Option<String>,
    /// DeepSeek-compatible base URL
    #[serde(default = "default_deepseek_base_url")]
    pub deepseek_base_url: String,
    /// DeepSeek model name
    #[serde(default = "default_deepseek_model")]
    pub deepseek_model: String,
    /// OpenAI API key
    #[serde(default)]
    pub openai_api_key: Option<String>,
    /// OpenAI model name
    #[serde(default = "default_openai_model")]
    pub openai_model: String,
    /// Gemini API key
    #[serde(default)]
    pub gemini_api_key: Option<String>,
    /// Gemini model name
    #[serde(default = "default_gemini_model")]
    pub gemini_model: String,
    /// Max tokens for the overall period summary
    #[serde(default = "default_summary_max_tokens")]
    pub summary_max_tokens: u32,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            provider: default_ai_provider(),
            output_language: default_output_language(),
            deepseek_api_key: None,
            deepseek_base_url: default_deepseek_base_url(),
            deepseek_model: default_deepseek_model(),
            openai_api_key: None,
            openai_model: default_openai_model(),
            gemini_api_key: None,
            gemini_model: default_gemini_model(),
            summary_max_tokens: default_summary_max_tokens(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TelegramConfig {
    /// Bot token
    #[serde(default)]
    pub bot_token: Option<String>,
    /// Target channel id (@name or -100... numeric id)
    #[serde(default)]
    pub channel_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// IANA time zone for all triggers
    #[serde(default = "default_timezone")]
    pub timezone: String,
    /// Trigger time of day, "HH:MM"
    #[serde(default = "default_daily_time")]
    pub daily_time: String,
    /// Weekday for the weekly digest
    #[serde(default = "default_weekly_day")]
    pub weekly_day: String,
    /// Day of month for the monthly digest
    #[serde(default = "default_monthly_day")]
    pub monthly_day: u32,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
            daily_time: default_daily_time(),
            weekly_day: default_weekly_day(),
            monthly_day: default_monthly_day(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_ph_api_url() -> String {
    "https://api.producthunt.com/v2/api/graphql".to_string()
}

fn default_daily_limit() -> u32 {
    20
}

fn default_periodic_limit() -> u32 {
    20
}

fn default_timeout() -> u64 {
    30
}

fn default_ai_provider() -> String {
    "deepseek".to_string()
}

fn default_output_language() -> String {
    "en".to_string()
}

fn default_deepseek_base_url() -> String {
    "https://api.deepseek.com".to_string()
}

fn default_deepseek_model() -> String {
    "deepseek-chat".to_string()
}

fn default_openai_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_gemini_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_summary_max_tokens() -> u32 {
    1000
}

fn default_timezone() -> String {
    "Asia/Shanghai".to_string()
}

fn default_daily_time() -> String {
    "09:00".to_string()
}

fn default_weekly_day() -> String {
    "monday".to_string()
}

fn default_monthly_day() -> u32 {
    1
}

fn env_credential(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|v| !v.trim().is_empty())
}

impl AppConfig {
    /// Load configuration from the default path or return defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from an explicit path
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        let mut config: Self = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))?
        } else {
            Self::default()
        };
        config.apply_env_credentials();
        Ok(config)
    }

    /// Credentials absent from the file may come from the environment
    fn apply_env_credentials(&mut self) {
        if self.product_hunt.developer_token.is_none() {
            self.product_hunt.developer_token = env_credential("PRODUCT_HUNT_TOKEN");
        }
        if self.ai.deepseek_api_key.is_none() {
            self.ai.deepseek_api_key = env_credential("DEEPSEEK_API_KEY");
        }
        if self.ai.openai_api_key.is_none() {
            self.ai.openai_api_key = env_credential("OPENAI_API_KEY");
        }
        if self.ai.gemini_api_key.is_none() {
            self.ai.gemini_api_key = env_credential("GEMINI_API_KEY");
        }
        if self.telegram.bot_token.is_none() {
            self.telegram.bot_token = env_credential("TELEGRAM_BOT_TOKEN");
        }
        if self.telegram.channel_id.is_none() {
            self.telegram.channel_id = env_credential("TELEGRAM_CHANNEL_ID");
        }
    }

    /// Check everything that must be present before any job logic runs.
    /// Missing credentials are fatal at startup.
    pub fn validate(&self) -> crate::Result<()> {
        require(&self.product_hunt.developer_token, "Product Hunt developer token")?;
        require(&self.telegram.bot_token, "Telegram bot token")?;
        require(&self.telegram.channel_id, "Telegram channel id")?;

        match self.ai.provider.as_str() {
            "deepseek" => require(&self.ai.deepseek_api_key, "DeepSeek API key")?,
            "openai" => require(&self.ai.openai_api_key, "OpenAI API key")?,
            "gemini" => require(&self.ai.gemini_api_key, "Gemini API key")?,
            other => {
                return Err(crate::Error::Config(format!(
                    "Unknown AI provider: {other}"
                )))
            }
        }

        self.schedule.timezone.parse::<chrono_tz::Tz>().map_err(|_| {
            crate::Error::Config(format!("Invalid time zone: {}", self.schedule.timezone))
        })?;
        parse_daily_time(&self.schedule.daily_time)?;
        if !(1..=28).contains(&self.schedule.monthly_day) {
            return Err(crate::Error::Config(format!(
                "monthly_day must be 1-28, got {}",
                self.schedule.monthly_day
            )));
        }

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/huntcast/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("huntcast")
            .join("config.toml")
    }
}

fn require(value: &Option<String>, what: &str) -> crate::Result<()> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(()),
        _ => Err(crate::Error::Config(format!("{what} not configured"))),
    }
}

/// Parse "HH:MM" into (hour, minute)
pub fn parse_daily_time(value: &str) -> crate::Result<(u32, u32)> {
    let invalid = || crate::Error::Config(format!("Invalid daily_time: {value}"));

    let (hour, minute) = value.split_once(':').ok_or_else(invalid)?;
    let hour: u32 = hour.parse().map_err(|_| invalid())?;
    let minute: u32 = minute.parse().map_err(|_| invalid())?;
    if hour > 23 || minute > 59 {
        return Err(invalid());
    }
    Ok((hour, minute))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured() -> AppConfig {
        let mut config = AppConfig::default();
        config.product_hunt.developer_token = Some("ph-token".into());
        config.ai.deepseek_api_key = Some("ds-key".into());
        config.telegram.bot_token = Some("bot-token".into());
        config.telegram.channel_id = Some("-1001234567890".into());
        config
    }

    #[test]
    fn defaults_are_sane() {
        let config = AppConfig::default();
        assert_eq!(config.ai.provider, "deepseek");
        assert_eq!(config.product_hunt.daily_limit, 20);
        assert_eq!(config.schedule.daily_time, "09:00");
        assert_eq!(config.schedule.monthly_day, 1);
    }

    #[test]
    fn validate_accepts_complete_config() {
        assert!(configured().validate().is_ok());
    }

    #[test]
    fn validate_rejects_missing_credential() {
        let mut config = configured();
        config.telegram.bot_token = None;
        assert!(matches!(config.validate(), Err(crate::Error::Config(_))));

        let mut config = configured();
        config.ai.deepseek_api_key = Some("  ".into());
        assert!(matches!(config.validate(), Err(crate::Error::Config(_))));
    }

    #[test]
    fn validate_rejects_unknown_provider() {
        let mut config = configured();
        config.ai.provider = "llama-at-home".into();
        assert!(matches!(config.validate(), Err(crate::Error::Config(_))));
    }

    #[test]
    fn validate_rejects_bad_schedule() {
        let mut config = configured();
        config.schedule.timezone = "Mars/Olympus".into();
        assert!(config.validate().is_err());

        let mut config = configured();
        config.schedule.daily_time = "25:00".into();
        assert!(config.validate().is_err());

        let mut config = configured();
        config.schedule.monthly_day = 31;
        assert!(config.validate().is_err());
    }

    #[test]
    fn parse_daily_time_variants() {
        assert_eq!(parse_daily_time("09:00").unwrap(), (9, 0));
        assert_eq!(parse_daily_time("23:59").unwrap(), (23, 59));
        assert!(parse_daily_time("9").is_err());
        assert!(parse_daily_time("aa:bb").is_err());
    }
}

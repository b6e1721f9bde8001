use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::OnceLock;

pub const DEFAULT_GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";

/// Where quiz questions come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionSource {
    Gemini,
    /// Fixed sample question, no outbound call.
    Sample,
}

impl FromStr for QuestionSource {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gemini" => Ok(Self::Gemini),
            "sample" => Ok(Self::Sample),
            other => Err(format!("unknown question source '{}'", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub question_source: QuestionSource,
    pub gemini_api_key: Option<String>,
    pub gemini_api_url: String,
    pub gemini_model: String,
    pub ai_timeout_secs: u64,
    pub uploads_dir: PathBuf,
    pub max_upload_bytes: usize,
    pub default_topic: String,
    pub static_dir: Option<PathBuf>,
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let question_source: QuestionSource =
            get_env_parse_or("QUESTION_SOURCE", QuestionSource::Gemini)?;
        let gemini_api_key = env::var("GEMINI_API_KEY").ok().filter(|k| !k.trim().is_empty());
        if question_source == QuestionSource::Gemini && gemini_api_key.is_none() {
            return Err(Error::Config(
                "Missing environment variable: GEMINI_API_KEY".to_string(),
            ));
        }

        Ok(Self {
            server_address: get_env_or("SERVER_ADDRESS", "0.0.0.0:3000"),
            question_source,
            gemini_api_key,
            gemini_api_url: get_env_or("GEMINI_API_URL", DEFAULT_GEMINI_API_URL),
            gemini_model: get_env_or("GEMINI_MODEL", DEFAULT_GEMINI_MODEL),
            ai_timeout_secs: get_env_parse_or("AI_TIMEOUT_SECS", 30)?,
            uploads_dir: PathBuf::from(get_env_or("UPLOADS_DIR", "./uploads/tmp")),
            max_upload_bytes: get_env_parse_or("MAX_UPLOAD_BYTES", 50 * 1024 * 1024)?,
            default_topic: get_env_or("DEFAULT_TOPIC", "General"),
            static_dir: env::var("STATIC_DIR").ok().map(PathBuf::from),
        })
    }

    /// Full `generateContent` endpoint for the configured model.
    pub fn generate_content_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.gemini_api_url.trim_end_matches('/'),
            self.gemini_model
        )
    }
}

fn get_env_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn get_env_parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        Err(_) => Ok(default),
    }
}

pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

pub fn get_config() -> &'static Config {
    CONFIG
        .get()
        .expect("Configuration has not been initialized")
}

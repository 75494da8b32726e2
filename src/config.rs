use std::env;

/// Default model when neither the CLI nor the environment picks one.
pub const DEFAULT_MODEL: &str = "mistralai/Mistral-7B-Instruct-v0.1";

/// Default output-length budget. The playground settings slider ranges
/// 0–4000 and starts here.
pub const DEFAULT_MAX_TOKENS: u64 = 2048;

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

pub struct Config {
    /// Inference endpoint base URL (no trailing slash).
    pub base_url: String,
    /// Bearer token for the endpoint. None sends unauthenticated requests.
    pub api_token: Option<String>,
    pub model: String,
    pub max_tokens: u64,
}

impl Config {
    pub fn from_env() -> Self {
        let base_url = match env::var("RIPPLE_API_URL") {
            Ok(url) => url.trim_end_matches('/').to_string(),
            Err(_) => {
                tracing::warn!("RIPPLE_API_URL not set — using {DEFAULT_BASE_URL}");
                DEFAULT_BASE_URL.to_string()
            }
        };

        let api_token = env::var("RIPPLE_API_TOKEN").ok();
        if api_token.is_none() {
            tracing::warn!("RIPPLE_API_TOKEN not set — requests will be unauthenticated");
        }

        let model = env::var("RIPPLE_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let max_tokens = env::var("RIPPLE_MAX_TOKENS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_MAX_TOKENS);

        Config {
            base_url,
            api_token,
            model,
            max_tokens,
        }
    }
}

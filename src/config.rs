#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub api_base: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: Option<String>,
    pub gemini: Option<GeminiConfig>,
}

impl AppConfig {
    /// Both dependencies are optional: a missing credential leaves the
    /// corresponding component unconfigured instead of failing startup.
    pub fn from_env() -> Self {
        let database_url = std::env::var("DATABASE_URL").ok().filter(|v| !v.is_empty());

        let gemini = std::env::var("GEMINI_API_KEY")
            .ok()
            .filter(|v| !v.is_empty())
            .map(|api_key| GeminiConfig {
                api_key,
                model: std::env::var("GEMINI_MODEL")
                    .unwrap_or_else(|_| "gemini-1.5-flash".into()),
                api_base: std::env::var("GEMINI_API_BASE").unwrap_or_else(|_| {
                    "https://generativelanguage.googleapis.com/v1beta".into()
                }),
                timeout_secs: std::env::var("GEMINI_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse::<u64>().ok())
                    .unwrap_or(60),
            });

        Self {
            database_url,
            gemini,
        }
    }
}

use std::sync::Arc;

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::analyses::repo;
use crate::config::AppConfig;
use crate::vision::{GeminiVision, VisionClient};

#[derive(Clone)]
pub struct AppState {
    pub db: Option<PgPool>,
    pub vision: Option<Arc<dyn VisionClient>>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env());

        let db = match &config.database_url {
            Some(url) => {
                let pool = PgPoolOptions::new()
                    .max_connections(10)
                    .connect(url)
                    .await
                    .context("connect to database")?;
                repo::create_table_if_not_exists(&pool)
                    .await
                    .context("create analyses table")?;
                tracing::info!("storage configured");
                Some(pool)
            }
            None => {
                tracing::warn!("DATABASE_URL not set, analyses will not be persisted");
                None
            }
        };

        let vision = match &config.gemini {
            Some(gemini) => {
                let client = GeminiVision::new(gemini).context("build vision client")?;
                tracing::info!(model = %gemini.model, "vision model configured");
                Some(Arc::new(client) as Arc<dyn VisionClient>)
            }
            None => {
                tracing::warn!("GEMINI_API_KEY not set, image analysis is disabled");
                None
            }
        };

        Ok(Self { db, vision, config })
    }

    pub fn from_parts(
        db: Option<PgPool>,
        vision: Option<Arc<dyn VisionClient>>,
        config: Arc<AppConfig>,
    ) -> Self {
        Self { db, vision, config }
    }

    pub fn fake() -> Self {
        use async_trait::async_trait;
        use bytes::Bytes;

        #[derive(Clone)]
        struct FakeVision;
        #[async_trait]
        impl VisionClient for FakeVision {
            async fn analyze(
                &self,
                _image: Bytes,
                _mime_type: &str,
                _instruction: &str,
            ) -> anyhow::Result<String> {
                Ok(r#"{
                    "overview": "A plate of buttered toast.",
                    "short_name": "toast",
                    "items": [{
                        "name": "toast",
                        "type": "carb",
                        "portion_size": "2 slices",
                        "cooking_method": "toasted",
                        "macros_g": {"protein": 6.0, "carbs": 30.0, "fat": 10.0},
                        "calories_kcal": {"low": 220.0, "high": 280.0},
                        "assumptions": "Standard white bread with butter."
                    }],
                    "total_calories_kcal": {"low": 220.0, "high": 280.0},
                    "total_macros": {
                        "proteins": {"low": 5.0, "high": 7.0},
                        "carbs": {"low": 28.0, "high": 32.0},
                        "fat": {"low": 8.0, "high": 12.0}
                    },
                    "notes": "Estimates assume a standard dinner plate for scale."
                }"#
                .to_string())
            }
        }

        let config = Arc::new(AppConfig {
            database_url: None,
            gemini: None,
        });

        Self {
            db: None,
            vision: Some(Arc::new(FakeVision) as Arc<dyn VisionClient>),
            config,
        }
    }
}

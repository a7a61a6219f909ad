use crate::config::AppConfig;
use crate::llm::{CannedGenerator, Generated, GenerationService, OpenAiGenerator};
use crate::store::{MemoryStore, PgStore, Store};
use anyhow::Context;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn Store>,
    pub generator: Arc<dyn GenerationService>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let db = sqlx::postgres::PgPoolOptions::new()
            .max_connections(10)
            .connect(&config.database_url)
            .await
            .context("connect to database")?;

        sqlx::migrate!("./migrations")
            .run(&db)
            .await
            .context("run migrations")?;

        let generator = Arc::new(OpenAiGenerator::new(&config.llm).context("build llm client")?)
            as Arc<dyn GenerationService>;

        Ok(Self {
            config,
            store: Arc::new(PgStore::new(db)),
            generator,
        })
    }

    pub fn from_parts(
        config: Arc<AppConfig>,
        store: Arc<dyn Store>,
        generator: Arc<dyn GenerationService>,
    ) -> Self {
        Self {
            config,
            store,
            generator,
        }
    }

    /// In-memory store and a generator that answers with an empty plan.
    pub fn fake() -> Self {
        Self::from_parts(
            Arc::new(AppConfig::test_default()),
            Arc::new(MemoryStore::new()),
            Arc::new(CannedGenerator::replying(Generated::Text(
                r#"{"meals": []}"#.into(),
            ))),
        )
    }
}

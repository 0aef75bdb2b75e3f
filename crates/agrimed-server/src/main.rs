use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use agrimed::{MedicineRepository, PlantAdvisor, PromptRepository};

mod adapters;
mod application;
mod config;
mod error;
mod extract;
mod models;
mod routes;

#[cfg(test)]
mod test_support;

use adapters::{
    GeminiAdvisor, InMemoryMedicineRepository, InMemoryPromptRepository, PgMedicineRepository,
    PgPromptRepository,
};
use application::{AdvisorService, CatalogService};
use config::Config;

/// Application services over whichever store was configured at start-up
pub type AppCatalogService = CatalogService<dyn MedicineRepository>;
pub type AppAdvisorService = AdvisorService<dyn PromptRepository>;

/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<AppCatalogService>,
    pub advisor: Arc<AppAdvisorService>,
    /// "postgres" or "memory"
    pub store: &'static str,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info")),
        )
        .init();

    tracing::info!("🌱 Agrimed API initializing...");

    let config = Config::from_env().context("Failed to load configuration")?;
    error::init_development_mode(config.development);
    if config.development {
        tracing::warn!("⚠️  Development mode - internal error details are exposed");
    }

    // Storage: Postgres when configured, otherwise in-memory
    let (pool, medicines, prompts, store): (
        Option<PgPool>,
        Arc<dyn MedicineRepository>,
        Arc<dyn PromptRepository>,
        &'static str,
    ) = match &config.database_url {
        Some(url) => {
            let pool = PgPoolOptions::new()
                .max_connections(config.database_max_connections)
                .connect(url)
                .await
                .context("Failed to connect to Postgres")?;

            sqlx::migrate!()
                .run(&pool)
                .await
                .context("Failed to run database migrations")?;

            tracing::info!("✅ Database migrations completed");

            (
                Some(pool.clone()),
                Arc::new(PgMedicineRepository::new(pool.clone())) as Arc<dyn MedicineRepository>,
                Arc::new(PgPromptRepository::new(pool)) as Arc<dyn PromptRepository>,
                "postgres",
            )
        }
        None => {
            tracing::warn!("⚠️  No DATABASE_URL set - using in-memory store (not persisted)");
            (
                None,
                Arc::new(InMemoryMedicineRepository::new()) as Arc<dyn MedicineRepository>,
                Arc::new(InMemoryPromptRepository::new()) as Arc<dyn PromptRepository>,
                "memory",
            )
        }
    };

    // Initialize AI advisor if configured
    let advisor = config.gemini_api_key.as_ref().map(|key| {
        let mut gemini = GeminiAdvisor::new(key.clone());
        if let Some(model) = &config.gemini_model {
            gemini = gemini.with_model(model.clone());
        }
        tracing::info!("🤖 AI advisor initialized ({})", gemini.model_id());
        Arc::new(gemini) as Arc<dyn PlantAdvisor>
    });

    if advisor.is_none() {
        tracing::warn!("⚠️  No GEMINI_API_KEY set - AI consultations disabled");
    }

    let state = AppState {
        catalog: Arc::new(CatalogService::new(medicines)),
        advisor: Arc::new(AdvisorService::new(advisor, prompts, config.ai_timeout)),
        store,
    };

    let router = routes::build_router(state);

    let addr = config.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("📚 Swagger UI: /swagger-ui");
    tracing::info!("✅ Agrimed API listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    if let Some(pool) = pool {
        pool.close().await;
        tracing::info!("Database pool closed");
    }
    tracing::info!("👋 Agrimed API stopped");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

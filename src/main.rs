use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use repbook::config::Config;
use repbook::repositories::{ExerciseRepository, PlanRepository};
use repbook::{db, initialize_store};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "repbook=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;

    tracing::info!("Opening database: {}", config.database_url);

    let pool = db::create_pool(&config.database_url)?;

    // Migrate and seed; a schema failure here must stop startup.
    initialize_store(&pool).await?;

    let exercise_count = ExerciseRepository::new(pool.clone()).count().await?;
    let plans = PlanRepository::new(pool.clone()).list_with_exercises().await?;

    tracing::info!(
        "Store ready: {} exercises in the catalog, {} saved plans",
        exercise_count,
        plans.len()
    );

    Ok(())
}

use std::sync::Arc;

use anyhow::Context;
use bookshelf_app::{modules, PgBookStore};
use bookshelf_kernel::{settings::Settings, InitCtx, ModuleRegistry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load bookshelf settings")?;
    bookshelf_telemetry::init(&settings.telemetry)?;

    tracing::info!(
        env = ?settings.environment,
        db = %settings.database.dsn_redacted(),
        "bookshelf bootstrap starting"
    );

    let pool = bookshelf_db::connect(&settings.database, &settings.pool)
        .await
        .context("DB not loaded")?;

    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, Arc::new(PgBookStore::new(pool.clone())));

    bookshelf_db::run_migrations(&pool, &registry.collect_migrations())
        .await
        .context("could not migrate db")?;

    let ctx = InitCtx {
        settings: &settings,
    };
    registry.init_all(&ctx).await?;
    registry.start_all(&ctx).await?;

    tracing::info!("bookshelf bootstrap complete");

    bookshelf_http::start_server(&registry, &settings).await?;

    registry.stop_all().await?;
    pool.close().await;

    tracing::info!("bookshelf stopped");
    Ok(())
}

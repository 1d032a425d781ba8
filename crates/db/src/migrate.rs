//! One-shot schema sync: every migration runs on every start, so each must
//! be idempotent.

use sqlx::PgPool;

use bookshelf_kernel::Migration;

use crate::DbError;

/// Execute migrations in the order given, stopping at the first failure.
pub async fn run_migrations(pool: &PgPool, migrations: &[(String, Migration)]) -> Result<(), DbError> {
    for (module, migration) in migrations {
        tracing::info!(
            target: "bookshelf-db",
            module = %module,
            migration = migration.id,
            "applying migration"
        );

        sqlx::raw_sql(migration.up)
            .execute(pool)
            .await
            .map_err(|source| DbError::Migration {
                module: module.clone(),
                id: migration.id,
                source,
            })?;
    }

    tracing::info!(target: "bookshelf-db", count = migrations.len(), "schema up to date");
    Ok(())
}

//! Full runs of the binary: pre-flight, then pg_dump | psql into a fresh database

use crate::helpers::cli::CliTestHelper;
use crate::helpers::harness::{PgTestInstance, client_tools_available};
use anyhow::Result;
use predicates::prelude::*;
use sqlx::PgPool;

#[tokio::test]
async fn test_migrate_copies_rows_into_target() -> Result<()> {
    let Some(pg) = PgTestInstance::from_env().await else {
        return Ok(());
    };
    if !client_tools_available() {
        eprintln!("pg_dump/psql not on PATH; skipping");
        return Ok(());
    }

    let source_db = pg.create_database("migrate_src").await;
    let target_db = pg.create_database("migrate_dst").await;
    let source_url = pg.url_for(&source_db);
    let target_url = pg.url_for(&target_db);

    let source_pool = PgPool::connect(&source_url).await?;
    sqlx::query("CREATE TABLE widgets (id INT PRIMARY KEY, name TEXT NOT NULL)")
        .execute(&source_pool)
        .await?;
    sqlx::query("INSERT INTO widgets VALUES (1, 'sprocket'), (2, 'gear'), (3, 'cog')")
        .execute(&source_pool)
        .await?;
    source_pool.close().await;

    // --create would recreate the source database by name on this same server
    let helper = CliTestHelper::new();
    let assert = helper
        .command()
        .env("SOURCE_DATABASE_URI", &source_url)
        .env("TARGET_DATABASE_URI", &target_url)
        .args(["--clean=false", "--create=false"])
        .assert();

    let outcome = async {
        assert
            .success()
            .stderr(predicate::str::contains("Pre-checks completed without issue"))
            .stderr(predicate::str::contains("Import complete!"));

        let target_pool = PgPool::connect(&target_url).await?;
        let names: Vec<(String,)> = sqlx::query_as("SELECT name FROM widgets ORDER BY id")
            .fetch_all(&target_pool)
            .await?;
        target_pool.close().await;

        assert_eq!(
            names.into_iter().map(|(name,)| name).collect::<Vec<_>>(),
            vec!["sprocket", "gear", "cog"]
        );
        Ok::<(), anyhow::Error>(())
    }
    .await;

    pg.drop_database(&source_db).await;
    pg.drop_database(&target_db).await;
    outcome
}

#[tokio::test]
async fn test_failed_restore_exits_with_status_one() -> Result<()> {
    let Some(pg) = PgTestInstance::from_env().await else {
        return Ok(());
    };
    if !client_tools_available() {
        eprintln!("pg_dump/psql not on PATH; skipping");
        return Ok(());
    }

    let source_db = pg.create_database("migrate_src").await;
    let target_db = pg.create_database("migrate_dst").await;

    let helper = CliTestHelper::new();
    helper.write_config(
        r#"
tools:
  psql: /nonexistent/bin/psql
"#,
    );

    let assert = helper
        .command()
        .env("SOURCE_DATABASE_URI", pg.url_for(&source_db))
        .env("TARGET_DATABASE_URI", pg.url_for(&target_db))
        .assert();

    pg.drop_database(&source_db).await;
    pg.drop_database(&target_db).await;

    assert
        .code(1)
        .stderr(predicate::str::contains("failed to import database"))
        .stderr(predicate::str::contains("/nonexistent/bin/psql"));
    Ok(())
}

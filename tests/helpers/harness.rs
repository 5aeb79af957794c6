use sqlx::PgPool;
use std::time::Duration;
use uuid::Uuid;

/// Connects to an external PostgreSQL server named by DATABASE_URL.
///
/// Returns None when DATABASE_URL is unset so server-backed tests can skip.
pub struct PgTestInstance {
    pub base_url: String,
}

impl PgTestInstance {
    pub async fn from_env() -> Option<Self> {
        dotenv::dotenv().ok();

        let Ok(base_url) = std::env::var("DATABASE_URL") else {
            eprintln!("DATABASE_URL not set; skipping server-backed test");
            return None;
        };

        let test_pool = PgPool::connect(&base_url).await.expect(
            "Failed to connect to test database. Make sure PostgreSQL is running and DATABASE_URL is correct.",
        );
        test_pool.close().await;

        Some(Self { base_url })
    }

    /// URL of `db_name` on the same server
    pub fn url_for(&self, db_name: &str) -> String {
        let without_query = self.base_url.split('?').next().unwrap_or(&self.base_url);
        match without_query.rfind('/') {
            Some(slash) if slash > without_query.find("://").map_or(0, |p| p + 2) => {
                format!("{}/{}", &without_query[..slash], db_name)
            }
            _ => format!("{}/{}", without_query, db_name),
        }
    }

    /// Create a fresh, uniquely named database and return its name
    pub async fn create_database(&self, prefix: &str) -> String {
        let db_name = format!("{}_{}", prefix, Uuid::new_v4().simple());
        let pool = PgPool::connect(&self.base_url)
            .await
            .expect("Failed to connect to postgres");
        sqlx::query(&format!("CREATE DATABASE \"{}\"", db_name))
            .execute(&pool)
            .await
            .expect("Failed to create test database");
        pool.close().await;
        db_name
    }

    /// Best-effort drop with a timeout so a stuck server cannot hang the suite
    pub async fn drop_database(&self, db_name: &str) {
        let base_url = self.base_url.clone();
        let db_name = db_name.to_string();

        let cleanup_future = async move {
            if let Ok(pool) = PgPool::connect(&base_url).await {
                let _ = sqlx::query(&format!(
                    "DROP DATABASE IF EXISTS \"{}\" WITH (FORCE)",
                    db_name
                ))
                .execute(&pool)
                .await;
                pool.close().await;
            }
        };

        let _ = tokio::time::timeout(Duration::from_secs(5), cleanup_future).await;
    }
}

/// True when pg_dump and psql can be started from PATH
pub fn client_tools_available() -> bool {
    ["pg_dump", "psql"].iter().all(|tool| {
        std::process::Command::new(tool)
            .arg("--version")
            .output()
            .map(|output| output.status.success())
            .unwrap_or(false)
    })
}

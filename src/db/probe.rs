//! Connection interface used by the pre-flight checks.
//!
//! [`PgProbe`] talks to real servers through sqlx. Tests supply their own
//! [`DatabaseProbe`] to script versions and count connections.

use crate::config::PreflightSettings;
use crate::constants::SERVER_VERSION_QUERY;
use crate::db::connection::connect_to_database;
use crate::db::locator::Locator;
use crate::db::version::ServerVersion;
use crate::error::{MigrateError, Result};
use sqlx::Connection;
use sqlx::postgres::PgConnection;
use std::fmt;
use std::future::Future;
use tracing::debug;

/// Which side of the migration an endpoint is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Source,
    Target,
}

impl Endpoint {
    pub fn label(&self) -> &'static str {
        match self {
            Endpoint::Source => "source",
            Endpoint::Target => "target",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Opens short-lived sessions against an endpoint
pub trait DatabaseProbe {
    type Session: ProbeSession;

    fn connect(
        &self,
        endpoint: Endpoint,
        locator: &Locator,
        settings: &PreflightSettings,
    ) -> impl Future<Output = Result<Self::Session>> + Send;
}

/// An open session. `close` must be awaited on every path.
pub trait ProbeSession: Send {
    fn server_version(&mut self) -> impl Future<Output = Result<ServerVersion>> + Send;

    fn close(self) -> impl Future<Output = ()> + Send;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PgProbe;

pub struct PgSession {
    endpoint: Endpoint,
    conn: PgConnection,
}

impl DatabaseProbe for PgProbe {
    type Session = PgSession;

    async fn connect(
        &self,
        endpoint: Endpoint,
        locator: &Locator,
        settings: &PreflightSettings,
    ) -> Result<PgSession> {
        let conn = connect_to_database(
            locator.connect_options(),
            endpoint.label(),
            locator.masked(),
            settings,
        )
        .await?;
        Ok(PgSession { endpoint, conn })
    }
}

impl ProbeSession for PgSession {
    async fn server_version(&mut self) -> Result<ServerVersion> {
        let endpoint = self.endpoint;
        let row: (String,) = sqlx::query_as(SERVER_VERSION_QUERY)
            .fetch_one(&mut self.conn)
            .await
            .map_err(|e| {
                MigrateError::connectivity(
                    endpoint.label(),
                    format!("failed to query server version: {}", e),
                )
            })?;
        Ok(ServerVersion::parse(&row.0))
    }

    async fn close(self) {
        if let Err(e) = self.conn.close().await {
            debug!("Error closing {} connection: {}", self.endpoint, e);
        }
    }
}

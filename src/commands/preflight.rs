use crate::config::{MigrationOptions, PreflightSettings};
use crate::db::version::source_is_newer;
use crate::db::{DatabaseProbe, Endpoint, Locator, ProbeSession, ServerVersion};
use crate::error::{MigrateError, Result};
use tracing::info;

/// Server versions observed during a successful pre-flight
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreflightReport {
    pub source_version: ServerVersion,
    pub target_version: ServerVersion,
}

/// Gate the migration on both endpoints being reachable and compatible.
///
/// Both locators are parsed and the source database checked before any
/// connection is opened. Every session opened here is closed before
/// returning, whatever the outcome.
pub async fn run_preflight<P: DatabaseProbe>(
    options: &MigrationOptions,
    settings: &PreflightSettings,
    probe: &P,
) -> Result<PreflightReport> {
    let source = parse_locator(Endpoint::Source, &options.source_locator)?;
    if source.database().is_none() {
        return Err(MigrateError::Validation(
            "missing database reference: source URI must contain a database (e.g. postgres://<user>:<pass>@<host>:<port>/<database>)"
                .to_string(),
        ));
    }
    let target = parse_locator(Endpoint::Target, &options.target_locator)?;

    let mut source_session = probe.connect(Endpoint::Source, &source, settings).await?;
    let mut target_session = match probe.connect(Endpoint::Target, &target, settings).await {
        Ok(session) => session,
        Err(e) => {
            source_session.close().await;
            return Err(e);
        }
    };

    let result = compare_versions(&mut source_session, &mut target_session).await;

    target_session.close().await;
    source_session.close().await;

    result
}

fn parse_locator(endpoint: Endpoint, url: &str) -> Result<Locator> {
    Locator::parse(url).map_err(|message| MigrateError::connectivity(endpoint.label(), message))
}

async fn compare_versions<S: ProbeSession>(
    source: &mut S,
    target: &mut S,
) -> Result<PreflightReport> {
    let source_version = source.server_version().await?;
    info!("Source Postgres version: {}", source_version);

    let target_version = target.server_version().await?;
    info!("Target Postgres version: {}", target_version);

    if source_is_newer(&source_version, &target_version) {
        return Err(MigrateError::VersionMismatch {
            source_version: source_version.to_string(),
            target_version: target_version.to_string(),
        });
    }

    Ok(PreflightReport {
        source_version,
        target_version,
    })
}

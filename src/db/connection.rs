use crate::config::PreflightSettings;
use crate::db::locator::mask_key_values;
use crate::error::{MigrateError, Result};
use sqlx::ConnectOptions;
use sqlx::postgres::{PgConnectOptions, PgConnection};
use std::time::Duration;
use tracing::debug;

/// Mask password in database URL for display
pub fn mask_url_password(url: &str) -> String {
    // Handle case where URL doesn't contain ://
    if !url.contains("://") {
        return url.to_string();
    }

    // Split on :// to get protocol and rest
    let parts: Vec<&str> = url.splitn(2, "://").collect();
    if parts.len() != 2 {
        return url.to_string();
    }

    let protocol = parts[0];
    let rest = parts[1];

    // Check if there's user info (user:pass@host or user@host)
    if let Some(at_pos) = rest.rfind('@') {
        let user_info = &rest[..at_pos];
        let host_and_path = &rest[at_pos + 1..];

        // Check if there's a password (user:pass)
        if let Some(colon_pos) = user_info.find(':') {
            let username = &user_info[..colon_pos];
            return format!("{}://{}:***@{}", protocol, username, host_and_path);
        }
    }

    url.to_string()
}

/// Mask the password in either form of connection string. Anything that is
/// neither a URL nor `key=value` pairs is returned unchanged.
pub fn mask_password(locator: &str) -> String {
    if locator.contains("://") {
        mask_url_password(locator)
    } else if locator.contains('=') {
        mask_key_values(locator)
    } else {
        locator.to_string()
    }
}

/// Open one connection for a short-lived probe.
///
/// The driver handshake is bounded by `connect_timeout` and the whole attempt
/// by `establish_timeout`. No retries: one failed attempt is reported as a
/// connectivity error for `label`.
pub async fn connect_to_database(
    options: PgConnectOptions,
    label: &str,
    masked_url: &str,
    settings: &PreflightSettings,
) -> Result<PgConnection> {
    debug!("Connecting to {} at {}", label, masked_url);

    let timed_out = |after: Duration| {
        MigrateError::connectivity(
            label,
            format!("timed out after {}s ({})", after.as_secs(), masked_url),
        )
    };

    let handshake = tokio::time::timeout(settings.connect_timeout, options.connect());
    match tokio::time::timeout(settings.establish_timeout, handshake).await {
        Ok(Ok(Ok(conn))) => Ok(conn),
        Ok(Ok(Err(e))) => Err(MigrateError::connectivity(
            label,
            format!("{} ({})", e, masked_url),
        )),
        Ok(Err(_)) => Err(timed_out(settings.connect_timeout)),
        Err(_) => Err(timed_out(settings.establish_timeout)),
    }
}

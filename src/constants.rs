use std::time::Duration;

// Environment variables read at startup
pub const SOURCE_DATABASE_URI_VAR: &str = "SOURCE_DATABASE_URI";
pub const TARGET_DATABASE_URI_VAR: &str = "TARGET_DATABASE_URI";
pub const FLY_APP_NAME_VAR: &str = "FLY_APP_NAME";
pub const OPERATOR_PASSWORD_VAR: &str = "OPERATOR_PASSWORD";

// Locator derived from FLY_APP_NAME
pub const DERIVED_TARGET_USER: &str = "postgres";
pub const DERIVED_TARGET_HOST_SUFFIX: &str = ".internal";
pub const DERIVED_TARGET_PORT: u16 = 5432;

// Pre-flight connection budget
pub const DEFAULT_ESTABLISH_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

// External programs
pub const DEFAULT_PG_DUMP: &str = "pg_dump";
pub const DEFAULT_PSQL: &str = "psql";

// Configuration file name
pub const CONFIG_FILENAME: &str = "pgmigrator.yaml";

pub const SERVER_VERSION_QUERY: &str = "SHOW server_version";

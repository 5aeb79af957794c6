use crate::db::connection::mask_password;
use clap::Args;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Raw configuration input - all fields Optional for merging
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ConfigInput {
    pub databases: Option<DatabasesInput>,
    pub options: Option<OptionsInput>,
    pub preflight: Option<PreflightInput>,
    pub tools: Option<ToolsInput>,
}

/// Resolved configuration with all defaults applied
#[derive(Debug, Clone)]
pub struct Config {
    pub options: MigrationOptions,
    pub preflight: PreflightSettings,
    pub tools: Tools,
}

// Database endpoints
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DatabasesInput {
    pub source_uri: Option<String>,
    pub target_uri: Option<String>,
}

// Dump/restore switches
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OptionsInput {
    pub no_owner: Option<bool>,
    pub clean: Option<bool>,
    pub create: Option<bool>,
    pub data_only: Option<bool>,
}

/// Everything the pre-flight checks and the pipeline need to know about one run.
///
/// Built once by [`ConfigBuilder`](crate::config::ConfigBuilder) and never mutated.
#[derive(Clone, PartialEq, Eq)]
pub struct MigrationOptions {
    pub source_locator: String,
    pub target_locator: String,
    pub no_owner: bool,
    pub clean: bool,
    pub create: bool,
    pub data_only: bool,
}

impl fmt::Debug for MigrationOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MigrationOptions")
            .field("source_locator", &mask_password(&self.source_locator))
            .field("target_locator", &mask_password(&self.target_locator))
            .field("no_owner", &self.no_owner)
            .field("clean", &self.clean)
            .field("create", &self.create)
            .field("data_only", &self.data_only)
            .finish()
    }
}

// Pre-flight connection budget
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PreflightInput {
    pub establish_timeout_secs: Option<u64>,
    pub connect_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreflightSettings {
    /// Overall budget for one connection attempt
    pub establish_timeout: Duration,
    /// Inner timeout handed to the driver
    pub connect_timeout: Duration,
}

// External programs
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ToolsInput {
    pub pg_dump: Option<String>,
    pub psql: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tools {
    pub pg_dump: String,
    pub psql: String,
}

// CLI argument group for the dump/restore switches.
// Each flag takes an optional value so `--clean=false` can turn a default off.
#[derive(Debug, Clone, Default, Args)]
pub struct MigrationFlagArgs {
    #[arg(
        long,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        help = "Skip restoring object ownership (default: true)"
    )]
    pub no_owner: Option<bool>,

    #[arg(
        long,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        help = "Drop database objects before recreating them (default: true)"
    )]
    pub clean: Option<bool>,

    #[arg(
        long,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        help = "Create the database before restoring into it (default: true)"
    )]
    pub create: Option<bool>,

    #[arg(
        long,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        help = "Dump only the data, not the schema (default: false)"
    )]
    pub data_only: Option<bool>,
}

impl From<MigrationFlagArgs> for OptionsInput {
    fn from(args: MigrationFlagArgs) -> Self {
        Self {
            no_owner: args.no_owner,
            clean: args.clean,
            create: args.create,
            data_only: args.data_only,
        }
    }
}

use crate::config::defaults::*;
use crate::config::env::Environment;
use crate::config::{merge::Merge, types::*};
use crate::constants::*;
use crate::db::connection::mask_password;
use crate::error::{MigrateError, Result};
use std::time::Duration;
use tracing::warn;

pub struct ConfigBuilder {
    config_input: ConfigInput,
    env: Environment,
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config_input: ConfigInput::default(),
            env: Environment::default(),
        }
    }

    pub fn with_file(mut self, file_input: ConfigInput) -> Self {
        self.config_input = self.config_input.merge(file_input);
        self
    }

    /// Layer environment locators over the file. FLY_APP_NAME and
    /// OPERATOR_PASSWORD are only consulted when resolving the target.
    pub fn with_env(mut self, env: Environment) -> Self {
        let env_input = ConfigInput {
            databases: Some(DatabasesInput {
                source_uri: env.get(SOURCE_DATABASE_URI_VAR).map(str::to_string),
                target_uri: env.get(TARGET_DATABASE_URI_VAR).map(str::to_string),
            }),
            ..ConfigInput::default()
        };
        self.config_input = self.config_input.merge(env_input);
        self.env = env;
        self
    }

    pub fn with_cli_args(mut self, cli_input: ConfigInput) -> Self {
        self.config_input = self.config_input.merge(cli_input);
        self
    }

    pub fn resolve(self) -> Result<Config> {
        Ok(Config {
            options: self.resolve_options()?,
            preflight: self.resolve_preflight(&PreflightSettings::default())?,
            tools: self.resolve_tools(&Tools::default()),
        })
    }

    fn resolve_options(&self) -> Result<MigrationOptions> {
        let source_locator = self.resolve_source()?;
        let target_locator = self.resolve_target()?;
        let opts = self.config_input.options.as_ref();

        Ok(MigrationOptions {
            source_locator,
            target_locator,
            no_owner: opts.and_then(|o| o.no_owner).unwrap_or(DEFAULT_NO_OWNER),
            clean: opts.and_then(|o| o.clean).unwrap_or(DEFAULT_CLEAN),
            create: opts.and_then(|o| o.create).unwrap_or(DEFAULT_CREATE),
            data_only: opts.and_then(|o| o.data_only).unwrap_or(DEFAULT_DATA_ONLY),
        })
    }

    fn database_input(&self, pick: fn(&DatabasesInput) -> Option<&String>) -> Option<String> {
        self.config_input
            .databases
            .as_ref()
            .and_then(pick)
            .filter(|uri| !uri.is_empty())
            .cloned()
    }

    fn resolve_source(&self) -> Result<String> {
        self.database_input(|d| d.source_uri.as_ref())
            .ok_or_else(|| {
                MigrateError::configuration(format!(
                    "{} secret must be set",
                    SOURCE_DATABASE_URI_VAR
                ))
            })
    }

    /// An explicit target wins. The FLY_APP_NAME route is only taken when no
    /// explicit target exists.
    fn resolve_target(&self) -> Result<String> {
        let explicit = self.database_input(|d| d.target_uri.as_ref());
        let app_name = self.env.get(FLY_APP_NAME_VAR);

        match (explicit, app_name) {
            (Some(uri), Some(app_name)) => {
                warn!(
                    "Both {} and {}={} are set; using {} ({})",
                    TARGET_DATABASE_URI_VAR,
                    FLY_APP_NAME_VAR,
                    app_name,
                    TARGET_DATABASE_URI_VAR,
                    mask_password(&uri)
                );
                Ok(uri)
            }
            (Some(uri), None) => Ok(uri),
            (None, Some(app_name)) => {
                let password = self.env.get(OPERATOR_PASSWORD_VAR).ok_or_else(|| {
                    MigrateError::configuration(format!(
                        "{} secret must be set when {} is set",
                        OPERATOR_PASSWORD_VAR, FLY_APP_NAME_VAR
                    ))
                })?;
                Ok(derive_target_uri(app_name, password))
            }
            (None, None) => Err(MigrateError::configuration(format!(
                "{} or {} environment variable must be set",
                FLY_APP_NAME_VAR, TARGET_DATABASE_URI_VAR
            ))),
        }
    }

    fn resolve_preflight(&self, defaults: &PreflightSettings) -> Result<PreflightSettings> {
        let input = self.config_input.preflight.as_ref();

        let establish_timeout = input
            .and_then(|p| p.establish_timeout_secs)
            .map(|secs| positive_seconds("preflight.establish_timeout_secs", secs))
            .transpose()?
            .unwrap_or(defaults.establish_timeout);
        let connect_timeout = input
            .and_then(|p| p.connect_timeout_secs)
            .map(|secs| positive_seconds("preflight.connect_timeout_secs", secs))
            .transpose()?
            .unwrap_or(defaults.connect_timeout);

        if connect_timeout > establish_timeout {
            warn!(
                "connect timeout ({}s) exceeds establish timeout ({}s); the establish timeout will fire first",
                connect_timeout.as_secs(),
                establish_timeout.as_secs()
            );
        }

        Ok(PreflightSettings {
            establish_timeout,
            connect_timeout,
        })
    }

    fn resolve_tools(&self, defaults: &Tools) -> Tools {
        let input = self.config_input.tools.as_ref();

        Tools {
            pg_dump: input
                .and_then(|t| t.pg_dump.as_ref())
                .cloned()
                .unwrap_or_else(|| defaults.pg_dump.clone()),
            psql: input
                .and_then(|t| t.psql.as_ref())
                .cloned()
                .unwrap_or_else(|| defaults.psql.clone()),
        }
    }
}

fn positive_seconds(field: &str, secs: u64) -> Result<Duration> {
    if secs == 0 {
        return Err(MigrateError::configuration(format!(
            "{} must be greater than zero",
            field
        )));
    }
    Ok(Duration::from_secs(secs))
}

/// Target locator for an app on the private network
pub fn derive_target_uri(app_name: &str, password: &str) -> String {
    format!(
        "postgres://{}:{}@{}{}:{}",
        DERIVED_TARGET_USER,
        urlencoding::encode(password),
        app_name,
        DERIVED_TARGET_HOST_SUFFIX,
        DERIVED_TARGET_PORT
    )
}

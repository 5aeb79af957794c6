use crate::config::types::*;

/// Trait for merging optional configuration values
pub trait Merge<T> {
    fn merge(self, other: T) -> T;
}

impl<T> Merge<Option<T>> for Option<T> {
    fn merge(self, other: Option<T>) -> Option<T> {
        other.or(self)
    }
}

impl Merge<ConfigInput> for ConfigInput {
    fn merge(self, other: ConfigInput) -> ConfigInput {
        ConfigInput {
            databases: match (self.databases, other.databases) {
                (None, None) => None,
                (Some(a), None) => Some(a),
                (None, Some(b)) => Some(b),
                (Some(a), Some(b)) => Some(a.merge_with(b)),
            },
            options: match (self.options, other.options) {
                (None, None) => None,
                (Some(a), None) => Some(a),
                (None, Some(b)) => Some(b),
                (Some(a), Some(b)) => Some(a.merge_with(b)),
            },
            preflight: match (self.preflight, other.preflight) {
                (None, None) => None,
                (Some(a), None) => Some(a),
                (None, Some(b)) => Some(b),
                (Some(a), Some(b)) => Some(a.merge_with(b)),
            },
            tools: match (self.tools, other.tools) {
                (None, None) => None,
                (Some(a), None) => Some(a),
                (None, Some(b)) => Some(b),
                (Some(a), Some(b)) => Some(a.merge_with(b)),
            },
        }
    }
}

impl DatabasesInput {
    pub fn merge_with(self, other: DatabasesInput) -> DatabasesInput {
        DatabasesInput {
            source_uri: other.source_uri.or(self.source_uri),
            target_uri: other.target_uri.or(self.target_uri),
        }
    }
}

impl OptionsInput {
    pub fn merge_with(self, other: OptionsInput) -> OptionsInput {
        OptionsInput {
            no_owner: other.no_owner.or(self.no_owner),
            clean: other.clean.or(self.clean),
            create: other.create.or(self.create),
            data_only: other.data_only.or(self.data_only),
        }
    }
}

impl PreflightInput {
    pub fn merge_with(self, other: PreflightInput) -> PreflightInput {
        PreflightInput {
            establish_timeout_secs: other.establish_timeout_secs.or(self.establish_timeout_secs),
            connect_timeout_secs: other.connect_timeout_secs.or(self.connect_timeout_secs),
        }
    }
}

impl ToolsInput {
    pub fn merge_with(self, other: ToolsInput) -> ToolsInput {
        ToolsInput {
            pg_dump: other.pg_dump.or(self.pg_dump),
            psql: other.psql.or(self.psql),
        }
    }
}

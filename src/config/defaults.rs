use crate::config::types::*;
use crate::constants::{
    DEFAULT_CONNECT_TIMEOUT, DEFAULT_ESTABLISH_TIMEOUT, DEFAULT_PG_DUMP, DEFAULT_PSQL,
};

// Dump switches applied when neither the file nor the command line sets them
pub const DEFAULT_NO_OWNER: bool = true;
pub const DEFAULT_CLEAN: bool = true;
pub const DEFAULT_CREATE: bool = true;
pub const DEFAULT_DATA_ONLY: bool = false;

impl Default for PreflightSettings {
    fn default() -> Self {
        Self {
            establish_timeout: DEFAULT_ESTABLISH_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }
}

impl Default for Tools {
    fn default() -> Self {
        Self {
            pg_dump: DEFAULT_PG_DUMP.to_string(),
            psql: DEFAULT_PSQL.to_string(),
        }
    }
}

use crate::constants::{
    FLY_APP_NAME_VAR, OPERATOR_PASSWORD_VAR, SOURCE_DATABASE_URI_VAR, TARGET_DATABASE_URI_VAR,
};
use std::collections::HashMap;

/// Snapshot of the environment variables the resolver cares about.
///
/// Built once in `main` from the process environment; tests build one from
/// literal pairs instead of mutating the process environment.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    vars: HashMap<String, String>,
}

impl Environment {
    /// Read the known variables from the process environment
    pub fn from_process() -> Self {
        [
            SOURCE_DATABASE_URI_VAR,
            TARGET_DATABASE_URI_VAR,
            FLY_APP_NAME_VAR,
            OPERATOR_PASSWORD_VAR,
        ]
        .into_iter()
        .filter_map(|name| std::env::var(name).ok().map(|value| (name, value)))
        .collect()
    }

    /// Value of `name`, treating an empty string as unset
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars
            .get(name)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Environment {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

use crate::db::connection::mask_url_password;
use sqlx::postgres::PgConnectOptions;
use std::fmt;
use std::str::FromStr;

const SCHEMES: [&str; 2] = ["postgres://", "postgresql://"];

/// A parsed connection string, either a `postgres://` URL or libpq
/// `key=value` pairs.
///
/// Keeps the driver options for connecting and the database named in the
/// string itself. The database is read from the string rather than the driver
/// options so `PGDATABASE` in the environment cannot stand in for a missing one.
#[derive(Clone)]
pub struct Locator {
    masked: String,
    database: Option<String>,
    options: PgConnectOptions,
}

impl Locator {
    pub fn parse(locator: &str) -> Result<Self, String> {
        if SCHEMES.iter().any(|scheme| locator.starts_with(scheme)) {
            Self::parse_url(locator)
        } else if locator.contains("://") {
            Err(format!(
                "invalid connection string {}: expected a postgres:// or postgresql:// URL",
                mask_url_password(locator)
            ))
        } else {
            Self::parse_key_values(locator)
        }
    }

    fn parse_url(url: &str) -> Result<Self, String> {
        let options = PgConnectOptions::from_str(url).map_err(|e| {
            format!(
                "invalid connection string {}: {}",
                mask_url_password(url),
                e
            )
        })?;

        Ok(Self {
            masked: mask_url_password(url),
            database: database_from_url(url),
            options,
        })
    }

    fn parse_key_values(locator: &str) -> Result<Self, String> {
        let pairs = split_key_values(locator)?;
        let masked = render_key_values_masked(&pairs);

        let mut options = PgConnectOptions::new();
        for (key, value) in &pairs {
            options = match key.as_str() {
                "host" => options.host(value),
                "port" => options.port(value.parse().map_err(|_| {
                    format!("invalid connection string {}: invalid port", masked)
                })?),
                "user" => options.username(value),
                "password" => options.password(value),
                "dbname" => options.database(value),
                "sslmode" => options.ssl_mode(value.parse().map_err(|_| {
                    format!("invalid connection string {}: invalid sslmode", masked)
                })?),
                "sslrootcert" => options.ssl_root_cert(value.as_str()),
                "application_name" => options.application_name(value),
                // Bounded by the pre-flight timeouts instead
                "connect_timeout" => options,
                other => {
                    return Err(format!(
                        "invalid connection string {}: unknown option \"{}\"",
                        masked, other
                    ));
                }
            };
        }

        let database = pairs
            .iter()
            .rev()
            .find(|(key, _)| key == "dbname")
            .map(|(_, value)| value.clone())
            .filter(|database| !database.is_empty());

        Ok(Self {
            masked,
            database,
            options,
        })
    }

    /// Database named by the connection string
    pub fn database(&self) -> Option<&str> {
        self.database.as_deref()
    }

    /// The connection string with its password replaced by `***`
    pub fn masked(&self) -> &str {
        &self.masked
    }

    pub fn connect_options(&self) -> PgConnectOptions {
        self.options.clone()
    }
}

impl fmt::Debug for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Locator")
            .field("locator", &self.masked)
            .field("database", &self.database)
            .finish()
    }
}

/// Mask the `password` value of a `key=value` connection string.
///
/// A string that does not split into pairs is replaced entirely, since the
/// password cannot be located in it.
pub fn mask_key_values(locator: &str) -> String {
    match split_key_values(locator) {
        Ok(pairs) => render_key_values_masked(&pairs),
        Err(_) => "***".to_string(),
    }
}

/// Split libpq `key=value` pairs. Values may be single-quoted, and a backslash
/// escapes the next character. Errors never include values.
fn split_key_values(locator: &str) -> Result<Vec<(String, String)>, String> {
    const SHAPE: &str =
        "invalid connection string: expected key=value pairs or a postgres:// URL";

    let mut pairs = Vec::new();
    let mut chars = locator.chars().peekable();

    loop {
        while chars.next_if(|c| c.is_whitespace()).is_some() {}
        if chars.peek().is_none() {
            break;
        }

        let mut key = String::new();
        while let Some(c) = chars.next_if(|c| *c != '=' && !c.is_whitespace()) {
            key.push(c);
        }
        while chars.next_if(|c| c.is_whitespace()).is_some() {}
        if key.is_empty() || chars.next() != Some('=') {
            return Err(SHAPE.to_string());
        }
        while chars.next_if(|c| c.is_whitespace()).is_some() {}

        let mut value = String::new();
        if chars.next_if_eq(&'\'').is_some() {
            loop {
                match chars.next() {
                    Some('\'') => break,
                    Some('\\') => match chars.next() {
                        Some(c) => value.push(c),
                        None => return Err(SHAPE.to_string()),
                    },
                    Some(c) => value.push(c),
                    None => {
                        return Err(format!(
                            "invalid connection string: unterminated quoted value for \"{}\"",
                            key
                        ));
                    }
                }
            }
        } else {
            while let Some(c) = chars.next_if(|c| !c.is_whitespace()) {
                if c == '\\' {
                    match chars.next() {
                        Some(escaped) => value.push(escaped),
                        None => return Err(SHAPE.to_string()),
                    }
                } else {
                    value.push(c);
                }
            }
        }

        pairs.push((key, value));
    }

    if pairs.is_empty() {
        return Err(SHAPE.to_string());
    }
    Ok(pairs)
}

fn render_key_values_masked(pairs: &[(String, String)]) -> String {
    pairs
        .iter()
        .map(|(key, value)| {
            if key == "password" {
                format!("{}=***", key)
            } else if value.is_empty() || value.contains(needs_quoting) {
                let escaped = value.replace('\\', "\\\\").replace('\'', "\\'");
                format!("{}='{}'", key, escaped)
            } else {
                format!("{}={}", key, value)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn needs_quoting(c: char) -> bool {
    c.is_whitespace() || c == '\'' || c == '\\'
}

fn database_from_url(url: &str) -> Option<String> {
    let rest = SCHEMES
        .iter()
        .find_map(|scheme| url.strip_prefix(scheme))?;

    let (location, query) = match rest.split_once('?') {
        Some((location, query)) => (location, Some(query)),
        None => (rest, None),
    };

    let from_query = query.and_then(|query| {
        query
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(key, _)| *key == "dbname")
            .map(|(_, value)| value.to_string())
    });

    // Userinfo may legally hold '/' only when percent-encoded, so the first '/'
    // after the last '@' starts the path.
    let host_part = match location.rfind('@') {
        Some(at) => &location[at + 1..],
        None => location,
    };
    let from_path = host_part
        .split_once('/')
        .map(|(_, path)| path.trim_end_matches('/').to_string());

    from_query
        .or(from_path)
        .filter(|database| !database.is_empty())
}

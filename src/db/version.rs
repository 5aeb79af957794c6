use std::cmp::Ordering;
use std::fmt;

/// A server version as reported by `SHOW server_version`.
///
/// Distribution suffixes are dropped, so `"15.4 (Debian 15.4-1.pgdg120+1)"`
/// becomes `"15.4"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerVersion(String);

impl ServerVersion {
    pub fn parse(raw: &str) -> Self {
        let version = raw.split_whitespace().next().unwrap_or(raw);
        Self(version.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Leading dot-separated token, e.g. `"15"` for `"15.4"`
    pub fn major(&self) -> &str {
        self.0.split('.').next().unwrap_or(&self.0)
    }

    /// Leading digits of the major token, e.g. 17 for `"17beta2"`
    pub fn major_number(&self) -> Option<u32> {
        let major = self.major();
        let digits = major
            .find(|c: char| !c.is_ascii_digit())
            .map_or(major, |end| &major[..end]);
        digits.parse().ok()
    }

    /// Order two versions by major component only.
    ///
    /// Numeric when both majors start with digits; otherwise the raw tokens
    /// are compared as strings.
    pub fn cmp_major(&self, other: &ServerVersion) -> Ordering {
        match (self.major_number(), other.major_number()) {
            (Some(a), Some(b)) => a.cmp(&b),
            _ => self.major().cmp(other.major()),
        }
    }
}

impl fmt::Display for ServerVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// True when restoring `source` into `target` would move data to an older major.
pub fn source_is_newer(source: &ServerVersion, target: &ServerVersion) -> bool {
    source.cmp_major(target) == Ordering::Greater
}

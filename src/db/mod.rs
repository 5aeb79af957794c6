pub mod connection;
pub mod locator;
pub mod probe;
pub mod version;

pub use locator::Locator;
pub use probe::{DatabaseProbe, Endpoint, PgProbe, ProbeSession};
pub use version::ServerVersion;

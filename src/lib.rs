//! One-shot PostgreSQL migration: pre-flight checks against both servers, then
//! a full `pg_dump` streamed into `psql` on the target.

pub mod commands;
pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod pipeline;

pub use error::{MigrateError, Result};

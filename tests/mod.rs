// Integration tests for pgmigrator

pub mod helpers;
pub mod integration;

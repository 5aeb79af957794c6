// Tests against a live PostgreSQL server. Each one skips when DATABASE_URL is unset.

pub mod migrate_end_to_end;

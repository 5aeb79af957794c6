//! Command-line surface tests

use crate::helpers::cli::CliTestHelper;
use predicates::prelude::*;

#[test]
fn test_help_lists_migration_flags() {
    let helper = CliTestHelper::new();

    helper
        .command()
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("--no-owner")
                .and(predicate::str::contains("--clean"))
                .and(predicate::str::contains("--create"))
                .and(predicate::str::contains("--data-only"))
                .and(predicate::str::contains("--config-file")),
        );
}

#[test]
fn test_non_boolean_flag_value_is_rejected() {
    let helper = CliTestHelper::new();

    helper
        .command()
        .arg("--clean=sometimes")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--clean"));
}

#[test]
fn test_explicit_false_flags_are_accepted() {
    let helper = CliTestHelper::new();

    // Flags parse; the run then stops on the missing source
    helper
        .command()
        .args(["--no-owner=false", "--clean=false", "--create=false", "--data-only"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("SOURCE_DATABASE_URI secret must be set"));
}

use assert_cmd::Command;
use std::path::PathBuf;
use tempfile::TempDir;

const MIGRATOR_VARS: [&str; 5] = [
    "SOURCE_DATABASE_URI",
    "TARGET_DATABASE_URI",
    "FLY_APP_NAME",
    "OPERATOR_PASSWORD",
    "RUST_LOG",
];

/// Runs the pgmigrator binary from an empty temporary directory with a clean environment
pub struct CliTestHelper {
    pub temp_dir: TempDir,
    pub project_root: PathBuf,
}

impl CliTestHelper {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let project_root = temp_dir.path().to_path_buf();

        Self {
            temp_dir,
            project_root,
        }
    }

    /// Binary invocation with none of the migrator's variables inherited
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("pgmigrator").expect("Failed to find pgmigrator binary");
        cmd.current_dir(&self.project_root);
        for var in MIGRATOR_VARS {
            cmd.env_remove(var);
        }
        cmd
    }

    pub fn write_config(&self, contents: &str) -> PathBuf {
        let path = self.project_root.join("pgmigrator.yaml");
        std::fs::write(&path, contents).expect("Failed to write config file");
        path
    }
}

impl Default for CliTestHelper {
    fn default() -> Self {
        Self::new()
    }
}

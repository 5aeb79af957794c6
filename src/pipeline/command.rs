use crate::config::{MigrationOptions, Tools};
use crate::db::connection::mask_password;

/// One program invocation in the pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl StageCommand {
    fn new(program: &str) -> Self {
        Self {
            program: program.to_string(),
            args: Vec::new(),
        }
    }

    fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    fn render_with(&self, display_arg: impl Fn(&str) -> String) -> String {
        std::iter::once(self.program.clone())
            .chain(self.args.iter().map(|arg| display_arg(arg.as_str())))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn render(&self) -> String {
        self.render_with(str::to_string)
    }

    pub fn render_masked(&self) -> String {
        self.render_with(mask_password)
    }
}

/// `pg_dump` streaming into `psql`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pipeline {
    pub dump: StageCommand,
    pub restore: StageCommand,
}

impl Pipeline {
    pub fn build(options: &MigrationOptions, tools: &Tools) -> Self {
        Self {
            dump: dump_command(options, &tools.pg_dump),
            restore: restore_command(options, &tools.psql),
        }
    }

    /// Shell form of the pipeline, e.g. `pg_dump -d <src> --clean | psql -d <dst>`
    pub fn render(&self) -> String {
        format!("{} | {}", self.dump.render(), self.restore.render())
    }

    pub fn render_masked(&self) -> String {
        format!(
            "{} | {}",
            self.dump.render_masked(),
            self.restore.render_masked()
        )
    }
}

/// Dump switches for the enabled flags, always in this order:
/// no-owner, clean, create, data-only.
pub fn dump_switches(options: &MigrationOptions) -> Vec<&'static str> {
    [
        (options.no_owner, "--no-owner"),
        (options.clean, "--clean"),
        (options.create, "--create"),
        (options.data_only, "--data-only"),
    ]
    .into_iter()
    .filter_map(|(enabled, switch)| enabled.then_some(switch))
    .collect()
}

fn dump_command(options: &MigrationOptions, program: &str) -> StageCommand {
    dump_switches(options).into_iter().fold(
        StageCommand::new(program)
            .arg("-d")
            .arg(&options.source_locator),
        |command, switch| command.arg(switch),
    )
}

fn restore_command(options: &MigrationOptions, program: &str) -> StageCommand {
    StageCommand::new(program)
        .arg("-d")
        .arg(&options.target_locator)
}

use crate::config::{MigrationOptions, Tools};
use crate::error::{MigrateError, Result};
use crate::pipeline::{CommandRunner, Pipeline, PipelineOutput};
use tracing::{debug, warn};

/// Stream a full dump of the source into the target.
///
/// All or nothing from the caller's side: the run fails if either stage
/// could not start or exited non-zero. Nothing is rolled back.
pub async fn run_migration<R: CommandRunner>(
    options: &MigrationOptions,
    tools: &Tools,
    runner: &R,
) -> Result<()> {
    let pipeline = Pipeline::build(options, tools);
    debug!("Running: {}", pipeline.render_masked());

    // A pipeline that never started has not touched the target
    let output = runner.run(&pipeline).await?;

    check_output(&pipeline, &output).inspect_err(|_| {
        if options.clean || options.create {
            warn!("The target database may have been partially modified before the failure");
        }
    })
}

fn check_output(pipeline: &Pipeline, output: &PipelineOutput) -> Result<()> {
    let failures: Vec<(&str, String)> = [
        (&pipeline.dump.program, &output.dump),
        (&pipeline.restore.program, &output.restore),
    ]
    .into_iter()
    .filter(|(_, outcome)| !outcome.success)
    .map(|(program, outcome)| (program.as_str(), outcome.describe_failure()))
    .collect();

    if failures.is_empty() {
        return Ok(());
    }

    let stage = failures
        .iter()
        .map(|(program, _)| *program)
        .collect::<Vec<_>>()
        .join(" and ");
    let message = failures
        .iter()
        .map(|(program, reason)| {
            if failures.len() > 1 {
                format!("{} {}", program, reason)
            } else {
                reason.clone()
            }
        })
        .collect::<Vec<_>>()
        .join("; ");

    Err(MigrateError::execution(stage, message))
}

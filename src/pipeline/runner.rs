use std::fs::File;
use std::process::{Command, Stdio};

use super::{OutputTarget, ToolInvocation};
use crate::error::{PipelineError, PipelineResult};

/// Executes tool invocations
///
/// Implementations run one invocation to completion before returning.
pub trait ToolRunner {
    fn run(&mut self, invocation: &ToolInvocation) -> PipelineResult<()>;
}

/// Runs invocations as real child processes
///
/// The child inherits stdin/stderr. Stdout is inherited too unless the
/// invocation redirects it into its output file.
#[derive(Debug, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

impl ToolRunner for ProcessRunner {
    fn run(&mut self, invocation: &ToolInvocation) -> PipelineResult<()> {
        let mut command = Command::new(&invocation.tool);
        command.args(&invocation.args);

        if invocation.output_target == OutputTarget::Stdout {
            let file = File::create(&invocation.output).map_err(|source| {
                PipelineError::ToolLaunchFailed {
                    tool: invocation.tool_name(),
                    shader: invocation.shader.clone(),
                    source,
                }
            })?;
            command.stdout(Stdio::from(file));
        }

        let status = command
            .status()
            .map_err(|source| PipelineError::ToolLaunchFailed {
                tool: invocation.tool_name(),
                shader: invocation.shader.clone(),
                source,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(PipelineError::ToolExecutionFailed {
                tool: invocation.tool_name(),
                shader: invocation.shader.clone(),
                exit_code: status.code(),
            })
        }
    }
}

/// Prints each command instead of running it
#[derive(Debug, Default)]
pub struct DryRunRunner;

impl DryRunRunner {
    pub fn new() -> Self {
        Self
    }
}

impl ToolRunner for DryRunRunner {
    fn run(&mut self, invocation: &ToolInvocation) -> PipelineResult<()> {
        println!("{}", invocation.display());
        Ok(())
    }
}

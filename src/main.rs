//! Shader pipeline command-line entry point
//! Compiles shaders to SPIR-V or runs vendor analysis over them, one project
//! or all projects at a time.

use std::process::ExitCode;

use anyhow::Context;
use shader_pipeline::cli::{self, CliArgs, CliCommand};
use shader_pipeline::pipeline::{DryRunRunner, ProcessRunner};
use shader_pipeline::{PipelineConfig, RunSummary, ShaderPipelineDriver};

const EXIT_FAILURE: u8 = 1;
const EXIT_USAGE: u8 = 2;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = match cli::parse(std::env::args().skip(1)) {
        Ok(CliCommand::Run(args)) => args,
        Ok(CliCommand::Help) => {
            println!("{}", cli::USAGE);
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("error: {}\n\n{}", e, cli::USAGE);
            return ExitCode::from(EXIT_USAGE);
        }
    };

    match run(&args) {
        Ok(summary) => {
            summary.log_report();
            if summary.is_success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(EXIT_FAILURE)
            }
        }
        Err(e) => {
            log::error!("{:#}", e);
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

fn run(args: &CliArgs) -> anyhow::Result<RunSummary> {
    // Selectors are checked before anything else is touched
    let request = args.to_request()?;

    let mut config = PipelineConfig::load(args.config.as_deref())
        .context("Failed to load pipeline configuration")?;
    config.apply_env();
    args.apply_overrides(&mut config);

    let summary = if args.dry_run {
        ShaderPipelineDriver::new(config, DryRunRunner::new())?.run(&request)?
    } else {
        ShaderPipelineDriver::new(config, ProcessRunner::new())?.run(&request)?
    };
    Ok(summary)
}

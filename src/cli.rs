//! Command-line parsing for the `shader-pipeline` binary

use std::path::PathBuf;

use crate::config::PipelineConfig;
use crate::error::PipelineResult;
use crate::pipeline::RunRequest;

pub const USAGE: &str = "\
Usage: shader-pipeline <project|all> [options]

Options:
  -l, --language <hlsl|glsl>     only process one language (default: both)
  -s, --stage <step>             compile | offline-compile | static-analyze (default: compile)
      --compile-first            compile before running an analysis step
      --dry-run                  print commands without running them
      --config <file>            TOML config file (default: ./shader_pipeline.toml if present)
      --shader-root <dir>        directory holding the hlsl/ and glsl/ trees
      --toolchain-root <dir>     toolchain install root (default: $VULKAN_SDK)
  -h, --help                     show this help";

/// Command-line usage errors
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CliError {
    #[error("missing project name")]
    MissingProject,

    #[error("option {flag} needs a value")]
    MissingValue { flag: String },

    #[error("unknown option {flag}")]
    UnknownOption { flag: String },

    #[error("unexpected argument {arg}")]
    UnexpectedArgument { arg: String },
}

/// What the binary was asked to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    Help,
    Run(CliArgs),
}

/// Parsed arguments of a pipeline run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    pub project: String,
    pub language: Option<String>,
    pub stage: String,
    pub compile_first: bool,
    pub dry_run: bool,
    pub config: Option<PathBuf>,
    pub shader_root: Option<PathBuf>,
    pub toolchain_root: Option<PathBuf>,
}

impl CliArgs {
    fn with_project(project: String) -> Self {
        Self {
            project,
            language: None,
            stage: "compile".to_string(),
            compile_first: false,
            dry_run: false,
            config: None,
            shader_root: None,
            toolchain_root: None,
        }
    }

    /// Apply path overrides on top of file and environment settings
    pub fn apply_overrides(&self, config: &mut PipelineConfig) {
        if let Some(root) = &self.shader_root {
            config.shader_root = root.clone();
        }
        if let Some(root) = &self.toolchain_root {
            config.toolchain_root = Some(root.clone());
        }
    }

    /// Validate the selectors and turn them into a run request
    pub fn to_request(&self) -> PipelineResult<RunRequest> {
        let request = RunRequest::from_selectors(&self.project, self.language.as_deref(), &self.stage)?
            .with_compile_first(self.compile_first)
            .with_compiler_version(true);
        Ok(request)
    }
}

/// Parse arguments, excluding the program name
pub fn parse<I>(args: I) -> Result<CliCommand, CliError>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let mut project = None;
    let mut language = None;
    let mut stage = None;
    let mut compile_first = false;
    let mut dry_run = false;
    let mut config = None;
    let mut shader_root = None;
    let mut toolchain_root = None;

    while let Some(arg) = args.next() {
        let (flag, inline) = match arg.split_once('=') {
            Some((flag, value)) if flag.starts_with("--") => (flag.to_string(), Some(value.to_string())),
            _ => (arg.clone(), None),
        };

        let mut value = |flag: &str| -> Result<String, CliError> {
            match inline.clone().or_else(|| args.next()) {
                Some(v) => Ok(v),
                None => Err(CliError::MissingValue {
                    flag: flag.to_string(),
                }),
            }
        };

        match flag.as_str() {
            "-h" | "--help" => return Ok(CliCommand::Help),
            "-l" | "--language" => language = Some(value(&flag)?),
            "-s" | "--stage" => stage = Some(value(&flag)?),
            "--config" => config = Some(PathBuf::from(value(&flag)?)),
            "--shader-root" => shader_root = Some(PathBuf::from(value(&flag)?)),
            "--toolchain-root" => toolchain_root = Some(PathBuf::from(value(&flag)?)),
            "--compile-first" => compile_first = true,
            "--dry-run" => dry_run = true,
            other if other.starts_with('-') && other.len() > 1 => {
                return Err(CliError::UnknownOption {
                    flag: other.to_string(),
                })
            }
            _ => {
                if project.is_some() {
                    return Err(CliError::UnexpectedArgument { arg });
                }
                project = Some(arg);
            }
        }
    }

    let mut parsed = CliArgs::with_project(project.ok_or(CliError::MissingProject)?);
    parsed.language = language;
    if let Some(stage) = stage {
        parsed.stage = stage;
    }
    parsed.compile_first = compile_first;
    parsed.dry_run = dry_run;
    parsed.config = config;
    parsed.shader_root = shader_root;
    parsed.toolchain_root = toolchain_root;
    Ok(CliCommand::Run(parsed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PipelineError;
    use crate::pipeline::{PipelineStep, ProjectFilter, ShaderLanguage};

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn run_args(list: &[&str]) -> CliArgs {
        match parse(args(list)).unwrap() {
            CliCommand::Run(parsed) => parsed,
            CliCommand::Help => panic!("expected a run command"),
        }
    }

    #[test]
    fn test_project_only() {
        let parsed = run_args(&["triangle"]);
        assert_eq!(parsed.project, "triangle");
        assert_eq!(parsed.language, None);
        assert_eq!(parsed.stage, "compile");
        assert!(!parsed.dry_run);
    }

    #[test]
    fn test_full_argument_set() {
        let parsed = run_args(&[
            "--language",
            "glsl",
            "all",
            "-s",
            "static-analyze",
            "--compile-first",
            "--dry-run",
            "--shader-root=assets/shaders",
            "--toolchain-root",
            "/opt/sdk",
        ]);
        assert_eq!(parsed.project, "all");
        assert_eq!(parsed.language.as_deref(), Some("glsl"));
        assert_eq!(parsed.stage, "static-analyze");
        assert!(parsed.compile_first);
        assert!(parsed.dry_run);
        assert_eq!(parsed.shader_root, Some(PathBuf::from("assets/shaders")));

        let mut config = PipelineConfig::default();
        parsed.apply_overrides(&mut config);
        assert_eq!(config.shader_root, PathBuf::from("assets/shaders"));
        assert_eq!(config.toolchain_root, Some(PathBuf::from("/opt/sdk")));

        let request = parsed.to_request().unwrap();
        assert_eq!(request.project, ProjectFilter::All);
        assert_eq!(request.languages, vec![ShaderLanguage::Glsl]);
        assert_eq!(request.step, PipelineStep::StaticAnalyze);
        assert!(request.compile_first);
        assert!(request.report_compiler_version);
    }

    #[test]
    fn test_usage_errors() {
        assert_eq!(parse(args(&[])), Err(CliError::MissingProject));
        assert_eq!(
            parse(args(&["triangle", "--stage"])),
            Err(CliError::MissingValue {
                flag: "--stage".to_string()
            })
        );
        assert_eq!(
            parse(args(&["triangle", "--verbose"])),
            Err(CliError::UnknownOption {
                flag: "--verbose".to_string()
            })
        );
        assert_eq!(
            parse(args(&["triangle", "ssao"])),
            Err(CliError::UnexpectedArgument {
                arg: "ssao".to_string()
            })
        );
        assert_eq!(parse(args(&["triangle", "-h"])), Ok(CliCommand::Help));
    }

    #[test]
    fn test_unsupported_language_surfaces_at_request() {
        let parsed = run_args(&["triangle", "-l", "metal"]);
        assert!(matches!(
            parsed.to_request(),
            Err(PipelineError::UnsupportedLanguage { .. })
        ));
    }
}

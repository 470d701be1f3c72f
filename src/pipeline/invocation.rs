use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::{ShaderFile, ShaderLanguage};
use crate::config::PipelineConfig;
use crate::constants::suffix;
use crate::error::{io_error, PipelineError, PipelineResult};

/// Action the driver performs for every discovered shader
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipelineStep {
    /// Shader source to SPIR-V
    Compile,
    /// Vendor ahead-of-time compile of the SPIR-V, statistics on stdout
    OfflineCompile,
    /// Vendor static analysis of the SPIR-V
    StaticAnalyze,
}

impl PipelineStep {
    pub fn as_str(self) -> &'static str {
        match self {
            PipelineStep::Compile => "compile",
            PipelineStep::OfflineCompile => "offline-compile",
            PipelineStep::StaticAnalyze => "static-analyze",
        }
    }

    /// Suffix of the artifact this step writes next to the source
    pub fn output_suffix(self) -> &'static str {
        match self {
            PipelineStep::Compile => suffix::SPIRV,
            PipelineStep::OfflineCompile => suffix::OFFLINE_REPORT,
            PipelineStep::StaticAnalyze => suffix::STATIC_REPORT,
        }
    }

    /// Whether this step consumes the compiled `.spv` artifact
    pub fn needs_spirv(self) -> bool {
        !matches!(self, PipelineStep::Compile)
    }
}

impl FromStr for PipelineStep {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "compile" => Ok(PipelineStep::Compile),
            "offline-compile" => Ok(PipelineStep::OfflineCompile),
            "static-analyze" => Ok(PipelineStep::StaticAnalyze),
            other => Err(PipelineError::UnsupportedStep {
                name: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for PipelineStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a tool's output ends up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputTarget {
    /// The output path is already part of the arguments
    Argument,
    /// The tool writes to stdout, which is redirected into the output path
    Stdout,
}

/// One external tool call for one shader
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInvocation {
    pub step: PipelineStep,
    pub tool: PathBuf,
    pub args: Vec<String>,
    pub output: PathBuf,
    pub output_target: OutputTarget,
    /// Source shader this invocation was built for
    pub shader: PathBuf,
    /// Artifact that must exist before the tool can run
    pub prerequisite: Option<PathBuf>,
}

impl ToolInvocation {
    /// Short tool name for logs and errors
    pub fn tool_name(&self) -> String {
        self.tool
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.tool.display().to_string())
    }

    /// Shell-like rendering of the command line
    pub fn display(&self) -> String {
        let mut line = quote(&self.tool.display().to_string());
        for arg in &self.args {
            line.push(' ');
            line.push_str(&quote(arg));
        }
        if self.output_target == OutputTarget::Stdout {
            line.push_str(" > ");
            line.push_str(&quote(&self.output.display().to_string()));
        }
        line
    }
}

impl fmt::Display for ToolInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

fn quote(part: &str) -> String {
    if part.is_empty() || part.contains(char::is_whitespace) {
        format!("\"{}\"", part)
    } else {
        part.to_string()
    }
}

/// Builds tool invocations from the run configuration
pub struct CommandBuilder<'a> {
    config: &'a PipelineConfig,
    compiler: PathBuf,
}

impl<'a> CommandBuilder<'a> {
    /// Fails with a configuration error when the compiler can't be located
    pub fn new(config: &'a PipelineConfig) -> PipelineResult<Self> {
        let compiler = config.compiler_path()?;
        Ok(Self { config, compiler })
    }

    /// Invocation printing the compiler version
    pub fn compiler_version(&self) -> ToolInvocation {
        ToolInvocation {
            step: PipelineStep::Compile,
            tool: self.compiler.clone(),
            args: vec!["--version".to_string()],
            output: PathBuf::new(),
            output_target: OutputTarget::Argument,
            shader: PathBuf::new(),
            prerequisite: None,
        }
    }

    pub fn build(
        &self,
        step: PipelineStep,
        language: ShaderLanguage,
        shader: &ShaderFile,
    ) -> PipelineResult<ToolInvocation> {
        match step {
            PipelineStep::Compile => Ok(self.compile(language, shader)),
            PipelineStep::OfflineCompile => self.offline_compile(shader),
            PipelineStep::StaticAnalyze => self.static_analyze(shader),
        }
    }

    fn compile(&self, language: ShaderLanguage, shader: &ShaderFile) -> ToolInvocation {
        let compiler = &self.config.compiler;
        let output = shader.artifact_path(suffix::SPIRV);

        let mut args = vec!["-x".to_string(), language.as_str().to_string()];
        if compiler.debug_info {
            args.push("-g".to_string());
        }
        args.push(shader.path.display().to_string());
        args.push(format!("-O{}", compiler.optimization_level));
        args.push(format!("--target-env={}", compiler.target_env));
        args.push(format!("--target-spv={}", compiler.target_spv));
        args.push("-o".to_string());
        args.push(output.display().to_string());

        ToolInvocation {
            step: PipelineStep::Compile,
            tool: self.compiler.clone(),
            args,
            output,
            output_target: OutputTarget::Argument,
            shader: shader.path.clone(),
            prerequisite: None,
        }
    }

    fn offline_compile(&self, shader: &ShaderFile) -> PipelineResult<ToolInvocation> {
        let offline = &self.config.offline_compiler;
        let input = absolute(&shader.artifact_path(suffix::SPIRV))?;
        let output = absolute(&shader.artifact_path(suffix::OFFLINE_REPORT))?;

        Ok(ToolInvocation {
            step: PipelineStep::OfflineCompile,
            tool: offline.executable.clone(),
            args: vec![
                "-dump=stats".to_string(),
                format!("-arch={}", offline.arch),
                format!("-api={}", offline.api),
                input.display().to_string(),
            ],
            output,
            output_target: OutputTarget::Stdout,
            shader: shader.path.clone(),
            prerequisite: Some(input),
        })
    }

    fn static_analyze(&self, shader: &ShaderFile) -> PipelineResult<ToolInvocation> {
        let analyzer = &self.config.static_analyzer;
        let input = absolute(&shader.artifact_path(suffix::SPIRV))?;
        let output = absolute(&shader.artifact_path(suffix::STATIC_REPORT))?;

        Ok(ToolInvocation {
            step: PipelineStep::StaticAnalyze,
            tool: analyzer.executable.clone(),
            args: vec![
                "--vulkan".to_string(),
                "-c".to_string(),
                analyzer.gpu.clone(),
                "--spirv".to_string(),
                "-n".to_string(),
                analyzer.entry_point.clone(),
                input.display().to_string(),
                "-o".to_string(),
                output.display().to_string(),
            ],
            output,
            output_target: OutputTarget::Argument,
            shader: shader.path.clone(),
            prerequisite: Some(input),
        })
    }
}

fn absolute(path: &Path) -> PipelineResult<PathBuf> {
    std::path::absolute(path).map_err(|e| io_error(path, e))
}

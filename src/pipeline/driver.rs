use std::collections::HashSet;
use std::path::{Path, PathBuf};

use super::{
    CommandBuilder, InvocationOutcome, PipelineStep, ProjectFilter, RunSummary, ShaderDiscovery,
    ShaderFile, ShaderLanguage, ToolRunner,
};
use crate::config::PipelineConfig;
use crate::error::{PipelineError, PipelineResult};

/// What a single run should do
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRequest {
    pub project: ProjectFilter,
    /// Languages in processing order
    pub languages: Vec<ShaderLanguage>,
    pub step: PipelineStep,
    /// Run the compile step first when `step` consumes SPIR-V
    pub compile_first: bool,
    /// Print the compiler version before compiling
    pub report_compiler_version: bool,
}

impl RunRequest {
    pub fn new(project: ProjectFilter, languages: Vec<ShaderLanguage>, step: PipelineStep) -> Self {
        Self {
            project,
            languages,
            step,
            compile_first: false,
            report_compiler_version: false,
        }
    }

    /// Build a request from raw selectors
    ///
    /// `language` of `None` selects every supported language. Unknown
    /// selectors fail here, before the driver touches anything.
    pub fn from_selectors(project: &str, language: Option<&str>, step: &str) -> PipelineResult<Self> {
        let languages = match language {
            Some(name) => vec![name.parse::<ShaderLanguage>()?],
            None => ShaderLanguage::ALL.to_vec(),
        };
        let step = step.parse::<PipelineStep>()?;
        Ok(Self::new(ProjectFilter::from_arg(project), languages, step))
    }

    pub fn with_compile_first(mut self, compile_first: bool) -> Self {
        self.compile_first = compile_first;
        self
    }

    pub fn with_compiler_version(mut self, report: bool) -> Self {
        self.report_compiler_version = report;
        self
    }

    /// Steps in execution order
    pub fn steps(&self) -> Vec<PipelineStep> {
        if self.compile_first && self.step.needs_spirv() {
            vec![PipelineStep::Compile, self.step]
        } else {
            vec![self.step]
        }
    }
}

/// Walks shader trees and runs one tool invocation per shader
///
/// Invocations run one at a time in discovery order. Per-file failures are
/// recorded in the returned [`RunSummary`]; they never stop the batch.
pub struct ShaderPipelineDriver<R: ToolRunner> {
    config: PipelineConfig,
    runner: R,
}

impl<R: ToolRunner> ShaderPipelineDriver<R> {
    /// Fails with a configuration error if the toolchain root is missing
    pub fn new(config: PipelineConfig, runner: R) -> PipelineResult<Self> {
        config.validate()?;
        Ok(Self { config, runner })
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    pub fn into_runner(self) -> R {
        self.runner
    }

    pub fn run(&mut self, request: &RunRequest) -> PipelineResult<RunSummary> {
        let builder = CommandBuilder::new(&self.config)?;
        let runner = &mut self.runner;
        let steps = request.steps();
        let mut state = RunState::default();

        log::info!(
            "Running {} for project \"{}\"",
            steps
                .iter()
                .map(|s| s.as_str())
                .collect::<Vec<_>>()
                .join(" + "),
            request.project
        );

        if request.report_compiler_version && steps.contains(&PipelineStep::Compile) {
            report_compiler_version(runner, &builder);
        }

        for &step in &steps {
            for &language in &request.languages {
                let root = self.config.language_root(language);
                run_language(runner, &builder, &mut state, &root, step, language, &request.project);
            }
        }

        log::info!("Shader pipeline finished");
        Ok(state.summary)
    }
}

#[derive(Default)]
struct RunState {
    summary: RunSummary,
    /// Outputs written by successful invocations earlier in this run
    produced: HashSet<PathBuf>,
    /// Outputs of invocations that failed this run; anything left on disk is stale
    failed: HashSet<PathBuf>,
}

impl RunState {
    fn artifact_available(&self, artifact: &Path) -> bool {
        let key = normalize(artifact);
        if self.failed.contains(&key) {
            return false;
        }
        self.produced.contains(&key) || artifact.is_file()
    }
}

fn report_compiler_version<R: ToolRunner>(runner: &mut R, builder: &CommandBuilder<'_>) {
    log::info!("Shader compiler version:");
    if let Err(e) = runner.run(&builder.compiler_version()) {
        log::warn!("Could not query compiler version: {}", e);
    }
}

fn run_language<R: ToolRunner>(
    runner: &mut R,
    builder: &CommandBuilder<'_>,
    state: &mut RunState,
    root: &Path,
    step: PipelineStep,
    language: ShaderLanguage,
    project: &ProjectFilter,
) {
    if !root.is_dir() {
        log::warn!("Shader directory {} does not exist, skipping {}", root.display(), language);
        return;
    }

    let discovery = ShaderDiscovery::new(root, project.clone());
    for shader in discovery.iter() {
        let outcome = run_shader(runner, builder, state, step, language, &shader);
        state.summary.record(outcome);
    }
}

fn run_shader<R: ToolRunner>(
    runner: &mut R,
    builder: &CommandBuilder<'_>,
    state: &mut RunState,
    step: PipelineStep,
    language: ShaderLanguage,
    shader: &ShaderFile,
) -> InvocationOutcome {
    let mut outcome = InvocationOutcome {
        shader: shader.path.clone(),
        language,
        step,
        command: None,
        error: None,
    };

    let invocation = match builder.build(step, language, shader) {
        Ok(invocation) => invocation,
        Err(e) => {
            log::error!("Could not build {} command for {}: {}", step, shader.path.display(), e);
            outcome.error = Some(e);
            return outcome;
        }
    };
    outcome.command = Some(invocation.display());

    if let Some(artifact) = &invocation.prerequisite {
        if !state.artifact_available(artifact) {
            log::warn!(
                "Skipping {}: {} has not been compiled yet",
                shader.path.display(),
                artifact.display()
            );
            outcome.error = Some(PipelineError::MissingPrerequisiteArtifact {
                shader: shader.path.clone(),
                artifact: artifact.clone(),
            });
            return outcome;
        }
    }

    log::info!("{}", invocation.display());
    match runner.run(&invocation) {
        Ok(()) => {
            log::debug!("{} finished for {}", invocation.tool_name(), shader.path.display());
            let output = normalize(&invocation.output);
            state.failed.remove(&output);
            state.produced.insert(output);
        }
        Err(e) => {
            log::error!("{}", e);
            let output = normalize(&invocation.output);
            state.produced.remove(&output);
            state.failed.insert(output);
            outcome.error = Some(e);
        }
    }
    outcome
}

fn normalize(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

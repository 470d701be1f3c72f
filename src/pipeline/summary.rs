use std::path::PathBuf;

use super::{PipelineStep, ShaderLanguage};
use crate::error::PipelineError;

/// Result of processing one shader for one step
#[derive(Debug)]
pub struct InvocationOutcome {
    pub shader: PathBuf,
    pub language: ShaderLanguage,
    pub step: PipelineStep,
    /// Rendered command line, absent if the invocation never got built
    pub command: Option<String>,
    pub error: Option<PipelineError>,
}

impl InvocationOutcome {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// Tally of a whole run
#[derive(Debug, Default)]
pub struct RunSummary {
    outcomes: Vec<InvocationOutcome>,
}

impl RunSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, outcome: InvocationOutcome) {
        self.outcomes.push(outcome);
    }

    /// Outcomes in execution order
    pub fn outcomes(&self) -> &[InvocationOutcome] {
        &self.outcomes
    }

    pub fn attempted(&self) -> usize {
        self.outcomes.len()
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.succeeded()).count()
    }

    pub fn failed(&self) -> usize {
        self.attempted() - self.succeeded()
    }

    pub fn failures(&self) -> impl Iterator<Item = &InvocationOutcome> {
        self.outcomes.iter().filter(|o| !o.succeeded())
    }

    /// True when nothing failed, including runs that found no shaders
    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    /// One line per failure: step, language, error and the command line when one was built
    pub fn failure_report(&self) -> Vec<String> {
        self.failures()
            .filter_map(|failure| {
                let error = failure.error.as_ref()?;
                let mut line = format!("[{} {}] {}", failure.step, failure.language, error);
                if let Some(command) = &failure.command {
                    line.push_str("\n    ");
                    line.push_str(command);
                }
                Some(line)
            })
            .collect()
    }

    /// Log the final tally plus one line per failure
    pub fn log_report(&self) {
        for line in self.failure_report() {
            log::error!("{}", line);
        }
        log::info!(
            "{} invocation(s) attempted, {} succeeded, {} failed",
            self.attempted(),
            self.succeeded(),
            self.failed()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(shader: &str, command: Option<&str>, error: Option<PipelineError>) -> InvocationOutcome {
        InvocationOutcome {
            shader: PathBuf::from(shader),
            language: ShaderLanguage::Glsl,
            step: PipelineStep::Compile,
            command: command.map(str::to_string),
            error,
        }
    }

    #[test]
    fn test_failure_report_includes_command() {
        let mut summary = RunSummary::new();
        summary.record(outcome("a.vert", Some("glslc a.vert -o a.vert.spv"), None));
        summary.record(outcome(
            "b.frag",
            Some("glslc b.frag -o b.frag.spv"),
            Some(PipelineError::ToolExecutionFailed {
                tool: "glslc".to_string(),
                shader: PathBuf::from("b.frag"),
                exit_code: Some(2),
            }),
        ));
        summary.record(outcome(
            "c.comp",
            None,
            Some(PipelineError::Io {
                path: PathBuf::from("c.comp"),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
            }),
        ));

        let report = summary.failure_report();
        assert_eq!(report.len(), 2);
        assert_eq!(
            report[0],
            "[compile glsl] glslc failed on b.frag (exit code 2)\n    glslc b.frag -o b.frag.spv"
        );
        assert!(report[1].starts_with("[compile glsl] IO error at c.comp"));
        assert!(!report[1].contains('\n'));
        assert_eq!(summary.failed(), 2);
    }
}

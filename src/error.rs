//! Pipeline error handling
//!
//! Run-level errors (`Configuration`, `ConfigFile`, `UnsupportedLanguage`,
//! `UnsupportedStep`) abort before any tool runs. Per-file errors
//! (`MissingPrerequisiteArtifact`, `ToolExecutionFailed`, `ToolLaunchFailed`)
//! are recorded in the run summary and the batch keeps going.

use std::path::{Path, PathBuf};

/// Type alias for pipeline results
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Errors raised by the shader pipeline
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Invalid config file {path}: {message}")]
    ConfigFile { path: PathBuf, message: String },

    #[error("Unsupported shading language: {name}")]
    UnsupportedLanguage { name: String },

    #[error("Unsupported pipeline step: {name}")]
    UnsupportedStep { name: String },

    #[error("Missing prerequisite artifact {artifact} for {shader}")]
    MissingPrerequisiteArtifact { shader: PathBuf, artifact: PathBuf },

    #[error("{tool} failed on {shader} ({})", describe_exit(.exit_code))]
    ToolExecutionFailed {
        tool: String,
        shader: PathBuf,
        exit_code: Option<i32>,
    },

    #[error("Failed to launch {tool} for {shader}: {source}")]
    ToolLaunchFailed {
        tool: String,
        shader: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "terminated by signal".to_string(),
    }
}

/// Create a configuration error
pub fn configuration_error(message: impl Into<String>) -> PipelineError {
    PipelineError::Configuration {
        message: message.into(),
    }
}

/// Create an IO error tagged with the path it happened at
pub fn io_error(path: impl AsRef<Path>, source: std::io::Error) -> PipelineError {
    PipelineError::Io {
        path: path.as_ref().to_path_buf(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_failure_message() {
        let err = PipelineError::ToolExecutionFailed {
            tool: "glslc".to_string(),
            shader: PathBuf::from("triangle.vert"),
            exit_code: Some(1),
        };
        assert_eq!(err.to_string(), "glslc failed on triangle.vert (exit code 1)");

        let err = PipelineError::ToolExecutionFailed {
            tool: "glslc".to_string(),
            shader: PathBuf::from("triangle.vert"),
            exit_code: None,
        };
        assert!(err.to_string().ends_with("(terminated by signal)"));
    }
}

//! Shader pipeline driver
//!
//! Walks per-language shader trees, picks out shader sources by stage
//! extension and project directory, and runs the SPIR-V compiler or a vendor
//! analysis tool once per file.

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod pipeline;

pub use config::PipelineConfig;
pub use error::{PipelineError, PipelineResult};
pub use pipeline::{
    PipelineStep, ProjectFilter, RunRequest, RunSummary, ShaderDiscovery, ShaderFile,
    ShaderLanguage, ShaderPipelineDriver, ShaderStage, ToolInvocation, ToolRunner,
};

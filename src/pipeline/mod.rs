/// Shader Pipeline
///
/// Finds shader sources under a language root and runs one external tool per
/// file: the SPIR-V compiler, the vendor offline compiler, or the vendor
/// static analyzer.
///
/// Flow per run:
/// - walk `<shader_root>/<language>` in name order
/// - keep files inside the requested project directory (or every directory for `all`)
/// - keep files with a recognized stage extension
/// - build a `ToolInvocation` for the requested step and run it to completion

pub mod discovery;
pub mod driver;
pub mod invocation;
pub mod language;
pub mod runner;
pub mod stage;
pub mod summary;

pub use discovery::{ProjectFilter, ShaderDiscovery, ShaderFile};
pub use driver::{RunRequest, ShaderPipelineDriver};
pub use invocation::{CommandBuilder, OutputTarget, PipelineStep, ToolInvocation};
pub use language::ShaderLanguage;
pub use runner::{DryRunRunner, ProcessRunner, ToolRunner};
pub use stage::ShaderStage;
pub use summary::{InvocationOutcome, RunSummary};

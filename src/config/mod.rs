//! Pipeline configuration
//!
//! One explicit structure handed to the driver, no process-wide state.
//! Values resolve in this order:
//! built-in defaults, then a TOML file, then the environment, then
//! command-line overrides applied by the caller.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::constants;
use crate::error::{configuration_error, io_error, PipelineError, PipelineResult};
use crate::pipeline::ShaderLanguage;

/// Shader compiler settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    /// Executable name, resolved under `<toolchain_root>/bin`
    pub executable: String,
    pub debug_info: bool,
    pub optimization_level: String,
    pub target_env: String,
    pub target_spv: String,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            executable: constants::compiler::EXECUTABLE.to_string(),
            debug_info: true,
            optimization_level: constants::compiler::OPTIMIZATION_LEVEL.to_string(),
            target_env: constants::compiler::TARGET_ENV.to_string(),
            target_spv: constants::compiler::TARGET_SPV.to_string(),
        }
    }
}

/// Vendor offline compiler settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct OfflineCompilerConfig {
    pub executable: PathBuf,
    pub arch: String,
    pub api: String,
}

impl Default for OfflineCompilerConfig {
    fn default() -> Self {
        Self {
            executable: PathBuf::from(constants::offline_compiler::EXECUTABLE),
            arch: constants::offline_compiler::ARCH.to_string(),
            api: constants::offline_compiler::API.to_string(),
        }
    }
}

/// Vendor static analyzer settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StaticAnalyzerConfig {
    pub executable: PathBuf,
    pub gpu: String,
    pub entry_point: String,
}

impl Default for StaticAnalyzerConfig {
    fn default() -> Self {
        Self {
            executable: PathBuf::from(constants::static_analyzer::EXECUTABLE),
            gpu: constants::static_analyzer::GPU.to_string(),
            entry_point: constants::static_analyzer::ENTRY_POINT.to_string(),
        }
    }
}

/// Complete configuration for one pipeline run
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Directory holding one subdirectory per shading language
    pub shader_root: PathBuf,

    /// Toolchain installation root, usually taken from `VULKAN_SDK`
    pub toolchain_root: Option<PathBuf>,

    pub compiler: CompilerConfig,
    pub offline_compiler: OfflineCompilerConfig,
    pub static_analyzer: StaticAnalyzerConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            shader_root: PathBuf::from(constants::paths::DEFAULT_SHADER_ROOT),
            toolchain_root: None,
            compiler: CompilerConfig::default(),
            offline_compiler: OfflineCompilerConfig::default(),
            static_analyzer: StaticAnalyzerConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(raw: &str, origin: &Path) -> PipelineResult<Self> {
        toml::from_str(raw).map_err(|e| PipelineError::ConfigFile {
            path: origin.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Load configuration from a TOML file
    pub fn load_file(path: impl AsRef<Path>) -> PipelineResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| io_error(path, e))?;
        let config = Self::from_toml_str(&raw, path)?;
        log::debug!("Loaded pipeline config from {}", path.display());
        Ok(config)
    }

    /// Load an explicit config file, or the default one if it exists, or defaults
    pub fn load(explicit: Option<&Path>) -> PipelineResult<Self> {
        match explicit {
            Some(path) => Self::load_file(path),
            None => {
                let default_path = Path::new(constants::paths::DEFAULT_CONFIG_FILE);
                if default_path.is_file() {
                    Self::load_file(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Fill the toolchain root from the environment if nothing set it yet
    pub fn apply_env(&mut self) {
        self.apply_toolchain_root_from(std::env::var_os(constants::env::TOOLCHAIN_ROOT));
    }

    fn apply_toolchain_root_from(&mut self, value: Option<std::ffi::OsString>) {
        if self.toolchain_root.is_some() {
            return;
        }
        if let Some(root) = value.filter(|v| !v.is_empty()) {
            self.toolchain_root = Some(PathBuf::from(root));
        }
    }

    /// Check settings that must be present before discovery starts
    pub fn validate(&self) -> PipelineResult<()> {
        if self.toolchain_root.is_none() {
            return Err(configuration_error(format!(
                "toolchain root is not set (define {} or set toolchain_root in {})",
                constants::env::TOOLCHAIN_ROOT,
                constants::paths::DEFAULT_CONFIG_FILE
            )));
        }
        Ok(())
    }

    /// Full path of the shader compiler executable
    pub fn compiler_path(&self) -> PipelineResult<PathBuf> {
        let root = self.toolchain_root.as_ref().ok_or_else(|| {
            configuration_error(format!(
                "{} is required to locate the shader compiler",
                constants::env::TOOLCHAIN_ROOT
            ))
        })?;
        Ok(root
            .join(constants::paths::COMPILER_BIN_DIR)
            .join(&self.compiler.executable))
    }

    /// Root directory scanned for the given language
    pub fn language_root(&self, language: ShaderLanguage) -> PathBuf {
        self.shader_root.join(language.dir_name())
    }
}

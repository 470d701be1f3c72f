// Shader Pipeline Constants
//
// Default directories, tool names and GPU identifiers. Every value here is a
// default only: `PipelineConfig` carries the effective settings for a run.

/// Filesystem layout
pub mod paths {
    /// Root holding one directory per shading language
    pub const DEFAULT_SHADER_ROOT: &str = "./data/shaders";

    /// Config file picked up from the working directory when `--config` is absent
    pub const DEFAULT_CONFIG_FILE: &str = "shader_pipeline.toml";

    /// Compiler location relative to the toolchain root
    pub const COMPILER_BIN_DIR: &str = "bin";
}

/// Environment variables
pub mod env {
    /// Toolchain installation root
    pub const TOOLCHAIN_ROOT: &str = "VULKAN_SDK";
}

/// Project filter value that disables filtering
pub const ALL_PROJECTS: &str = "all";

/// Artifact suffixes, appended to the full input file name
pub mod suffix {
    pub const SPIRV: &str = "spv";
    pub const OFFLINE_REPORT: &str = "aoc";
    pub const STATIC_REPORT: &str = "mali";
}

/// Shader compiler defaults
pub mod compiler {
    pub const EXECUTABLE: &str = "glslc";
    pub const OPTIMIZATION_LEVEL: &str = "0";
    pub const TARGET_ENV: &str = "vulkan1.2";
    // ray tracing stages need at least spv1.4
    pub const TARGET_SPV: &str = "spv1.4";
}

/// Adreno offline compiler defaults
pub mod offline_compiler {
    pub const EXECUTABLE: &str = "aoc";
    pub const ARCH: &str = "a650";
    pub const API: &str = "Vulkan";
}

/// Mali static analyzer defaults
pub mod static_analyzer {
    pub const EXECUTABLE: &str = "malioc";
    pub const GPU: &str = "Mali-G72";
    pub const ENTRY_POINT: &str = "main";
}

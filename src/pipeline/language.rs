use std::fmt;
use std::str::FromStr;

use crate::error::PipelineError;

/// Shading language selector
///
/// Each language owns a subdirectory of the shader root and is passed to the
/// compiler's `-x` flag under the same name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderLanguage {
    Hlsl,
    Glsl,
}

impl ShaderLanguage {
    /// Every supported language, in the order full runs process them
    pub const ALL: [ShaderLanguage; 2] = [ShaderLanguage::Hlsl, ShaderLanguage::Glsl];

    /// Name used on the command line and by the compiler
    pub fn as_str(self) -> &'static str {
        match self {
            ShaderLanguage::Hlsl => "hlsl",
            ShaderLanguage::Glsl => "glsl",
        }
    }

    /// Subdirectory of the shader root holding this language's projects
    pub fn dir_name(self) -> &'static str {
        self.as_str()
    }
}

impl FromStr for ShaderLanguage {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hlsl" => Ok(ShaderLanguage::Hlsl),
            "glsl" => Ok(ShaderLanguage::Glsl),
            other => Err(PipelineError::UnsupportedLanguage {
                name: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for ShaderLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

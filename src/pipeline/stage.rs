use std::path::Path;

/// Shader pipeline stage, identified by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
    Compute,
    Geometry,
    TessellationControl,
    TessellationEvaluation,
    RayGeneration,
    RayClosestHit,
    RayMiss,
}

impl ShaderStage {
    pub const ALL: [ShaderStage; 9] = [
        ShaderStage::Vertex,
        ShaderStage::Fragment,
        ShaderStage::Compute,
        ShaderStage::Geometry,
        ShaderStage::TessellationControl,
        ShaderStage::TessellationEvaluation,
        ShaderStage::RayGeneration,
        ShaderStage::RayClosestHit,
        ShaderStage::RayMiss,
    ];

    /// Map an extension (without the dot) to a stage
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "vert" => Some(ShaderStage::Vertex),
            "frag" => Some(ShaderStage::Fragment),
            "comp" => Some(ShaderStage::Compute),
            "geom" => Some(ShaderStage::Geometry),
            "tesc" => Some(ShaderStage::TessellationControl),
            "tese" => Some(ShaderStage::TessellationEvaluation),
            "rgen" => Some(ShaderStage::RayGeneration),
            "rchit" => Some(ShaderStage::RayClosestHit),
            "rmiss" => Some(ShaderStage::RayMiss),
            _ => None,
        }
    }

    /// Stage of a file, or `None` when its extension is not recognized
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    pub fn extension(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vert",
            ShaderStage::Fragment => "frag",
            ShaderStage::Compute => "comp",
            ShaderStage::Geometry => "geom",
            ShaderStage::TessellationControl => "tesc",
            ShaderStage::TessellationEvaluation => "tese",
            ShaderStage::RayGeneration => "rgen",
            ShaderStage::RayClosestHit => "rchit",
            ShaderStage::RayMiss => "rmiss",
        }
    }
}

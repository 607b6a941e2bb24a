pub mod config;
pub mod render;

pub use config::{CacheConfig, ConfigError};
pub use render::{
    gl_program::LinkedProgram,
    opengl::{GraphicsContext, ProgramHandle, ShaderHandle, UniformLocation},
    program_cache::{CacheStats, LinkError, ProgramLinkCache, StagePairKey},
    shader::{GlStage, ShaderStage, StageId},
};

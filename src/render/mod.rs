pub mod gl_program;
pub mod opengl;
pub mod program_cache;
pub mod shader;

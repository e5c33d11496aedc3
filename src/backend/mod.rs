//! The slice of the graphics API this crate consumes.
//!
//! `ShaderProgram` never talks to a concrete GL binding directly; it goes
//! through [`GlApi`], which covers exactly the calls needed to compile, link,
//! reflect, and feed a program. The production implementation lives in
//! [`glow`](self::glow) and forwards to `glow::Context`. Tests use an
//! in-memory backend with the same semantics.

use std::fmt;

pub mod glow;

#[cfg(test)]
pub(crate) mod fake;

/// Pipeline stage a shader object is compiled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => write!(f, "vertex"),
            ShaderStage::Fragment => write!(f, "fragment"),
        }
    }
}

/// Graphics-backend surface used by [`crate::ShaderProgram`].
///
/// Associated handle types mirror `glow::HasContext`. All methods must be
/// called from the thread that owns the current graphics context; the trait
/// adds no synchronization of its own.
pub trait GlApi {
    type Shader: Copy + Eq + fmt::Debug;
    type Program: Copy + Eq + fmt::Debug;
    type Uniform: Clone + fmt::Debug;

    fn create_shader(&self, stage: ShaderStage) -> std::result::Result<Self::Shader, String>;
    fn shader_source(&self, shader: Self::Shader, source: &str);
    fn compile_shader(&self, shader: Self::Shader);
    fn shader_compile_status(&self, shader: Self::Shader) -> bool;
    fn shader_info_log(&self, shader: Self::Shader) -> String;
    fn delete_shader(&self, shader: Self::Shader);

    fn create_program(&self) -> std::result::Result<Self::Program, String>;
    fn attach_shader(&self, program: Self::Program, shader: Self::Shader);
    fn detach_shader(&self, program: Self::Program, shader: Self::Shader);
    fn link_program(&self, program: Self::Program);
    fn program_link_status(&self, program: Self::Program) -> bool;
    fn program_info_log(&self, program: Self::Program) -> String;
    fn delete_program(&self, program: Self::Program);

    /// Number of uniforms the linker kept (declared and actually referenced).
    fn active_uniform_count(&self, program: Self::Program) -> u32;
    /// Name of the active uniform at `index`, verbatim as the driver reports
    /// it (array suffixes and struct dots included).
    fn active_uniform_name(&self, program: Self::Program, index: u32) -> Option<String>;
    fn uniform_location(&self, program: Self::Program, name: &str) -> Option<Self::Uniform>;
    fn attrib_location(&self, program: Self::Program, name: &str) -> Option<u32>;

    /// Makes `program` the context's current program (`None` unbinds).
    fn use_program(&self, program: Option<Self::Program>);

    fn uniform_1_i32(&self, location: &Self::Uniform, value: i32);
    fn uniform_1_f32(&self, location: &Self::Uniform, value: f32);
    fn uniform_3_f32(&self, location: &Self::Uniform, x: f32, y: f32, z: f32);
    /// `values` is 16 floats in column-major order; `transpose` follows GL
    /// semantics.
    fn uniform_matrix_4_f32(&self, location: &Self::Uniform, transpose: bool, values: &[f32; 16]);
}

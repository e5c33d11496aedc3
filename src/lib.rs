//! Shader-program management: compile and link GPU shader source into a
//! program, snapshot its active-uniform locations, and update uniforms
//! through typed setters.
//!
//! The host owns the graphics context, the window, and the render loop; this
//! crate owns the program lifecycle. Construction, binding, uniform updates,
//! and destruction must all happen on the thread whose context is current.
//! Matrices are column-major (`glam`) throughout; there is no per-call
//! transpose option.
//!
//! ```no_run
//! use glprog::{sources, ShaderProgram};
//!
//! # fn demo(gl: &glow::Context) -> glprog::Result<()> {
//! let mut program =
//!     ShaderProgram::new(gl, sources::SOLID_VERTEX_SRC, sources::SOLID_FRAGMENT_SRC)?;
//! program.set_vec3(gl, "solid_color", glam::Vec3::new(1.0, 0.2, 0.2))?;
//! program.bind(gl)?;
//! // ... draw calls ...
//! program.destroy(gl)?;
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod error;
pub mod program;
pub mod sources;

pub use backend::{GlApi, ShaderStage};
pub use error::{Result, ShaderError};
pub use program::ShaderProgram;

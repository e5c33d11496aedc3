use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::backend::{GlApi, ShaderStage};
use crate::error::{Result, ShaderError};

/// A compiled and linked shader program plus its active-uniform table.
///
/// The uniform table is snapshotted once, right after a successful link, and
/// never changes afterward. It holds exactly the uniforms the driver kept as
/// active; a uniform that was declared but optimized away is absent, and
/// setting it is an error rather than a silent no-op. Relinking is not
/// supported; build a new program instead.
///
/// Every method takes the backend by reference because the graphics context
/// outlives and is shared by all programs. All calls must happen on the
/// thread that owns the current context.
pub struct ShaderProgram<G: GlApi> {
    handle: Option<G::Program>,
    uniforms: HashMap<String, G::Uniform>,
}

impl<G: GlApi> std::fmt::Debug for ShaderProgram<G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShaderProgram")
            .field("handle", &self.handle)
            .field("uniforms", &self.uniforms)
            .finish()
    }
}

impl<G: GlApi> ShaderProgram<G> {
    /// Compiles both stages, links them, and snapshots the active uniforms.
    ///
    /// On any failure every stage and program object allocated so far is
    /// deleted before the error is returned, so a failed attempt leaks
    /// nothing.
    pub fn new(gl: &G, vertex_source: &str, fragment_source: &str) -> Result<Self> {
        let vertex = Self::compile_stage(gl, ShaderStage::Vertex, vertex_source)?;
        let fragment = match Self::compile_stage(gl, ShaderStage::Fragment, fragment_source) {
            Ok(shader) => shader,
            Err(err) => {
                gl.delete_shader(vertex);
                return Err(err);
            }
        };

        let program = match gl.create_program() {
            Ok(program) => program,
            Err(msg) => {
                gl.delete_shader(vertex);
                gl.delete_shader(fragment);
                return Err(ShaderError::Backend(msg));
            }
        };

        gl.attach_shader(program, vertex);
        gl.attach_shader(program, fragment);
        gl.link_program(program);

        if !gl.program_link_status(program) {
            let log = gl.program_info_log(program);
            gl.delete_program(program);
            gl.delete_shader(vertex);
            gl.delete_shader(fragment);
            return Err(ShaderError::Link(log));
        }

        // The program holds its own copy of the compiled code; the stage
        // objects can go now instead of lingering until program deletion.
        gl.detach_shader(program, vertex);
        gl.detach_shader(program, fragment);
        gl.delete_shader(vertex);
        gl.delete_shader(fragment);

        let count = gl.active_uniform_count(program);
        let mut uniforms = HashMap::with_capacity(count as usize);
        for index in 0..count {
            let Some(name) = gl.active_uniform_name(program, index) else {
                continue;
            };
            // Names are stored verbatim, array suffixes and all. Uniqueness
            // within a program is guaranteed by the driver.
            if let Some(location) = gl.uniform_location(program, &name) {
                uniforms.insert(name, location);
            }
        }

        log::debug!("linked shader program with {} active uniforms", uniforms.len());

        Ok(ShaderProgram {
            handle: Some(program),
            uniforms,
        })
    }

    /// Reads both stage sources from disk and builds the program from them.
    pub fn from_files(
        gl: &G,
        vertex_path: impl AsRef<Path>,
        fragment_path: impl AsRef<Path>,
    ) -> Result<Self> {
        let vertex_source = fs::read_to_string(vertex_path)?;
        let fragment_source = fs::read_to_string(fragment_path)?;
        Self::new(gl, &vertex_source, &fragment_source)
    }

    fn compile_stage(gl: &G, stage: ShaderStage, source: &str) -> Result<G::Shader> {
        let shader = gl.create_shader(stage).map_err(ShaderError::Backend)?;
        gl.shader_source(shader, source);
        gl.compile_shader(shader);

        if !gl.shader_compile_status(shader) {
            let log = gl.shader_info_log(shader);
            gl.delete_shader(shader);
            return Err(ShaderError::Compilation { stage, log });
        }

        Ok(shader)
    }

    /// Makes this program current for subsequent draw and uniform calls.
    pub fn bind(&self, gl: &G) -> Result<()> {
        gl.use_program(Some(self.handle()?));
        Ok(())
    }

    /// The linked program handle, for hosts issuing raw backend calls.
    pub fn handle(&self) -> Result<G::Program> {
        self.handle.ok_or(ShaderError::Destroyed)
    }

    /// Location of the named vertex attribute, `None` if the linker did not
    /// keep it active.
    pub fn attrib_location(&self, gl: &G, name: &str) -> Result<Option<u32>> {
        Ok(gl.attrib_location(self.handle()?, name))
    }

    pub fn uniform_count(&self) -> usize {
        self.uniforms.len()
    }

    pub fn has_uniform(&self, name: &str) -> bool {
        self.uniforms.contains_key(name)
    }

    fn location(&self, name: &str) -> Result<&G::Uniform> {
        self.uniforms
            .get(name)
            .ok_or_else(|| ShaderError::MissingUniform(name.to_owned()))
    }

    pub fn set_i32(&self, gl: &G, name: &str, value: i32) -> Result<()> {
        let location = self.location(name)?;
        self.bind(gl)?;
        gl.uniform_1_i32(location, value);
        Ok(())
    }

    pub fn set_f32(&self, gl: &G, name: &str, value: f32) -> Result<()> {
        let location = self.location(name)?;
        self.bind(gl)?;
        gl.uniform_1_f32(location, value);
        Ok(())
    }

    pub fn set_vec3(&self, gl: &G, name: &str, value: glam::Vec3) -> Result<()> {
        let location = self.location(name)?;
        self.bind(gl)?;
        gl.uniform_3_f32(location, value.x, value.y, value.z);
        Ok(())
    }

    /// Writes a 4x4 matrix uniform.
    ///
    /// Matrices are column-major crate-wide: `glam` stores columns, and the
    /// value is uploaded with the transpose flag off. There is no per-call
    /// layout option.
    pub fn set_mat4(&self, gl: &G, name: &str, value: &glam::Mat4) -> Result<()> {
        let location = self.location(name)?;
        self.bind(gl)?;
        gl.uniform_matrix_4_f32(location, false, &value.to_cols_array());
        Ok(())
    }

    /// Releases the GPU program. Must run on the context thread, exactly
    /// once; any call on this object afterward fails with
    /// [`ShaderError::Destroyed`].
    pub fn destroy(&mut self, gl: &G) -> Result<()> {
        let program = self.handle.take().ok_or(ShaderError::Destroyed)?;
        gl.delete_program(program);
        Ok(())
    }
}

impl<G: GlApi> Drop for ShaderProgram<G> {
    fn drop(&mut self) {
        // Deleting needs the current context, which Drop cannot guarantee,
        // so the handle can only be surfaced, not reclaimed, here.
        if let Some(program) = self.handle {
            log::warn!("shader program {program:?} dropped without destroy(); GPU object leaked");
        }
    }
}

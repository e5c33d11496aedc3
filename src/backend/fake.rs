//! In-memory backend for the contract tests.
//!
//! Models the driver behavior the crate relies on: compilation fails on a
//! `#error` directive, the linker rejects fragment inputs with no matching
//! vertex output, and only uniforms that are declared *and* referenced
//! survive as active. Object tables expose live counts so tests can assert
//! that failure paths leak nothing.

use std::cell::RefCell;
use std::collections::HashMap;

use super::{GlApi, ShaderStage};

#[derive(Debug, Clone, PartialEq)]
pub enum UniformWrite {
    I32(i32),
    F32(f32),
    Vec3([f32; 3]),
    Mat4([f32; 16]),
}

struct FakeShader {
    stage: ShaderStage,
    source: String,
    compiled: bool,
    log: String,
}

#[derive(Default)]
struct FakeProgram {
    attached: Vec<u32>,
    linked: bool,
    log: String,
    /// Active uniforms in declaration order; location = index.
    uniforms: Vec<String>,
    /// Vertex-stage inputs in declaration order; location = index.
    attributes: Vec<String>,
    writes: HashMap<u32, UniformWrite>,
}

#[derive(Default)]
struct State {
    next_id: u32,
    shaders: HashMap<u32, FakeShader>,
    programs: HashMap<u32, FakeProgram>,
    current: Option<u32>,
}

pub struct FakeGl {
    state: RefCell<State>,
}

impl FakeGl {
    pub fn new() -> Self {
        FakeGl {
            state: RefCell::new(State::default()),
        }
    }

    pub fn live_shaders(&self) -> usize {
        self.state.borrow().shaders.len()
    }

    pub fn live_programs(&self) -> usize {
        self.state.borrow().programs.len()
    }

    pub fn current_program(&self) -> Option<u32> {
        self.state.borrow().current
    }

    /// Last value written to `name` on `program`, if any.
    pub fn written(&self, program: u32, name: &str) -> Option<UniformWrite> {
        let state = self.state.borrow();
        let program = state.programs.get(&program)?;
        let location = program.uniforms.iter().position(|n| n == name)? as u32;
        program.writes.get(&location).cloned()
    }

    pub fn write_count(&self, program: u32) -> usize {
        self.state
            .borrow()
            .programs
            .get(&program)
            .map_or(0, |p| p.writes.len())
    }

    fn record(&self, location: u32, value: UniformWrite) {
        let mut state = self.state.borrow_mut();
        let current = state.current.expect("uniform write with no program bound");
        let program = state
            .programs
            .get_mut(&current)
            .expect("uniform write to a deleted program");
        program.writes.insert(location, value);
    }
}

/// Last token of a declaration line, with the trailing `;` stripped.
fn declared_name(rest: &str) -> Option<String> {
    rest.trim_end_matches(';')
        .split_whitespace()
        .last()
        .map(str::to_owned)
}

/// Names declared with `qualifier` (`in`, `out`, `uniform`), in order.
/// Handles an optional `layout (...)` prefix.
fn declarations(source: &str, qualifier: &str) -> Vec<String> {
    let prefix = format!("{qualifier} ");
    let after_layout = format!(") {qualifier} ");
    source
        .lines()
        .filter_map(|line| {
            let line = line.trim();
            if let Some(rest) = line.strip_prefix(&prefix) {
                declared_name(rest)
            } else if let Some(idx) = line.find(&after_layout) {
                declared_name(&line[idx + after_layout.len()..])
            } else {
                None
            }
        })
        .collect()
}

/// A declared uniform is active when its name shows up anywhere beyond the
/// declaration itself.
fn active_uniforms(source: &str) -> Vec<String> {
    declarations(source, "uniform")
        .into_iter()
        .filter(|name| source.matches(name.as_str()).count() > 1)
        .collect()
}

impl GlApi for FakeGl {
    type Shader = u32;
    type Program = u32;
    type Uniform = u32;

    fn create_shader(&self, stage: ShaderStage) -> Result<u32, String> {
        let mut state = self.state.borrow_mut();
        state.next_id += 1;
        let id = state.next_id;
        state.shaders.insert(
            id,
            FakeShader {
                stage,
                source: String::new(),
                compiled: false,
                log: String::new(),
            },
        );
        Ok(id)
    }

    fn shader_source(&self, shader: u32, source: &str) {
        let mut state = self.state.borrow_mut();
        let shader = state.shaders.get_mut(&shader).expect("unknown shader");
        shader.source = source.to_owned();
    }

    fn compile_shader(&self, shader: u32) {
        let mut state = self.state.borrow_mut();
        let shader = state.shaders.get_mut(&shader).expect("unknown shader");
        match shader
            .source
            .lines()
            .find_map(|line| line.trim().strip_prefix("#error"))
        {
            Some(message) => {
                shader.compiled = false;
                shader.log = format!("0:1: error:{message}");
            }
            None => shader.compiled = true,
        }
    }

    fn shader_compile_status(&self, shader: u32) -> bool {
        self.state.borrow().shaders[&shader].compiled
    }

    fn shader_info_log(&self, shader: u32) -> String {
        self.state.borrow().shaders[&shader].log.clone()
    }

    fn delete_shader(&self, shader: u32) {
        self.state.borrow_mut().shaders.remove(&shader);
    }

    fn create_program(&self) -> Result<u32, String> {
        let mut state = self.state.borrow_mut();
        state.next_id += 1;
        let id = state.next_id;
        state.programs.insert(id, FakeProgram::default());
        Ok(id)
    }

    fn attach_shader(&self, program: u32, shader: u32) {
        let mut state = self.state.borrow_mut();
        state
            .programs
            .get_mut(&program)
            .expect("unknown program")
            .attached
            .push(shader);
    }

    fn detach_shader(&self, program: u32, shader: u32) {
        let mut state = self.state.borrow_mut();
        let program = state.programs.get_mut(&program).expect("unknown program");
        program.attached.retain(|&s| s != shader);
    }

    fn link_program(&self, program_id: u32) {
        let mut state = self.state.borrow_mut();
        let mut vertex_source = String::new();
        let mut fragment_source = String::new();
        for shader_id in &state.programs[&program_id].attached {
            let shader = &state.shaders[shader_id];
            match shader.stage {
                ShaderStage::Vertex => vertex_source = shader.source.clone(),
                ShaderStage::Fragment => fragment_source = shader.source.clone(),
            }
        }

        let vertex_outs = declarations(&vertex_source, "out");
        let unmatched = declarations(&fragment_source, "in")
            .into_iter()
            .find(|name| !vertex_outs.contains(name));

        let program = state.programs.get_mut(&program_id).expect("unknown program");
        if let Some(name) = unmatched {
            program.linked = false;
            program.log = format!("error: unmatched fragment input '{name}'");
            return;
        }

        let mut uniforms = active_uniforms(&vertex_source);
        for name in active_uniforms(&fragment_source) {
            if !uniforms.contains(&name) {
                uniforms.push(name);
            }
        }
        program.linked = true;
        program.uniforms = uniforms;
        program.attributes = declarations(&vertex_source, "in");
        program.log.clear();
    }

    fn program_link_status(&self, program: u32) -> bool {
        self.state.borrow().programs[&program].linked
    }

    fn program_info_log(&self, program: u32) -> String {
        self.state.borrow().programs[&program].log.clone()
    }

    fn delete_program(&self, program: u32) {
        self.state.borrow_mut().programs.remove(&program);
    }

    fn active_uniform_count(&self, program: u32) -> u32 {
        self.state.borrow().programs[&program].uniforms.len() as u32
    }

    fn active_uniform_name(&self, program: u32, index: u32) -> Option<String> {
        self.state.borrow().programs[&program]
            .uniforms
            .get(index as usize)
            .cloned()
    }

    fn uniform_location(&self, program: u32, name: &str) -> Option<u32> {
        self.state.borrow().programs[&program]
            .uniforms
            .iter()
            .position(|n| n == name)
            .map(|i| i as u32)
    }

    fn attrib_location(&self, program: u32, name: &str) -> Option<u32> {
        self.state.borrow().programs[&program]
            .attributes
            .iter()
            .position(|n| n == name)
            .map(|i| i as u32)
    }

    fn use_program(&self, program: Option<u32>) {
        self.state.borrow_mut().current = program;
    }

    fn uniform_1_i32(&self, location: &u32, value: i32) {
        self.record(*location, UniformWrite::I32(value));
    }

    fn uniform_1_f32(&self, location: &u32, value: f32) {
        self.record(*location, UniformWrite::F32(value));
    }

    fn uniform_3_f32(&self, location: &u32, x: f32, y: f32, z: f32) {
        self.record(*location, UniformWrite::Vec3([x, y, z]));
    }

    fn uniform_matrix_4_f32(&self, location: &u32, _transpose: bool, values: &[f32; 16]) {
        self.record(*location, UniformWrite::Mat4(*values));
    }
}

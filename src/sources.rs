//! Built-in shader source pairs.
//!
//! Both pairs share the attribute layout `0 = position (vec3)`,
//! `1 = normal (vec3)`, `2 = uv (vec2)`; the solid-color pair only reads
//! location 0.

/// Vertex stage for the textured, directionally lit mesh program.
///
/// Uniforms: `model`, `view`, `projection` (all mat4, column-major).
pub const MESH_VERTEX_SRC: &str = r#"
#version 330 core
layout (location = 0) in vec3 position;
layout (location = 1) in vec3 normal;
layout (location = 2) in vec2 uv;

out vec3 frag_normal;
out vec2 frag_uv;

uniform mat4 model;
uniform mat4 view;
uniform mat4 projection;

void main() {
    frag_normal = mat3(model) * normal;
    frag_uv = uv;
    gl_Position = projection * view * model * vec4(position, 1.0);
}
"#;

/// Fragment stage for the mesh program.
///
/// Uniforms: `atlas` (sampler2D), `light_dir` (vec3), `light_color` (vec3),
/// `ambient` (float).
pub const MESH_FRAGMENT_SRC: &str = r#"
#version 330 core
in vec3 frag_normal;
in vec2 frag_uv;

out vec4 color;

uniform sampler2D atlas;
uniform vec3 light_dir;
uniform vec3 light_color;
uniform float ambient;

void main() {
    vec3 n = normalize(frag_normal);
    float diffuse = max(dot(n, normalize(-light_dir)), 0.0);
    vec4 albedo = texture(atlas, frag_uv);
    vec3 lit = (ambient + diffuse) * light_color;
    color = vec4(albedo.rgb * lit, albedo.a);
}
"#;

/// Vertex stage for the unlit solid-color program. Uniform: `mvp` (mat4).
pub const SOLID_VERTEX_SRC: &str = r#"
#version 330 core
layout (location = 0) in vec3 position;

uniform mat4 mvp;

void main() {
    gl_Position = mvp * vec4(position, 1.0);
}
"#;

/// Fragment stage for the solid-color program. Uniform: `solid_color` (vec3).
pub const SOLID_FRAGMENT_SRC: &str = r#"
#version 330 core
out vec4 color;

uniform vec3 solid_color;

void main() {
    color = vec4(solid_color, 1.0);
}
"#;

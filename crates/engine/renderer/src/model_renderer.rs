//! Skinned character renderer
//!
//! The mesh is skinned on the CPU, so the GPU side is a static index buffer
//! plus a vertex buffer that is overwritten with the posed vertices each
//! frame.

use glam::Mat4;
use glow::*;
use wanderer_assets::PosedVertex;

use crate::color::Color;
use crate::lighting::{AMBIENT, DIFFUSE_STRENGTH, LIGHT_DIR};
use crate::shader_utils::{create_program, set_mat4, set_vec4};

const STRIDE: i32 = std::mem::size_of::<PosedVertex>() as i32;
const FLOAT_SIZE: i32 = std::mem::size_of::<f32>() as i32;

struct GlModel {
    vao: NativeVertexArray,
    vbo: NativeBuffer,
    ebo: NativeBuffer,
    index_count: i32,
    vertex_count: usize,
}

/// Lit, tinted triangle mesh with a streaming vertex buffer
#[derive(Default)]
pub struct SkinnedModelRenderer {
    program: Option<NativeProgram>,
    model: Option<GlModel>,
}

impl SkinnedModelRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile the shader and allocate buffers for a mesh
    ///
    /// # Safety
    ///
    /// Must be called with an active GL context on the current thread.
    pub unsafe fn init_gl(
        &mut self,
        gl: &Context,
        indices: &[u32],
        vertices: &[PosedVertex],
    ) -> Result<(), String> {
        unsafe {
            let program = create_program(gl, VERTEX_SHADER, FRAGMENT_SHADER)?;
            self.program = Some(program);

            let vao = gl
                .create_vertex_array()
                .map_err(|e| format!("Failed to create VAO: {}", e))?;
            gl.bind_vertex_array(Some(vao));

            let vbo = gl
                .create_buffer()
                .map_err(|e| format!("Failed to create VBO: {}", e))?;
            gl.bind_buffer(ARRAY_BUFFER, Some(vbo));
            gl.buffer_data_u8_slice(ARRAY_BUFFER, bytemuck::cast_slice(vertices), DYNAMIC_DRAW);

            // Position (location 0), normal (location 1), color (location 2)
            for (location, offset) in [(0u32, 0), (1, 3), (2, 6)] {
                gl.enable_vertex_attrib_array(location);
                gl.vertex_attrib_pointer_f32(location, 3, FLOAT, false, STRIDE, offset * FLOAT_SIZE);
            }

            let ebo = gl
                .create_buffer()
                .map_err(|e| format!("Failed to create EBO: {}", e))?;
            gl.bind_buffer(ELEMENT_ARRAY_BUFFER, Some(ebo));
            gl.buffer_data_u8_slice(ELEMENT_ARRAY_BUFFER, bytemuck::cast_slice(indices), STATIC_DRAW);

            gl.bind_vertex_array(None);

            self.model = Some(GlModel {
                vao,
                vbo,
                ebo,
                index_count: indices.len() as i32,
                vertex_count: vertices.len(),
            });
            Ok(())
        }
    }

    /// Replace the vertex buffer contents with this frame's pose
    ///
    /// # Safety
    ///
    /// Must be called with an active GL context on the current thread.
    pub unsafe fn update_vertices(&mut self, gl: &Context, vertices: &[PosedVertex]) {
        let Some(model) = self.model.as_mut() else {
            return;
        };
        unsafe {
            gl.bind_buffer(ARRAY_BUFFER, Some(model.vbo));
            if vertices.len() == model.vertex_count {
                gl.buffer_sub_data_u8_slice(ARRAY_BUFFER, 0, bytemuck::cast_slice(vertices));
            } else {
                gl.buffer_data_u8_slice(ARRAY_BUFFER, bytemuck::cast_slice(vertices), DYNAMIC_DRAW);
                model.vertex_count = vertices.len();
            }
            gl.bind_buffer(ARRAY_BUFFER, None);
        }
    }

    /// Draw with `model` as the object-to-world matrix
    ///
    /// # Safety
    ///
    /// Must be called with an active GL context on the current thread.
    pub unsafe fn render(&self, gl: &Context, view_projection: Mat4, model: Mat4, tint: Color) {
        let (Some(program), Some(mesh)) = (self.program, self.model.as_ref()) else {
            return;
        };
        unsafe {
            gl.enable(DEPTH_TEST);
            gl.use_program(Some(program));

            set_mat4(gl, program, "uMVP", &(view_projection * model));
            set_mat4(gl, program, "uModel", &model);
            set_vec4(gl, program, "uTint", tint.0);

            let light_dir_loc = gl.get_uniform_location(program, "uLightDir");
            gl.uniform_3_f32(light_dir_loc.as_ref(), LIGHT_DIR.x, LIGHT_DIR.y, LIGHT_DIR.z);
            let ambient_loc = gl.get_uniform_location(program, "uAmbient");
            gl.uniform_1_f32(ambient_loc.as_ref(), AMBIENT);
            let diffuse_strength_loc = gl.get_uniform_location(program, "uDiffuseStrength");
            gl.uniform_1_f32(diffuse_strength_loc.as_ref(), DIFFUSE_STRENGTH);

            gl.bind_vertex_array(Some(mesh.vao));
            gl.draw_elements(TRIANGLES, mesh.index_count, UNSIGNED_INT, 0);
            gl.bind_vertex_array(None);
            gl.use_program(None);
        }
    }

    /// Release GL resources
    ///
    /// # Safety
    ///
    /// Must be called with the same GL context that `init_gl` used.
    pub unsafe fn destroy_gl(&mut self, gl: &Context) {
        unsafe {
            if let Some(model) = self.model.take() {
                gl.delete_vertex_array(model.vao);
                gl.delete_buffer(model.vbo);
                gl.delete_buffer(model.ebo);
            }
            if let Some(program) = self.program.take() {
                gl.delete_program(program);
            }
        }
    }
}

const VERTEX_SHADER: &str = r#"#version 300 es
precision highp float;

layout(location = 0) in vec3 aPosition;
layout(location = 1) in vec3 aNormal;
layout(location = 2) in vec3 aColor;

uniform mat4 uMVP;
uniform mat4 uModel;

out vec3 vNormal;
out vec3 vColor;

void main() {
    gl_Position = uMVP * vec4(aPosition, 1.0);
    vNormal = mat3(uModel) * aNormal;
    vColor = aColor;
}
"#;

const FRAGMENT_SHADER: &str = r#"#version 300 es
precision highp float;

in vec3 vNormal;
in vec3 vColor;

uniform vec3 uLightDir;
uniform float uAmbient;
uniform float uDiffuseStrength;
uniform vec4 uTint;

out vec4 FragColor;

void main() {
    vec3 normal = normalize(vNormal);
    float diffuse = max(dot(normal, uLightDir), 0.0);
    vec3 lighting = vColor * uTint.rgb * (uAmbient + diffuse * uDiffuseStrength);
    FragColor = vec4(lighting, uTint.a);
}
"#;

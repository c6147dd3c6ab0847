//! Ground plane
//!
//! A subdivided horizontal plane centered on the origin, shaded by a program
//! loaded from disk (the bundled one draws a checkerboard).

use std::path::Path;

use glam::{Mat4, Vec3};
use glow::*;

use crate::color::Color;
use crate::error::RenderError;
use crate::shader_utils::{load_program, set_mat4, set_vec4};

/// Floats per vertex: position (3) + normal (3) + uv (2)
const FLOATS_PER_VERTEX: usize = 8;

/// Plane geometry with `(res_x + 1) * (res_z + 1)` vertices, facing +Y
///
/// Returns interleaved vertices and counter-clockwise triangle indices.
pub fn plane_mesh(width: f32, length: f32, res_x: u32, res_z: u32) -> (Vec<f32>, Vec<u32>) {
    let res_x = res_x.max(1);
    let res_z = res_z.max(1);
    let mut vertices = Vec::with_capacity(((res_x + 1) * (res_z + 1)) as usize * FLOATS_PER_VERTEX);
    for iz in 0..=res_z {
        let v = iz as f32 / res_z as f32;
        for ix in 0..=res_x {
            let u = ix as f32 / res_x as f32;
            let x = (u - 0.5) * width;
            let z = (v - 0.5) * length;
            vertices.extend_from_slice(&[x, 0.0, z, 0.0, 1.0, 0.0, u, v]);
        }
    }

    let row = res_x + 1;
    let mut indices = Vec::with_capacity((res_x * res_z * 6) as usize);
    for iz in 0..res_z {
        for ix in 0..res_x {
            let a = iz * row + ix;
            let b = a + 1;
            let c = a + row;
            let d = c + 1;
            indices.extend_from_slice(&[a, c, b, b, c, d]);
        }
    }
    (vertices, indices)
}

pub struct GroundPlane {
    program: Option<NativeProgram>,
    vao: Option<NativeVertexArray>,
    vbo: Option<NativeBuffer>,
    ebo: Option<NativeBuffer>,
    index_count: i32,
    /// Checker cells along each side
    pub tiles: f32,
    pub color_a: Color,
    pub color_b: Color,
}

impl Default for GroundPlane {
    fn default() -> Self {
        Self::new(40.0)
    }
}

impl GroundPlane {
    pub fn new(tiles: f32) -> Self {
        Self {
            program: None,
            vao: None,
            vbo: None,
            ebo: None,
            index_count: 0,
            tiles,
            color_a: Color::LIGHTGRAY,
            color_b: Color::RAYWHITE,
        }
    }

    /// Load the shader pair and upload a `width` x `length` plane
    ///
    /// # Safety
    ///
    /// Must be called with an active GL context on the current thread.
    pub unsafe fn init_gl(
        &mut self,
        gl: &Context,
        vertex_shader: &Path,
        fragment_shader: &Path,
        size: (f32, f32),
        resolution: (u32, u32),
    ) -> Result<(), RenderError> {
        unsafe {
            let program = load_program(gl, vertex_shader, fragment_shader)?;
            self.program = Some(program);

            let (vertices, indices) = plane_mesh(size.0, size.1, resolution.0, resolution.1);
            let stride = (FLOATS_PER_VERTEX * std::mem::size_of::<f32>()) as i32;
            let float = std::mem::size_of::<f32>() as i32;

            let vao = gl.create_vertex_array()?;
            gl.bind_vertex_array(Some(vao));

            let vbo = gl.create_buffer()?;
            gl.bind_buffer(ARRAY_BUFFER, Some(vbo));
            gl.buffer_data_u8_slice(ARRAY_BUFFER, bytemuck::cast_slice(&vertices), STATIC_DRAW);

            gl.enable_vertex_attrib_array(0);
            gl.vertex_attrib_pointer_f32(0, 3, FLOAT, false, stride, 0);
            gl.enable_vertex_attrib_array(1);
            gl.vertex_attrib_pointer_f32(1, 3, FLOAT, false, stride, 3 * float);
            gl.enable_vertex_attrib_array(2);
            gl.vertex_attrib_pointer_f32(2, 2, FLOAT, false, stride, 6 * float);

            let ebo = gl.create_buffer()?;
            gl.bind_buffer(ELEMENT_ARRAY_BUFFER, Some(ebo));
            gl.buffer_data_u8_slice(ELEMENT_ARRAY_BUFFER, bytemuck::cast_slice(&indices), STATIC_DRAW);

            gl.bind_vertex_array(None);

            self.vao = Some(vao);
            self.vbo = Some(vbo);
            self.ebo = Some(ebo);
            self.index_count = indices.len() as i32;
            Ok(())
        }
    }

    /// Draw the plane at height `y`
    ///
    /// # Safety
    ///
    /// Must be called with an active GL context on the current thread.
    pub unsafe fn render(&self, gl: &Context, view_projection: Mat4, y: f32) {
        let (Some(program), Some(vao)) = (self.program, self.vao) else {
            return;
        };
        unsafe {
            gl.enable(DEPTH_TEST);
            gl.use_program(Some(program));

            let model = Mat4::from_translation(Vec3::new(0.0, y, 0.0));
            set_mat4(gl, program, "uMVP", &(view_projection * model));
            set_vec4(gl, program, "uColorA", self.color_a.0);
            set_vec4(gl, program, "uColorB", self.color_b.0);
            let tiles_loc = gl.get_uniform_location(program, "uTiles");
            gl.uniform_1_f32(tiles_loc.as_ref(), self.tiles);

            gl.bind_vertex_array(Some(vao));
            gl.draw_elements(TRIANGLES, self.index_count, UNSIGNED_INT, 0);
            gl.bind_vertex_array(None);
            gl.use_program(None);
        }
    }

    /// # Safety
    ///
    /// Must be called with the same GL context that `init_gl` used.
    pub unsafe fn destroy_gl(&mut self, gl: &Context) {
        unsafe {
            if let Some(vao) = self.vao.take() {
                gl.delete_vertex_array(vao);
            }
            if let Some(vbo) = self.vbo.take() {
                gl.delete_buffer(vbo);
            }
            if let Some(ebo) = self.ebo.take() {
                gl.delete_buffer(ebo);
            }
            if let Some(program) = self.program.take() {
                gl.delete_program(program);
            }
        }
    }
}

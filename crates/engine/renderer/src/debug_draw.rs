//! Immediate-mode debug primitives
//!
//! Lines, solid spheres and the floor grid are queued during the frame and
//! drawn in two batched calls by [`DebugRenderer::flush`].

use glam::{Mat4, Vec3};
use glow::*;

use crate::color::Color;
use crate::shader_utils::{create_program, set_mat4};

/// Floats per vertex: position (3) + color (4)
const FLOATS_PER_VERTEX: usize = 7;

const SPHERE_RINGS: u32 = 16;
const SPHERE_SLICES: u32 = 16;

/// Line segments of a square grid on the XZ plane, centered on the origin
///
/// `slices` cells per side; the two center lines are returned first.
pub fn grid_lines(slices: u32, spacing: f32) -> Vec<(Vec3, Vec3)> {
    let half = (slices / 2) as i32;
    let extent = half as f32 * spacing;
    let mut lines = vec![
        (Vec3::new(0.0, 0.0, -extent), Vec3::new(0.0, 0.0, extent)),
        (Vec3::new(-extent, 0.0, 0.0), Vec3::new(extent, 0.0, 0.0)),
    ];
    for i in (-half..=half).filter(|&i| i != 0) {
        let offset = i as f32 * spacing;
        lines.push((Vec3::new(offset, 0.0, -extent), Vec3::new(offset, 0.0, extent)));
        lines.push((Vec3::new(-extent, 0.0, offset), Vec3::new(extent, 0.0, offset)));
    }
    lines
}

/// Triangle list approximating a sphere
pub fn sphere_triangles(center: Vec3, radius: f32, rings: u32, slices: u32) -> Vec<Vec3> {
    let rings = rings.max(2);
    let slices = slices.max(3);
    let point = |ring: u32, slice: u32| {
        let theta = std::f32::consts::PI * ring as f32 / rings as f32;
        let phi = std::f32::consts::TAU * slice as f32 / slices as f32;
        center + radius * Vec3::new(theta.sin() * phi.cos(), theta.cos(), theta.sin() * phi.sin())
    };

    let mut out = Vec::with_capacity((rings * slices * 6) as usize);
    for ring in 0..rings {
        for slice in 0..slices {
            let a = point(ring, slice);
            let b = point(ring + 1, slice);
            let c = point(ring + 1, slice + 1);
            let d = point(ring, slice + 1);
            out.extend_from_slice(&[a, d, c, a, c, b]);
        }
    }
    out
}

#[derive(Default)]
pub struct DebugRenderer {
    program: Option<NativeProgram>,
    vao: Option<NativeVertexArray>,
    vbo: Option<NativeBuffer>,
    lines: Vec<f32>,
    triangles: Vec<f32>,
}

impl DebugRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// # Safety
    ///
    /// Must be called with an active GL context on the current thread.
    pub unsafe fn init_gl(&mut self, gl: &Context) -> Result<(), String> {
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

            let stride = (FLOATS_PER_VERTEX * std::mem::size_of::<f32>()) as i32;
            gl.enable_vertex_attrib_array(0);
            gl.vertex_attrib_pointer_f32(0, 3, FLOAT, false, stride, 0);
            gl.enable_vertex_attrib_array(1);
            gl.vertex_attrib_pointer_f32(1, 4, FLOAT, false, stride, 3 * std::mem::size_of::<f32>() as i32);

            gl.bind_vertex_array(None);
            self.vao = Some(vao);
            self.vbo = Some(vbo);
            Ok(())
        }
    }

    fn push(buffer: &mut Vec<f32>, p: Vec3, color: Color) {
        buffer.extend_from_slice(&[p.x, p.y, p.z]);
        buffer.extend_from_slice(&color.0);
    }

    pub fn line(&mut self, start: Vec3, end: Vec3, color: Color) {
        Self::push(&mut self.lines, start, color);
        Self::push(&mut self.lines, end, color);
    }

    pub fn sphere(&mut self, center: Vec3, radius: f32, color: Color) {
        for p in sphere_triangles(center, radius, SPHERE_RINGS, SPHERE_SLICES) {
            Self::push(&mut self.triangles, p, color);
        }
    }

    /// Floor grid with darker center lines
    pub fn grid(&mut self, slices: u32, spacing: f32) {
        for (i, (start, end)) in grid_lines(slices, spacing).into_iter().enumerate() {
            let color = if i < 2 { Color::GRAY } else { Color::LIGHTGRAY };
            self.line(start, end, color);
        }
    }

    /// Number of queued vertices (lines, triangles)
    pub fn queued(&self) -> (usize, usize) {
        (
            self.lines.len() / FLOATS_PER_VERTEX,
            self.triangles.len() / FLOATS_PER_VERTEX,
        )
    }

    /// Draw everything queued this frame and clear the queues
    ///
    /// # Safety
    ///
    /// Must be called with an active GL context on the current thread.
    pub unsafe fn flush(&mut self, gl: &Context, view_projection: Mat4) {
        let (Some(program), Some(vao), Some(vbo)) = (self.program, self.vao, self.vbo) else {
            self.lines.clear();
            self.triangles.clear();
            return;
        };
        unsafe {
            gl.enable(DEPTH_TEST);
            gl.use_program(Some(program));
            set_mat4(gl, program, "uViewProjection", &view_projection);
            gl.bind_vertex_array(Some(vao));
            gl.bind_buffer(ARRAY_BUFFER, Some(vbo));

            for (mode, data) in [(TRIANGLES, &self.triangles), (LINES, &self.lines)] {
                if data.is_empty() {
                    continue;
                }
                gl.buffer_data_u8_slice(ARRAY_BUFFER, bytemuck::cast_slice(data), STREAM_DRAW);
                gl.draw_arrays(mode, 0, (data.len() / FLOATS_PER_VERTEX) as i32);
            }

            gl.bind_buffer(ARRAY_BUFFER, None);
            gl.bind_vertex_array(None);
            gl.use_program(None);
        }
        self.lines.clear();
        self.triangles.clear();
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
            if let Some(program) = self.program.take() {
                gl.delete_program(program);
            }
        }
    }
}

const VERTEX_SHADER: &str = r#"#version 300 es
precision highp float;

layout(location = 0) in vec3 aPosition;
layout(location = 1) in vec4 aColor;

uniform mat4 uViewProjection;

out vec4 vColor;

void main() {
    gl_Position = uViewProjection * vec4(aPosition, 1.0);
    vColor = aColor;
}
"#;

const FRAGMENT_SHADER: &str = r#"#version 300 es
precision highp float;

in vec4 vColor;
out vec4 FragColor;

void main() {
    FragColor = vColor;
}
"#;

//! Shader compilation utilities

use std::path::Path;

use glow::*;

use crate::error::RenderError;

/// Compile a shader from source code
///
/// # Safety
/// Requires an active OpenGL context
pub unsafe fn compile_shader(
    gl: &Context,
    shader_type: u32,
    source: &str,
) -> Result<Shader, String> {
    unsafe {
        let shader = gl.create_shader(shader_type).map_err(|e| e.to_string())?;

        gl.shader_source(shader, source);
        gl.compile_shader(shader);

        if !gl.get_shader_compile_status(shader) {
            let log = gl.get_shader_info_log(shader);
            gl.delete_shader(shader);
            return Err(format!("Shader compilation error: {}", log));
        }

        Ok(shader)
    }
}

/// Create and link a shader program from vertex and fragment shader sources
///
/// # Safety
/// Requires an active OpenGL context
pub unsafe fn create_program(
    gl: &Context,
    vertex_src: &str,
    fragment_src: &str,
) -> Result<Program, String> {
    unsafe {
        let vertex_shader = compile_shader(gl, VERTEX_SHADER, vertex_src)?;
        let fragment_shader = match compile_shader(gl, FRAGMENT_SHADER, fragment_src) {
            Ok(shader) => shader,
            Err(e) => {
                gl.delete_shader(vertex_shader);
                return Err(e);
            }
        };

        let program = gl.create_program().map_err(|e| e.to_string())?;
        gl.attach_shader(program, vertex_shader);
        gl.attach_shader(program, fragment_shader);
        gl.link_program(program);

        gl.detach_shader(program, vertex_shader);
        gl.detach_shader(program, fragment_shader);
        gl.delete_shader(vertex_shader);
        gl.delete_shader(fragment_shader);

        if !gl.get_program_link_status(program) {
            let log = gl.get_program_info_log(program);
            gl.delete_program(program);
            return Err(format!("Program link error: {}", log));
        }

        Ok(program)
    }
}

/// Read a vertex/fragment shader pair from disk and link it
///
/// # Safety
/// Requires an active OpenGL context
pub unsafe fn load_program(
    gl: &Context,
    vertex_path: &Path,
    fragment_path: &Path,
) -> Result<Program, RenderError> {
    let read = |path: &Path| {
        std::fs::read_to_string(path).map_err(|source| RenderError::ShaderFile {
            path: path.to_path_buf(),
            source,
        })
    };
    let vertex_src = read(vertex_path)?;
    let fragment_src = read(fragment_path)?;

    let program = unsafe { create_program(gl, &vertex_src, &fragment_src) }.map_err(|e| {
        RenderError::Shader(format!(
            "{} + {}: {}",
            vertex_path.display(),
            fragment_path.display(),
            e
        ))
    })?;
    tracing::info!(
        "Loaded shader program {} + {}",
        vertex_path.display(),
        fragment_path.display()
    );
    Ok(program)
}

/// Set a `mat4` uniform if the program uses it
///
/// # Safety
/// Requires an active OpenGL context with `program` bound
pub unsafe fn set_mat4(gl: &Context, program: Program, name: &str, value: &glam::Mat4) {
    unsafe {
        let loc = gl.get_uniform_location(program, name);
        gl.uniform_matrix_4_f32_slice(loc.as_ref(), false, &value.to_cols_array());
    }
}

/// Set a `vec4` uniform if the program uses it
///
/// # Safety
/// Requires an active OpenGL context with `program` bound
pub unsafe fn set_vec4(gl: &Context, program: Program, name: &str, value: [f32; 4]) {
    unsafe {
        let loc = gl.get_uniform_location(program, name);
        gl.uniform_4_f32(loc.as_ref(), value[0], value[1], value[2], value[3]);
    }
}

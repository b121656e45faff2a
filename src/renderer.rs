use crate::camera::Camera;
use crate::constants::*;
use crate::loader::DecodedImage;
use glam::Vec2;
use glow::*;
use std::mem;
use std::sync::Arc;

const TILE_VERTEX_SHADER_SRC: &str = r#"#version 330 core
layout (location = 0) in vec2 aPos;

uniform mat4 uProjection;
uniform vec2 uPosition;
uniform vec2 uSize;
uniform float uDiff;

out vec2 vUv;

void main() {
    vec2 local = aPos * uSize * (1.0 - uDiff);
    // Images are uploaded top row first
    vUv = vec2(aPos.x + 0.5, 0.5 - aPos.y);
    gl_Position = uProjection * vec4(uPosition + local, 0.0, 1.0);
}
"#;

const TILE_FRAGMENT_SHADER_SRC: &str = r#"#version 330 core
in vec2 vUv;
out vec4 FragColor;

uniform sampler2D uTexture;
uniform vec2 uRes;
uniform float uBorder;
uniform vec4 uBorderColor;

void main() {
    vec2 pixel = vUv * uRes;

    if (pixel.x < uBorder || pixel.x > uRes.x - uBorder ||
        pixel.y < uBorder || pixel.y > uRes.y - uBorder) {
        FragColor = uBorderColor;
    } else {
        vec2 innerUv = (pixel - vec2(uBorder)) / (uRes - vec2(uBorder * 2.0));
        FragColor = texture(uTexture, innerUv);
    }
}
"#;

/// Everything the renderer needs to draw one tile
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileDraw {
    /// Mesh centre in world space
    pub position: Vec2,
    pub mesh_size: Vec2,
    /// `None` until the image has loaded
    pub texture: Option<glow::Texture>,
    /// Pixel size used for the inset border
    pub resolution: Vec2,
    pub border_width: f32,
    /// Squash factor in [0, 1)
    pub motion_intensity: f32,
}

pub struct Renderer {
    gl: Arc<glow::Context>,
    program: NativeProgram,
    vao: NativeVertexArray,
    vbo: NativeBuffer,
    projection_loc: NativeUniformLocation,
    position_loc: NativeUniformLocation,
    size_loc: NativeUniformLocation,
    diff_loc: NativeUniformLocation,
    res_loc: NativeUniformLocation,
    border_loc: NativeUniformLocation,
    border_color_loc: NativeUniformLocation,
    texture_loc: NativeUniformLocation,
    /// Shown until a tile's image arrives
    placeholder: NativeTexture,
    /// Uploaded images, deleted on drop
    textures: Vec<NativeTexture>,
}

impl Renderer {
    pub fn new(gl: Arc<glow::Context>) -> Result<Self, String> {
        unsafe {
            let program = compile_program(&gl, TILE_VERTEX_SHADER_SRC, TILE_FRAGMENT_SHADER_SRC)?;

            let uniform = |name: &str| {
                gl.get_uniform_location(program, name)
                    .ok_or_else(|| format!("Failed to get {} uniform location", name))
            };
            let projection_loc = uniform("uProjection")?;
            let position_loc = uniform("uPosition")?;
            let size_loc = uniform("uSize")?;
            let diff_loc = uniform("uDiff")?;
            let res_loc = uniform("uRes")?;
            let border_loc = uniform("uBorder")?;
            let border_color_loc = uniform("uBorderColor")?;
            let texture_loc = uniform("uTexture")?;

            // Unit quad centred on the origin
            let vertices: [f32; 12] = [
                -0.5, -0.5, // bottom-left
                0.5, -0.5, // bottom-right
                0.5, 0.5, // top-right
                -0.5, -0.5, // bottom-left
                0.5, 0.5, // top-right
                -0.5, 0.5, // top-left
            ];

            let vao = gl
                .create_vertex_array()
                .map_err(|e| format!("Failed to create VAO: {}", e))?;
            gl.bind_vertex_array(Some(vao));

            let vbo = gl
                .create_buffer()
                .map_err(|e| format!("Failed to create VBO: {}", e))?;
            gl.bind_buffer(ARRAY_BUFFER, Some(vbo));
            gl.buffer_data_u8_slice(ARRAY_BUFFER, as_u8_slice(&vertices), STATIC_DRAW);

            gl.enable_vertex_attrib_array(0);
            gl.vertex_attrib_pointer_f32(0, 2, FLOAT, false, 8, 0);

            gl.bind_vertex_array(None);

            let [r, g, b, a] = TILE_BORDER_COLOR.map(|c| (c * 255.0).round() as u8);
            let placeholder = create_texture(&gl, 1, 1, &[r, g, b, a])?;

            gl.clear_color(0.07, 0.07, 0.07, 1.0);

            // Textures are premultiplied
            gl.enable(BLEND);
            gl.blend_func(ONE, ONE_MINUS_SRC_ALPHA);

            Ok(Self {
                gl,
                program,
                vao,
                vbo,
                projection_loc,
                position_loc,
                size_loc,
                diff_loc,
                res_loc,
                border_loc,
                border_color_loc,
                texture_loc,
                placeholder,
                textures: Vec::new(),
            })
        }
    }

    pub fn resize(&self, width: i32, height: i32) {
        unsafe {
            self.gl.viewport(0, 0, width, height);
        }
    }

    /// Upload a decoded image as a linear-filtered texture without mipmaps.
    pub fn upload_texture(&mut self, image: &DecodedImage) -> Result<glow::Texture, String> {
        let texture = unsafe { create_texture(&self.gl, image.width, image.height, &image.pixels)? };
        self.textures.push(texture);
        Ok(texture)
    }

    pub fn render(&mut self, camera: &Camera, tiles: impl Iterator<Item = TileDraw>) {
        puffin::profile_function!();

        unsafe {
            self.gl.clear(COLOR_BUFFER_BIT);

            self.gl.use_program(Some(self.program));
            self.gl.bind_vertex_array(Some(self.vao));

            let projection = camera.view_projection();
            self.gl.uniform_matrix_4_f32_slice(
                Some(&self.projection_loc),
                false,
                projection.as_ref(),
            );
            let [r, g, b, a] = TILE_BORDER_COLOR;
            self.gl.uniform_4_f32(Some(&self.border_color_loc), r, g, b, a);
            self.gl.uniform_1_i32(Some(&self.texture_loc), 0);
            self.gl.active_texture(TEXTURE0);

            for tile in tiles {
                if tile.mesh_size.x <= 0.0 || tile.mesh_size.y <= 0.0 {
                    continue;
                }
                self.gl
                    .bind_texture(TEXTURE_2D, Some(tile.texture.unwrap_or(self.placeholder)));
                self.gl
                    .uniform_2_f32(Some(&self.position_loc), tile.position.x, tile.position.y);
                self.gl
                    .uniform_2_f32(Some(&self.size_loc), tile.mesh_size.x, tile.mesh_size.y);
                self.gl.uniform_1_f32(Some(&self.diff_loc), tile.motion_intensity);
                self.gl
                    .uniform_2_f32(Some(&self.res_loc), tile.resolution.x, tile.resolution.y);
                self.gl.uniform_1_f32(Some(&self.border_loc), tile.border_width);

                self.gl.draw_arrays(TRIANGLES, 0, 6);
            }

            self.gl.bind_texture(TEXTURE_2D, None);
            self.gl.bind_vertex_array(None);
        }
    }
}

impl Drop for Renderer {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_program(self.program);
            self.gl.delete_vertex_array(self.vao);
            self.gl.delete_buffer(self.vbo);
            self.gl.delete_texture(self.placeholder);
            for texture in self.textures.drain(..) {
                self.gl.delete_texture(texture);
            }
        }
    }
}

unsafe fn compile_program(
    gl: &glow::Context,
    vertex_src: &str,
    fragment_src: &str,
) -> Result<NativeProgram, String> {
    let vertex_shader = gl
        .create_shader(VERTEX_SHADER)
        .map_err(|e| format!("Failed to create vertex shader: {}", e))?;
    gl.shader_source(vertex_shader, vertex_src);
    gl.compile_shader(vertex_shader);
    if !gl.get_shader_compile_status(vertex_shader) {
        return Err(gl.get_shader_info_log(vertex_shader));
    }

    let fragment_shader = gl
        .create_shader(FRAGMENT_SHADER)
        .map_err(|e| format!("Failed to create fragment shader: {}", e))?;
    gl.shader_source(fragment_shader, fragment_src);
    gl.compile_shader(fragment_shader);
    if !gl.get_shader_compile_status(fragment_shader) {
        return Err(gl.get_shader_info_log(fragment_shader));
    }

    let program = gl
        .create_program()
        .map_err(|e| format!("Failed to create program: {}", e))?;
    gl.attach_shader(program, vertex_shader);
    gl.attach_shader(program, fragment_shader);
    gl.link_program(program);
    if !gl.get_program_link_status(program) {
        return Err(gl.get_program_info_log(program));
    }

    gl.delete_shader(vertex_shader);
    gl.delete_shader(fragment_shader);

    Ok(program)
}

unsafe fn create_texture(
    gl: &glow::Context,
    width: u32,
    height: u32,
    rgba: &[u8],
) -> Result<NativeTexture, String> {
    let tex = gl
        .create_texture()
        .map_err(|e| format!("Failed to create texture: {}", e))?;
    gl.bind_texture(TEXTURE_2D, Some(tex));

    // Photos: smooth filtering, no mipmaps
    gl.tex_parameter_i32(TEXTURE_2D, TEXTURE_MIN_FILTER, LINEAR as i32);
    gl.tex_parameter_i32(TEXTURE_2D, TEXTURE_MAG_FILTER, LINEAR as i32);
    gl.tex_parameter_i32(TEXTURE_2D, TEXTURE_WRAP_S, CLAMP_TO_EDGE as i32);
    gl.tex_parameter_i32(TEXTURE_2D, TEXTURE_WRAP_T, CLAMP_TO_EDGE as i32);

    gl.tex_image_2d(
        TEXTURE_2D,
        0,
        RGBA as i32,
        width as i32,
        height as i32,
        0,
        RGBA,
        UNSIGNED_BYTE,
        Some(rgba),
    );

    gl.bind_texture(TEXTURE_2D, None);
    Ok(tex)
}

fn as_u8_slice<T>(data: &[T]) -> &[u8] {
    unsafe {
        std::slice::from_raw_parts(
            data.as_ptr() as *const u8,
            data.len() * mem::size_of::<T>(),
        )
    }
}

//! OpenGL implementation of the backend traits over three-d's glow context.

use std::num::NonZeroU32;

use log::error;
use three_d::{
	context::{self as gl, HasContext},
	Context, Matrix4, Viewport,
};

use crate::{
	backend::{DepthFunc, GraphicsBackend, ShaderProgram, TextureHandle, TextureTarget, VertexArray},
	error::ShaderError,
	image_loader::DecodedImage,
	mesh_data::VertexLayout,
};


fn texture(handle: TextureHandle) -> Option<gl::NativeTexture> {
	NonZeroU32::new(handle.0).map(gl::NativeTexture)
}

fn vertex_array(handle: u32) -> Option<gl::NativeVertexArray> {
	NonZeroU32::new(handle).map(gl::NativeVertexArray)
}

fn buffer(handle: u32) -> Option<gl::NativeBuffer> {
	NonZeroU32::new(handle).map(gl::NativeBuffer)
}

/// Keeps both objects or deletes whichever one was created.
fn both_or_neither<A, B>(
	a: Result<A, String>,
	b: Result<B, String>,
	delete_a: impl FnOnce(A),
	delete_b: impl FnOnce(B),
) -> Result<(A, B), String> {
	match (a, b) {
		(Ok(a), Ok(b)) => Ok((a, b)),
		(Ok(a), Err(e)) => {
			delete_a(a);
			Err(e)
		},
		(Err(e), Ok(b)) => {
			delete_b(b);
			Err(e)
		},
		(Err(a), Err(b)) => Err(format!("{}, {}", a, b)),
	}
}

fn pixel_format(channels: u8) -> u32 {
	match channels {
		1 => gl::RED,
		3 => gl::RGB,
		_ => gl::RGBA,
	}
}

fn gl_target(target: TextureTarget) -> u32 {
	match target {
		TextureTarget::Texture2D => gl::TEXTURE_2D,
		TextureTarget::CubeMap => gl::TEXTURE_CUBE_MAP,
	}
}

pub struct GlBackend {
	context: Context,
}

impl GlBackend {
	pub fn new(context: Context) -> Self {
		GlBackend { context }
	}

	/// Restores the state the frame expects after other renderers (the GUI) ran.
	pub fn prepare_frame(&self, viewport: Viewport) {
		unsafe {
			self.context.viewport(viewport.x, viewport.y, viewport.width as i32, viewport.height as i32);
			self.context.enable(gl::DEPTH_TEST);
			self.context.depth_mask(true);
			self.context.depth_func(gl::LESS);
			self.context.disable(gl::BLEND);
			self.context.disable(gl::CULL_FACE);
			self.context.disable(gl::SCISSOR_TEST);
		}
	}

	fn upload_image(&self, target: u32, image: &DecodedImage) {
		let format = pixel_format(image.channels);
		unsafe {
			self.context.tex_image_2d(
				target,
				0,
				format as i32,
				image.width as i32,
				image.height as i32,
				0,
				format,
				gl::UNSIGNED_BYTE,
				Some(image.pixels.as_slice()),
			);
		}
	}
}

impl GraphicsBackend for GlBackend {
	fn create_texture_2d(&self, image: Option<&DecodedImage>) -> TextureHandle {
		unsafe {
			let texture = match self.context.create_texture() {
				Ok(texture) => texture,
				Err(e) => {
					error!("Failed to create texture: {}", e);
					return TextureHandle(0);
				},
			};
			self.context.bind_texture(gl::TEXTURE_2D, Some(texture));
			if let Some(image) = image {
				self.context.pixel_store_i32(gl::UNPACK_ALIGNMENT, 1);
				self.upload_image(gl::TEXTURE_2D, image);
				self.context.generate_mipmap(gl::TEXTURE_2D);
				self.context.tex_parameter_i32(gl::TEXTURE_2D, gl::TEXTURE_WRAP_S, gl::REPEAT as i32);
				self.context.tex_parameter_i32(gl::TEXTURE_2D, gl::TEXTURE_WRAP_T, gl::REPEAT as i32);
				self.context.tex_parameter_i32(gl::TEXTURE_2D, gl::TEXTURE_MIN_FILTER, gl::LINEAR_MIPMAP_LINEAR as i32);
				self.context.tex_parameter_i32(gl::TEXTURE_2D, gl::TEXTURE_MAG_FILTER, gl::LINEAR as i32);
			}
			self.context.bind_texture(gl::TEXTURE_2D, None);
			TextureHandle(texture.0.get())
		}
	}

	fn create_cube_map(&self, faces: &[Option<DecodedImage>]) -> TextureHandle {
		unsafe {
			let texture = match self.context.create_texture() {
				Ok(texture) => texture,
				Err(e) => {
					error!("Failed to create cube map: {}", e);
					return TextureHandle(0);
				},
			};
			self.context.bind_texture(gl::TEXTURE_CUBE_MAP, Some(texture));
			self.context.pixel_store_i32(gl::UNPACK_ALIGNMENT, 1);
			for (i, face) in faces.iter().take(6).enumerate() {
				if let Some(face) = face {
					self.upload_image(gl::TEXTURE_CUBE_MAP_POSITIVE_X + i as u32, face);
				}
			}
			for (param, value) in [
				(gl::TEXTURE_MIN_FILTER, gl::LINEAR),
				(gl::TEXTURE_MAG_FILTER, gl::LINEAR),
				(gl::TEXTURE_WRAP_S, gl::CLAMP_TO_EDGE),
				(gl::TEXTURE_WRAP_T, gl::CLAMP_TO_EDGE),
				(gl::TEXTURE_WRAP_R, gl::CLAMP_TO_EDGE),
			] {
				self.context.tex_parameter_i32(gl::TEXTURE_CUBE_MAP, param, value as i32);
			}
			self.context.bind_texture(gl::TEXTURE_CUBE_MAP, None);
			TextureHandle(texture.0.get())
		}
	}

	fn delete_texture(&self, handle: TextureHandle) {
		if let Some(texture) = texture(handle) {
			unsafe { self.context.delete_texture(texture) };
		}
	}

	fn create_vertex_array(&self, vertex_data: &[u8], indices: Option<&[u32]>, layout: &VertexLayout) -> VertexArray {
		unsafe {
			let created = both_or_neither(
				self.context.create_vertex_array(),
				self.context.create_buffer(),
				|vao| self.context.delete_vertex_array(vao),
				|vbo| self.context.delete_buffer(vbo),
			);
			let (vao, vbo) = match created {
				Ok(pair) => pair,
				Err(e) => {
					error!("Failed to create vertex array: {}", e);
					return VertexArray { vertex_array: 0, vertex_buffer: 0, index_buffer: None };
				},
			};
			self.context.bind_vertex_array(Some(vao));
			self.context.bind_buffer(gl::ARRAY_BUFFER, Some(vbo));
			self.context.buffer_data_u8_slice(gl::ARRAY_BUFFER, vertex_data, gl::STATIC_DRAW);

			let mut index_buffer = None;
			if let Some(indices) = indices {
				match self.context.create_buffer() {
					Ok(ebo) => {
						self.context.bind_buffer(gl::ELEMENT_ARRAY_BUFFER, Some(ebo));
						let bytes = crate::byte_stream::pack_indices(indices);
						self.context.buffer_data_u8_slice(gl::ELEMENT_ARRAY_BUFFER, &bytes, gl::STATIC_DRAW);
						index_buffer = Some(ebo.0.get());
					},
					Err(e) => error!("Failed to create index buffer: {}", e),
				}
			}

			for attribute in layout.attributes {
				self.context.enable_vertex_attrib_array(attribute.location);
				self.context.vertex_attrib_pointer_f32(
					attribute.location,
					attribute.components,
					gl::FLOAT,
					false,
					layout.stride as i32,
					attribute.offset as i32,
				);
			}
			self.context.bind_vertex_array(None);
			self.context.bind_buffer(gl::ARRAY_BUFFER, None);

			VertexArray {
				vertex_array: vao.0.get(),
				vertex_buffer: vbo.0.get(),
				index_buffer,
			}
		}
	}

	fn delete_vertex_array(&self, handles: VertexArray) {
		unsafe {
			if let Some(vao) = vertex_array(handles.vertex_array) {
				self.context.delete_vertex_array(vao);
			}
			for handle in [Some(handles.vertex_buffer), handles.index_buffer].into_iter().flatten() {
				if let Some(buffer) = buffer(handle) {
					self.context.delete_buffer(buffer);
				}
			}
		}
	}

	fn set_active_texture_unit(&self, unit: u32) {
		unsafe { self.context.active_texture(gl::TEXTURE0 + unit) };
	}

	fn bind_texture(&self, target: TextureTarget, handle: TextureHandle) {
		unsafe { self.context.bind_texture(gl_target(target), texture(handle)) };
	}

	fn draw_indexed(&self, handles: &VertexArray, index_count: usize) {
		if handles.index_buffer.is_none() {
			return;
		}
		unsafe {
			self.context.bind_vertex_array(vertex_array(handles.vertex_array));
			self.context.draw_elements(gl::TRIANGLES, index_count as i32, gl::UNSIGNED_INT, 0);
			self.context.bind_vertex_array(None);
		}
	}

	fn draw_arrays(&self, handles: &VertexArray, vertex_count: usize) {
		unsafe {
			self.context.bind_vertex_array(vertex_array(handles.vertex_array));
			self.context.draw_arrays(gl::TRIANGLES, 0, vertex_count as i32);
			self.context.bind_vertex_array(None);
		}
	}

	fn set_depth_func(&self, func: DepthFunc) {
		let func = match func {
			DepthFunc::Less => gl::LESS,
			DepthFunc::LessEqual => gl::LEQUAL,
		};
		unsafe { self.context.depth_func(func) };
	}

	fn clear(&self, color: [f32; 4]) {
		unsafe {
			self.context.clear_color(color[0], color[1], color[2], color[3]);
			self.context.clear(gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT);
		}
	}
}

pub struct GlShader {
	context: Context,
	program: gl::NativeProgram,
}

impl GlShader {
	pub fn from_source(context: &Context, vertex_source: &str, fragment_source: &str) -> Result<Self, ShaderError> {
		unsafe {
			let vertex = compile(context, gl::VERTEX_SHADER, "vertex", vertex_source)?;
			let fragment = match compile(context, gl::FRAGMENT_SHADER, "fragment", fragment_source) {
				Ok(fragment) => fragment,
				Err(e) => {
					context.delete_shader(vertex);
					return Err(e);
				},
			};
			let program = context.create_program()
				.map_err(|e| ShaderError::Create("program", e));
			let result = program.and_then(|program| {
				context.attach_shader(program, vertex);
				context.attach_shader(program, fragment);
				context.link_program(program);
				context.detach_shader(program, vertex);
				context.detach_shader(program, fragment);
				if context.get_program_link_status(program) {
					Ok(program)
				} else {
					let log = context.get_program_info_log(program);
					context.delete_program(program);
					Err(ShaderError::Link(log))
				}
			});
			context.delete_shader(vertex);
			context.delete_shader(fragment);
			Ok(GlShader { context: context.clone(), program: result? })
		}
	}

	fn location(&self, name: &str) -> Option<gl::NativeUniformLocation> {
		unsafe { self.context.get_uniform_location(self.program, name) }
	}
}

unsafe fn compile(context: &Context, kind: u32, stage: &'static str, source: &str) -> Result<gl::NativeShader, ShaderError> {
	let shader = context.create_shader(kind)
		.map_err(|e| ShaderError::Create(stage, e))?;
	context.shader_source(shader, source);
	context.compile_shader(shader);
	if context.get_shader_compile_status(shader) {
		Ok(shader)
	} else {
		let log = context.get_shader_info_log(shader);
		context.delete_shader(shader);
		Err(ShaderError::Compile { stage, log })
	}
}

impl ShaderProgram for GlShader {
	fn use_program(&self) {
		unsafe { self.context.use_program(Some(self.program)) };
	}

	fn set_int(&self, name: &str, value: i32) {
		unsafe { self.context.uniform_1_i32(self.location(name).as_ref(), value) };
	}

	fn set_float(&self, name: &str, value: f32) {
		unsafe { self.context.uniform_1_f32(self.location(name).as_ref(), value) };
	}

	fn set_vec3(&self, name: &str, value: [f32; 3]) {
		unsafe { self.context.uniform_3_f32(self.location(name).as_ref(), value[0], value[1], value[2]) };
	}

	fn set_mat4(&self, name: &str, value: &Matrix4<f32>) {
		let data: &[f32; 16] = value.as_ref();
		unsafe { self.context.uniform_matrix_4_f32_slice(self.location(name).as_ref(), false, data) };
	}
}

impl Drop for GlShader {
	fn drop(&mut self) {
		unsafe { self.context.delete_program(self.program) };
	}
}

#[cfg(test)]
mod tests {
	use std::cell::RefCell;

	use super::*;

	#[test]
	fn half_created_pair_is_deleted() {
		let deleted = RefCell::new(Vec::new());
		let result = both_or_neither(
			Ok(1u32),
			Err::<u32, _>("out of memory".to_string()),
			|a| deleted.borrow_mut().push(a),
			|b| deleted.borrow_mut().push(b + 100),
		);
		assert_eq!(result, Err("out of memory".to_string()));
		assert_eq!(*deleted.borrow(), vec![1]);

		deleted.borrow_mut().clear();
		let result = both_or_neither(
			Err::<u32, _>("no context".to_string()),
			Ok(2u32),
			|a| deleted.borrow_mut().push(a),
			|b| deleted.borrow_mut().push(b + 100),
		);
		assert!(result.is_err());
		assert_eq!(*deleted.borrow(), vec![102]);
	}

	#[test]
	fn complete_pair_is_kept() {
		let result = both_or_neither(Ok(1u32), Ok(2u32), |_| panic!("deleted a"), |_| panic!("deleted b"));
		assert_eq!(result, Ok((1, 2)));
	}
}

//! Narrow seams between the model pipeline and the graphics API.
//!
//! Everything the loader and renderer need from the GPU goes through
//! [`GraphicsBackend`] and [`ShaderProgram`]. Objects are addressed by plain
//! integer handles so meshes and textures stay plain data.

use three_d::Matrix4;

use crate::{image_loader::DecodedImage, mesh_data::VertexLayout};


#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexArray {
	pub vertex_array: u32,
	pub vertex_buffer: u32,
	pub index_buffer: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureTarget {
	Texture2D,
	CubeMap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepthFunc {
	Less,
	LessEqual,
}

pub trait GraphicsBackend {
	/// `None` creates a texture object without storage.
	fn create_texture_2d(&self, image: Option<&DecodedImage>) -> TextureHandle;

	/// Faces in +X, -X, +Y, -Y, +Z, -Z order; missing faces stay blank.
	fn create_cube_map(&self, faces: &[Option<DecodedImage>]) -> TextureHandle;

	fn delete_texture(&self, texture: TextureHandle);

	fn create_vertex_array(&self, vertex_data: &[u8], indices: Option<&[u32]>, layout: &VertexLayout) -> VertexArray;

	fn delete_vertex_array(&self, vertex_array: VertexArray);

	fn set_active_texture_unit(&self, unit: u32);

	fn bind_texture(&self, target: TextureTarget, texture: TextureHandle);

	fn draw_indexed(&self, vertex_array: &VertexArray, index_count: usize);

	fn draw_arrays(&self, vertex_array: &VertexArray, vertex_count: usize);

	fn set_depth_func(&self, func: DepthFunc);

	fn clear(&self, color: [f32; 4]);
}

pub trait ShaderProgram {
	fn use_program(&self);

	fn set_int(&self, name: &str, value: i32);

	fn set_float(&self, name: &str, value: f32);

	fn set_bool(&self, name: &str, value: bool) {
		self.set_int(name, value as i32);
	}

	fn set_vec3(&self, name: &str, value: [f32; 3]);

	fn set_mat4(&self, name: &str, value: &Matrix4<f32>);
}

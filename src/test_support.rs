use std::{cell::{Cell, RefCell}, rc::Rc};

use three_d::Matrix4;

use crate::{
	backend::{DepthFunc, GraphicsBackend, ShaderProgram, TextureHandle, TextureTarget, VertexArray},
	image_loader::DecodedImage,
	mesh_data::VertexLayout,
};


#[derive(Debug, Clone, PartialEq)]
pub enum Uniform {
	Int(i32),
	Float(f32),
	Vec3([f32; 3]),
	Mat4([f32; 16]),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
	CreateTexture { handle: u32, blank: bool },
	CreateCubeMap { handle: u32, faces: usize },
	DeleteTexture(u32),
	CreateVertexArray { handle: u32, vertex_bytes: usize, indices: Option<usize>, stride: usize },
	DeleteVertexArray(u32),
	ActiveTextureUnit(u32),
	BindTexture(TextureTarget, u32),
	DrawIndexed { vertex_array: u32, count: usize },
	DrawArrays { vertex_array: u32, count: usize },
	DepthFunc(DepthFunc),
	Clear([f32; 4]),
	UseProgram(&'static str),
	SetUniform { program: &'static str, name: String, value: Uniform },
}

type CallLog = Rc<RefCell<Vec<Call>>>;

#[derive(Default)]
pub struct RecordingBackend {
	log: CallLog,
	next_handle: Cell<u32>,
}

impl RecordingBackend {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn shader(&self, name: &'static str) -> RecordingShader {
		RecordingShader { name, log: self.log.clone() }
	}

	pub fn calls(&self) -> Vec<Call> {
		self.log.borrow().clone()
	}

	pub fn clear_calls(&self) {
		self.log.borrow_mut().clear();
	}

	pub fn count(&self, filter: impl Fn(&Call) -> bool) -> usize {
		self.log.borrow().iter().filter(|c| filter(c)).count()
	}

	pub fn texture_uploads(&self) -> usize {
		self.count(|c| matches!(c, Call::CreateTexture { .. }))
	}

	fn handle(&self) -> u32 {
		let handle = self.next_handle.get() + 1;
		self.next_handle.set(handle);
		handle
	}

	fn push(&self, call: Call) {
		self.log.borrow_mut().push(call);
	}
}

impl GraphicsBackend for RecordingBackend {
	fn create_texture_2d(&self, image: Option<&DecodedImage>) -> TextureHandle {
		let handle = self.handle();
		self.push(Call::CreateTexture { handle, blank: image.is_none() });
		TextureHandle(handle)
	}

	fn create_cube_map(&self, faces: &[Option<DecodedImage>]) -> TextureHandle {
		let handle = self.handle();
		self.push(Call::CreateCubeMap { handle, faces: faces.iter().flatten().count() });
		TextureHandle(handle)
	}

	fn delete_texture(&self, texture: TextureHandle) {
		self.push(Call::DeleteTexture(texture.0));
	}

	fn create_vertex_array(&self, vertex_data: &[u8], indices: Option<&[u32]>, layout: &VertexLayout) -> VertexArray {
		let vertex_array = self.handle();
		self.push(Call::CreateVertexArray {
			handle: vertex_array,
			vertex_bytes: vertex_data.len(),
			indices: indices.map(|i| i.len()),
			stride: layout.stride,
		});
		VertexArray {
			vertex_array,
			vertex_buffer: self.handle(),
			index_buffer: indices.map(|_| self.handle()),
		}
	}

	fn delete_vertex_array(&self, vertex_array: VertexArray) {
		self.push(Call::DeleteVertexArray(vertex_array.vertex_array));
	}

	fn set_active_texture_unit(&self, unit: u32) {
		self.push(Call::ActiveTextureUnit(unit));
	}

	fn bind_texture(&self, target: TextureTarget, texture: TextureHandle) {
		self.push(Call::BindTexture(target, texture.0));
	}

	fn draw_indexed(&self, vertex_array: &VertexArray, index_count: usize) {
		self.push(Call::DrawIndexed { vertex_array: vertex_array.vertex_array, count: index_count });
	}

	fn draw_arrays(&self, vertex_array: &VertexArray, vertex_count: usize) {
		self.push(Call::DrawArrays { vertex_array: vertex_array.vertex_array, count: vertex_count });
	}

	fn set_depth_func(&self, func: DepthFunc) {
		self.push(Call::DepthFunc(func));
	}

	fn clear(&self, color: [f32; 4]) {
		self.push(Call::Clear(color));
	}
}

pub struct RecordingShader {
	name: &'static str,
	log: CallLog,
}

impl RecordingShader {
	fn set(&self, name: &str, value: Uniform) {
		self.log.borrow_mut().push(Call::SetUniform {
			program: self.name,
			name: name.to_string(),
			value,
		});
	}

	pub fn uniform(&self, name: &str) -> Option<Uniform> {
		self.log.borrow().iter().rev().find_map(|call| match call {
			Call::SetUniform { program, name: n, value } if *program == self.name && n == name => Some(value.clone()),
			_ => None,
		})
	}
}

impl ShaderProgram for RecordingShader {
	fn use_program(&self) {
		self.log.borrow_mut().push(Call::UseProgram(self.name));
	}

	fn set_int(&self, name: &str, value: i32) {
		self.set(name, Uniform::Int(value));
	}

	fn set_float(&self, name: &str, value: f32) {
		self.set(name, Uniform::Float(value));
	}

	fn set_vec3(&self, name: &str, value: [f32; 3]) {
		self.set(name, Uniform::Vec3(value));
	}

	fn set_mat4(&self, name: &str, value: &Matrix4<f32>) {
		let data: &[f32; 16] = value.as_ref();
		self.set(name, Uniform::Mat4(*data));
	}
}

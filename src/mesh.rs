use crate::{
	backend::{GraphicsBackend, ShaderProgram, TextureTarget, VertexArray},
	byte_stream::pack_vertices,
	mesh_data::{Texture, TextureKind, Vertex},
};


pub struct Mesh {
	vertices: Vec<Vertex>,
	indices: Vec<u32>,
	textures: Vec<Texture>,
	vertex_array: VertexArray,
}

/// Puts the active texture unit back to 0 however the draw exits.
struct TextureUnitReset<'a, B: GraphicsBackend>(&'a B);

impl<B: GraphicsBackend> Drop for TextureUnitReset<'_, B> {
	fn drop(&mut self) {
		self.0.set_active_texture_unit(0);
	}
}

impl Mesh {
	/// Uploads the geometry. Every index must be below `vertices.len()`.
	pub fn new(backend: &impl GraphicsBackend, vertices: Vec<Vertex>, indices: Vec<u32>, textures: Vec<Texture>) -> Self {
		debug_assert!(indices.iter().all(|i| (*i as usize) < vertices.len()));
		let vertex_array = backend.create_vertex_array(
			&pack_vertices(&vertices),
			Some(&indices),
			&Vertex::LAYOUT,
		);
		Mesh { vertices, indices, textures, vertex_array }
	}

	pub fn vertices(&self) -> &[Vertex] {
		&self.vertices
	}

	pub fn indices(&self) -> &[u32] {
		&self.indices
	}

	pub fn textures(&self) -> &[Texture] {
		&self.textures
	}

	pub fn vertex_array(&self) -> &VertexArray {
		&self.vertex_array
	}

	/// Sampler uniform names in texture order, e.g. `material.diffuse1`.
	pub fn sampler_uniforms(&self) -> Vec<String> {
		let mut counters = [0u32; TextureKind::ALL.len()];
		self.textures.iter()
			.map(|texture| {
				let counter = &mut counters[texture.kind.slot()];
				*counter += 1;
				format!("material.{}{}", texture.kind, counter)
			})
			.collect()
	}

	pub fn draw<B: GraphicsBackend>(&self, backend: &B, shader: &impl ShaderProgram) {
		let _reset = TextureUnitReset(backend);
		for (unit, (texture, uniform)) in self.textures.iter().zip(self.sampler_uniforms()).enumerate() {
			backend.set_active_texture_unit(unit as u32);
			shader.set_int(&uniform, unit as i32);
			backend.bind_texture(TextureTarget::Texture2D, texture.handle);
		}
		backend.draw_indexed(&self.vertex_array, self.indices.len());
	}

	/// Frees the buffers. Textures belong to the model's cache.
	pub fn release(self, backend: &impl GraphicsBackend) {
		backend.delete_vertex_array(self.vertex_array);
	}
}

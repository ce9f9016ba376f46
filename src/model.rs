use log::{info, warn};

use crate::{
	backend::{GraphicsBackend, ShaderProgram},
	error::ImportError,
	importer::{self, ImportOptions},
	mesh::Mesh,
	mesh_data::{Texture, TextureKind, Vertex},
	scene_graph::{SceneGraph, SourceMaterial, SourceMesh},
	texture_cache::TextureCache,
};


pub struct Model {
	meshes: Vec<Mesh>,
	textures: TextureCache,
}

impl Model {
	pub fn load(backend: &impl GraphicsBackend, path: &str, options: ImportOptions) -> Result<Model, ImportError> {
		let scene = importer::import(path, options)?;
		let model = Model::from_scene(backend, &scene, path, base_directory(path))?;
		info!(
			"Loaded {} ({} meshes, {} textures)",
			path, model.meshes.len(), model.textures.len()
		);
		Ok(model)
	}

	/// Converts every mesh reachable from the root, parents before children.
	/// `source` names the scene in errors, textures resolve against `directory`.
	pub fn from_scene(backend: &impl GraphicsBackend, scene: &SceneGraph, source: &str, directory: impl Into<String>) -> Result<Model, ImportError> {
		scene.validate(source)?;
		let mut model = Model {
			meshes: Vec::new(),
			textures: TextureCache::new(directory),
		};

		for node_id in scene.pre_order() {
			let node = &scene.nodes[node_id];
			for mesh_index in &node.meshes {
				let Some(source) = scene.meshes.get(*mesh_index) else {
					warn!("Node {} references missing mesh {}", node.name, mesh_index);
					continue;
				};
				let material = source.material.and_then(|m| scene.materials.get(m));
				let mesh = model.process_mesh(backend, source, material);
				model.meshes.push(mesh);
			}
		}
		Ok(model)
	}

	fn process_mesh(&mut self, backend: &impl GraphicsBackend, source: &SourceMesh, material: Option<&SourceMaterial>) -> Mesh {
		let uvs = source.tex_coords.first();
		let vertices: Vec<Vertex> = source.positions.iter()
			.enumerate()
			.map(|(i, position)| {
				let normal = source.normals.as_ref()
					.and_then(|normals| normals.get(i))
					.copied()
					.unwrap_or_default();
				let tex_coords = uvs
					.and_then(|channel| channel.get(i))
					.copied()
					.unwrap_or_default();
				Vertex::new(*position, normal, tex_coords)
			})
			.collect();

		let mut indices = Vec::with_capacity(source.faces.len() * 3);
		let mut dropped = 0;
		for face in &source.faces {
			if face.indices.iter().all(|i| (*i as usize) < vertices.len()) {
				indices.extend_from_slice(&face.indices);
			} else {
				dropped += 1;
			}
		}
		if dropped > 0 {
			warn!("Dropped {} faces with out of range indices in mesh {}", dropped, source.name);
		}

		let mut textures = Vec::new();
		if let Some(material) = material {
			for kind in TextureKind::ALL {
				textures.extend(self.load_material_textures(backend, material, kind));
			}
		}

		Mesh::new(backend, vertices, indices, textures)
	}

	fn load_material_textures(&mut self, backend: &impl GraphicsBackend, material: &SourceMaterial, kind: TextureKind) -> Vec<Texture> {
		material.texture_paths(kind)
			.map(|path| self.textures.acquire(backend, path, kind))
			.collect()
	}

	pub fn draw<B: GraphicsBackend>(&self, backend: &B, shader: &impl ShaderProgram) {
		for mesh in &self.meshes {
			mesh.draw(backend, shader);
		}
	}

	pub fn release(mut self, backend: &impl GraphicsBackend) {
		for mesh in self.meshes.drain(..) {
			mesh.release(backend);
		}
		self.textures.release(backend);
	}

	pub fn meshes(&self) -> &[Mesh] {
		&self.meshes
	}

	pub fn mesh_count(&self) -> usize {
		self.meshes.len()
	}

	pub fn texture_count(&self) -> usize {
		self.textures.len()
	}
}

/// Everything before the last path separator, or `.` when there is none.
pub fn base_directory(path: &str) -> &str {
	match path.rfind(|c: char| c == '/' || c == '\\') {
		Some(end) => &path[..end],
		None => ".",
	}
}

/// Swaps the model in `slot`, releasing the old one before loading.
pub fn reload_model(backend: &impl GraphicsBackend, slot: &mut Option<Model>, path: &str, options: ImportOptions) -> Result<(), ImportError> {
	if let Some(old) = slot.take() {
		old.release(backend);
	}
	*slot = Some(Model::load(backend, path, options)?);
	Ok(())
}

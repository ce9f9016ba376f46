use std::{collections::HashMap, path::Path};

use gltf::{image::Source, mesh::Mode, Gltf};
use log::warn;

use crate::{
	error::ImportError,
	importer::ImportOptions,
	mesh_data::TextureKind,
	scene_graph::{Face, NodeId, SceneGraph, SourceMaterial, SourceMesh},
};


pub fn import_gltf(path: &str, options: &ImportOptions) -> Result<SceneGraph, ImportError> {
	let gltf = Gltf::open(path).map_err(|e| ImportError::read(path, e))?;
	let base = Path::new(path).parent();
	let buffers = gltf::import_buffers(&gltf.document, base, gltf.blob.clone())
		.map_err(|e| ImportError::read(path, e))?;
	let document = &gltf.document;

	let mut scene = SceneGraph::new();
	scene.materials = document.materials().map(|m| convert_material(&m)).collect();

	// glTF mesh index -> source meshes, one per primitive
	let mut primitive_meshes: HashMap<usize, Vec<usize>> = HashMap::new();
	for mesh in document.meshes() {
		let name = mesh.name().unwrap_or_default().to_string();
		for primitive in mesh.primitives() {
			let mode = match primitive.mode() {
				mode @ (Mode::Triangles | Mode::TriangleStrip | Mode::TriangleFan) => mode,
				other => {
					warn!("Skipping {:?} primitive in mesh {} of {}", other, mesh.index(), path);
					continue;
				},
			};
			let reader = primitive.reader(|b| buffers.get(b.index()).map(|data| data.0.as_slice()));
			let Some(positions) = reader.read_positions() else {
				warn!("Skipping primitive without positions in mesh {} of {}", mesh.index(), path);
				continue;
			};
			let positions: Vec<[f32; 3]> = positions.collect();
			let normals = reader.read_normals().map(|n| n.collect());
			let tex_coords = match reader.read_tex_coords(0) {
				Some(uvs) => {
					let channel = uvs.into_f32()
						.map(|[u, v]| if options.flip_uvs { [u, v] } else { [u, 1.0 - v] })
						.collect();
					vec![channel]
				},
				None => Vec::new(),
			};
			let indices: Vec<u32> = match reader.read_indices() {
				Some(indices) => indices.into_u32().collect(),
				None => (0..positions.len() as u32).collect(),
			};

			primitive_meshes.entry(mesh.index()).or_default().push(scene.meshes.len());
			scene.meshes.push(SourceMesh {
				name: name.clone(),
				positions,
				normals,
				tex_coords,
				faces: triangle_faces(mode, &indices),
				material: primitive.material().index(),
			});
		}
	}

	let root = scene.add_node(None, path);
	let Some(gltf_scene) = document.default_scene().or_else(|| document.scenes().next()) else {
		scene.incomplete = true;
		return Ok(scene);
	};
	let mut stack: Vec<(gltf::Node, NodeId)> = gltf_scene.nodes()
		.map(|node| (node, root))
		.collect();
	stack.reverse();
	while let Some((node, parent)) = stack.pop() {
		let id = scene.add_node(Some(parent), node.name().unwrap_or_default());
		if let Some(mesh) = node.mesh() {
			if let Some(meshes) = primitive_meshes.get(&mesh.index()) {
				scene.nodes[id].meshes.extend(meshes);
			}
		}
		let children: Vec<gltf::Node> = node.children().collect();
		stack.extend(children.into_iter().rev().map(|child| (child, id)));
	}
	scene.incomplete = scene.meshes.is_empty();

	Ok(scene)
}

fn convert_material(material: &gltf::Material) -> SourceMaterial {
	let mut converted = SourceMaterial::new(material.name().unwrap_or_default());
	let base_color = material.pbr_metallic_roughness().base_color_texture();
	if let Some(info) = base_color {
		match info.texture().source().source() {
			Source::Uri { uri, .. } => match texture_file(uri) {
				Some(file) => converted.add_texture(TextureKind::Diffuse, file),
				None => warn!("Embedded base color texture of material {:?} is not supported", material.name()),
			},
			Source::View { .. } => warn!("Embedded base color texture of material {:?} is not supported", material.name()),
		}
	}
	converted
}

/// Relative file path of an image URI, `None` for inline `data:` images.
fn texture_file(uri: &str) -> Option<String> {
	if uri.starts_with("data:") {
		return None;
	}
	match urlencoding::decode(uri) {
		Ok(decoded) => Some(decoded.into_owned()),
		Err(e) => {
			warn!("Texture URI {} is not valid UTF-8 once decoded: {}", uri, e);
			Some(uri.to_string())
		},
	}
}

fn triangle_faces(mode: Mode, indices: &[u32]) -> Vec<Face> {
	let face = |a: u32, b: u32, c: u32| Face { indices: vec![a, b, c] };
	match mode {
		Mode::TriangleStrip => (0..indices.len().saturating_sub(2))
			.map(|i| if i % 2 == 0 {
				face(indices[i], indices[i + 1], indices[i + 2])
			} else {
				face(indices[i + 1], indices[i], indices[i + 2])
			})
			.collect(),
		Mode::TriangleFan => (1..indices.len().saturating_sub(1))
			.map(|i| face(indices[0], indices[i], indices[i + 1]))
			.collect(),
		_ => indices.chunks_exact(3)
			.map(|tri| face(tri[0], tri[1], tri[2]))
			.collect(),
	}
}

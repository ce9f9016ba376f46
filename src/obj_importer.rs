use log::warn;

use crate::{
	error::ImportError,
	importer::ImportOptions,
	mesh_data::TextureKind,
	scene_graph::{Face, SceneGraph, SourceMaterial, SourceMesh},
};


pub fn import_obj(path: &str, options: &ImportOptions) -> Result<SceneGraph, ImportError> {
	let load_options = tobj::LoadOptions {
		triangulate: options.triangulate,
		single_index: true,
		..Default::default()
	};
	let (models, materials) = tobj::load_obj(path, &load_options)
		.map_err(|e| ImportError::read(path, e))?;

	let mut scene = SceneGraph::new();
	match materials {
		Ok(materials) => scene.materials = materials.iter().map(convert_material).collect(),
		Err(e) => warn!("Failed to load materials for {}: {}", path, e),
	}

	let root = scene.add_node(None, path);
	for model in models {
		if model.mesh.positions.is_empty() {
			continue;
		}
		let node = scene.add_node(Some(root), model.name.clone());
		let mesh_index = scene.meshes.len();
		scene.meshes.push(convert_mesh(model, options.flip_uvs));
		scene.nodes[node].meshes.push(mesh_index);
	}
	scene.incomplete = scene.meshes.is_empty();

	Ok(scene)
}

fn convert_material(material: &tobj::Material) -> SourceMaterial {
	let mut converted = SourceMaterial::new(material.name.clone());
	if let Some(diffuse) = &material.diffuse_texture {
		converted.add_texture(TextureKind::Diffuse, diffuse.clone());
	}
	if let Some(specular) = &material.specular_texture {
		converted.add_texture(TextureKind::Specular, specular.clone());
	}
	converted
}

fn convert_mesh(model: tobj::Model, flip_uvs: bool) -> SourceMesh {
	let mesh = model.mesh;
	let positions: Vec<[f32; 3]> = mesh.positions
		.chunks_exact(3)
		.map(|p| [p[0], p[1], p[2]])
		.collect();
	let normals = if mesh.normals.is_empty() {
		None
	} else {
		Some(mesh.normals.chunks_exact(3).map(|n| [n[0], n[1], n[2]]).collect())
	};
	let tex_coords = if mesh.texcoords.is_empty() {
		Vec::new()
	} else {
		let channel = mesh.texcoords
			.chunks_exact(2)
			.map(|uv| if flip_uvs { [uv[0], 1.0 - uv[1]] } else { [uv[0], uv[1]] })
			.collect();
		vec![channel]
	};

	let faces = if mesh.face_arities.is_empty() {
		mesh.indices
			.chunks_exact(3)
			.map(|tri| Face { indices: tri.to_vec() })
			.collect()
	} else {
		let mut faces = Vec::with_capacity(mesh.face_arities.len());
		let mut start = 0;
		for arity in &mesh.face_arities {
			let end = (start + *arity as usize).min(mesh.indices.len());
			faces.push(Face { indices: mesh.indices[start..end].to_vec() });
			start = end;
		}
		faces
	};

	SourceMesh {
		name: model.name,
		positions,
		normals,
		tex_coords,
		faces,
		material: mesh.material_id,
	}
}

#[cfg(test)]
mod tests {
	use std::fs;

	use super::*;

	const QUAD: &str = "\
mtllib quad.mtl
o Quad
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
vt 0 0
vt 1 0
vt 1 1
vt 0 1
vn 0 0 1
usemtl brick
f 1/1/1 2/2/1 3/3/1 4/4/1
o Bare
v 0 0 1
v 1 0 1
v 1 1 1
f 5 6 7
";

	const MTL: &str = "\
newmtl brick
map_Kd brick_diffuse.png
map_Ks brick_specular.png
";

	fn write_fixture(with_mtl: bool) -> (tempfile::TempDir, String) {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("quad.obj");
		fs::write(&path, QUAD).unwrap();
		if with_mtl {
			fs::write(dir.path().join("quad.mtl"), MTL).unwrap();
		}
		let path = path.to_str().unwrap().to_string();
		(dir, path)
	}

	#[test]
	fn imports_objects_as_child_nodes() {
		let (_dir, path) = write_fixture(true);
		let options = ImportOptions { triangulate: true, flip_uvs: true };
		let scene = import_obj(&path, &options).unwrap();

		let root = scene.root.unwrap();
		assert_eq!(scene.nodes[root].children.len(), 2);
		assert_eq!(scene.meshes.len(), 2);
		assert!(!scene.incomplete);

		let quad = &scene.meshes[0];
		assert_eq!(quad.positions.len(), 4);
		assert_eq!(quad.faces.len(), 2);
		assert!(quad.faces.iter().all(|f| f.indices.len() == 3));
		assert_eq!(quad.normals.as_ref().unwrap()[0], [0.0, 0.0, 1.0]);
		assert_eq!(quad.material, Some(0));

		let bare = &scene.meshes[1];
		assert!(bare.normals.is_none());
		assert!(bare.tex_coords.is_empty());
	}

	#[test]
	fn flips_v_coordinate() {
		let (_dir, path) = write_fixture(true);
		let flipped = import_obj(&path, &ImportOptions { triangulate: true, flip_uvs: true }).unwrap();
		let native = import_obj(&path, &ImportOptions { triangulate: true, flip_uvs: false }).unwrap();
		for (a, b) in flipped.meshes[0].tex_coords[0].iter().zip(&native.meshes[0].tex_coords[0]) {
			assert_eq!(a[0], b[0]);
			assert_eq!(a[1], 1.0 - b[1]);
		}
	}

	#[test]
	fn maps_material_textures_by_kind() {
		let (_dir, path) = write_fixture(true);
		let scene = import_obj(&path, &ImportOptions::default()).unwrap();
		let brick = &scene.materials[0];
		assert_eq!(brick.name, "brick");
		assert_eq!(brick.texture_paths(TextureKind::Diffuse).collect::<Vec<_>>(), vec!["brick_diffuse.png"]);
		assert_eq!(brick.texture_paths(TextureKind::Specular).collect::<Vec<_>>(), vec!["brick_specular.png"]);
	}

	#[test]
	fn missing_mtl_keeps_geometry() {
		let (_dir, path) = write_fixture(false);
		let scene = import_obj(&path, &ImportOptions::default()).unwrap();
		assert!(scene.materials.is_empty());
		assert_eq!(scene.meshes.len(), 2);
	}

	#[test]
	fn unreadable_file_is_read_error() {
		let result = import_obj("no/such/model.obj", &ImportOptions::default());
		assert!(matches!(result, Err(ImportError::Read { .. })));
	}
}

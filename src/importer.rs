use std::path::Path;

use log::error;

use crate::{
	error::ImportError,
	gltf_importer::import_gltf,
	obj_importer::import_obj,
	scene_graph::SceneGraph,
};


#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportOptions {
	/// Split polygons into triangles.
	pub triangulate: bool,
	/// Deliver UVs with a top-left origin, matching decoded image rows.
	pub flip_uvs: bool,
}

impl ImportOptions {
	pub const MODEL: ImportOptions = ImportOptions { triangulate: true, flip_uvs: true };
}

/// Parses a scene file, picking the format from the extension.
pub fn import(path: &str, options: ImportOptions) -> Result<SceneGraph, ImportError> {
	let extension = Path::new(path)
		.extension()
		.and_then(|e| e.to_str())
		.map(|e| e.to_ascii_lowercase());
	let result = match extension.as_deref() {
		Some("obj") => import_obj(path, &options),
		Some("gltf" | "glb") => import_gltf(path, &options),
		_ => Err(ImportError::UnsupportedFormat(path.to_string())),
	};
	result.and_then(|scene| {
		scene.validate(path)?;
		Ok(scene)
	}).map_err(|e| {
		error!("{}", e);
		e
	})
}

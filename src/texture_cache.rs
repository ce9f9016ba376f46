use log::{debug, warn};

use crate::{
	backend::GraphicsBackend,
	image_loader,
	mesh_data::{Texture, TextureKind, TextureStatus},
};


/// Uploaded textures of one model, keyed by the path written in the material.
pub struct TextureCache {
	entries: Vec<Texture>,
	directory: String,
}

impl TextureCache {
	pub fn new(directory: impl Into<String>) -> Self {
		TextureCache { entries: Vec::new(), directory: directory.into() }
	}

	pub fn directory(&self) -> &str {
		&self.directory
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn acquire(&mut self, backend: &impl GraphicsBackend, path: &str, kind: TextureKind) -> Texture {
		if let Some(cached) = self.entries.iter().find(|t| t.path == path) {
			debug!("Reusing texture {}", path);
			return Texture { kind, ..cached.clone() };
		}

		let full_path = format!("{}/{}", self.directory, path);
		let texture = match image_loader::decode(&full_path) {
			Ok(image) => Texture {
				handle: backend.create_texture_2d(Some(&image)),
				kind,
				path: path.to_string(),
				status: TextureStatus::Loaded,
			},
			Err(e) => {
				warn!("{}", e);
				Texture {
					handle: backend.create_texture_2d(None),
					kind,
					path: path.to_string(),
					status: TextureStatus::Fallback,
				}
			},
		};
		self.entries.push(texture.clone());
		texture
	}

	pub fn release(&mut self, backend: &impl GraphicsBackend) {
		for texture in self.entries.drain(..) {
			debug!("Releasing texture {}", texture.path);
			backend.delete_texture(texture.handle);
		}
	}
}

#[cfg(test)]
pub(crate) mod tests {
	use std::path::Path;

	use image::{Rgb, RgbImage};

	use crate::test_support::{Call, RecordingBackend};

	use super::*;

	pub(crate) fn write_png(dir: &Path, name: &str) {
		RgbImage::from_pixel(2, 2, Rgb([255, 0, 0])).save(dir.join(name)).unwrap();
	}

	#[test]
	fn same_path_uploads_once() {
		let dir = tempfile::tempdir().unwrap();
		write_png(dir.path(), "wall.png");
		let backend = RecordingBackend::new();
		let mut cache = TextureCache::new(dir.path().to_str().unwrap());

		let first = cache.acquire(&backend, "wall.png", TextureKind::Diffuse);
		let second = cache.acquire(&backend, "wall.png", TextureKind::Specular);

		assert_eq!(first.handle, second.handle);
		assert_eq!(first.status, TextureStatus::Loaded);
		assert_eq!(second.kind, TextureKind::Specular);
		assert_eq!(backend.texture_uploads(), 1);
		assert_eq!(cache.len(), 1);
	}

	#[test]
	fn paths_are_not_normalized() {
		let dir = tempfile::tempdir().unwrap();
		write_png(dir.path(), "wall.png");
		let backend = RecordingBackend::new();
		let mut cache = TextureCache::new(dir.path().to_str().unwrap());

		let a = cache.acquire(&backend, "wall.png", TextureKind::Diffuse);
		let b = cache.acquire(&backend, "./wall.png", TextureKind::Diffuse);
		assert_ne!(a.handle, b.handle);
		assert_eq!(backend.texture_uploads(), 2);
	}

	#[test]
	fn decode_failure_yields_fallback() {
		let backend = RecordingBackend::new();
		let mut cache = TextureCache::new("missing_dir");

		let texture = cache.acquire(&backend, "nope.png", TextureKind::Diffuse);
		assert!(texture.is_fallback());
		assert_eq!(backend.calls(), vec![Call::CreateTexture { handle: texture.handle.0, blank: true }]);

		// failures are cached like successes
		let again = cache.acquire(&backend, "nope.png", TextureKind::Diffuse);
		assert_eq!(again.handle, texture.handle);
		assert!(again.is_fallback());
		assert_eq!(backend.texture_uploads(), 1);
	}

	#[test]
	fn release_deletes_each_handle_once() {
		let backend = RecordingBackend::new();
		let mut cache = TextureCache::new("missing_dir");
		let a = cache.acquire(&backend, "a.png", TextureKind::Diffuse);
		cache.acquire(&backend, "a.png", TextureKind::Specular);
		let b = cache.acquire(&backend, "b.png", TextureKind::Specular);

		cache.release(&backend);
		assert!(cache.is_empty());
		assert_eq!(backend.count(|c| matches!(c, Call::DeleteTexture(_))), 2);
		assert_eq!(backend.count(|c| *c == Call::DeleteTexture(a.handle.0)), 1);
		assert_eq!(backend.count(|c| *c == Call::DeleteTexture(b.handle.0)), 1);
	}
}

use std::path::Path;

use serde::Deserialize;

use crate::{error::ConfigError, scene_state::DEFAULT_MODEL_SCALE};


pub const DEFAULT_CONFIG_PATH: &str = "viewer.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
	pub width: u32,
	pub height: u32,
	pub title: String,
	pub vsync: bool,
}

impl Default for WindowConfig {
	fn default() -> Self {
		WindowConfig {
			width: 1920,
			height: 1080,
			title: "Lighting".to_string(),
			vsync: true,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
	pub path: String,
	pub scale: f32,
}

impl Default for ModelConfig {
	fn default() -> Self {
		ModelConfig {
			path: "resources/models/Sponza-master/sponza.obj".to_string(),
			scale: DEFAULT_MODEL_SCALE,
		}
	}
}

/// Cube map faces in +X, -X, +Y, -Y, +Z, -Z order.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SkyboxConfig {
	pub right: String,
	pub left: String,
	pub top: String,
	pub bottom: String,
	pub back: String,
	pub front: String,
}

impl SkyboxConfig {
	pub fn faces(&self) -> [String; 6] {
		[
			self.right.clone(),
			self.left.clone(),
			self.top.clone(),
			self.bottom.clone(),
			self.back.clone(),
			self.front.clone(),
		]
	}
}

impl Default for SkyboxConfig {
	fn default() -> Self {
		let face = |name: &str| format!("resources/textures/skybox/{}.jpg", name);
		SkyboxConfig {
			right: face("right"),
			left: face("left"),
			top: face("top"),
			bottom: face("bottom"),
			back: face("back"),
			front: face("front"),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
	pub window: WindowConfig,
	pub model: ModelConfig,
	pub skybox: SkyboxConfig,
	pub clear_color: [f32; 4],
}

impl Default for ViewerConfig {
	fn default() -> Self {
		ViewerConfig {
			window: WindowConfig::default(),
			model: ModelConfig::default(),
			skybox: SkyboxConfig::default(),
			clear_color: [0.0, 0.0, 0.0, 1.0],
		}
	}
}

impl ViewerConfig {
	pub fn parse(path: &Path) -> Result<Self, ConfigError> {
		let data = std::fs::read(path)?;
		let config: Self = toml::from_slice(&data)?;
		Ok(config)
	}
}

#[cfg(test)]
mod tests {
	use std::fs;

	use super::*;

	#[test]
	fn partial_file_keeps_defaults() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("viewer.toml");
		fs::write(&path, "clear_color = [0.1, 0.2, 0.3, 1.0]\n\n[model]\nscale = 0.5\n").unwrap();

		let config = ViewerConfig::parse(&path).unwrap();
		assert_eq!(config.model.scale, 0.5);
		assert_eq!(config.model.path, ModelConfig::default().path);
		assert_eq!(config.window, WindowConfig::default());
		assert_eq!(config.clear_color, [0.1, 0.2, 0.3, 1.0]);
	}

	#[test]
	fn skybox_faces_in_cube_map_order() {
		let faces = SkyboxConfig::default().faces();
		assert_eq!(faces[0], "resources/textures/skybox/right.jpg");
		assert_eq!(faces[3], "resources/textures/skybox/bottom.jpg");
		assert_eq!(faces[5], "resources/textures/skybox/front.jpg");
	}

	#[test]
	fn reports_missing_and_invalid_files() {
		let dir = tempfile::tempdir().unwrap();
		let missing = ViewerConfig::parse(&dir.path().join("nope.toml"));
		assert!(matches!(missing, Err(ConfigError::Io(_))));

		let path = dir.path().join("bad.toml");
		fs::write(&path, "[window]\nwidth = \"wide\"\n").unwrap();
		assert!(matches!(ViewerConfig::parse(&path), Err(ConfigError::Parse(_))));
	}
}

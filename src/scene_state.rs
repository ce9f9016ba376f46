use crate::{
	camera::FlyCamera,
	lights::{default_point_lights, DirectionalLight, PointLight, SpotLight, POINT_LIGHT_COUNT},
};


pub const DEFAULT_MODEL_SCALE: f32 = 0.01;

/// Everything the panel can tune and the renderer reads each frame.
#[derive(Debug, Clone)]
pub struct SceneState {
	pub camera: FlyCamera,
	pub directional: DirectionalLight,
	pub point_lights: [PointLight; POINT_LIGHT_COUNT],
	pub spot: SpotLight,
	pub clear_color: [f32; 4],
	pub model_path: String,
	pub model_scale: f32,
	pub blinn: bool,
	pub show_panel: bool,
	/// Set by the panel, consumed by the viewer before the next frame.
	pub reload_requested: bool,
	/// Path of the last model that failed to load.
	pub load_error: Option<String>,
}

impl SceneState {
	pub fn new(model_path: impl Into<String>, model_scale: f32, clear_color: [f32; 4]) -> Self {
		SceneState {
			camera: FlyCamera::default(),
			directional: DirectionalLight::default(),
			point_lights: default_point_lights(),
			spot: SpotLight::default(),
			clear_color,
			model_path: model_path.into(),
			model_scale,
			blinn: false,
			show_panel: true,
			reload_requested: false,
			load_error: None,
		}
	}

	pub fn request_reload(&mut self) {
		self.reload_requested = true;
	}

	/// Returns whether a reload was pending, clearing the request.
	pub fn take_reload_request(&mut self) -> bool {
		std::mem::take(&mut self.reload_requested)
	}
}

impl Default for SceneState {
	fn default() -> Self {
		SceneState::new("", DEFAULT_MODEL_SCALE, [0.0, 0.0, 0.0, 1.0])
	}
}

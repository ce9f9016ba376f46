use crate::backend::ShaderProgram;


pub const POINT_LIGHT_COUNT: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttenuationPreset {
	pub name: &'static str,
	pub linear: f32,
	pub quadratic: f32,
}

/// Falloff coefficients for a light covering roughly `name` units.
pub const ATTENUATION_PRESETS: [AttenuationPreset; 7] = [
	AttenuationPreset { name: "7", linear: 0.7, quadratic: 1.8 },
	AttenuationPreset { name: "13", linear: 0.35, quadratic: 0.44 },
	AttenuationPreset { name: "20", linear: 0.22, quadratic: 0.2 },
	AttenuationPreset { name: "32", linear: 0.14, quadratic: 0.07 },
	AttenuationPreset { name: "50", linear: 0.09, quadratic: 0.032 },
	AttenuationPreset { name: "65", linear: 0.07, quadratic: 0.017 },
	AttenuationPreset { name: "100", linear: 0.045, quadratic: 0.0075 },
];

pub const DEFAULT_PRESET: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Attenuation {
	pub constant: f32,
	pub linear: f32,
	pub quadratic: f32,
	pub preset: usize,
}

impl Attenuation {
	/// Out of range indices are ignored.
	pub fn apply_preset(&mut self, preset: usize) {
		if let Some(values) = ATTENUATION_PRESETS.get(preset) {
			self.linear = values.linear;
			self.quadratic = values.quadratic;
			self.preset = preset;
		}
	}

	fn upload(&self, shader: &impl ShaderProgram, prefix: &str) {
		shader.set_float(&format!("{}.constant", prefix), self.constant);
		shader.set_float(&format!("{}.linear", prefix), self.linear);
		shader.set_float(&format!("{}.quadratic", prefix), self.quadratic);
	}
}

impl Default for Attenuation {
	fn default() -> Self {
		let preset = ATTENUATION_PRESETS[DEFAULT_PRESET];
		Attenuation {
			constant: 1.0,
			linear: preset.linear,
			quadratic: preset.quadratic,
			preset: DEFAULT_PRESET,
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightColors {
	pub ambient: [f32; 3],
	pub diffuse: [f32; 3],
	pub specular: [f32; 3],
}

impl LightColors {
	fn gray(ambient: f32, diffuse: f32, specular: f32) -> Self {
		LightColors {
			ambient: [ambient; 3],
			diffuse: [diffuse; 3],
			specular: [specular; 3],
		}
	}

	fn upload(&self, shader: &impl ShaderProgram, prefix: &str) {
		shader.set_vec3(&format!("{}.ambient", prefix), self.ambient);
		shader.set_vec3(&format!("{}.diffuse", prefix), self.diffuse);
		shader.set_vec3(&format!("{}.specular", prefix), self.specular);
	}
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
	pub direction: [f32; 3],
	pub colors: LightColors,
}

impl Default for DirectionalLight {
	fn default() -> Self {
		DirectionalLight {
			direction: [-0.2, -1.0, -0.3],
			colors: LightColors::gray(0.05, 1.0, 0.5),
		}
	}
}

impl DirectionalLight {
	pub fn upload(&self, shader: &impl ShaderProgram) {
		shader.set_vec3("dirLight.direction", self.direction);
		self.colors.upload(shader, "dirLight");
	}
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
	pub position: [f32; 3],
	pub colors: LightColors,
	pub attenuation: Attenuation,
}

impl PointLight {
	pub fn at(position: [f32; 3]) -> Self {
		PointLight {
			position,
			colors: LightColors::gray(0.05, 0.8, 1.0),
			attenuation: Attenuation::default(),
		}
	}

	pub fn upload(&self, shader: &impl ShaderProgram, index: usize) {
		let prefix = format!("pointLights[{}]", index);
		shader.set_vec3(&format!("{}.position", prefix), self.position);
		self.colors.upload(shader, &prefix);
		self.attenuation.upload(shader, &prefix);
	}
}

pub fn default_point_lights() -> [PointLight; POINT_LIGHT_COUNT] {
	[
		PointLight::at([0.7, 0.2, 2.0]),
		PointLight::at([2.3, -3.3, -4.0]),
		PointLight::at([-4.0, 2.0, -12.0]),
		PointLight::at([0.0, 0.0, -3.0]),
	]
}

/// Flashlight attached to the camera. Cut-offs are in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpotLight {
	pub colors: LightColors,
	pub attenuation: Attenuation,
	pub cut_off: f32,
	pub outer_cut_off: f32,
}

impl Default for SpotLight {
	fn default() -> Self {
		SpotLight {
			colors: LightColors::gray(0.05, 1.0, 0.5),
			attenuation: Attenuation::default(),
			cut_off: 12.5,
			outer_cut_off: 17.5,
		}
	}
}

impl SpotLight {
	pub fn upload(&self, shader: &impl ShaderProgram, position: [f32; 3], direction: [f32; 3]) {
		shader.set_vec3("spotLight.position", position);
		shader.set_vec3("spotLight.direction", direction);
		self.colors.upload(shader, "spotLight");
		self.attenuation.upload(shader, "spotLight");
		shader.set_float("spotLight.cutOff", self.cut_off.to_radians().cos());
		shader.set_float("spotLight.outerCutOff", self.outer_cut_off.to_radians().cos());
	}
}

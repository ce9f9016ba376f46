use log::warn;
use three_d::{window::WindowedContext, Matrix4, SurfaceSettings, Vector3};
use winit::window::Window;

use crate::{
	backend::{DepthFunc, GraphicsBackend, ShaderProgram, TextureHandle, TextureTarget, VertexArray},
	byte_stream::{pack_positions, pack_vertices},
	image_loader,
	mesh_data::{Vertex, POSITIONS_ONLY_LAYOUT},
	model::Model,
	scene_state::SceneState,
};


pub const MODEL_VERTEX_SHADER: &str = include_str!("../shaders/model.vert");
pub const MODEL_FRAGMENT_SHADER: &str = include_str!("../shaders/model.frag");
pub const LIGHT_CUBE_VERTEX_SHADER: &str = include_str!("../shaders/light_cube.vert");
pub const LIGHT_CUBE_FRAGMENT_SHADER: &str = include_str!("../shaders/light_cube.frag");
pub const SKYBOX_VERTEX_SHADER: &str = include_str!("../shaders/skybox.vert");
pub const SKYBOX_FRAGMENT_SHADER: &str = include_str!("../shaders/skybox.frag");

pub const SHININESS: f32 = 32.0;
const MARKER_SCALE: f32 = 0.5;
const CUBE_VERTEX_COUNT: usize = 36;

pub fn new_window_context(window: &Window, vsync: bool) -> Result<WindowedContext, String> {
	WindowedContext::from_winit_window(
		window,
		SurfaceSettings {
			vsync,
			..Default::default()
		},
	)
		.map_err(|e| e.to_string())
}

pub struct Shaders<S> {
	pub model: S,
	pub light_cube: S,
	pub skybox: S,
}

pub struct FrameRenderer<S: ShaderProgram> {
	shaders: Shaders<S>,
	light_cube: VertexArray,
	skybox: VertexArray,
	skybox_texture: TextureHandle,
}

impl<S: ShaderProgram> FrameRenderer<S> {
	/// Uploads the marker cube, the skybox cube and the six skybox faces.
	pub fn new(backend: &impl GraphicsBackend, shaders: Shaders<S>, skybox_faces: &[String]) -> Self {
		let marker_vertices: Vec<Vertex> = cube_positions()
			.into_iter()
			.map(|p| Vertex::new([p[0] * 0.5, p[1] * 0.5, p[2] * 0.5], [0.0; 3], [0.0; 2]))
			.collect();
		let light_cube = backend.create_vertex_array(&pack_vertices(&marker_vertices), None, &Vertex::POSITION_LAYOUT);
		let skybox = backend.create_vertex_array(&pack_positions(&cube_positions()), None, &POSITIONS_ONLY_LAYOUT);

		let faces: Vec<_> = skybox_faces.iter()
			.map(|path| image_loader::decode(path)
				.map_err(|e| warn!("Cubemap face failed to load: {}", e))
				.ok())
			.collect();
		let skybox_texture = backend.create_cube_map(&faces);

		FrameRenderer { shaders, light_cube, skybox, skybox_texture }
	}

	pub fn render<B: GraphicsBackend>(&self, backend: &B, state: &SceneState, aspect: f32, model: Option<&Model>) {
		backend.clear(state.clear_color);

		let camera = &state.camera;
		let view = camera.view_matrix();
		let projection = camera.projection_matrix(aspect);

		let shader = &self.shaders.model;
		shader.use_program();
		shader.set_float("material.shininess", SHININESS);
		shader.set_vec3("viewPos", camera.position_array());
		shader.set_mat4("view", &view);
		shader.set_mat4("projection", &projection);
		shader.set_bool("blinn", state.blinn);
		state.directional.upload(shader);
		for (i, light) in state.point_lights.iter().enumerate() {
			light.upload(shader, i);
		}
		state.spot.upload(shader, camera.position_array(), camera.front_array());

		if let Some(model) = model {
			shader.set_mat4("model", &Matrix4::from_scale(state.model_scale));
			model.draw(backend, shader);
		}

		let shader = &self.shaders.light_cube;
		shader.use_program();
		shader.set_mat4("view", &view);
		shader.set_mat4("projection", &projection);
		for light in &state.point_lights {
			let transform = Matrix4::from_translation(Vector3::from(light.position)) * Matrix4::from_scale(MARKER_SCALE);
			shader.set_mat4("model", &transform);
			shader.set_vec3("lightColor", light.colors.diffuse);
			backend.draw_arrays(&self.light_cube, CUBE_VERTEX_COUNT);
		}

		// drawn last so it only fills pixels left at the far plane
		backend.set_depth_func(DepthFunc::LessEqual);
		let shader = &self.shaders.skybox;
		shader.use_program();
		shader.set_mat4("view", &camera.skybox_view_matrix());
		shader.set_mat4("projection", &projection);
		shader.set_int("skybox", 0);
		backend.set_active_texture_unit(0);
		backend.bind_texture(TextureTarget::CubeMap, self.skybox_texture);
		backend.draw_arrays(&self.skybox, CUBE_VERTEX_COUNT);
		backend.set_depth_func(DepthFunc::Less);
	}

	pub fn release(self, backend: &impl GraphicsBackend) {
		backend.delete_vertex_array(self.light_cube);
		backend.delete_vertex_array(self.skybox);
		backend.delete_texture(self.skybox_texture);
	}
}

/// Two triangles per face of the [-1, 1] cube.
fn cube_positions() -> Vec<[f32; 3]> {
	// corner i has x, y, z set from bits 0, 1, 2
	const QUADS: [[usize; 4]; 6] = [
		[0, 2, 3, 1], // -z
		[4, 5, 7, 6], // +z
		[0, 4, 6, 2], // -x
		[1, 3, 7, 5], // +x
		[0, 1, 5, 4], // -y
		[2, 6, 7, 3], // +y
	];
	let corner = |i: usize| -> [f32; 3] { [
		if i & 1 == 0 { -1.0 } else { 1.0 },
		if i & 2 == 0 { -1.0 } else { 1.0 },
		if i & 4 == 0 { -1.0 } else { 1.0 },
	] };
	QUADS.iter()
		.flat_map(|[a, b, c, d]| [*a, *b, *c, *a, *c, *d])
		.map(corner)
		.collect()
}

use anyhow::Result;
use log::{error, info};
use three_d::{window::WindowedContext, Event, FrameInputGenerator, Key, MouseButton, GUI};
use winit::{
	dpi::LogicalSize,
	event::{Event as WinitEvent, WindowEvent},
	event_loop::EventLoop,
	window::{Window, WindowBuilder},
};

use crate::{
	backend::GraphicsBackend,
	camera::Movement,
	config::ViewerConfig,
	gl_backend::{GlBackend, GlShader},
	importer::ImportOptions,
	mesh_renderer::{self, new_window_context, FrameRenderer, Shaders},
	model::{reload_model, Model},
	scene_state::SceneState,
	ui,
};


#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
	KeyDown(Key),
	KeyUp(Key),
	LookStart,
	LookEnd,
	MouseMoved(f32, f32),
}

/// Keeps the input the panel did not consume.
pub fn translate(event: &Event) -> Option<InputEvent> {
	match event {
		Event::KeyPress { kind, handled: false, .. } => Some(InputEvent::KeyDown(*kind)),
		// releases always go through so keys cannot stick
		Event::KeyRelease { kind, .. } => Some(InputEvent::KeyUp(*kind)),
		Event::MousePress { button: MouseButton::Right, handled: false, .. } => Some(InputEvent::LookStart),
		Event::MouseRelease { button: MouseButton::Right, .. } => Some(InputEvent::LookEnd),
		Event::MouseMotion { delta, handled: false, .. } => Some(InputEvent::MouseMoved(delta.0, delta.1)),
		_ => None,
	}
}

#[derive(Debug, Default)]
pub struct Controls {
	held: [bool; 4],
	looking: bool,
}

const MOVEMENT_KEYS: [(Key, Movement); 4] = [
	(Key::W, Movement::Forward),
	(Key::S, Movement::Backward),
	(Key::A, Movement::Left),
	(Key::D, Movement::Right),
];

impl Controls {
	/// Applies one frame of input. Returns true when the viewer should exit.
	pub fn apply(&mut self, events: impl IntoIterator<Item = InputEvent>, state: &mut SceneState, delta_seconds: f32) -> bool {
		let mut exit = false;
		for event in events {
			match event {
				InputEvent::KeyDown(Key::Escape) => exit = true,
				InputEvent::KeyDown(Key::B) => state.blinn = !state.blinn,
				InputEvent::KeyDown(Key::Tab) => state.show_panel = !state.show_panel,
				InputEvent::KeyDown(key) => self.set_held(key, true),
				InputEvent::KeyUp(key) => self.set_held(key, false),
				InputEvent::LookStart => self.looking = true,
				InputEvent::LookEnd => self.looking = false,
				InputEvent::MouseMoved(dx, dy) if self.looking => {
					// screen y grows downwards
					state.camera.process_mouse_movement(dx, -dy);
				},
				InputEvent::MouseMoved(..) => {},
			}
		}
		for (i, (_, movement)) in MOVEMENT_KEYS.iter().enumerate() {
			if self.held[i] {
				state.camera.process_keyboard(*movement, delta_seconds);
			}
		}
		exit
	}

	fn set_held(&mut self, key: Key, down: bool) {
		if let Some(i) = MOVEMENT_KEYS.iter().position(|(k, _)| *k == key) {
			self.held[i] = down;
		}
	}
}

/// Loads `state.model_path` into `slot`, recording failures for the panel.
pub fn load_requested_model(backend: &impl GraphicsBackend, slot: &mut Option<Model>, state: &mut SceneState) {
	let path = state.model_path.clone();
	match reload_model(backend, slot, &path, ImportOptions::MODEL) {
		Ok(()) => state.load_error = None,
		Err(e) => {
			error!("Model load failed: {}", e);
			state.load_error = Some(path);
		},
	}
}

fn present_step<E: std::fmt::Display>(stage: &str, result: std::result::Result<(), E>) -> Result<()> {
	result.map_err(|e| anyhow::anyhow!("{} failed: {}", stage, e))
}

struct Viewer {
	window: Window,
	context: WindowedContext,
	backend: GlBackend,
	renderer: Option<FrameRenderer<GlShader>>,
	model: Option<Model>,
	state: SceneState,
	gui: GUI,
	input: FrameInputGenerator,
	controls: Controls,
}

impl Viewer {
	fn redraw(&mut self) -> Result<bool> {
		let mut frame_input = self.input.generate(&self.context);
		let state = &mut self.state;
		self.gui.update(
			&mut frame_input.events,
			frame_input.accumulated_time,
			frame_input.viewport,
			frame_input.device_pixel_ratio,
			|ctx| ui::parameter_panel(ctx, state),
		);

		let delta_seconds = (frame_input.elapsed_time / 1000.0) as f32;
		let events = frame_input.events.iter().filter_map(translate);
		let exit = self.controls.apply(events, &mut self.state, delta_seconds);

		if self.state.take_reload_request() {
			load_requested_model(&self.backend, &mut self.model, &mut self.state);
		}

		let viewport = frame_input.viewport;
		let aspect = viewport.width as f32 / viewport.height.max(1) as f32;
		self.backend.prepare_frame(viewport);
		if let Some(renderer) = &self.renderer {
			renderer.render(&self.backend, &self.state, aspect, self.model.as_ref());
		}
		present_step("GUI render", self.gui.render())?;
		present_step("Buffer swap", self.context.swap_buffers())?;
		Ok(exit)
	}

	fn release(&mut self) {
		if let Some(model) = self.model.take() {
			model.release(&self.backend);
		}
		if let Some(renderer) = self.renderer.take() {
			renderer.release(&self.backend);
		}
		info!("Released GPU resources");
	}
}

pub fn run(config: ViewerConfig) -> Result<()> {
	let event_loop = EventLoop::new();
	let window = WindowBuilder::new()
		.with_title(&config.window.title)
		.with_inner_size(LogicalSize::new(config.window.width, config.window.height))
		.build(&event_loop)?;
	let context = new_window_context(&window, config.window.vsync)
		.map_err(anyhow::Error::msg)?;

	let shaders = Shaders {
		model: GlShader::from_source(&context, mesh_renderer::MODEL_VERTEX_SHADER, mesh_renderer::MODEL_FRAGMENT_SHADER)?,
		light_cube: GlShader::from_source(&context, mesh_renderer::LIGHT_CUBE_VERTEX_SHADER, mesh_renderer::LIGHT_CUBE_FRAGMENT_SHADER)?,
		skybox: GlShader::from_source(&context, mesh_renderer::SKYBOX_VERTEX_SHADER, mesh_renderer::SKYBOX_FRAGMENT_SHADER)?,
	};
	let backend = GlBackend::new((*context).clone());
	let renderer = FrameRenderer::new(&backend, shaders, &config.skybox.faces());

	let mut state = SceneState::new(config.model.path.clone(), config.model.scale, config.clear_color);
	let mut model = None;
	load_requested_model(&backend, &mut model, &mut state);

	let gui = GUI::new(&context);
	let input = FrameInputGenerator::from_winit_window(&window);
	let mut viewer = Viewer {
		window,
		context,
		backend,
		renderer: Some(renderer),
		model,
		state,
		gui,
		input,
		controls: Controls::default(),
	};

	event_loop.run(move |event, _, control_flow| {
		match event {
			WinitEvent::MainEventsCleared => viewer.window.request_redraw(),
			WinitEvent::RedrawRequested(_) => match viewer.redraw() {
				Ok(false) => {},
				Ok(true) => control_flow.set_exit(),
				Err(e) => {
					error!("{}", e);
					control_flow.set_exit();
				},
			},
			WinitEvent::WindowEvent { ref event, .. } => {
				viewer.input.handle_winit_window_event(event);
				match event {
					WindowEvent::Resized(size) => viewer.context.resize(*size),
					WindowEvent::ScaleFactorChanged { new_inner_size, .. } => viewer.context.resize(**new_inner_size),
					WindowEvent::CloseRequested => control_flow.set_exit(),
					_ => {},
				}
			},
			WinitEvent::LoopDestroyed => viewer.release(),
			_ => {},
		}
	});
}

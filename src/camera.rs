use three_d::{degrees, perspective, EuclideanSpace, InnerSpace, Matrix4, Point3, Vector3};


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Movement {
	Forward,
	Backward,
	Left,
	Right,
}

pub const FOV_DEGREES: f32 = 45.0;
pub const Z_NEAR: f32 = 0.1;
pub const Z_FAR: f32 = 100.0;

/// Yaw/pitch fly camera, angles in degrees.
#[derive(Debug, Clone, PartialEq)]
pub struct FlyCamera {
	pub position: Vector3<f32>,
	pub yaw: f32,
	pub pitch: f32,
	pub speed: f32,
	pub sensitivity: f32,
	world_up: Vector3<f32>,
}

impl Default for FlyCamera {
	fn default() -> Self {
		FlyCamera::new(Vector3::new(0.0, 0.0, 3.0))
	}
}

impl FlyCamera {
	pub fn new(position: Vector3<f32>) -> Self {
		FlyCamera {
			position,
			yaw: -90.0,
			pitch: 0.0,
			speed: 2.5,
			sensitivity: 0.1,
			world_up: Vector3::new(0.0, 1.0, 0.0),
		}
	}

	pub fn front(&self) -> Vector3<f32> {
		let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
		Vector3::new(yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos()).normalize()
	}

	fn right(&self) -> Vector3<f32> {
		self.front().cross(self.world_up).normalize()
	}

	fn up(&self) -> Vector3<f32> {
		self.right().cross(self.front()).normalize()
	}

	pub fn process_keyboard(&mut self, movement: Movement, delta_seconds: f32) {
		let velocity = self.speed * delta_seconds;
		let offset = match movement {
			Movement::Forward => self.front(),
			Movement::Backward => -self.front(),
			Movement::Left => -self.right(),
			Movement::Right => self.right(),
		};
		self.position += offset * velocity;
	}

	pub fn process_mouse_movement(&mut self, dx: f32, dy: f32) {
		self.yaw += dx * self.sensitivity;
		self.pitch = (self.pitch + dy * self.sensitivity).clamp(-89.0, 89.0);
	}

	pub fn view_matrix(&self) -> Matrix4<f32> {
		let eye = Point3::from_vec(self.position);
		Matrix4::look_at_rh(eye, eye + self.front(), self.up())
	}

	/// View rotation only, for geometry that follows the camera.
	pub fn skybox_view_matrix(&self) -> Matrix4<f32> {
		let mut view = self.view_matrix();
		view.w.x = 0.0;
		view.w.y = 0.0;
		view.w.z = 0.0;
		view
	}

	pub fn projection_matrix(&self, aspect: f32) -> Matrix4<f32> {
		let aspect = if aspect > 0.0 { aspect } else { 1.0 };
		perspective(degrees(FOV_DEGREES), aspect, Z_NEAR, Z_FAR)
	}

	pub fn position_array(&self) -> [f32; 3] {
		self.position.into()
	}

	pub fn front_array(&self) -> [f32; 3] {
		self.front().into()
	}
}

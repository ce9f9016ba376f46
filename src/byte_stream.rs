use byteorder::{ByteOrder, NativeEndian};

use crate::mesh_data::Vertex;

// GPU uploads read host memory, so everything is written in native order
pub struct ByteWriter {
	buffer: Vec<u8>,
}

impl ByteWriter {
	pub fn with_capacity(capacity: usize) -> Self {
		ByteWriter { buffer: Vec::with_capacity(capacity) }
	}

	fn grow(&mut self, size: usize) -> &mut [u8] {
		let start = self.buffer.len();
		self.buffer.resize(start + size, 0);
		&mut self.buffer[start..]
	}

	pub fn write_f32(&mut self, value: f32) {
		NativeEndian::write_f32(self.grow(4), value);
	}

	pub fn write_u32(&mut self, value: u32) {
		NativeEndian::write_u32(self.grow(4), value);
	}

	pub fn write_f32s(&mut self, values: &[f32]) {
		for value in values {
			self.write_f32(*value);
		}
	}

	pub fn write_vertex(&mut self, vertex: &Vertex) {
		self.write_f32s(&vertex.position);
		self.write_f32s(&vertex.normal);
		self.write_f32s(&vertex.tex_coords);
	}

	pub fn into_bytes(self) -> Vec<u8> {
		self.buffer
	}
}

impl Default for ByteWriter {
	fn default() -> Self {
		Self::with_capacity(0)
	}
}

pub fn pack_vertices(vertices: &[Vertex]) -> Vec<u8> {
	let mut writer = ByteWriter::with_capacity(vertices.len() * Vertex::LAYOUT.stride);
	for vertex in vertices {
		writer.write_vertex(vertex);
	}
	writer.into_bytes()
}

pub fn pack_positions(positions: &[[f32; 3]]) -> Vec<u8> {
	let mut writer = ByteWriter::with_capacity(positions.len() * 12);
	for position in positions {
		writer.write_f32s(position);
	}
	writer.into_bytes()
}

pub fn pack_indices(indices: &[u32]) -> Vec<u8> {
	let mut writer = ByteWriter::with_capacity(indices.len() * 4);
	for index in indices {
		writer.write_u32(*index);
	}
	writer.into_bytes()
}

#[cfg(test)]
mod tests {
	use super::*;

	fn read_f32(bytes: &[u8], offset: usize) -> f32 {
		NativeEndian::read_f32(&bytes[offset..offset + 4])
	}

	#[test]
	fn packed_vertices_follow_layout() {
		let vertices = [
			Vertex::new([1.0, 2.0, 3.0], [0.0, 1.0, 0.0], [0.25, 0.75]),
			Vertex::new([-1.0, -2.0, -3.0], [1.0, 0.0, 0.0], [0.5, 0.5]),
		];
		let bytes = pack_vertices(&vertices);
		assert_eq!(bytes.len(), 2 * Vertex::LAYOUT.stride);

		let stride = Vertex::LAYOUT.stride;
		let normal = Vertex::LAYOUT.attributes[1].offset;
		let uv = Vertex::LAYOUT.attributes[2].offset;
		assert_eq!(read_f32(&bytes, 0), 1.0);
		assert_eq!(read_f32(&bytes, 8), 3.0);
		assert_eq!(read_f32(&bytes, normal + 4), 1.0);
		assert_eq!(read_f32(&bytes, uv + 4), 0.75);
		assert_eq!(read_f32(&bytes, stride), -1.0);
		assert_eq!(read_f32(&bytes, stride + normal), 1.0);
		assert_eq!(read_f32(&bytes, stride + uv), 0.5);
	}

	#[test]
	fn writes_scalars_in_sequence() {
		let mut writer = ByteWriter::with_capacity(8);
		writer.write_u32(7);
		writer.write_f32(-0.5);
		let bytes = writer.into_bytes();
		assert_eq!(bytes.len(), 8);
		assert_eq!(NativeEndian::read_u32(&bytes[0..4]), 7);
		assert_eq!(read_f32(&bytes, 4), -0.5);
	}

	#[test]
	fn packs_positions_tightly() {
		let bytes = pack_positions(&[[1.0, 1.0, -1.0], [0.0, 2.0, 0.0]]);
		assert_eq!(bytes.len(), 24);
		assert_eq!(read_f32(&bytes, 16), 2.0);
	}
}

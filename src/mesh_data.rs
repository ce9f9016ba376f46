use std::{fmt, mem::{offset_of, size_of}};

use crate::backend::TextureHandle;


#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vertex {
	pub position: [f32; 3],
	pub normal: [f32; 3],
	pub tex_coords: [f32; 2],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribute {
	pub location: u32,
	pub components: i32,
	pub offset: usize,
}

/// Interleaved float attributes sharing one vertex buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexLayout {
	pub stride: usize,
	pub attributes: &'static [VertexAttribute],
}

const POSITION: VertexAttribute = VertexAttribute {
	location: 0,
	components: 3,
	offset: offset_of!(Vertex, position),
};
const NORMAL: VertexAttribute = VertexAttribute {
	location: 1,
	components: 3,
	offset: offset_of!(Vertex, normal),
};
const TEX_COORDS: VertexAttribute = VertexAttribute {
	location: 2,
	components: 2,
	offset: offset_of!(Vertex, tex_coords),
};

impl Vertex {
	pub const LAYOUT: VertexLayout = VertexLayout {
		stride: size_of::<Vertex>(),
		attributes: &[POSITION, NORMAL, TEX_COORDS],
	};

	// light markers reuse full vertices but only read positions
	pub const POSITION_LAYOUT: VertexLayout = VertexLayout {
		stride: size_of::<Vertex>(),
		attributes: &[POSITION],
	};

	pub fn new(position: [f32; 3], normal: [f32; 3], tex_coords: [f32; 2]) -> Self {
		Vertex { position, normal, tex_coords }
	}
}

pub const POSITIONS_ONLY_LAYOUT: VertexLayout = VertexLayout {
	stride: 3 * size_of::<f32>(),
	attributes: &[VertexAttribute { location: 0, components: 3, offset: 0 }],
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureKind {
	Diffuse,
	Specular,
}

impl TextureKind {
	pub const ALL: [TextureKind; 2] = [TextureKind::Diffuse, TextureKind::Specular];

	pub fn name(self) -> &'static str {
		match self {
			TextureKind::Diffuse => "diffuse",
			TextureKind::Specular => "specular",
		}
	}

	pub(crate) fn slot(self) -> usize {
		match self {
			TextureKind::Diffuse => 0,
			TextureKind::Specular => 1,
		}
	}
}

impl fmt::Display for TextureKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureStatus {
	Loaded,
	/// Image decoding failed; the handle names a blank texture object.
	Fallback,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
	pub handle: TextureHandle,
	pub kind: TextureKind,
	pub path: String,
	pub status: TextureStatus,
}

impl Texture {
	pub fn is_fallback(&self) -> bool {
		self.status == TextureStatus::Fallback
	}
}

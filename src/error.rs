use std::io;

use thiserror::Error;


#[derive(Error, Debug)]
pub enum ImportError {
	#[error("Unsupported scene format: {0}")]
	UnsupportedFormat(String),
	#[error("Failed to read scene {path}: {message}")]
	Read { path: String, message: String },
	#[error("Scene {0} is incomplete")]
	Incomplete(String),
	#[error("Scene {0} has no root node")]
	NoRootNode(String),
}

impl ImportError {
	pub(crate) fn read(path: &str, message: impl ToString) -> Self {
		ImportError::Read {
			path: path.to_string(),
			message: message.to_string(),
		}
	}
}

#[derive(Error, Debug)]
pub enum TextureDecodeError {
	#[error("Failed to load texture at path {path}: {source}")]
	Image {
		path: String,
		#[source]
		source: image::ImageError,
	},
	#[error("Texture {path} has unsupported dimensions {width}x{height}")]
	Dimensions { path: String, width: u32, height: u32 },
}

#[derive(Error, Debug)]
pub enum ShaderError {
	#[error("Failed to create {0} object: {1}")]
	Create(&'static str, String),
	#[error("Failed to compile {stage} shader: {log}")]
	Compile { stage: &'static str, log: String },
	#[error("Failed to link shader program: {0}")]
	Link(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
	#[error("Failed to read config file: {0}")]
	Io(#[from] io::Error),
	#[error("Failed to parse config file: {0}")]
	Parse(#[from] toml::de::Error),
}

use image::DynamicImage;

use crate::error::TextureDecodeError;


#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
	pub pixels: Vec<u8>,
	pub width: u32,
	pub height: u32,
	/// 1 (red), 3 (RGB) or 4 (RGBA)
	pub channels: u8,
}

/// Decodes an image file, keeping rows in file order.
pub fn decode(path: &str) -> Result<DecodedImage, TextureDecodeError> {
	let image = image::open(path)
		.map_err(|source| TextureDecodeError::Image { path: path.to_string(), source })?;
	let (width, height) = (image.width(), image.height());
	if width == 0 || height == 0 || width > i32::MAX as u32 || height > i32::MAX as u32 {
		return Err(TextureDecodeError::Dimensions { path: path.to_string(), width, height });
	}

	let (pixels, channels) = match image {
		DynamicImage::ImageLuma8(buffer) => (buffer.into_raw(), 1),
		DynamicImage::ImageRgb8(buffer) => (buffer.into_raw(), 3),
		DynamicImage::ImageRgba8(buffer) => (buffer.into_raw(), 4),
		other => (other.to_rgba8().into_raw(), 4),
	};
	Ok(DecodedImage { pixels, width, height, channels })
}

#[cfg(test)]
mod tests {
	use image::{GrayImage, Luma, LumaA, Rgb, RgbImage, ImageBuffer};

	use super::*;

	#[test]
	fn keeps_rgb_layout() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("rgb.png");
		let mut img = RgbImage::new(2, 3);
		img.put_pixel(1, 0, Rgb([10, 20, 30]));
		img.save(&path).unwrap();

		let decoded = decode(path.to_str().unwrap()).unwrap();
		assert_eq!((decoded.width, decoded.height, decoded.channels), (2, 3, 3));
		assert_eq!(decoded.pixels.len(), 2 * 3 * 3);
		// first row stays first
		assert_eq!(&decoded.pixels[3..6], &[10, 20, 30]);
	}

	#[test]
	fn single_channel_stays_red() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("gray.png");
		GrayImage::from_pixel(4, 4, Luma([200])).save(&path).unwrap();

		let decoded = decode(path.to_str().unwrap()).unwrap();
		assert_eq!(decoded.channels, 1);
		assert_eq!(decoded.pixels, vec![200; 16]);
	}

	#[test]
	fn two_channels_become_rgba() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("gray_alpha.png");
		ImageBuffer::from_pixel(1, 1, LumaA([50u8, 128])).save(&path).unwrap();

		let decoded = decode(path.to_str().unwrap()).unwrap();
		assert_eq!(decoded.channels, 4);
		assert_eq!(decoded.pixels, vec![50, 50, 50, 128]);
	}

	#[test]
	fn missing_file_is_an_error() {
		let result = decode("does/not/exist.png");
		assert!(matches!(result, Err(TextureDecodeError::Image { .. })));
	}
}

use std::fmt;
use std::path::{Path, PathBuf};

/// Decoded texture pixels.
///
/// `pixels` is always tightly packed RGBA8, whatever the source format was.
/// `channels` is the channel count the source file reported and may differ
/// from 4.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureImage {
    pub pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub channels: u8,
}

impl TextureImage {
    pub const BYTES_PER_PIXEL: usize = 4;

    /// Byte length the pixel buffer must have.
    pub fn expected_len(&self) -> usize {
        self.width as usize * self.height as usize * Self::BYTES_PER_PIXEL
    }

    pub fn is_complete(&self) -> bool {
        !self.pixels.is_empty() && self.pixels.len() == self.expected_len()
    }
}

/// Image could not be turned into texture pixels.
#[derive(Debug)]
pub enum ImageDecodeError {
    Io { path: PathBuf, source: std::io::Error },
    Decode { path: PathBuf, source: image::ImageError },
    Empty { path: PathBuf },
}

impl fmt::Display for ImageDecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageDecodeError::Io { path, source } => {
                write!(f, "failed to read image {}: {source}", path.display())
            }
            ImageDecodeError::Decode { path, source } => {
                write!(f, "failed to decode image {}: {source}", path.display())
            }
            ImageDecodeError::Empty { path } => {
                write!(f, "image {} has no pixels", path.display())
            }
        }
    }
}

impl std::error::Error for ImageDecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ImageDecodeError::Io { source, .. } => Some(source),
            ImageDecodeError::Decode { source, .. } => Some(source),
            ImageDecodeError::Empty { .. } => None,
        }
    }
}

/// Decodes the image at `path`, forcing four RGBA channels.
///
/// Format is detected from the file contents, not the extension.
pub fn decode_rgba8(path: impl AsRef<Path>) -> Result<TextureImage, ImageDecodeError> {
    let path = path.as_ref();

    let reader = image::ImageReader::open(path)
        .and_then(|r| r.with_guessed_format())
        .map_err(|source| ImageDecodeError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    let decoded = reader.decode().map_err(|source| ImageDecodeError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    let channels = decoded.color().channel_count();
    let rgba = decoded.into_rgba8();
    let (width, height) = rgba.dimensions();

    let image = TextureImage {
        pixels: rgba.into_raw(),
        width,
        height,
        channels,
    };

    if !image.is_complete() {
        return Err(ImageDecodeError::Empty {
            path: path.to_path_buf(),
        });
    }

    log::debug!(
        "decoded {} ({}x{}, {} source channels)",
        path.display(),
        width,
        height,
        channels
    );
    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("canoe-{}-{name}", std::process::id()))
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = decode_rgba8("definitely/not/here/bricks_texture.png").unwrap_err();
        assert!(matches!(err, ImageDecodeError::Io { .. }));
    }

    #[test]
    fn garbage_bytes_are_a_decode_error() {
        let path = temp_path("garbage.png");
        std::fs::write(&path, b"this is not an image").unwrap();
        let result = decode_rgba8(&path);
        let _ = std::fs::remove_file(&path);

        assert!(result.is_err());
    }

    #[test]
    fn grayscale_source_is_expanded_to_rgba() {
        let path = temp_path("gray.png");
        image::GrayImage::from_pixel(3, 2, image::Luma([200u8]))
            .save(&path)
            .unwrap();
        let result = decode_rgba8(&path);
        let _ = std::fs::remove_file(&path);

        let image = result.unwrap();
        assert_eq!(image.channels, 1);
        assert_eq!((image.width, image.height), (3, 2));
        assert_eq!(image.pixels.len(), 3 * 2 * 4);
        assert_eq!(&image.pixels[..4], &[200, 200, 200, 255]);
    }

    #[test]
    fn rgb_source_reports_three_channels() {
        let path = temp_path("rgb.png");
        image::RgbImage::from_pixel(2, 2, image::Rgb([10u8, 20, 30]))
            .save(&path)
            .unwrap();
        let result = decode_rgba8(&path);
        let _ = std::fs::remove_file(&path);

        let image = result.unwrap();
        assert_eq!(image.channels, 3);
        assert!(image.is_complete());
        assert_eq!(&image.pixels[4..8], &[10, 20, 30, 255]);
    }

    #[test]
    fn completeness_requires_exact_length() {
        let mut image = TextureImage { pixels: vec![0; 16], width: 2, height: 2, channels: 4 };
        assert!(image.is_complete());
        image.pixels.pop();
        assert!(!image.is_complete());
        image.pixels.clear();
        assert!(!image.is_complete());
    }
}

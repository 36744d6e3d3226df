//! Image helpers for preparing model inputs and handling artifacts.
//!
//! Vision and multimodal-embedding inputs travel as base64 WEBP. These
//! helpers decode arbitrary image bytes, shrink them into a bounding box
//! (never enlarging, aspect ratio preserved), convert to RGB and encode
//! the result. One shared default bound applies everywhere; callers with
//! tighter model limits pass their own.

use std::path::Path;

use base64::{Engine as _, prelude::BASE64_STANDARD};

use crate::error::{Error, Result};

/// Default bounding box for encoded images, in pixels.
pub const DEFAULT_MAX_DIMENSIONS: (u32, u32) = (2000, 2000);

/// Request timeout for fetching an image from a URL.
const URL_FETCH_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(10);

/// Shrink an image to fit inside `max_dimensions`, preserving aspect
/// ratio. Images already inside the box are returned unchanged.
fn shrink_to_fit(img: image::DynamicImage, max_dimensions: (u32, u32)) -> image::DynamicImage {
    let (max_width, max_height) = max_dimensions;
    if img.width() <= max_width && img.height() <= max_height {
        img
    } else {
        img.resize(max_width, max_height, image::imageops::FilterType::Lanczos3)
    }
}

/// Encode image bytes as base64 WEBP, shrinking to fit `max_dimensions`.
///
/// The input may be any format the `image` crate can decode; the output
/// is always RGB WEBP.
///
/// # Errors
///
/// Returns [`Error::Image`] when the bytes cannot be decoded or the WEBP
/// encoding fails.
pub fn encode_image_base64(bytes: &[u8], max_dimensions: (u32, u32)) -> Result<String> {
    let img = image::load_from_memory(bytes)?;
    let img = shrink_to_fit(img, max_dimensions);
    let rgb = image::DynamicImage::ImageRgb8(img.to_rgb8());

    let mut buf = Vec::new();
    rgb.write_to(&mut std::io::Cursor::new(&mut buf), image::ImageFormat::WebP)?;

    Ok(BASE64_STANDARD.encode(&buf))
}

/// Read an image file and encode it as base64 WEBP.
///
/// # Errors
///
/// Returns [`Error::Io`] when the file cannot be read, plus the failure
/// modes of [`encode_image_base64`].
pub fn encode_image_base64_from_file(
    path: impl AsRef<Path>,
    max_dimensions: (u32, u32),
) -> Result<String> {
    let bytes = std::fs::read(path)?;
    encode_image_base64(&bytes, max_dimensions)
}

/// Fetch an image over HTTP and encode it as base64 WEBP.
///
/// The fetch uses a 10-second request timeout independent of the
/// client's own configuration.
///
/// # Errors
///
/// Returns [`Error::Transport`] when the fetch fails, [`Error::Service`]
/// on a non-success status, plus the failure modes of
/// [`encode_image_base64`].
pub async fn encode_image_base64_from_url(
    client: &reqwest::Client,
    url: &str,
    max_dimensions: (u32, u32),
) -> Result<String> {
    let response = client.get(url).timeout(URL_FETCH_TIMEOUT).send().await?;

    let status = response.status();
    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(Error::service(status.as_u16(), message));
    }

    let bytes = response.bytes().await?;
    encode_image_base64(&bytes, max_dimensions)
}

/// Decode a base64 payload into an image.
///
/// # Errors
///
/// Returns [`Error::Base64`] when the payload is not valid base64 and
/// [`Error::Image`] when the decoded bytes are not a readable image.
pub fn decode_image_base64(data: &str) -> Result<image::DynamicImage> {
    let bytes = BASE64_STANDARD.decode(data)?;
    Ok(image::load_from_memory(&bytes)?)
}

/// Decode a base64 payload and write it to `path`, creating parent
/// directories as needed. The output format follows the file extension.
///
/// # Errors
///
/// Returns the failure modes of [`decode_image_base64`], [`Error::Io`]
/// when directories cannot be created, and [`Error::Image`] when saving
/// fails.
pub fn save_image_base64(data: &str, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let img = decode_image_base64(data)?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    img.save(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_png(width: u32, height: u32) -> Vec<u8> {
        let img = image::DynamicImage::ImageRgb8(image::RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([
                u8::try_from(x % 256).unwrap(),
                u8::try_from(y % 256).unwrap(),
                128,
            ])
        }));
        let mut buf = Vec::new();
        img.write_to(&mut std::io::Cursor::new(&mut buf), image::ImageFormat::Png)
            .unwrap();
        buf
    }

    #[test]
    fn test_round_trip_keeps_dimensions() {
        let png = sample_png(48, 32);
        let encoded = encode_image_base64(&png, DEFAULT_MAX_DIMENSIONS).unwrap();
        let decoded = decode_image_base64(&encoded).unwrap();

        assert_eq!(decoded.width(), 48);
        assert_eq!(decoded.height(), 32);
    }

    #[test]
    fn test_encoded_payload_is_webp() {
        let png = sample_png(8, 8);
        let encoded = encode_image_base64(&png, DEFAULT_MAX_DIMENSIONS).unwrap();
        let bytes = BASE64_STANDARD.decode(encoded).unwrap();

        assert_eq!(&bytes[0..4], b"RIFF");
        assert_eq!(&bytes[8..12], b"WEBP");
    }

    #[test]
    fn test_oversized_image_shrinks_to_bounds() {
        let png = sample_png(400, 200);
        let encoded = encode_image_base64(&png, (200, 200)).unwrap();
        let decoded = decode_image_base64(&encoded).unwrap();

        assert_eq!(decoded.width(), 200);
        assert_eq!(decoded.height(), 100);
    }

    #[test]
    fn test_small_image_never_enlarged() {
        let png = sample_png(16, 16);
        let encoded = encode_image_base64(&png, DEFAULT_MAX_DIMENSIONS).unwrap();
        let decoded = decode_image_base64(&encoded).unwrap();

        assert_eq!(decoded.width(), 16);
        assert_eq!(decoded.height(), 16);
    }

    #[test]
    fn test_invalid_base64_rejected() {
        let err = decode_image_base64("not base64!!!").unwrap_err();
        assert!(matches!(err, Error::Base64(_)));
    }

    #[test]
    fn test_invalid_image_bytes_rejected() {
        let err = encode_image_base64(b"definitely not an image", DEFAULT_MAX_DIMENSIONS)
            .unwrap_err();
        assert!(matches!(err, Error::Image(_)));
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("artifact.png");

        let png = sample_png(8, 8);
        let encoded = BASE64_STANDARD.encode(&png);
        save_image_base64(&encoded, &path).unwrap();

        let saved = image::open(&path).unwrap();
        assert_eq!(saved.width(), 8);
        assert_eq!(saved.height(), 8);
    }

    #[test]
    fn test_encode_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.png");
        std::fs::write(&path, sample_png(12, 12)).unwrap();

        let encoded = encode_image_base64_from_file(&path, DEFAULT_MAX_DIMENSIONS).unwrap();
        let decoded = decode_image_base64(&encoded).unwrap();
        assert_eq!(decoded.width(), 12);
    }
}

//! Image encoding for downloads.

use crate::error::ExportError;
use base64::{engine::general_purpose::STANDARD, Engine};
use image::codecs::gif::{GifEncoder, Repeat};
use image::codecs::png::PngEncoder;
use image::{Delay, ExtendedColorType, Frame, ImageEncoder, RgbaImage};

pub const PNG_MIME: &str = "image/png";
pub const GIF_MIME: &str = "image/gif";

/// Delay between animation frames.
pub const GIF_FRAME_DELAY_MS: u32 = 100;

/// Quantizer speed for GIF frames (1 slowest/best, 30 fastest).
const GIF_SPEED: i32 = 10;

fn expected_len(width: u32, height: u32) -> usize {
    width as usize * height as usize * 4
}

fn check_frame(pixels: &[u8], width: u32, height: u32) -> Result<(), ExportError> {
    let expected = expected_len(width, height);
    if width == 0 || height == 0 || pixels.len() != expected {
        return Err(ExportError::InvalidFrame {
            expected,
            actual: pixels.len(),
        });
    }
    Ok(())
}

/// Reverse the row order of an RGBA buffer.
///
/// `readPixels` returns the bottom row first; images store the top row first.
pub fn flip_rows(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>, ExportError> {
    check_frame(pixels, width, height)?;
    let stride = width as usize * 4;
    Ok(pixels
        .chunks_exact(stride)
        .rev()
        .flatten()
        .copied()
        .collect())
}

/// Encode one RGBA frame (top row first) as PNG.
pub fn encode_png(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>, ExportError> {
    check_frame(pixels, width, height)?;
    let mut bytes = Vec::new();
    PngEncoder::new(&mut bytes).write_image(pixels, width, height, ExtendedColorType::Rgba8)?;
    Ok(bytes)
}

/// Encode RGBA frames (top row first) as an infinitely looping GIF.
pub fn encode_gif(
    frames: &[Vec<u8>],
    width: u32,
    height: u32,
    delay_ms: u32,
) -> Result<Vec<u8>, ExportError> {
    if frames.is_empty() {
        return Err(ExportError::NoFrames);
    }

    let mut bytes = Vec::new();
    {
        let mut encoder = GifEncoder::new_with_speed(&mut bytes, GIF_SPEED);
        encoder.set_repeat(Repeat::Infinite)?;
        for pixels in frames {
            check_frame(pixels, width, height)?;
            let image = RgbaImage::from_raw(width, height, pixels.clone()).ok_or(
                ExportError::InvalidFrame {
                    expected: expected_len(width, height),
                    actual: pixels.len(),
                },
            )?;
            let delay = Delay::from_numer_denom_ms(delay_ms, 1);
            encoder.encode_frame(Frame::from_parts(image, 0, 0, delay))?;
        }
    }

    log::info!(
        "Encoded {} frame GIF ({}x{}, {} bytes)",
        frames.len(),
        width,
        height,
        bytes.len()
    );
    Ok(bytes)
}

/// `data:` URL with base64 payload.
pub fn data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
        rgba.repeat((width * height) as usize)
    }

    #[test]
    fn flip_rows_reverses_rows() {
        // 1x3 image: rows 0, 1, 2.
        let pixels = [0, 0, 0, 255, 1, 1, 1, 255, 2, 2, 2, 255];
        let flipped = flip_rows(&pixels, 1, 3).unwrap();
        assert_eq!(flipped, vec![2, 2, 2, 255, 1, 1, 1, 255, 0, 0, 0, 255]);
    }

    #[test]
    fn empty_frames_are_rejected() {
        assert!(matches!(
            flip_rows(&[], 0, 0),
            Err(ExportError::InvalidFrame { expected: 0, .. })
        ));
        assert!(flip_rows(&[], 0, 3).is_err());
        assert!(encode_png(&[], 4, 0).is_err());
    }

    #[test]
    fn wrong_length_is_rejected() {
        assert!(matches!(
            flip_rows(&[0; 7], 1, 2),
            Err(ExportError::InvalidFrame {
                expected: 8,
                actual: 7
            })
        ));
    }

    #[test]
    fn png_has_signature() {
        let png = encode_png(&solid(4, 4, [255, 0, 0, 255]), 4, 4).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn gif_has_header_and_loop_extension() {
        let frames = vec![
            solid(8, 8, [255, 0, 0, 255]),
            solid(8, 8, [0, 0, 255, 255]),
        ];
        let gif = encode_gif(&frames, 8, 8, GIF_FRAME_DELAY_MS).unwrap();
        assert_eq!(&gif[..6], b"GIF89a");
        assert!(gif.windows(11).any(|w| w == b"NETSCAPE2.0"));
        assert_eq!(gif.last(), Some(&0x3b));
    }

    #[test]
    fn gif_needs_frames() {
        assert!(matches!(
            encode_gif(&[], 8, 8, GIF_FRAME_DELAY_MS),
            Err(ExportError::NoFrames)
        ));
    }

    #[test]
    fn data_url_prefix() {
        assert_eq!(data_url(PNG_MIME, b"abc"), "data:image/png;base64,YWJj");
    }
}

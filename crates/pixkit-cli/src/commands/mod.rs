//! Subcommand implementations and shared image I/O.

pub mod grayscale;
pub mod grid;
pub mod merge;
pub mod presets;
pub mod sketch;
pub mod tone;

use anyhow::{Context as _, Result, bail};
use image::{DynamicImage, RgbaImage};
use pixkit_core::{CHANNELS, PixelBuffer, check_budget};
use std::path::Path;
use tracing::{debug, trace};

/// Global options every command sees.
#[derive(Debug, Clone, Copy)]
pub struct Context {
    pub verbose: u8,
    pub max_pixels: u64,
}

impl Context {
    fn max_bytes(&self) -> u64 {
        self.max_pixels.saturating_mul(CHANNELS as u64)
    }
}

/// Decodes `path` into an RGBA8 buffer.
///
/// The header is read first so oversized images are refused before any
/// pixel data is decoded.
pub fn load_image(path: &Path, ctx: &Context) -> Result<PixelBuffer> {
    trace!(path = %path.display(), "load_image");
    let (w, h) = image::image_dimensions(path)
        .with_context(|| format!("Failed to read header: {}", path.display()))?;
    check_budget(w, h, ctx.max_bytes())
        .with_context(|| format!("Refusing to decode {}", path.display()))?;

    let rgba = image::open(path)
        .with_context(|| format!("Failed to load: {}", path.display()))?
        .to_rgba8();
    debug!(width = w, height = h, "decoded");
    PixelBuffer::from_raw(rgba.width(), rgba.height(), rgba.into_raw())
        .with_context(|| format!("Invalid pixel data in {}", path.display()))
}

/// Encodes `buf` by the extension of `path`.
///
/// JPEG carries no alpha, so alpha is dropped for `.jpg`/`.jpeg`.
pub fn save_image(path: &Path, buf: &PixelBuffer) -> Result<()> {
    trace!(path = %path.display(), width = buf.width(), height = buf.height(), "save_image");
    let Some(rgba) = RgbaImage::from_raw(buf.width(), buf.height(), buf.data().to_vec()) else {
        bail!("buffer size mismatch writing {}", path.display());
    };
    let img = DynamicImage::ImageRgba8(rgba);
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    let written = match ext.as_str() {
        "jpg" | "jpeg" => img.to_rgb8().save(path),
        _ => img.save(path),
    };
    written.with_context(|| format!("Failed to save: {}", path.display()))
}

/// Parses `WIDTHxHEIGHT`.
pub fn parse_size(s: &str) -> Result<(u32, u32)> {
    let Some((w, h)) = s.trim().split_once(['x', 'X']) else {
        bail!("expected WIDTHxHEIGHT, got '{}'", s);
    };
    let w: u32 = w.trim().parse().with_context(|| format!("bad width in '{}'", s))?;
    let h: u32 = h.trim().parse().with_context(|| format!("bad height in '{}'", s))?;
    if w == 0 || h == 0 {
        bail!("size '{}' has a zero dimension", s);
    }
    Ok((w, h))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) const CTX: Context = Context { verbose: 0, max_pixels: 1 << 20 };

    /// Writes a left-black / right-white PNG and returns its path.
    pub(crate) fn write_split(dir: &Path, name: &str, w: u32, h: u32) -> std::path::PathBuf {
        let mut buf = PixelBuffer::filled(w, h, [0, 0, 0, 255]).unwrap();
        for y in 0..h {
            for x in w / 2..w {
                buf.set_pixel(x, y, [255, 255, 255, 255]);
            }
        }
        let path = dir.join(name);
        save_image(&path, &buf).unwrap();
        path
    }

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("640x480").unwrap(), (640, 480));
        assert_eq!(parse_size(" 8X2 ").unwrap(), (8, 2));
        assert!(parse_size("640").is_err());
        assert!(parse_size("0x10").is_err());
        assert!(parse_size("ax10").is_err());
    }

    #[test]
    fn test_png_roundtrip_keeps_alpha() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.png");
        let mut buf = PixelBuffer::filled(3, 2, [10, 20, 30, 40]).unwrap();
        buf.set_pixel(2, 1, [1, 2, 3, 255]);
        save_image(&path, &buf).unwrap();
        assert_eq!(load_image(&path, &CTX).unwrap(), buf);
    }

    #[test]
    fn test_jpeg_is_opaque() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.jpg");
        let buf = PixelBuffer::filled(8, 8, [128, 128, 128, 0]).unwrap();
        save_image(&path, &buf).unwrap();
        let back = load_image(&path, &CTX).unwrap();
        assert!(back.pixels().all(|(_, _, p)| p[3] == 255));
    }

    #[test]
    fn test_budget_refuses_large_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_split(dir.path(), "big.png", 20, 20);
        let tight = Context { verbose: 0, max_pixels: 100 };
        assert!(load_image(&path, &tight).is_err());
        assert!(load_image(&path, &CTX).is_ok());
    }

    #[test]
    fn test_missing_file() {
        let err = load_image(Path::new("/nonexistent/x.png"), &CTX).unwrap_err();
        assert!(err.to_string().contains("x.png"));
    }
}

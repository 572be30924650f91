use std::fmt;
use std::io::Cursor;
use std::path::Path;

use anyhow::{Context, Result};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};

use crate::report::Outcome;

/// How an icon carries (or lacks) transparency, decided from its PNG header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconMode {
    /// RGBA or grayscale+alpha samples.
    AlphaChannel,
    /// Transparency from a `tRNS` chunk: palette alpha or a transparent color key.
    PaletteAlpha,
    /// Grayscale or indexed color without transparency.
    NeedsRgb,
    /// Plain RGB, nothing to do.
    Opaque,
}

impl fmt::Display for IconMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IconMode::AlphaChannel => write!(f, "alpha channel"),
            IconMode::PaletteAlpha => write!(f, "palette alpha"),
            IconMode::NeedsRgb => write!(f, "non-RGB color"),
            IconMode::Opaque => write!(f, "opaque RGB"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconInfo {
    pub mode: IconMode,
    pub width: u32,
    pub height: u32,
    pub bit_depth: u8,
}

impl IconInfo {
    /// Reads the PNG header and ancillary chunks up to the first image data.
    pub fn read(bytes: &[u8]) -> Result<Self> {
        let reader = png::Decoder::new(Cursor::new(bytes))
            .read_info()
            .context("Not a valid PNG")?;
        let info = reader.info();

        let mode = match info.color_type {
            png::ColorType::Rgba | png::ColorType::GrayscaleAlpha => IconMode::AlphaChannel,
            _ if info.trns.is_some() => IconMode::PaletteAlpha,
            png::ColorType::Grayscale | png::ColorType::Indexed => IconMode::NeedsRgb,
            png::ColorType::Rgb => IconMode::Opaque,
        };

        Ok(Self {
            mode,
            width: info.width,
            height: info.height,
            bit_depth: info.bit_depth as u8,
        })
    }
}

/// Composites `img` over opaque white using its (possibly expanded) alpha.
pub fn flatten_onto_white(img: &DynamicImage) -> RgbImage {
    let rgba = img.to_rgba8();
    let (w, h) = rgba.dimensions();

    RgbImage::from_fn(w, h, |x, y| {
        let [r, g, b, a] = rgba.get_pixel(x, y).0;
        Rgb([over_white(r, a), over_white(g, a), over_white(b, a)])
    })
}

/// Plain color-space conversion for icons without transparency.
pub fn to_rgb(img: &DynamicImage) -> RgbImage {
    img.to_rgb8()
}

fn over_white(channel: u8, alpha: u8) -> u8 {
    let c = channel as u32;
    let a = alpha as u32;
    ((c * a + 255 * (255 - a) + 127) / 255) as u8
}

/// Flattens or converts a single icon in place. `dry_run` decodes but never writes.
pub fn fix_icon(path: &Path, dry_run: bool) -> Result<Outcome> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let info = IconInfo::read(&bytes)?;
    log::debug!(
        "{}: {}x{}, {}-bit, {}",
        path.display(),
        info.width,
        info.height,
        info.bit_depth,
        info.mode
    );

    let rgb = match info.mode {
        IconMode::Opaque => return Ok(Outcome::Skipped),
        IconMode::AlphaChannel | IconMode::PaletteAlpha => {
            flatten_onto_white(&decode(&bytes, path)?)
        }
        IconMode::NeedsRgb => to_rgb(&decode(&bytes, path)?),
    };

    let reduced_depth = info.bit_depth == 16;

    if dry_run {
        if reduced_depth {
            log::info!("{}: would reduce 16-bit samples to 8-bit", path.display());
        }
    } else {
        save_png(&rgb, path)?;
        if reduced_depth {
            log::warn!("{}: 16-bit samples reduced to 8-bit", path.display());
        }
    }

    Ok(Outcome::Fixed {
        mode: info.mode,
        reduced_depth,
    })
}

fn decode(bytes: &[u8], path: &Path) -> Result<DynamicImage> {
    image::load_from_memory_with_format(bytes, ImageFormat::Png)
        .with_context(|| format!("Failed to decode {}", path.display()))
}

fn save_png(img: &RgbImage, path: &Path) -> Result<()> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .with_context(|| format!("Failed to encode {}", path.display()))?;
    std::fs::write(path, buf).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn over_white_endpoints() {
        assert_eq!(over_white(0, 0), 255);
        assert_eq!(over_white(17, 255), 17);
        assert_eq!(over_white(0, 128), 127);
        assert_eq!(over_white(200, 128), 227);
    }

    #[test]
    fn to_rgb_replicates_gray() {
        let src = image::GrayImage::from_pixel(2, 2, image::Luma([77]));

        let out = to_rgb(&DynamicImage::ImageLuma8(src));

        assert_eq!(out.dimensions(), (2, 2));
        assert_eq!(out.get_pixel(1, 1), &Rgb([77, 77, 77]));
    }

    #[test]
    fn flatten_keeps_dimensions() {
        let mut src = RgbaImage::new(3, 2);
        src.put_pixel(0, 0, Rgba([10, 20, 30, 255]));
        src.put_pixel(1, 0, Rgba([10, 20, 30, 0]));

        let out = flatten_onto_white(&DynamicImage::ImageRgba8(src));

        assert_eq!(out.dimensions(), (3, 2));
        assert_eq!(out.get_pixel(0, 0), &Rgb([10, 20, 30]));
        assert_eq!(out.get_pixel(1, 0), &Rgb([255, 255, 255]));
        assert_eq!(out.get_pixel(2, 1), &Rgb([255, 255, 255]));
    }
}

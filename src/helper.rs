use crate::error::{QrError, Result};
use crate::qrcode::QrMatrix;

use image::{ImageFormat, Rgb, RgbImage};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const DARK: Rgb<u8> = Rgb([0, 0, 0]);
const LIGHT: Rgb<u8> = Rgb([255, 255, 255]);

/// Geometry used when rasterizing a [`QrMatrix`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Width and height of one module, in pixels. Must be at least 1.
    pub box_size: u32,
    /// Quiet zone around the symbol, in modules.
    pub border: u32,
}

impl RenderOptions {
    pub const DEFAULT_BOX_SIZE: u32 = 10;
    pub const DEFAULT_BORDER: u32 = 4;

    /// Largest accepted image side, in pixels.
    pub const MAX_IMAGE_SIDE: u32 = 16_384;

    pub fn new(box_size: u32, border: u32) -> Self {
        Self { box_size, border }
    }

    /// Checks the options before any encoding work is done.
    pub fn validate(&self) -> Result<()> {
        if self.box_size == 0 {
            return Err(QrError::InvalidParameter(
                "box size must be a positive integer".to_string(),
            ));
        }
        // Smallest symbol is 21 modules wide; the actual symbol is checked again when rendering.
        self.image_side(21)?;
        self.border_modules().map(|_| ())
    }

    /// Side length in pixels of the image for a symbol `size` modules wide.
    ///
    /// Fails when the side exceeds [`Self::MAX_IMAGE_SIDE`] or the RGB buffer would not fit in
    /// memory addressable by this platform.
    pub fn image_side(&self, size: u32) -> Result<u32> {
        let too_large = || {
            QrError::InvalidParameter(format!(
                "image too large for box size {} and border {}",
                self.box_size, self.border
            ))
        };
        let side = self
            .border
            .checked_mul(2)
            .and_then(|b| b.checked_add(size))
            .and_then(|modules| modules.checked_mul(self.box_size))
            .filter(|&side| side <= Self::MAX_IMAGE_SIDE)
            .ok_or_else(too_large)?;
        (side as u64)
            .checked_mul(side as u64)
            .and_then(|pixels| pixels.checked_mul(3))
            .and_then(|bytes| usize::try_from(bytes).ok())
            .ok_or_else(too_large)?;
        Ok(side)
    }

    /// Border width in modules, as a signed module offset.
    pub fn border_modules(&self) -> Result<i32> {
        i32::try_from(self.border).map_err(|_| {
            QrError::InvalidParameter(format!("border {} is too wide", self.border))
        })
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BOX_SIZE, Self::DEFAULT_BORDER)
    }
}

/// Renders a QR Code as an RGB image, black modules on a white background.
///
/// Every pixel is mapped back to its module; pixels in the border fall outside the
/// symbol and read as light.
///
/// # Example
///
/// ```rust
/// use qrgen::helper::{render_image, RenderOptions};
/// use qrgen::qrcode::{encode, EcLevel};
///
/// let qr = encode("Hello, World!", EcLevel::L).unwrap();
/// let img = render_image(&qr, &RenderOptions::new(1, 4)).unwrap();
/// assert_eq!(img.dimensions(), (29, 29));
/// ```
pub fn render_image(qr: &QrMatrix, options: &RenderOptions) -> Result<RgbImage> {
    options.validate()?;
    let side = options.image_side(qr.size() as u32)?;
    let border = options.border_modules()?;
    let box_size = options.box_size;
    let mut img = RgbImage::new(side, side);

    for (x, y, pixel) in img.enumerate_pixels_mut() {
        let qr_x = (x / box_size) as i32 - border;
        let qr_y = (y / box_size) as i32 - border;
        *pixel = if qr.get_module(qr_x, qr_y) { DARK } else { LIGHT };
    }

    debug!(width = side, height = side, "rendered image");
    Ok(img)
}

/// Saves an image as PNG, creating missing parent directories.
///
/// Any existing file at `path` is overwritten. The PNG format is used regardless of the
/// file extension.
///
/// # Returns
///
/// The absolute path of the written file.
pub fn save_png(img: &RgbImage, path: &Path) -> Result<PathBuf> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!(dir = %parent.display(), "creating output directory");
            fs::create_dir_all(parent)?;
        }
    }

    img.save_with_format(path, ImageFormat::Png)?;
    let resolved = fs::canonicalize(path)?;
    info!(path = %resolved.display(), "saved QR code");
    Ok(resolved)
}

/// Renders the given QR Code as text, two characters per module.
pub fn print_qr(qr: &QrMatrix, border: i32) -> String {
    let mut out = String::new();
    for y in -border..qr.size() + border {
        for x in -border..qr.size() + border {
            let c = if qr.get_module(x, y) { '█' } else { ' ' };
            out.push(c);
            out.push(c);
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qrcode::{encode, EcLevel};

    #[test]
    fn test_render_dimensions() {
        let qr = encode("Hello, world!", EcLevel::L).unwrap();
        let img = render_image(&qr, &RenderOptions::new(1, 4)).unwrap();
        assert_eq!(img.dimensions(), (29, 29));

        let img = render_image(&qr, &RenderOptions::default()).unwrap();
        assert_eq!(img.dimensions(), (290, 290));

        let img = render_image(&qr, &RenderOptions::new(3, 0)).unwrap();
        assert_eq!(img.dimensions(), (63, 63));
    }

    #[test]
    fn test_render_colors() {
        let qr = encode("colors", EcLevel::M).unwrap();
        let options = RenderOptions::new(5, 2);
        let img = render_image(&qr, &options).unwrap();

        // Border is light, the finder pattern corner is dark.
        assert_eq!(*img.get_pixel(0, 0), LIGHT);
        assert_eq!(*img.get_pixel(9, 9), LIGHT);
        assert_eq!(*img.get_pixel(10, 10), DARK);
        assert_eq!(*img.get_pixel(14, 14), DARK);
        // Light ring inside the finder pattern.
        assert_eq!(*img.get_pixel(15, 15), LIGHT);

        // Each pixel matches its module.
        for (x, y, pixel) in img.enumerate_pixels() {
            let dark = qr.get_module((x / 5) as i32 - 2, (y / 5) as i32 - 2);
            assert_eq!(*pixel, if dark { DARK } else { LIGHT });
        }
    }

    #[test]
    fn test_invalid_box_size() {
        let qr = encode("zero", EcLevel::M).unwrap();
        let err = render_image(&qr, &RenderOptions::new(0, 4)).unwrap_err();
        assert!(matches!(err, QrError::InvalidParameter(_)));
    }

    #[test]
    fn test_image_side_overflow() {
        let options = RenderOptions::new(u32::MAX, 4);
        assert!(matches!(
            options.validate(),
            Err(QrError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_huge_border_rejected() {
        let options = RenderOptions::new(1, 2_147_483_548);
        assert!(matches!(
            options.validate(),
            Err(QrError::InvalidParameter(_))
        ));
        assert!(options.border_modules().is_ok());

        let qr = encode("hello", EcLevel::M).unwrap();
        let err = render_image(&qr, &options).unwrap_err();
        assert!(matches!(err, QrError::InvalidParameter(_)));
    }

    #[test]
    fn test_border_beyond_i32_rejected() {
        let options = RenderOptions::new(1, u32::MAX / 2 + 1);
        assert!(matches!(
            options.border_modules(),
            Err(QrError::InvalidParameter(_))
        ));
        assert!(options.validate().is_err());
    }

    #[test]
    fn test_image_side_limit() {
        // Fits a version 1 symbol but not the largest one.
        let options = RenderOptions::new(100, 4);
        assert!(options.validate().is_ok());
        assert_eq!(options.image_side(21).unwrap(), 2900);
        assert!(options.image_side(177).is_err());

        let max = RenderOptions::new(RenderOptions::MAX_IMAGE_SIDE / 21, 0);
        assert!(max.image_side(21).unwrap() <= RenderOptions::MAX_IMAGE_SIDE);
        let over = RenderOptions::new(RenderOptions::MAX_IMAGE_SIDE, 0);
        assert!(over.validate().is_err());
    }

    #[test]
    fn test_save_creates_directories() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("a").join("b").join("qr.png");

        let qr = encode("nested", EcLevel::M).unwrap();
        let img = render_image(&qr, &RenderOptions::default()).unwrap();
        let resolved = save_png(&img, &path).unwrap();

        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("a/b/qr.png"));
        let loaded = image::open(&path).unwrap().to_rgb8();
        assert_eq!(loaded, img);
    }

    #[test]
    fn test_save_overwrites_and_ignores_extension() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("qr.out");
        std::fs::write(&path, b"not an image").unwrap();

        let qr = encode("overwrite", EcLevel::L).unwrap();
        let img = render_image(&qr, &RenderOptions::new(2, 1)).unwrap();
        save_png(&img, &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn test_print_qr() {
        let qr = encode("HELLO WORLD", EcLevel::L).unwrap();
        let text = print_qr(&qr, 1);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 23);
        assert!(lines.iter().all(|l| l.chars().count() == 46));
        assert!(lines[0].trim().is_empty());
        assert!(lines[1].starts_with("  ██"));
    }
}

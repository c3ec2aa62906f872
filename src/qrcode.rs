//! QR code encoding.
//!
//! Thin seam over the `qrcode` crate: picks the error correction level, lets the encoder choose the
//! smallest version that fits, and copies the result into an owned module grid the renderer can
//! read without knowing about the encoder.
use std::fmt;
use std::str::FromStr;

use ::qrcode::types::Version;
use tracing::debug;

use crate::error::{QrError, Result};

/// The error correction level in a QR Code symbol, ordered by increasing redundancy.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EcLevel {
    /// Tolerates about 7% erroneous codewords.
    L,
    /// Tolerates about 15% erroneous codewords.
    #[default]
    M,
    /// Tolerates about 25% erroneous codewords.
    Q,
    /// Tolerates about 30% erroneous codewords.
    H,
}

impl EcLevel {
    pub const ALL: [EcLevel; 4] = [EcLevel::L, EcLevel::M, EcLevel::Q, EcLevel::H];

    fn to_encoder(self) -> ::qrcode::EcLevel {
        match self {
            EcLevel::L => ::qrcode::EcLevel::L,
            EcLevel::M => ::qrcode::EcLevel::M,
            EcLevel::Q => ::qrcode::EcLevel::Q,
            EcLevel::H => ::qrcode::EcLevel::H,
        }
    }

    fn from_encoder(level: ::qrcode::EcLevel) -> Self {
        match level {
            ::qrcode::EcLevel::L => EcLevel::L,
            ::qrcode::EcLevel::M => EcLevel::M,
            ::qrcode::EcLevel::Q => EcLevel::Q,
            ::qrcode::EcLevel::H => EcLevel::H,
        }
    }
}

impl FromStr for EcLevel {
    type Err = QrError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "L" => Ok(EcLevel::L),
            "M" => Ok(EcLevel::M),
            "Q" => Ok(EcLevel::Q),
            "H" => Ok(EcLevel::H),
            _ => Err(QrError::InvalidParameter(format!(
                "error correction must be one of L/M/Q/H, got '{}'",
                s
            ))),
        }
    }
}

impl fmt::Display for EcLevel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let symbol = match self {
            EcLevel::L => "L",
            EcLevel::M => "M",
            EcLevel::Q => "Q",
            EcLevel::H => "H",
        };
        f.write_str(symbol)
    }
}

/// A QR Code symbol, representing a square grid of dark and light modules.
///
/// Instances are immutable after creation. Use [`encode`] to build one.
///
/// # Example
///
/// ```rust
/// use qrgen::qrcode::{encode, EcLevel};
///
/// let qr = encode("Hello, World!", EcLevel::M).unwrap();
/// println!("Version: {}", qr.version());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrMatrix {
    /// The width and height of this QR Code, measured in modules, between
    /// 21 and 177 (inclusive). This is equal to version * 4 + 17.
    size: i32,

    version: u8,

    ecl: EcLevel,

    /// Row-major, `true` = dark.
    modules: Vec<bool>,
}

impl QrMatrix {
    /// Returns this QR Code's version, in the range [1, 40].
    pub fn version(&self) -> u8 {
        self.version
    }

    /// Returns this QR Code's size, in the range [21, 177].
    pub fn size(&self) -> i32 {
        self.size
    }

    pub fn error_correction_level(&self) -> EcLevel {
        self.ecl
    }

    /// Returns the color of the module (pixel) at the given coordinates,
    /// which is `false` for light or `true` for dark.
    ///
    /// The top left corner has the coordinates (x=0, y=0). If the given
    /// coordinates are out of bounds, then `false` (light) is returned.
    pub fn get_module(&self, x: i32, y: i32) -> bool {
        (0..self.size).contains(&x)
            && (0..self.size).contains(&y)
            && self.modules[(y * self.size + x) as usize]
    }

    pub fn dark_modules(&self) -> usize {
        self.modules.iter().filter(|&&dark| dark).count()
    }
}

/// Encodes a text string into a QR code.
///
/// The UTF-8 bytes of `text` are encoded at the requested error correction level, and the encoder
/// selects the smallest version (1 to 40) that can hold them.
///
/// # Errors
///
/// Returns [`QrError::Encode`] if the data does not fit in a version 40 symbol.
pub fn encode(text: &str, ecl: EcLevel) -> Result<QrMatrix> {
    let code = ::qrcode::QrCode::with_error_correction_level(text.as_bytes(), ecl.to_encoder())
        .map_err(|e| QrError::Encode(e.to_string()))?;

    let version = match code.version() {
        Version::Normal(v) => v as u8,
        Version::Micro(v) => {
            return Err(QrError::Encode(format!(
                "unexpected micro QR version M{}",
                v
            )))
        }
    };

    let modules: Vec<bool> = code
        .to_colors()
        .into_iter()
        .map(|c| c == ::qrcode::Color::Dark)
        .collect();

    let qr = QrMatrix {
        size: code.width() as i32,
        version,
        ecl: EcLevel::from_encoder(code.error_correction_level()),
        modules,
    };
    debug!(
        bytes = text.len(),
        version = qr.version,
        size = qr.size,
        ec = %qr.ecl,
        "encoded payload"
    );
    Ok(qr)
}

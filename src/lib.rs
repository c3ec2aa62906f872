//! # qrgen
//!
//! Turn a piece of text or a URL into a QR code PNG.
//!
//! `qrgen` encodes the payload at one of the four error correction levels, letting the encoder pick
//! the smallest symbol version that fits, renders it as black modules on a white background, and
//! writes the image to disk.
//!
//! ## Example
//!
//! ```rust,no_run
//! use qrgen::helper::{render_image, save_png, RenderOptions};
//! use qrgen::qrcode::{encode, EcLevel};
//!
//! fn main() -> qrgen::Result<()> {
//!     let qr = encode("https://example.com", EcLevel::M)?;
//!     let img = render_image(&qr, &RenderOptions::default())?;
//!     let path = save_png(&img, "output/qr_code.png".as_ref())?;
//!     println!("{}", path.display());
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`qrcode`]: Encoding a payload into a module matrix.
//! - [`helper`]: Rendering the matrix to an image and saving it.
//! - [`handler`]: One end-to-end request, as run by the `qrgen` binary.
//! - [`viewer`]: Opening the result in the platform image viewer.

#![forbid(unsafe_code)]

pub mod error;
pub mod handler;
pub mod helper;
pub mod qrcode;
pub mod viewer;

pub use error::{QrError, Result};

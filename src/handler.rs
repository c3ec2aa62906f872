//! Request handling: payload acquisition, encode, render, save, display.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use image::RgbImage;
use tracing::{debug, warn};

use crate::error::{QrError, Result};
use crate::helper::{print_qr, render_image, save_png, RenderOptions};
use crate::qrcode::{encode, EcLevel, QrMatrix};
use crate::viewer::open_image;

/// Default output file, relative to the working directory.
pub const DEFAULT_OUTPUT: &str = "qr_code.png";

pub const PROMPT: &str = "Enter the URL or text to encode: ";

/// One invocation of the generator.
#[derive(Debug, Clone)]
pub struct Request {
    /// Payload given up front; prompted for when absent or blank.
    pub data: Option<String>,
    pub out: PathBuf,
    pub options: RenderOptions,
    pub ec: EcLevel,
    /// Open the saved image in the platform viewer, best effort.
    pub show: bool,
    /// Also print the symbol as text.
    pub print: bool,
}

impl Default for Request {
    fn default() -> Self {
        Self {
            data: None,
            out: PathBuf::from(DEFAULT_OUTPUT),
            options: RenderOptions::default(),
            ec: EcLevel::default(),
            show: false,
            print: false,
        }
    }
}

/// Result of a successful [`run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub path: PathBuf,
    pub version: u8,
    pub ec: EcLevel,
}

/// Returns the payload to encode.
///
/// A non-blank `given` payload is used as is. Otherwise the operator is prompted on `prompt` and
/// one line is read from `input`; the trimmed line is the payload.
///
/// # Errors
///
/// [`QrError::EmptyPayload`] if nothing but whitespace was supplied, including EOF on `input`.
pub fn acquire_payload<R: BufRead, W: Write>(
    given: Option<&str>,
    mut input: R,
    mut prompt: W,
) -> Result<String> {
    if let Some(data) = given.filter(|d| !d.trim().is_empty()) {
        return Ok(data.to_string());
    }

    write!(prompt, "{}", PROMPT)?;
    prompt.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    let data = line.trim();
    if data.is_empty() {
        return Err(QrError::EmptyPayload);
    }
    Ok(data.to_string())
}

/// Encodes `data` and renders it. Options are validated before any encoding.
pub fn build_qr(
    data: &str,
    options: &RenderOptions,
    ec: EcLevel,
) -> Result<(QrMatrix, RgbImage)> {
    options.validate()?;
    let qr = encode(data, ec)?;
    let img = render_image(&qr, options)?;
    Ok((qr, img))
}

/// Runs one request end to end.
///
/// Reads the payload from `input` if needed, writes the prompt and the saved path to `output`.
pub fn run<R: BufRead, W: Write>(request: &Request, input: R, mut output: W) -> Result<Outcome> {
    request.options.validate()?;
    let data = acquire_payload(request.data.as_deref(), input, &mut output)?;
    debug!(
        out = %request.out.display(),
        box_size = request.options.box_size,
        border = request.options.border,
        ec = %request.ec,
        "building QR code"
    );

    let (qr, img) = build_qr(&data, &request.options, request.ec)?;
    let path = save_png(&img, &request.out)?;
    writeln!(output, "QR code saved to: {}", path.display())?;

    if request.print {
        let border = request.options.border_modules()?;
        write!(output, "{}", print_qr(&qr, border))?;
    }
    output.flush()?;

    // The image is already saved; a missing viewer does not fail the run.
    if request.show {
        if let Err(e) = open_image(&path) {
            warn!(error = %e, "could not open image viewer");
        }
    }

    Ok(Outcome {
        path,
        version: qr.version(),
        ec: qr.error_correction_level(),
    })
}

use clap::Parser;
use qrgen::handler::{Request, DEFAULT_OUTPUT};
use qrgen::helper::RenderOptions;
use qrgen::qrcode::EcLevel;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "qrgen", version)]
#[command(about = "Generate a QR code PNG from a URL or text", long_about = None)]
pub struct Cli {
    /// URL or text to encode. If omitted, will prompt
    #[arg(short, long)]
    pub data: Option<String>,

    /// Output PNG path
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub out: PathBuf,

    /// Pixel size of each QR box
    #[arg(long, default_value_t = RenderOptions::DEFAULT_BOX_SIZE,
          value_parser = clap::value_parser!(u32).range(1..))]
    pub box_size: u32,

    /// Border width in boxes
    #[arg(long, default_value_t = RenderOptions::DEFAULT_BORDER)]
    pub border: u32,

    /// Error correction level (L, M, Q or H)
    #[arg(long, default_value_t = EcLevel::default())]
    pub ec: EcLevel,

    /// Open the image after saving
    #[arg(long)]
    pub show: bool,

    /// Print the QR code to the terminal as well
    #[arg(long)]
    pub print: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn to_request(&self) -> Request {
        Request {
            data: self.data.clone(),
            out: self.out.clone(),
            options: RenderOptions::new(self.box_size, self.border),
            ec: self.ec,
            show: self.show,
            print: self.print,
        }
    }
}

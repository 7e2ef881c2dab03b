// CLI module for lingolens

use clap::Parser;

/// lingolens - Gemini-backed OCR and translation HTTP gateway
#[derive(Parser, Debug)]
#[command(name = "lingolens", version, about, long_about = None)]
pub struct Args {
    /// Probe Gemini API connectivity before starting the server
    #[arg(long)]
    pub check: bool,
}

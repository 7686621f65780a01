//! # photo-watermark CLI
//!
//! Command-line interface for the photo date watermarker.
//!
//! ## Usage
//! ```bash
//! photo-watermark ~/Photos/trip --font-size 40 --color "255 255 255" --position bottom-right
//! photo-watermark            # prompts for everything
//! ```

mod cli;

use std::process::ExitCode;

fn main() -> ExitCode {
    match cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}

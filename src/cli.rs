use clap::Parser;
use std::path::PathBuf;

use crate::config::{ExtractConfig, MaxSize};

#[derive(Parser, Debug)]
#[command(name = "thumbzip")]
#[command(version)]
#[command(about = "Extract the embedded thumbnail from a ZIP-based document", long_about = None)]
#[command(after_help = "Examples:\n  \
  thumbzip drawing.sketch -o preview.png          save the thumbnail as PNG\n  \
  thumbzip model.3mf -s 128x128 -o small.png      bound the thumbnail to 128x128\n  \
  thumbzip doc.zip -n preview.png -r > out.bin    dump a custom entry's raw bytes\n  \
  thumbzip https://example.com/file.sketch        print the thumbnail size of a remote file")]
pub struct Cli {
    /// Archive path or HTTP URL
    #[arg(value_name = "FILE")]
    pub file: String,

    /// Write the result to this file instead of printing its size
    #[arg(short = 'o', long = "output", value_name = "OUT")]
    pub output: Option<PathBuf>,

    /// Scale the thumbnail to fit WIDTHxHEIGHT
    #[arg(short = 's', long = "max-size", value_name = "WxH")]
    pub max_size: Option<MaxSize>,

    /// Entry names to look for, in priority order (default: thumbnail paths)
    #[arg(short = 'n', long = "name", value_name = "NAME")]
    pub names: Vec<String>,

    /// Write the raw entry bytes without decoding them
    #[arg(short = 'r', long = "raw")]
    pub raw: bool,

    /// Show debug diagnostics
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Quiet mode (-qq => quieter)
    #[arg(short = 'q', action = clap::ArgAction::Count)]
    pub quiet: u8,
}

impl Cli {
    pub fn is_http_url(&self) -> bool {
        self.file.starts_with("http://") || self.file.starts_with("https://")
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet > 0
    }

    pub fn is_very_quiet(&self) -> bool {
        self.quiet > 1
    }

    /// Default log filter when `RUST_LOG` is unset.
    pub fn log_level(&self) -> &'static str {
        if self.is_very_quiet() {
            "off"
        } else if self.is_quiet() {
            "error"
        } else if self.verbose {
            "debug"
        } else {
            "warn"
        }
    }

    pub fn to_config(&self) -> ExtractConfig {
        let mut config = ExtractConfig {
            max_size: self.max_size,
            ..ExtractConfig::default()
        };
        if !self.names.is_empty() {
            config.candidates = self.names.clone();
        }
        config
    }
}

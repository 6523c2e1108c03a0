//! Settings for the command-line front end.
//!
//! The codec itself takes no configuration; everything here is about naming
//! output files and choosing a log filter.

use std::env;
use std::path::{Path, PathBuf};

/// Environment variable checked first for the log filter.
pub const LOG_ENV: &str = "TEXT_HUFFMAN_LOG";

pub const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Extension given to compressed files, without the dot.
    pub compressed_extension: String,
    /// Appended to the stem of a decompressed file.
    pub decompressed_suffix: String,
    /// `tracing_subscriber::EnvFilter` directive.
    pub log_filter: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        CliConfig {
            compressed_extension: "huff".to_string(),
            decompressed_suffix: "_decompressed.txt".to_string(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl CliConfig {
    /// Defaults, with the log filter taken from `TEXT_HUFFMAN_LOG` or
    /// `RUST_LOG` when set, and `override_filter` winning over both.
    pub fn from_env(override_filter: Option<&str>) -> Self {
        let log_filter = override_filter
            .map(str::to_string)
            .or_else(|| env::var(LOG_ENV).ok())
            .or_else(|| env::var("RUST_LOG").ok())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        CliConfig { log_filter, ..Self::default() }
    }

    /// `notes.txt` becomes `notes.huff`.
    pub fn compressed_path_for(&self, input: &Path) -> PathBuf {
        input.with_extension(&self.compressed_extension)
    }

    /// `notes.huff` becomes `notes_decompressed.txt`, next to the input.
    pub fn decompressed_path_for(&self, input: &Path) -> PathBuf {
        let stem = input.file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        input.with_file_name(format!("{stem}{}", self.decompressed_suffix))
    }
}

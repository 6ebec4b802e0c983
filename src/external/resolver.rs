use std::process::Command;

use log::debug;
use serde::Deserialize;

use crate::{Result, SuiteError};

/// Metadata resolved for a single URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTrack {
    pub title: String,
    pub uploader: String,
    pub track: Option<String>,
    pub artist: Option<String>,
}

/// Turns a URL into track metadata, or an (artist, title) pair into a URL.
pub trait Resolver {
    fn resolve(&self, url: &str) -> Result<ResolvedTrack>;
    fn search(&self, artist: &str, title: &str) -> Result<Option<String>>;
}

/// The subset of yt-dlp's info JSON the suite uses.
#[derive(Debug, Deserialize)]
struct InfoJson {
    title: Option<String>,
    uploader: Option<String>,
    track: Option<String>,
    artist: Option<String>,
}

/// Resolver backed by the `yt-dlp` executable.
pub struct YtDlpResolver {
    program: String,
}

impl YtDlpResolver {
    pub fn new() -> Self {
        Self::with_program("yt-dlp")
    }

    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for YtDlpResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl Resolver for YtDlpResolver {
    fn resolve(&self, url: &str) -> Result<ResolvedTrack> {
        let output = Command::new(&self.program)
            .args(["--dump-json", "--skip-download", "--no-warnings", url])
            .output()
            .map_err(|e| SuiteError::Resolver(format!("failed to run {}: {}", self.program, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SuiteError::Resolver(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        let info: InfoJson = serde_json::from_slice(&output.stdout)?;
        debug!("Resolved metadata for {}: {:?}", url, info.title);

        Ok(ResolvedTrack {
            title: info.title.unwrap_or_else(|| "Unknown Title".to_string()),
            uploader: info
                .uploader
                .unwrap_or_else(|| "Unknown Uploader".to_string()),
            track: info.track.filter(|t| !t.trim().is_empty()),
            artist: info.artist.filter(|a| !a.trim().is_empty()),
        })
    }

    fn search(&self, artist: &str, title: &str) -> Result<Option<String>> {
        let query = format!("ytsearch1:{artist} - {title}");
        let output = Command::new(&self.program)
            .args([
                query.as_str(),
                "--skip-download",
                "--no-warnings",
                "--print",
                "%(webpage_url)s",
            ])
            .output()
            .map_err(|e| SuiteError::Resolver(format!("failed to run {}: {}", self.program, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SuiteError::Resolver(format!(
                "search for '{artist} - {title}' failed: {}",
                stderr.trim()
            )));
        }

        let url = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if url.starts_with("http") {
            Ok(Some(url))
        } else {
            Ok(None)
        }
    }
}

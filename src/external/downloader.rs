use std::path::Path;
use std::process::Command;

use log::info;

use crate::{Result, SuiteError};

/// Tags embedded into the downloaded file, overriding what the source
/// provides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackTags {
    pub title: Option<String>,
    pub artist: Option<String>,
}

/// Fetches audio for a URL into a local file derived from an output
/// template containing the downloader's extension placeholder.
pub trait Downloader {
    fn download(&self, template: &Path, url: &str, tags: Option<&TrackTags>) -> Result<()>;
}

/// Downloader backed by the `yt-dlp` executable: best audio, extracted to
/// m4a, with thumbnail and metadata embedded and the cover art cropped
/// square.
pub struct YtDlpDownloader {
    program: String,
}

impl YtDlpDownloader {
    pub fn new() -> Self {
        Self::with_program("yt-dlp")
    }

    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for YtDlpDownloader {
    fn default() -> Self {
        Self::new()
    }
}

impl Downloader for YtDlpDownloader {
    fn download(&self, template: &Path, url: &str, tags: Option<&TrackTags>) -> Result<()> {
        let ffmpeg_args = postprocessor_args(tags);

        let status = Command::new(&self.program)
            .args(["-f", "bestaudio/best"])
            .args(["--extract-audio", "--audio-format", "m4a"])
            .args(["--embed-thumbnail", "--embed-metadata"])
            .args(["--postprocessor-args", &ffmpeg_args])
            .arg("-o")
            .arg(template)
            .arg(url)
            .status()
            .map_err(|e| {
                SuiteError::Downloader(format!("failed to run {}: {}", self.program, e))
            })?;

        if !status.success() {
            return Err(SuiteError::Downloader(format!(
                "{} exited with {} for {}",
                self.program, status, url
            )));
        }

        info!("Successfully downloaded: {}", template.display());
        Ok(())
    }
}

/// Builds the `--postprocessor-args` value: square cover-art crop plus any
/// metadata overrides. yt-dlp splits the value shell-style, so metadata
/// values with spaces must stay double-quoted, and embedded double quotes
/// would end the token early; they are replaced with single quotes.
fn postprocessor_args(tags: Option<&TrackTags>) -> String {
    let mut args = String::from(
        "ffmpeg:-c:v mjpeg -vf crop='if(gt(ih,iw),iw,ih)':'if(gt(iw,ih),ih,iw)'",
    );
    if let Some(tags) = tags {
        if let Some(title) = &tags.title {
            args.push_str(&format!(" -metadata \"title={}\"", title.replace('"', "'")));
        }
        if let Some(artist) = &tags.artist {
            args.push_str(&format!(" -metadata \"artist={}\"", artist.replace('"', "'")));
        }
    }
    args
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_values_stay_quoted() {
        let tags = TrackTags {
            title: Some("Track One".to_string()),
            artist: Some("Artist X".to_string()),
        };
        let args = postprocessor_args(Some(&tags));
        assert!(args.contains(" -metadata \"title=Track One\""));
        assert!(args.contains(" -metadata \"artist=Artist X\""));
    }

    #[test]
    fn embedded_double_quotes_are_replaced() {
        let tags = TrackTags {
            title: Some("The \"Best\" Mix".to_string()),
            artist: None,
        };
        let args = postprocessor_args(Some(&tags));
        assert!(args.contains(" -metadata \"title=The 'Best' Mix\""));
        assert!(!args.contains("\"Best\""));
    }

    #[test]
    fn no_tags_yields_only_the_crop_filter() {
        let args = postprocessor_args(None);
        assert!(args.starts_with("ffmpeg:-c:v mjpeg"));
        assert!(!args.contains("-metadata"));
    }
}

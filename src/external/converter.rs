use std::path::Path;
use std::process::Command;

use log::info;

use crate::{Result, SuiteError};

/// Transcodes one audio file to ALAC in an MP4 container.
pub trait AudioConverter {
    fn convert_to_alac(&self, input: &Path, output: &Path) -> Result<()>;
}

/// ffmpeg wrapper that transcodes to ALAC in an MP4 container, carrying
/// over metadata and cover art.
pub struct FfmpegConverter {
    program: String,
}

impl FfmpegConverter {
    pub fn new() -> Self {
        Self::with_program("ffmpeg")
    }

    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl AudioConverter for FfmpegConverter {
    fn convert_to_alac(&self, input: &Path, output: &Path) -> Result<()> {
        let output_cmd = Command::new(&self.program)
            .arg("-i")
            .arg(input)
            .args(["-map_metadata", "0"])
            .args(["-c:a", "alac"])
            .args(["-c:v", "copy"])
            .args(["-movflags", "+faststart"])
            .arg(output)
            .output()
            .map_err(|e| SuiteError::Converter(format!("failed to run {}: {}", self.program, e)))?;

        if !output_cmd.status.success() {
            let stderr = String::from_utf8_lossy(&output_cmd.stderr);
            return Err(SuiteError::Converter(format!(
                "{} failed for {}: {}",
                self.program,
                input.display(),
                stderr.trim()
            )));
        }

        info!(
            "Successfully converted: {} -> {}",
            input.display(),
            output.display()
        );
        Ok(())
    }
}

impl Default for FfmpegConverter {
    fn default() -> Self {
        Self::new()
    }
}

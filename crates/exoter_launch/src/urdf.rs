//! URDF generation by expanding xacro robot-description files

use std::path::{Path, PathBuf};
use std::process::Command;

/// Expands xacro files to URDF by invoking the external xacro tool
///
/// The tool writes the expanded document to stdout; the converter captures
/// it into `<output_dir>/<stem>.urdf`.
#[derive(Debug, Clone)]
pub struct XacroConverter {
    command: String,
    output_dir: PathBuf,
}

impl XacroConverter {
    /// Create a converter writing generated files into `output_dir`
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            command: "xacro".to_string(),
            output_dir: output_dir.into(),
        }
    }

    /// Override the expansion command (e.g. a wrapper script)
    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = command.into();
        self
    }

    /// Expand a xacro file and return the path of the generated URDF
    pub fn convert(&self, xacro_path: &Path) -> Result<PathBuf, ConversionError> {
        if !xacro_path.is_file() {
            return Err(ConversionError::MissingInput(xacro_path.to_path_buf()));
        }

        let stem = xacro_path
            .file_stem()
            .ok_or_else(|| ConversionError::MissingInput(xacro_path.to_path_buf()))?;

        let output = Command::new(&self.command)
            .arg(xacro_path)
            .output()
            .map_err(|source| ConversionError::Spawn {
                command: self.command.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(ConversionError::Failed {
                input: xacro_path.to_path_buf(),
                status: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        std::fs::create_dir_all(&self.output_dir).map_err(|source| ConversionError::Io {
            path: self.output_dir.clone(),
            source,
        })?;

        let urdf_path = self.output_dir.join(stem).with_extension("urdf");
        std::fs::write(&urdf_path, &output.stdout).map_err(|source| ConversionError::Io {
            path: urdf_path.clone(),
            source,
        })?;

        log::debug!(
            "Expanded '{}' to '{}'",
            xacro_path.display(),
            urdf_path.display()
        );

        Ok(urdf_path)
    }
}

/// Errors that can occur during xacro expansion
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    #[error("Xacro input file '{0}' does not exist")]
    MissingInput(PathBuf),

    #[error("Failed to run '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Xacro expansion of '{input}' failed with status {status:?}: {stderr}")]
    Failed {
        input: PathBuf,
        status: Option<i32>,
        stderr: String,
    },

    #[error("Failed to write '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

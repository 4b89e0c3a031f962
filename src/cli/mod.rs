//! Command-line wrapper over the SDK
//!
//! Handlers read files, call the library and print results; all parsing,
//! validation and generation logic lives in the library modules.

pub mod commands;
pub mod error;

use error::CliError;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Load input content from a file, or stdin when `input` is `-`
pub fn load_input(input: &str) -> Result<String, CliError> {
    if input == "-" {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .map_err(|e| CliError::InvalidArgument(format!("Failed to read stdin: {}", e)))?;
        Ok(content)
    } else {
        let path = PathBuf::from(input);
        std::fs::read_to_string(&path).map_err(|e| CliError::FileReadError(path, e.to_string()))
    }
}

/// Write `content` to `output`, or print it when no output path is given
pub fn write_output(content: &str, output: Option<&Path>, force: bool) -> Result<(), CliError> {
    match output {
        Some(path) => {
            if path.exists() && !force {
                return Err(CliError::FileExists(path.to_path_buf()));
            }
            std::fs::write(path, content)
                .map_err(|e| CliError::FileWriteError(path.to_path_buf(), e.to_string()))?;
            eprintln!("Wrote {}", path.display());
            Ok(())
        }
        None => {
            print!("{}", content);
            Ok(())
        }
    }
}

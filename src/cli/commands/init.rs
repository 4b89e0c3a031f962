//! Init command implementation

use crate::cli::error::CliError;
use crate::cli::write_output;
use crate::config::{CONFIG_FILENAME, sample_config};
use std::path::Path;

/// Write a commented sample `.dw-model.toml` into `workspace`
pub fn handle_init(workspace: &Path, force: bool) -> Result<(), CliError> {
    if !workspace.is_dir() {
        return Err(CliError::InvalidArgument(format!(
            "{} is not a directory",
            workspace.display()
        )));
    }
    write_output(sample_config(), Some(&workspace.join(CONFIG_FILENAME)), force)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DefinitionConfig;
    use tempfile::tempdir;

    #[test]
    fn init_writes_loadable_config() {
        let dir = tempdir().unwrap();
        handle_init(dir.path(), false).unwrap();

        let content = std::fs::read_to_string(dir.path().join(CONFIG_FILENAME)).unwrap();
        let config = DefinitionConfig::parse(&content).unwrap();
        assert_eq!(config, DefinitionConfig::default());
    }

    #[test]
    fn init_keeps_existing_config() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILENAME), "[generator]\n").unwrap();

        assert!(matches!(
            handle_init(dir.path(), false),
            Err(CliError::FileExists(_))
        ));
        handle_init(dir.path(), true).unwrap();
    }
}

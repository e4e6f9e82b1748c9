//! CLI subcommand handlers.

use crate::Commands;
use crate::ConfigAction;
use paperscout_core::config::workspace_config_path;
use paperscout_core::{load_records, ScoutConfig};
use std::path::{Path, PathBuf};

/// Handle a CLI subcommand.
pub fn handle_command(
    command: Commands,
    workspace: &Path,
    config: &ScoutConfig,
) -> anyhow::Result<()> {
    match command {
        Commands::Config { action } => handle_config(action, workspace, config),
        Commands::Show { path } => handle_show(path, config),
    }
}

fn handle_config(action: ConfigAction, workspace: &Path, config: &ScoutConfig) -> anyhow::Result<()> {
    match action {
        ConfigAction::Init => {
            let config_path = init_config(workspace)?;
            println!("Configuration file at: {}", config_path.display());
            Ok(())
        }
        ConfigAction::Show => {
            let toml_str = toml::to_string_pretty(config)?;
            println!("{}", toml_str);
            Ok(())
        }
    }
}

/// Write the default configuration to `.paperscout/config.toml`,
/// leaving an existing file untouched.
fn init_config(workspace: &Path) -> anyhow::Result<PathBuf> {
    let config_path = workspace_config_path(workspace);
    if config_path.exists() {
        tracing::info!(path = %config_path.display(), "Configuration file already exists");
        return Ok(config_path);
    }
    if let Some(dir) = config_path.parent() {
        std::fs::create_dir_all(dir)?;
    }

    let toml_str = toml::to_string_pretty(&ScoutConfig::default())?;
    std::fs::write(&config_path, &toml_str)?;
    tracing::info!(path = %config_path.display(), "Created default configuration");
    Ok(config_path)
}

fn handle_show(path: Option<PathBuf>, config: &ScoutConfig) -> anyhow::Result<()> {
    let path = path.unwrap_or_else(|| config.output.path.clone());
    match load_records(&path)? {
        Some(records) if !records.is_empty() => {
            println!("{}", crate::render::render_records(&records));
        }
        Some(_) => println!("{} holds no papers.", path.display()),
        None => println!("No results file at {}. Run a search first.", path.display()),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_config_writes_defaults() {
        let dir = TempDir::new().unwrap();
        let path = init_config(dir.path()).unwrap();
        assert_eq!(path, dir.path().join(".paperscout").join("config.toml"));

        let content = std::fs::read_to_string(&path).unwrap();
        let parsed: ScoutConfig = toml::from_str(&content).unwrap();
        assert_eq!(parsed, ScoutConfig::default());
    }

    #[test]
    fn test_init_config_keeps_existing() {
        let dir = TempDir::new().unwrap();
        let path = workspace_config_path(dir.path());
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "[search]\nmax_results = 9\n").unwrap();

        init_config(dir.path()).unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "[search]\nmax_results = 9\n"
        );
    }

    #[test]
    fn test_show_missing_file_is_not_an_error() {
        let dir = TempDir::new().unwrap();
        let config = ScoutConfig::default();
        assert!(handle_show(Some(dir.path().join("absent.json")), &config).is_ok());
    }
}

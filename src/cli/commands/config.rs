use crate::cli::parser::Commands;
use crate::config::Config;
use crate::config::migrate::{migrate_file, missing_keys};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success, warning};
use std::fs;
use std::process::Command;

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        check,
        migrate,
        edit_config,
        editor,
    } = cmd
    {
        let path = Config::config_file();

        // ---- PRINT CONFIG ----
        if *print_config {
            println!("📄 Current configuration:\n");
            println!("{}", cfg.to_yaml()?);
        }

        // ---- CHECK ----
        if *check {
            let content = fs::read_to_string(&path).map_err(|_| AppError::ConfigLoad)?;
            let missing = missing_keys(&content)?;
            let invalid = Config::from_yaml(&content)?.invalid_values();
            if missing.is_empty() && invalid.is_empty() {
                success("Configuration file is complete.");
            }
            if !missing.is_empty() {
                warning(format!("Missing fields: {}", missing.join(", ")));
            }
            for problem in &invalid {
                warning(problem);
            }
        }

        // ---- MIGRATE ----
        if *migrate {
            let added = migrate_file(&path)?;
            if added.is_empty() {
                info("Configuration already up to date.");
            } else {
                success(format!("Added fields: {}", added.join(", ")));
            }
        }

        // ---- EDIT CONFIG ----
        if *edit_config {
            let default_editor = std::env::var("EDITOR")
                .or_else(|_| std::env::var("VISUAL"))
                .unwrap_or_else(|_| {
                    if cfg!(target_os = "windows") {
                        "notepad".to_string()
                    } else {
                        "nano".to_string()
                    }
                });

            let editor_to_use = editor.clone().unwrap_or_else(|| default_editor.clone());

            match Command::new(&editor_to_use).arg(&path).status() {
                Ok(s) if s.success() => {
                    success(format!(
                        "Configuration file edited successfully using '{}'",
                        editor_to_use
                    ));
                }
                _ => {
                    warning(format!(
                        "Editor '{}' not available, falling back to '{}'",
                        editor_to_use, default_editor
                    ));

                    let status = Command::new(&default_editor)
                        .arg(&path)
                        .status()
                        .map_err(|e| AppError::Config(e.to_string()))?;
                    if !status.success() {
                        return Err(AppError::Config(format!(
                            "editor '{}' exited with {}",
                            default_editor, status
                        )));
                    }
                }
            }
        }
    }

    Ok(())
}

use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{error, success, warning};

use crate::cli::parser::Commands;
use std::process::Command;

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config, is_test: bool) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        init_config,
        edit_config,
        editor,
    } = cmd
    {
        let path = Config::config_file();

        // ---- INIT CONFIG ----
        if *init_config {
            if is_test {
                warning("Test mode: configuration file not written.");
            } else {
                let written = cfg.save()?;
                success(format!("Config file: {}", written.display()));
            }
        }

        // ---- PRINT CONFIG ----
        if *print_config {
            println!("📄 Current configuration ({}):\n", path.display());
            println!("{}", cfg.to_yaml()?);
        }

        // ---- EDIT CONFIG ----
        if *edit_config {
            if is_test {
                warning("Test mode: configuration file not written.");
                return Ok(());
            }
            if !path.exists() {
                cfg.save()?;
            }

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

            let edited = run_editor(&editor_to_use, &path)
                || (editor_to_use != default_editor && {
                    warning(format!(
                        "Editor '{editor_to_use}' not available, falling back to '{default_editor}'"
                    ));
                    run_editor(&default_editor, &path)
                });

            if edited {
                success("Configuration file edited successfully.");
            } else {
                error("Failed to edit the configuration file.");
            }
        }
    }

    Ok(())
}

fn run_editor(editor: &str, path: &std::path::Path) -> bool {
    matches!(Command::new(editor).arg(path).status(), Ok(s) if s.success())
}

use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{error, header, hint, info, success, warning};
use std::fs;
use std::process::Command;

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        check,
        edit_config,
        editor,
    } = cmd
    {
        let path = Config::config_file();

        if *print_config {
            let mut shown = cfg.clone();
            if shown.access_password.is_some() {
                shown.access_password = Some("********".into());
            }
            header(format!("Current configuration ({})", path.display()));
            println!("{}", serde_yaml::to_string(&shown)?);
        }

        if *check {
            check_file(cfg)?;
        }

        if *edit_config {
            edit_file(&path.to_string_lossy(), editor.as_deref());
        }

        if !print_config && !check && !edit_config {
            hint("Use --print, --check or --edit.");
        }
    }

    Ok(())
}

fn check_file(cfg: &Config) -> AppResult<()> {
    let path = Config::config_file();
    if !path.exists() {
        warning(format!(
            "No configuration file at {}; defaults are in use.",
            path.display()
        ));
        return Ok(());
    }

    let content = fs::read_to_string(&path)?;
    let missing = Config::missing_keys(&content)?;
    cfg.validate()?;

    if missing.is_empty() {
        success("Configuration file is complete.");
    } else {
        warning(format!(
            "Missing keys (defaults used): {}",
            missing.join(", ")
        ));
    }
    Ok(())
}

fn edit_file(path: &str, requested: Option<&str>) {
    let default_editor = std::env::var("EDITOR")
        .or_else(|_| std::env::var("VISUAL"))
        .unwrap_or_else(|_| {
            if cfg!(target_os = "windows") {
                "notepad".to_string()
            } else {
                "nano".to_string()
            }
        });

    let editor_to_use = requested.map(str::to_string).unwrap_or_else(|| default_editor.clone());

    match Command::new(&editor_to_use).arg(path).status() {
        Ok(s) if s.success() => {
            success(format!(
                "Configuration file edited successfully using '{editor_to_use}'"
            ));
        }
        _ => {
            warning(format!(
                "Editor '{editor_to_use}' not available, falling back to '{default_editor}'"
            ));
            match Command::new(&default_editor).arg(path).status() {
                Ok(s) if s.success() => info(format!(
                    "Configuration file edited successfully using fallback '{default_editor}'"
                )),
                _ => error(format!(
                    "Failed to edit configuration file using fallback '{default_editor}'"
                )),
            }
        }
    }
}

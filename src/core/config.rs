use crate::config::Config;
use crate::config::migrate::run_config_migration;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success, warning};
use std::process::Command;

pub struct ConfigLogic;

impl ConfigLogic {
    pub fn print(cfg: &Config) -> AppResult<()> {
        let yaml = serde_yaml::to_string(cfg).map_err(|e| AppError::Config(e.to_string()))?;
        println!("📄 Current configuration:\n");
        println!("{}", yaml);
        Ok(())
    }

    pub fn check() -> AppResult<()> {
        let missing = Config::missing_fields()?;
        if missing.is_empty() {
            success("Configuration file is complete.");
        } else {
            warning(format!(
                "Missing configuration keys: {} (run `config --migrate`)",
                missing.join(", ")
            ));
        }
        Ok(())
    }

    pub fn migrate(cfg: &Config) -> AppResult<()> {
        let pool = DbPool::new(&cfg.database)?;
        run_config_migration(&pool.conn)?;
        Ok(())
    }

    /// Open the config file in `editor`, `$EDITOR`/`$VISUAL`, or a platform
    /// default, falling back to the default when the requested one fails.
    pub fn edit(editor: &Option<String>) -> AppResult<()> {
        let path = Config::config_file();

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
                success(format!("Configuration file edited using '{}'", editor_to_use));
                return Ok(());
            }
            _ => warning(format!(
                "Editor '{}' not available, falling back to '{}'",
                editor_to_use, default_editor
            )),
        }

        match Command::new(&default_editor).arg(&path).status() {
            Ok(s) if s.success() => {
                info(format!("Configuration file edited using '{}'", default_editor));
                Ok(())
            }
            _ => Err(AppError::Config(format!(
                "failed to edit {} with '{}'",
                path.display(),
                default_editor
            ))),
        }
    }
}

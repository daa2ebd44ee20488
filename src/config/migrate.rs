use crate::ui::messages::{info, success};
use rusqlite::{Connection, Error, OptionalExtension};
use serde_yaml::Value;
use std::fs;
use std::path::Path;

const VERSION_ACCESS_FIELDS: &str = "20260301_0101_add_access_fields_to_config";

fn yaml_err(msg: String) -> Error {
    Error::SqliteFailure(rusqlite::ffi::Error::new(1), Some(msg))
}

/// Add the `user` / `roles` keys to a config written before access checks
/// existed. Returns the list of keys that were added.
pub fn add_access_fields(conf_file: &Path) -> Result<Vec<String>, Error> {
    if !conf_file.exists() {
        return Ok(Vec::new());
    }

    let content = fs::read_to_string(conf_file)
        .map_err(|e| yaml_err(format!("Failed to read config {:?}: {}", conf_file, e)))?;

    let mut yaml: Value = serde_yaml::from_str(&content)
        .map_err(|e| yaml_err(format!("Failed to parse config {:?}: {}", conf_file, e)))?;

    let Some(map) = yaml.as_mapping_mut() else {
        return Ok(Vec::new());
    };

    let mut added = Vec::new();

    let user_key = Value::String("user".to_string());
    if !map.contains_key(&user_key) {
        map.insert(user_key, Value::String("Administrator".to_string()));
        added.push("user".to_string());
    }

    let roles_key = Value::String("roles".to_string());
    if !map.contains_key(&roles_key) {
        map.insert(
            roles_key,
            Value::Sequence(vec![Value::String("System Manager".to_string())]),
        );
        added.push("roles".to_string());
    }

    if added.is_empty() {
        return Ok(added);
    }

    let serialized = serde_yaml::to_string(&yaml).map_err(|e| {
        yaml_err(format!(
            "Failed to serialize updated config {:?}: {}",
            conf_file, e
        ))
    })?;

    // Document the role names right after the `roles` block
    let mut new_content = String::new();
    for line in serialized.lines() {
        new_content.push_str(line);
        new_content.push('\n');

        if line.starts_with("roles:") {
            new_content.push_str(
                "# roles granting full access:\n\
                 #   - HR Manager\n\
                 #   - System Manager\n",
            );
        }
    }

    fs::write(conf_file, new_content)
        .map_err(|e| yaml_err(format!("Failed to write config {:?}: {}", conf_file, e)))?;

    Ok(added)
}

/// Run the config migration once, recording it in the `log` table.
pub fn run_config_migration(conn: &Connection) -> Result<(), Error> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log WHERE operation = 'migration_applied' AND target = ?1 LIMIT 1",
    )?;
    if chk
        .query_row([VERSION_ACCESS_FIELDS], |_| Ok(()))
        .optional()?
        .is_some()
    {
        info("Config already up to date.");
        return Ok(());
    }

    let added = add_access_fields(&super::Config::config_file())?;

    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        rusqlite::params![
            VERSION_ACCESS_FIELDS,
            format!("Config keys added: [{}]", added.join(", ")),
        ],
    )?;

    success(format!(
        "Migration applied: {}: added [{}] to config.",
        VERSION_ACCESS_FIELDS,
        added.join(", ")
    ));

    Ok(())
}

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct BiodiversityConfig {
    pub database: Option<String>,
    pub dataset: Option<String>,
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("biodiversity.toml")
}

pub fn default_database_path() -> PathBuf {
    PathBuf::from("biodiversity.db")
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<BiodiversityConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: BiodiversityConfig = toml::from_str(&contents)?;
    Ok(Some(config))
}

/// Database path: explicit flag, then config file, then the default
pub fn resolve_database_path(flag: Option<PathBuf>, config: Option<&BiodiversityConfig>) -> PathBuf {
    flag.or_else(|| config.and_then(|c| c.database.as_ref()).map(PathBuf::from))
        .unwrap_or_else(default_database_path)
}

pub fn ensure_db_dir(db_path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

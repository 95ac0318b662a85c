//! User configuration, read from `<data dir>/config.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{BoardError, Result};
use crate::kanban::DEFAULT_COLUMN_COLOR;
use crate::stats::{DoneHeuristic, DEFAULT_DONE_SYNONYMS};
use crate::template::BoardTemplate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Column title fragments that mark finished work.
    pub done_synonyms: Vec<String>,
    pub default_column_color: String,
    pub default_template: BoardTemplate,
    /// Team member names used by the workload report.
    pub members: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            done_synonyms: DEFAULT_DONE_SYNONYMS.iter().map(|s| s.to_string()).collect(),
            default_column_color: DEFAULT_COLUMN_COLOR.to_string(),
            default_template: BoardTemplate::default(),
            members: Vec::new(),
        }
    }
}

impl Config {
    /// Load from `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }
        let raw = fs::read_to_string(path)?;
        toml::from_str(&raw).map_err(|e| BoardError::config(format!("{}: {e}", path.display())))
    }

    pub fn done_heuristic(&self) -> DoneHeuristic {
        DoneHeuristic::new(&self.done_synonyms)
    }
}

/// Data directory: explicit flag, else `$WB_HOME`, else `$HOME/.wb`.
pub fn resolve_data_dir(flag: Option<PathBuf>) -> PathBuf {
    if let Some(dir) = flag {
        return dir;
    }
    if let Ok(dir) = std::env::var("WB_HOME") {
        if !dir.trim().is_empty() {
            return PathBuf::from(dir);
        }
    }
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".wb")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let cfg: Config = toml::from_str(
            r#"
            done_synonyms = ["shipped"]
            members = ["Ana", "Rui"]
            "#,
        )
        .unwrap();
        assert_eq!(cfg.done_synonyms, ["shipped"]);
        assert_eq!(cfg.default_column_color, DEFAULT_COLUMN_COLOR);
        assert_eq!(cfg.default_template, BoardTemplate::Basic);
        assert!(cfg.done_heuristic().is_done_column("Shipped!"));
    }

    #[test]
    fn test_template_name_in_config() {
        let cfg: Config = toml::from_str(r#"default_template = "software""#).unwrap();
        assert_eq!(cfg.default_template, BoardTemplate::Software);
    }

    #[test]
    fn test_missing_file_is_default() {
        let cfg = Config::load(Path::new("/definitely/not/here/config.toml")).unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn test_explicit_data_dir_wins() {
        let dir = resolve_data_dir(Some(PathBuf::from("/tmp/boards")));
        assert_eq!(dir, PathBuf::from("/tmp/boards"));
    }
}

use std::path::{Path, PathBuf};

use serde_yaml_ng::Value;
use tracing::{debug, warn};

use super::types::{ProjectConfig, Settings, CONFIG_PATH, KNOWN_KEYS};
use crate::error::{BallastError, BallastResult};

const ROOT_ENV: &str = "BALLAST_PROJECT_ROOT";
const ENV_PREFIX: &str = "BALLAST_";

/// Resolve the project root and load its settings.
///
/// `explicit_root` (the `--project-root` flag) wins over `BALLAST_PROJECT_ROOT`,
/// which wins over discovery from `cwd`.
pub fn load(
    explicit_root: Option<&Path>,
    cwd: &Path,
    lookup: impl Fn(&str) -> Option<String>,
) -> BallastResult<ProjectConfig> {
    let root = match explicit_root {
        Some(root) => root.to_path_buf(),
        None => match lookup(ROOT_ENV).filter(|v| !v.is_empty()) {
            Some(root) => PathBuf::from(root),
            None => discover_project_root(cwd)?,
        },
    };
    load_from_root(&root, lookup)
}

/// Load `setup/config.yml` under `root`, then apply environment overrides.
///
/// A missing file yields empty settings; commands that need a value report it.
pub fn load_from_root(
    root: &Path,
    lookup: impl Fn(&str) -> Option<String>,
) -> BallastResult<ProjectConfig> {
    let path = root.join(CONFIG_PATH);
    let settings = if path.is_file() {
        let content = std::fs::read_to_string(&path)?;
        parse_settings(&content, &path)?
    } else {
        warn!(path = %path.display(), "config file not found, using defaults");
        Settings::default()
    };
    Ok(ProjectConfig::new(root, with_env_overrides(settings, lookup)))
}

/// Walk up from `start` to the first directory holding `setup/config.yml` or
/// `composer.json`.
pub fn discover_project_root(start: &Path) -> BallastResult<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(CONFIG_PATH).is_file() || dir.join("composer.json").is_file())
        .map(Path::to_path_buf)
        .ok_or_else(|| BallastError::ConfigNotFound {
            start: start.to_path_buf(),
        })
}

/// Apply `BALLAST_<KEY>` overrides for known keys and keys already present.
pub fn with_env_overrides(mut settings: Settings, lookup: impl Fn(&str) -> Option<String>) -> Settings {
    let mut keys: Vec<String> = KNOWN_KEYS.iter().map(|k| k.to_string()).collect();
    keys.extend(settings.keys().map(str::to_string));
    keys.sort();
    keys.dedup();

    for key in keys {
        let var = format!("{ENV_PREFIX}{}", key.to_ascii_uppercase());
        if let Some(value) = lookup(&var) {
            debug!(key = %key, "setting overridden from {}", var);
            settings.set(key, value);
        }
    }
    settings
}

fn parse_settings(content: &str, path: &Path) -> BallastResult<Settings> {
    let invalid = |message: String| BallastError::InvalidConfig {
        file: path.to_path_buf(),
        message,
    };

    let document: Value =
        serde_yaml_ng::from_str(content).map_err(|source| BallastError::Yaml {
            file: path.to_path_buf(),
            source,
        })?;
    let mut settings = Settings::default();
    let mapping = match document {
        Value::Null => return Ok(settings),
        Value::Mapping(mapping) => mapping,
        _ => return Err(invalid("expected a mapping of settings".to_string())),
    };

    for (key, value) in mapping {
        let Some(key) = key.as_str().map(str::to_string) else {
            return Err(invalid(format!("setting names must be strings, got {key:?}")));
        };
        let value = match value {
            Value::Null => continue,
            Value::String(s) => s,
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            _ => return Err(invalid(format!("'{key}' must be a scalar value"))),
        };
        if !KNOWN_KEYS.contains(&key.as_str()) {
            warn!(key = %key, file = %path.display(), "unknown setting");
        }
        settings.set(key, value);
    }
    Ok(settings)
}

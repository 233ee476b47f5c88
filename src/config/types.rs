use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Project-relative location of the settings file.
pub const CONFIG_PATH: &str = "setup/config.yml";

/// Settings Ballast reads. Other keys are kept but warned about.
pub const KNOWN_KEYS: &[&str] = &[
    "site_shortname",
    "site_theme_name",
    "site_theme_path",
    "site_alias_name",
    "site_proxy_origin_url",
    "site_tld",
    "jira_project_key",
    "docroot",
];

const DEFAULT_TLD: &str = "dpulp";
const DEFAULT_DOCROOT: &str = "docroot";
const CONTAINER_PROJECT_ROOT: &str = "/var/www/";

/// Named string settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    values: BTreeMap<String, String>,
}

impl Settings {
    /// The raw value, `None` when unset.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Like `get`, but treats an empty value as unset.
    pub fn non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.trim().is_empty())
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Local top level domain (`site_tld`, default `dpulp`).
    pub fn site_tld(&self) -> &str {
        self.non_empty("site_tld").unwrap_or(DEFAULT_TLD)
    }

    /// Application directory under the project root (default `docroot`).
    pub fn docroot(&self) -> &str {
        self.non_empty("docroot").unwrap_or(DEFAULT_DOCROOT)
    }
}

/// Settings plus the filesystem roots they apply to.
///
/// Built once per process by the command layer and passed by reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectConfig {
    project_root: PathBuf,
    app_root: PathBuf,
    settings: Settings,
}

impl ProjectConfig {
    pub fn new(project_root: impl Into<PathBuf>, settings: Settings) -> Self {
        let project_root = project_root.into();
        let app_root = project_root.join(settings.docroot());
        Self {
            project_root,
            app_root,
            settings,
        }
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Root of the web application (`<project>/<docroot>`).
    pub fn app_root(&self) -> &Path {
        &self.app_root
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.settings.get(key)
    }

    pub fn project_path(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.project_root.join(relative)
    }

    /// Directory of the custom theme, when `site_theme_name` is configured.
    ///
    /// `site_theme_path` is relative to the project root. It may be written as
    /// the container path (`/var/www/...`), which mounts the project root.
    /// Without it the theme lives in `<app_root>/themes/custom`.
    pub fn theme_dir(&self) -> Option<PathBuf> {
        let theme = self.settings.non_empty("site_theme_name")?;
        let base = match self.settings.non_empty("site_theme_path") {
            Some(path) => {
                let relative = path.strip_prefix(CONTAINER_PROJECT_ROOT).unwrap_or(path);
                self.project_root.join(relative.trim_start_matches('/'))
            }
            None => self.custom_themes_dir(),
        };
        Some(base.join(theme))
    }

    pub fn custom_themes_dir(&self) -> PathBuf {
        self.app_root.join("themes").join("custom")
    }

    /// `http://<site_shortname>.<site_tld>/`
    pub fn site_url(&self) -> String {
        format!(
            "http://{}.{}/",
            self.settings.get("site_shortname").unwrap_or_default(),
            self.settings.site_tld()
        )
    }
}

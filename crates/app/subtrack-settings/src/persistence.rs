use std::{
    fs,
    path::{Path, PathBuf},
};

use serde_json::json;
use serde_json_lenient::to_string_pretty;
use tracing::debug;

use crate::{
    AppSettings,
    error::{Error, Result},
    json::{json_difference, merge_non_null_json_value},
};

pub const SETTINGS_FILE: &str = "settings.json";
const APP_DIR: &str = "subtrack";
const ENDPOINT_ENV: &str = "API_BASE_URL";

pub(crate) static DEFAULTS: &str = include_str!("../assets/defaults.jsonc");

impl AppSettings {
    /// Loads `config_path` over the built-in defaults, creating an empty
    /// file if there is none, then applies environment overrides.
    pub fn load(config_path: &Path) -> Result<Self> {
        let settings = Self::load_file(config_path)?;
        Ok(settings.with_endpoint_override(std::env::var(ENDPOINT_ENV).ok()))
    }

    /// Like [`AppSettings::load`] without looking at the environment.
    pub fn load_file(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            write_creating_dirs(config_path, "{}\n")?;
        }

        let customizations = serde_json_lenient::from_str(&read(config_path)?)?;
        let mut settings: serde_json::Value = serde_json_lenient::from_str(DEFAULTS)?;

        merge_non_null_json_value(customizations, &mut settings);

        Ok(serde_json::from_value(settings)?)
    }

    pub fn load_from_default_path_creating() -> Result<Self> {
        AppSettings::load(&default_path()?)
    }

    /// Replaces the API endpoint with a non-empty override.
    pub fn with_endpoint_override(mut self, endpoint: Option<String>) -> Self {
        if let Some(endpoint) = endpoint.filter(|e| !e.trim().is_empty()) {
            debug!("API endpoint overridden to {}", endpoint);
            self.api.endpoint = endpoint;
        }
        self
    }

    /// Save only values that differ from what the file already yields.
    pub fn save(&self, config_path: &Path) -> Result<()> {
        let current = serde_json::to_value(AppSettings::load_file(config_path)?)?;
        let update = serde_json::to_value(self)?;
        let diff = json_difference(current, &update);

        if diff == json!({}) {
            return Ok(());
        }

        let mut customizations = serde_json_lenient::from_str(&read(config_path)?)?;

        // Comments in the file do not survive this rewrite.
        merge_non_null_json_value(diff, &mut customizations);
        write_creating_dirs(config_path, to_string_pretty(&customizations)?)
    }

    pub fn save_to_default_path(&self) -> Result<()> {
        self.save(&default_path()?)
    }
}

pub fn default_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir().ok_or(Error::MissingConfigDir)?;
    Ok(config_dir.join(APP_DIR).join(SETTINGS_FILE))
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn write_creating_dirs(path: &Path, contents: impl AsRef<[u8]>) -> Result<()> {
    let write_error = |source| Error::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(write_error)?;
    }
    fs::write(path, contents).map_err(write_error)
}

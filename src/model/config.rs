//! Layered settings: embedded defaults, then an optional TOML file, then
//! `FLEXFUN__*` environment variables. Double underscores separate nested
//! keys, so `FLEXFUN__LOGGING__FILTER` maps to `logging.filter`.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use figment::{
    Figment,
    providers::{Env, Format as _, Toml},
};
use toml::{Table, Value};

const ENV_PREFIX: &str = "FLEXFUN__";
/// Points at an explicit user config file.
const CONFIG_PATH_VAR: &str = "FLEXFUN_CONFIG";
const DEFAULTS: &str = include_str!("../../config/default.toml");

/// Read-only settings tree handed to functions through the server context.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
    root: Table,
    ignored: Vec<String>,
}

impl Settings {
    /// Load settings with layering: defaults → user config → environment.
    pub fn load() -> Result<Self> {
        let path = match std::env::var_os(CONFIG_PATH_VAR) {
            Some(explicit) => Some(PathBuf::from(explicit)),
            None => default_config_path().filter(|path| path.exists()),
        };

        Self::load_from(path.as_deref())
    }

    /// Layer `path` (which must exist when given) and the environment over the defaults.
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::new().merge(Toml::string(DEFAULTS));

        if let Some(path) = path {
            anyhow::ensure!(
                path.is_file(),
                "config file {} does not exist",
                path.display()
            );
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(
            Env::prefixed(ENV_PREFIX)
                .filter(|key| !has_empty_segment(key.as_str()))
                .split("__"),
        );

        Ok(Self {
            root: figment.extract().context("failed to load settings")?,
            ignored: malformed_env_vars(std::env::vars_os()),
        })
    }

    pub fn defaults() -> Result<Self> {
        Self::parse(DEFAULTS).context("parsing default settings")
    }

    /// Parse a TOML document without any layering.
    pub fn parse(raw: &str) -> Result<Self> {
        Ok(Self {
            root: Figment::from(Toml::string(raw)).extract()?,
            ignored: Vec::new(),
        })
    }

    /// Look up a dotted key such as `logging.filter`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        let mut segments = key.split('.');
        let mut value = self.root.get(segments.next()?)?;
        for segment in segments {
            value = value.as_table()?.get(segment)?;
        }
        Some(value)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }

    /// Integer lookup for functions with numeric settings.
    pub fn get_integer(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(Value::as_integer)
    }

    /// `FLEXFUN__*` variables that were skipped: empty key segments or non-UTF-8 names or values.
    pub fn ignored_vars(&self) -> &[String] {
        &self.ignored
    }
}

fn default_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "flexfun")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

fn has_empty_segment(key: &str) -> bool {
    key.split("__").any(str::is_empty)
}

fn malformed_env_vars(vars: impl IntoIterator<Item = (OsString, OsString)>) -> Vec<String> {
    vars.into_iter()
        .filter_map(|(name, value)| {
            let lossy = name.to_string_lossy();
            let head = lossy.get(..ENV_PREFIX.len())?;
            if !head.eq_ignore_ascii_case(ENV_PREFIX) {
                return None;
            }

            let malformed = name.to_str().is_none()
                || value.to_str().is_none()
                || has_empty_segment(&lossy[ENV_PREFIX.len()..]);
            malformed.then(|| lossy.into_owned())
        })
        .collect()
}

//! Lightweight configuration loader and path helpers.
//!
//! Uses Figment to merge `config.toml` + `config.<env>.toml` + `APP_*` env vars
//! (`__` separates nested keys, e.g. `APP_CATALOG__MAX_ITEMS`). Provides
//! helpers to expand `~` and `${VAR}` and to resolve relative paths against a
//! known base directory.

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use std::env;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

pub const DEFAULT_CATALOG_PATH: &str = "Books.csv";
pub const DEFAULT_RECOMMENDATIONS: usize = 5;
pub const DEFAULT_SAMPLE_SIZE: usize = 10;

/// Keys that must deserialize as non-negative integers when present.
const COUNT_KEYS: [&str; 3] = ["catalog.max_items", "recommend.default_k", "presenter.sample_size"];

/// Keys that must deserialize as strings when present.
const STRING_KEYS: [&str; 1] = ["catalog.path"];

pub struct Config {
    figment: Figment,
}

impl Config {
    pub fn load() -> Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());

        let mut figment = Figment::new().merge(Toml::file("config.toml"));
        match env_name.as_str() {
            "dev" | "development" => figment = figment.merge(Toml::file("config.dev.toml")),
            "prod" | "production" => figment = figment.merge(Toml::file("config.prod.toml")),
            "test" | "testing" => figment = figment.merge(Toml::file("config.test.toml")),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("APP_").split("__"));

        Self::from_figment(figment, &env_name)
    }

    /// Wraps an already layered figment and validates it for `env`.
    pub fn from_figment(figment: Figment, env: &str) -> Result<Self> {
        let config = Self { figment };
        config.validate_for_env(env)?;
        Ok(config)
    }

    pub fn get<T>(&self, key: &str) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| Error::InvalidConfig(format!("Failed to get '{}': {}", key, e)))
    }

    /// Like [`Config::get`], falling back to `default` when the key is absent.
    pub fn get_or<T>(&self, key: &str, default: T) -> T
    where
        T: serde::de::DeserializeOwned,
    {
        if !self.figment.contains(key) {
            return default;
        }
        self.get(key).unwrap_or(default)
    }

    fn validate_for_env(&self, env: &str) -> Result<()> {
        for key in COUNT_KEYS {
            if self.figment.contains(key) {
                self.get::<usize>(key)?;
            }
        }
        for key in STRING_KEYS {
            if self.figment.contains(key) {
                self.get::<String>(key)?;
            }
        }
        if self.get_or("catalog.max_items", 1usize) == 0 {
            return Err(Error::InvalidConfig(
                "catalog.max_items must be positive; pass --all to disable the cap".to_string(),
            ));
        }
        match env {
            "prod" | "production" if !self.figment.contains("catalog.path") => {
                Err(Error::InvalidConfig("catalog.path must be set in production".to_string()))
            }
            _ => Ok(()),
        }
    }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    // Expand env vars first
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    // Expand ~ at start
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}

/// Resolve a possibly relative path against a given base directory after expansion.
/// If `p` is absolute, it's returned as-is; otherwise `base.join(p)` is returned.
pub fn resolve_with_base<S: AsRef<str>>(base: &Path, p: S) -> PathBuf {
    let p = expand_path(p);
    if p.is_absolute() { p } else { base.join(p) }
}

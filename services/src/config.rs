use crate::error::{self, Result};
use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use snafu::ResultExt;
use std::path::PathBuf;
use std::sync::{LazyLock, RwLock};
use std::time::Duration;

static SETTINGS: LazyLock<RwLock<Config>> = LazyLock::new(init_settings);

/// Compiled in, so that a binary without any settings file still has sane values.
const DEFAULT_SETTINGS: &str = include_str!("../../Settings-default.toml");

fn init_settings() -> RwLock<Config> {
    let mut settings =
        Config::builder().add_source(File::from_str(DEFAULT_SETTINGS, FileFormat::Toml));

    let dir: PathBuf = retrieve_settings_dir().expect("settings directory should exist");

    #[cfg(test)]
    let files = ["Settings-test.toml"];

    #[cfg(not(test))]
    let files = ["Settings.toml"];

    let files: Vec<File<_, _>> = files
        .iter()
        .map(|f| dir.join(f))
        .filter(|p| p.exists())
        .map(File::from)
        .collect();

    settings = settings.add_source(files);

    // e.g. `ARCREST__LOGGING__LOG_SPEC=debug`
    settings = settings.add_source(Environment::with_prefix("arcrest").separator("__"));

    RwLock::new(
        settings
            .build()
            .expect("it should crash the program if this fails"),
    )
}

/// test may run in subdirectory
#[cfg(test)]
fn retrieve_settings_dir() -> Result<PathBuf> {
    use crate::error::Error;

    const MAX_PARENT_DIRS: usize = 1;

    let mut settings_dir = std::env::current_dir().context(error::MissingWorkingDirectory)?;

    for _ in 0..=MAX_PARENT_DIRS {
        if settings_dir.join("Settings-default.toml").exists() {
            return Ok(settings_dir);
        }

        if !settings_dir.pop() {
            break;
        }
    }

    Err(Error::MissingSettingsDirectory)
}

#[cfg(not(test))]
fn retrieve_settings_dir() -> Result<PathBuf> {
    std::env::current_dir().context(error::MissingWorkingDirectory)
}

#[cfg(test)]
pub fn set_config<T>(key: &str, value: T) -> Result<()>
where
    T: Into<config::Value>,
{
    let mut settings = SETTINGS
        .write()
        .map_err(|_error| error::Error::ConfigLockFailed)?;

    let builder = Config::builder()
        .add_source(settings.clone())
        .set_override(key, value)
        .context(error::Config)?;

    *settings = builder.build().context(error::Config)?;
    Ok(())
}

pub fn get_config<'a, T>(key: &str) -> Result<T>
where
    T: Deserialize<'a>,
{
    SETTINGS
        .read()
        .map_err(|_error| error::Error::ConfigLockFailed)?
        .get::<T>(key)
        .context(error::Config)
}

pub fn get_config_element<'a, T>() -> Result<T>
where
    T: ConfigElement + Deserialize<'a>,
{
    get_config(T::KEY)
}

pub trait ConfigElement {
    const KEY: &'static str;
}

/// Settings of the HTTP client that talks to ArcGIS services
#[derive(Debug, Clone, Deserialize)]
pub struct ArcGis {
    pub request_timeout_seconds: u64,
    pub user_agent: String,
}

impl ArcGis {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

impl ConfigElement for ArcGis {
    const KEY: &'static str = "arcgis";
}

#[derive(Debug, Clone, Deserialize)]
pub struct Logging {
    pub log_spec: String,
}

impl ConfigElement for Logging {
    const KEY: &'static str = "logging";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_defaults() {
        let arcgis: ArcGis = get_config_element().unwrap();
        assert!(arcgis.request_timeout_seconds > 0);
        assert!(arcgis.user_agent.starts_with("arcrest"));

        let logging: Logging = get_config_element().unwrap();
        assert!(!logging.log_spec.is_empty());
    }

    #[test]
    fn overrides_values() {
        set_config("logging.log_spec", "arcrest_services=trace").unwrap();

        let logging: Logging = get_config_element().unwrap();
        assert_eq!(logging.log_spec, "arcrest_services=trace");
    }
}

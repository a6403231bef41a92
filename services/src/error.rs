use snafu::Snafu;
use strum::IntoStaticStr;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Snafu, IntoStaticStr)]
#[snafu(visibility(pub(crate)))]
#[snafu(context(suffix(false)))] // disables default `Snafu` suffix
pub enum Error {
    #[snafu(display("{}", source))]
    DataType {
        source: arcrest_datatypes::error::Error,
    },

    #[snafu(display("Request failed: {}", source))]
    Reqwest {
        source: reqwest::Error,
    },

    SerdeJson {
        source: serde_json::Error,
    },

    Config {
        source: config::ConfigError,
    },
    ConfigLockFailed,
    MissingWorkingDirectory {
        source: std::io::Error,
    },
    MissingSettingsDirectory,

    #[snafu(display("ArcGIS service error {}: {}", code, message))]
    ArcGisService {
        code: i64,
        message: String,
    },

    #[snafu(display("`{}` is not a FeatureServer, MapServer, ImageServer, layer or table", url))]
    UnsupportedResource {
        url: url::Url,
    },

    #[snafu(display("Cannot refresh `{}`: it now resolves to a {} instead of a layer or table", url, found))]
    UnsupportedLayerType {
        url: url::Url,
        found: &'static str,
    },

    #[snafu(display("Expected a FeatureServer or MapServer, found a {}", found))]
    NotAServer {
        found: &'static str,
    },

    #[snafu(display("No layer or table matches `{}`", selector))]
    LayerNotFound {
        selector: String,
    },
}

impl From<arcrest_datatypes::error::Error> for Error {
    fn from(e: arcrest_datatypes::error::Error) -> Self {
        Self::DataType { source: e }
    }
}

impl From<reqwest::Error> for Error {
    fn from(source: reqwest::Error) -> Self {
        Self::Reqwest { source }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::SerdeJson { source: e }
    }
}

use std::error::Error;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use spantag_decorators::{DecorationEngine, DecoratorsConfig};
use spantag_log::{Level, LogConfig, LogFormat};

type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// Defines the source of a config error.
#[derive(Debug)]
enum ConfigErrorSource {
    /// An error occurring independently.
    None,
    /// An error originating from a configuration file.
    File(PathBuf),
    /// An error originating in a field override (an env var, or a CLI parameter).
    FieldOverride(String),
}

/// Indicates config related errors.
#[derive(Debug)]
pub struct ConfigError {
    source: ConfigErrorSource,
    kind: ConfigErrorKind,
    inner: Option<BoxError>,
}

impl ConfigError {
    #[inline]
    fn new(kind: ConfigErrorKind) -> Self {
        Self {
            source: ConfigErrorSource::None,
            kind,
            inner: None,
        }
    }

    #[inline]
    fn wrap<E>(inner: E, kind: ConfigErrorKind) -> Self
    where
        E: Into<BoxError>,
    {
        Self {
            inner: Some(inner.into()),
            ..Self::new(kind)
        }
    }

    #[inline]
    fn for_field<E>(inner: E, field: &'static str) -> Self
    where
        E: Into<BoxError>,
    {
        Self::wrap(inner, ConfigErrorKind::InvalidValue).field(field)
    }

    #[inline]
    fn file<P: AsRef<Path>>(mut self, p: P) -> Self {
        self.source = ConfigErrorSource::File(p.as_ref().to_path_buf());
        self
    }

    #[inline]
    fn field(mut self, name: &'static str) -> Self {
        self.source = ConfigErrorSource::FieldOverride(name.to_owned());
        self
    }

    /// Returns the error kind of the error.
    pub fn kind(&self) -> ConfigErrorKind {
        self.kind
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            ConfigErrorSource::None => fmt::Display::fmt(&self.kind, f),
            ConfigErrorSource::File(file_name) => {
                write!(f, "{} (file {})", self.kind, file_name.display())
            }
            ConfigErrorSource::FieldOverride(name) => write!(f, "{} (field {})", self.kind, name),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.inner.as_ref().map(|e| e.as_ref() as &(dyn Error + 'static))
    }
}

/// Indicates config related errors.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, thiserror::Error)]
pub enum ConfigErrorKind {
    /// Failed to open the file.
    #[error("could not open config file")]
    CouldNotOpenFile,
    /// Parsing YAML failed.
    #[error("could not parse yaml config file")]
    BadYaml,
    /// Parsing JSON failed.
    #[error("could not parse json config file")]
    BadJson,
    /// Invalid config value.
    #[error("invalid config value")]
    InvalidValue,
}

#[derive(Clone, Copy, Debug)]
enum ConfigFormat {
    Yaml,
    Json,
}

impl ConfigFormat {
    fn extension(self) -> &'static str {
        match self {
            ConfigFormat::Yaml => "yml",
            ConfigFormat::Json => "json",
        }
    }
}

trait ConfigObject: DeserializeOwned + Serialize {
    /// The formats this file can be written in, by priority.
    fn formats() -> &'static [ConfigFormat];

    /// The basename of the config file.
    fn name() -> &'static str;

    /// The full filename of the config file in the given format.
    fn path(base: &Path, format: ConfigFormat) -> PathBuf {
        base.join(format!("{}.{}", Self::name(), format.extension()))
    }

    /// Finds the first existing config file within the given directory.
    fn locate(base: &Path) -> Option<(PathBuf, ConfigFormat)> {
        Self::formats()
            .iter()
            .map(|&format| (Self::path(base, format), format))
            .find(|(path, _)| path.exists())
    }

    /// Loads the config file from a file within the given directory, if it exists.
    fn load(base: &Path) -> Result<Option<Self>, ConfigError> {
        let Some((path, format)) = Self::locate(base) else {
            return Ok(None);
        };

        let f = fs::File::open(&path)
            .map_err(|e| ConfigError::wrap(e, ConfigErrorKind::CouldNotOpenFile).file(&path))?;

        let value = match format {
            ConfigFormat::Yaml => serde_yaml::from_reader(io::BufReader::new(f))
                .map_err(|e| ConfigError::wrap(e, ConfigErrorKind::BadYaml).file(&path))?,
            ConfigFormat::Json => serde_json::from_reader(io::BufReader::new(f))
                .map_err(|e| ConfigError::wrap(e, ConfigErrorKind::BadJson).file(&path))?,
        };

        Ok(Some(value))
    }
}

/// Structure used to hold information about configuration overrides via
/// CLI parameters or environment variables.
#[derive(Debug, Default)]
pub struct OverridableConfig {
    /// The log level, such as `debug`.
    pub log_level: Option<String>,
    /// The log format, such as `json`.
    pub log_format: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Default)]
#[serde(default)]
struct ConfigValues {
    logging: LogConfig,
}

impl ConfigObject for ConfigValues {
    fn formats() -> &'static [ConfigFormat] {
        &[ConfigFormat::Yaml]
    }

    fn name() -> &'static str {
        "config"
    }
}

impl ConfigObject for DecoratorsConfig {
    fn formats() -> &'static [ConfigFormat] {
        &[ConfigFormat::Yaml, ConfigFormat::Json]
    }

    fn name() -> &'static str {
        "decorators"
    }
}

/// Config struct.
#[derive(Default)]
pub struct Config {
    values: ConfigValues,
    decorators: Option<DecoratorsConfig>,
    path: PathBuf,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("path", &self.path)
            .field("values", &self.values)
            .field("decorators", &self.decorators)
            .finish()
    }
}

impl Config {
    /// Loads a config from a given config folder.
    ///
    /// Missing files are not an error, the respective defaults are used instead.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let path = std::env::current_dir()
            .map(|x| x.join(path.as_ref()))
            .unwrap_or_else(|_| path.as_ref().to_path_buf());

        Ok(Config {
            values: ConfigValues::load(&path)?.unwrap_or_default(),
            decorators: DecoratorsConfig::load(&path)?,
            path,
        })
    }

    /// Creates a config from a JSON value.
    ///
    /// The value has the layout of `config.yml`, with an optional additional `decorators` key
    /// holding the decorator configuration. This is mostly useful for tests.
    pub fn from_json_value(mut value: serde_json::Value) -> Result<Config, ConfigError> {
        let decorators = match value.as_object_mut().and_then(|o| o.remove("decorators")) {
            Some(decorators) => Some(
                serde_json::from_value(serde_json::json!({ "decorators": decorators }))
                    .map_err(|err| ConfigError::wrap(err, ConfigErrorKind::BadJson))?,
            ),
            None => None,
        };

        Ok(Config {
            values: serde_json::from_value(value)
                .map_err(|err| ConfigError::wrap(err, ConfigErrorKind::BadJson))?,
            decorators,
            path: PathBuf::new(),
        })
    }

    /// Override configuration with values coming from other sources (e.g. env variables or
    /// command line parameters).
    pub fn apply_override(
        &mut self,
        overrides: OverridableConfig,
    ) -> Result<&mut Self, ConfigError> {
        let logging = &mut self.values.logging;

        if let Some(level) = overrides.log_level {
            logging.level = level
                .parse::<Level>()
                .map_err(|err| ConfigError::for_field(err, "log_level"))?;
        }

        if let Some(format) = overrides.log_format {
            logging.format = parse_log_format(&format).ok_or_else(|| {
                ConfigError::new(ConfigErrorKind::InvalidValue).field("log_format")
            })?;
        }

        Ok(self)
    }

    /// The config folder.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the logging configuration.
    pub fn logging(&self) -> &LogConfig {
        &self.values.logging
    }

    /// Returns the decorator configuration, if any was supplied.
    pub fn decorators(&self) -> Option<&DecoratorsConfig> {
        self.decorators.as_ref()
    }

    /// Creates the decoration engine for this configuration.
    ///
    /// Without decorator configuration, the engine uses the built-in rules.
    pub fn decoration_engine(&self) -> DecorationEngine {
        DecorationEngine::from_optional_config(self.decorators())
    }
}

fn parse_log_format(value: &str) -> Option<LogFormat> {
    serde_json::from_value(serde_json::Value::String(value.to_ascii_lowercase())).ok()
}

#[cfg(test)]
mod tests {
    use similar_asserts::assert_eq;
    use spantag_decorators::DecoratorKind;

    use super::*;

    fn write(dir: &Path, name: &str, contents: &str) {
        fs::write(dir.join(name), contents).unwrap();
    }

    #[test]
    fn test_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::from_path(dir.path()).unwrap();

        assert_eq!(config.logging().level, Level::Info);
        assert!(config.decorators().is_none());
        assert_eq!(config.decoration_engine(), DecorationEngine::builtin());
    }

    #[test]
    fn test_load_yaml() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "config.yml",
            "logging:\n  level: trace\n  format: json\n",
        );
        write(
            dir.path(),
            "decorators.yml",
            r#"
decorators:
  - type: ErrorFlag
  - type: UnknownDecorator
    matchingTag: component
  - type: SetTag
    setTag: resource.name
  - type: Status404Decorator
"#,
        );

        let config = Config::from_path(dir.path()).unwrap();
        assert_eq!(config.logging().level, Level::Trace);
        assert_eq!(config.logging().format, LogFormat::Json);
        assert_eq!(config.decorators().map(|d| d.decorators.len()), Some(4));

        let engine = config.decoration_engine();
        let kinds: Vec<_> = engine.rules().iter().map(|rule| rule.kind()).collect();
        assert_eq!(kinds, vec![DecoratorKind::ErrorFlag, DecoratorKind::Status404]);
    }

    #[test]
    fn test_load_json_decorators() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "decorators.json",
            r#"{"decorators": [{"type": "URLAsResourceName"}]}"#,
        );

        let config = Config::from_path(dir.path()).unwrap();
        let engine = config.decoration_engine();
        assert_eq!(engine.rules().len(), 1);
        assert_eq!(engine.rules()[0].kind(), DecoratorKind::UrlAsResourceName);
    }

    #[test]
    fn test_bad_yaml() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "decorators.yml", "decorators: [");

        let error = Config::from_path(dir.path()).unwrap_err();
        assert_eq!(error.kind(), ConfigErrorKind::BadYaml);
        assert!(error.to_string().starts_with("could not parse yaml config file (file "));
        assert!(error.source().is_some());
    }

    #[test]
    fn test_apply_override() {
        let mut config = Config::default();
        config
            .apply_override(OverridableConfig {
                log_level: Some("debug".to_owned()),
                log_format: Some("Pretty".to_owned()),
            })
            .unwrap();

        assert_eq!(config.logging().level, Level::Debug);
        assert_eq!(config.logging().format, LogFormat::Pretty);
    }

    #[test]
    fn test_invalid_override() {
        let mut config = Config::default();
        let error = config
            .apply_override(OverridableConfig {
                log_level: Some("loud".to_owned()),
                log_format: None,
            })
            .unwrap_err();

        assert_eq!(error.kind(), ConfigErrorKind::InvalidValue);
        assert_eq!(error.to_string(), "invalid config value (field log_level)");
    }

    #[test]
    fn test_from_json_value() {
        let config = Config::from_json_value(serde_json::json!({
            "logging": {"level": "warn"},
            "decorators": [{"type": "SetTag", "matchingTag": "peer.service"}]
        }))
        .unwrap();

        assert_eq!(config.logging().level, Level::Warn);
        assert_eq!(config.decoration_engine().rules().len(), 1);
    }
}

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;

use crate::error::SqlPoweredError;

/// Driver options passed through to the connector untouched.
pub type DriverOptions = BTreeMap<String, String>;

/// What a [`crate::session::Connector`] needs to open a connection.
pub trait ConnectionConfig: Send + Sync {
    fn connection_string(&self) -> String;
    fn user(&self) -> &str;
    fn password(&self) -> &str;
    fn options(&self) -> &DriverOptions;
}

/// Driver prefix used in generated connection strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DriverKind {
    #[default]
    Mysql,
    Pgsql,
    Sqlite,
}

impl fmt::Display for DriverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self {
            DriverKind::Mysql => "mysql",
            DriverKind::Pgsql => "pgsql",
            DriverKind::Sqlite => "sqlite",
        };
        f.write_str(prefix)
    }
}

/// Host/port style configuration.
///
/// ```rust
/// use sql_powered::prelude::*;
///
/// let config = Config::builder("dbname")
///     .user("user")
///     .password("password")
///     .build()?;
/// assert_eq!(
///     config.connection_string(),
///     "mysql:host=localhost;port=3306;dbname=dbname;charset=utf8"
/// );
/// # Ok::<(), SqlPoweredError>(())
/// ```
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub driver: DriverKind,
    pub host: String,
    pub port: u16,
    pub dbname: String,
    pub charset: String,
    pub user: String,
    pub password: String,
    pub options: DriverOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            driver: DriverKind::default(),
            host: "localhost".to_string(),
            port: 3306,
            dbname: String::new(),
            charset: "utf8".to_string(),
            user: String::new(),
            password: String::new(),
            options: DriverOptions::new(),
        }
    }
}

impl Config {
    #[must_use]
    pub fn builder(dbname: impl Into<String>) -> ConfigBuilder {
        ConfigBuilder::new(dbname)
    }

    /// Parse a JSON document; absent fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns `SqlPoweredError::JsonError` on malformed JSON and
    /// `SqlPoweredError::ConfigError` when `dbname` is missing.
    pub fn from_json_str(json: &str) -> Result<Self, SqlPoweredError> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns `SqlPoweredError::ConfigError` if a required field is empty.
    pub fn validate(&self) -> Result<(), SqlPoweredError> {
        if self.dbname.is_empty() {
            return Err(SqlPoweredError::ConfigError(
                "dbname is required".to_string(),
            ));
        }
        if self.host.is_empty() {
            return Err(SqlPoweredError::ConfigError(
                "host is required".to_string(),
            ));
        }
        Ok(())
    }
}

impl ConnectionConfig for Config {
    fn connection_string(&self) -> String {
        format!(
            "{}:host={};port={};dbname={};charset={}",
            self.driver, self.host, self.port, self.dbname, self.charset
        )
    }

    fn user(&self) -> &str {
        &self.user
    }

    fn password(&self) -> &str {
        &self.password
    }

    fn options(&self) -> &DriverOptions {
        &self.options
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("driver", &self.driver)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("dbname", &self.dbname)
            .field("charset", &self.charset)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("options", &self.options)
            .finish()
    }
}

/// Fluent builder for [`Config`].
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    #[must_use]
    pub fn new(dbname: impl Into<String>) -> Self {
        Self {
            config: Config {
                dbname: dbname.into(),
                ..Config::default()
            },
        }
    }

    #[must_use]
    pub fn driver(mut self, driver: DriverKind) -> Self {
        self.config.driver = driver;
        self
    }

    #[must_use]
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    #[must_use]
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    #[must_use]
    pub fn charset(mut self, charset: impl Into<String>) -> Self {
        self.config.charset = charset.into();
        self
    }

    #[must_use]
    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.config.user = user.into();
        self
    }

    #[must_use]
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.config.password = password.into();
        self
    }

    #[must_use]
    pub fn option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.options.insert(key.into(), value.into());
        self
    }

    /// # Errors
    ///
    /// Returns `SqlPoweredError::ConfigError` if `dbname` or `host` is empty.
    pub fn build(self) -> Result<Config, SqlPoweredError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

/// A ready-made DSN string plus credentials.
#[derive(Clone)]
pub struct Dsn {
    dsn: String,
    user: String,
    password: String,
    options: DriverOptions,
}

impl Dsn {
    #[must_use]
    pub fn new(dsn: impl Into<String>, user: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            dsn: dsn.into(),
            user: user.into(),
            password: password.into(),
            options: DriverOptions::new(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: DriverOptions) -> Self {
        self.options = options;
        self
    }

    pub fn set_options(&mut self, options: DriverOptions) {
        self.options = options;
    }
}

impl ConnectionConfig for Dsn {
    fn connection_string(&self) -> String {
        self.dsn.clone()
    }

    fn user(&self) -> &str {
        &self.user
    }

    fn password(&self) -> &str {
        &self.password
    }

    fn options(&self) -> &DriverOptions {
        &self.options
    }
}

impl fmt::Debug for Dsn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dsn")
            .field("dsn", &self.dsn)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("options", &self.options)
            .finish()
    }
}

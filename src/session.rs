use async_trait::async_trait;
use serde_json::Value as JsonValue;

use crate::config::ConnectionConfig;
use crate::debug::DebugEvent;
use crate::error::SqlPoweredError;
use crate::listeners::{ListenerId, Listeners};
use crate::params::BoundParams;

/// Attempts made by [`Session::connection`] before giving up.
pub const DEFAULT_MAX_CONNECTION_ATTEMPTS: u32 = 3;

/// A driver connection able to run one parameterized statement.
#[async_trait]
pub trait QueryExecutor {
    /// Bind `params` to `query`, run it and return the number of rows affected.
    async fn execute(
        &mut self,
        query: &str,
        params: &BoundParams,
    ) -> Result<u64, SqlPoweredError>;
}

/// Opens driver connections from a [`ConnectionConfig`].
#[async_trait]
pub trait Connector: Send + Sync {
    type Connection: QueryExecutor + Send;

    async fn connect(
        &self,
        config: &dyn ConnectionConfig,
    ) -> Result<Self::Connection, SqlPoweredError>;
}

pub type ConnectListener<T> = dyn FnMut(&mut T) + Send;
pub type ConnectionFailureListener = dyn FnMut(u32, &SqlPoweredError) + Send;
pub type DebugListener = dyn for<'a> FnMut(&DebugEvent<'a>) + Send;

/// Lazily connecting wrapper around a driver connection.
///
/// Nothing is opened until the first call that needs the connection. Failed attempts are
/// retried up to [`Session::max_connection_attempts`] times; each failure that will be
/// retried is reported to the connection-failure listeners. The configuration (and with it
/// the credentials) is dropped as soon as connecting either succeeds or gives up.
pub struct Session<C: Connector> {
    connector: C,
    config: Option<Box<dyn ConnectionConfig>>,
    connection: Option<C::Connection>,
    attempts: u32,
    max_attempts: u32,
    connect_listeners: Listeners<ConnectListener<C::Connection>>,
    failure_listeners: Listeners<ConnectionFailureListener>,
    debug_listeners: Listeners<DebugListener>,
}

impl<C: Connector> Session<C> {
    pub fn new(config: impl ConnectionConfig + 'static, connector: C) -> Self {
        Self {
            connector,
            config: Some(Box::new(config)),
            connection: None,
            attempts: 0,
            max_attempts: DEFAULT_MAX_CONNECTION_ATTEMPTS,
            connect_listeners: Listeners::new(),
            failure_listeners: Listeners::new(),
            debug_listeners: Listeners::new(),
        }
    }

    /// Wrap a connection that is already open.
    pub fn from_connection(connector: C, connection: C::Connection) -> Self {
        Self {
            connector,
            config: None,
            connection: Some(connection),
            attempts: 0,
            max_attempts: DEFAULT_MAX_CONNECTION_ATTEMPTS,
            connect_listeners: Listeners::new(),
            failure_listeners: Listeners::new(),
            debug_listeners: Listeners::new(),
        }
    }

    #[must_use]
    pub fn with_max_connection_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    #[must_use]
    pub fn max_connection_attempts(&self) -> u32 {
        self.max_attempts
    }

    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.connection.is_some()
    }

    /// Whether the connection configuration is still held.
    #[must_use]
    pub fn has_config(&self) -> bool {
        self.config.is_some()
    }

    /// Called with the attempt number and the error for every failure that will be retried.
    pub fn on_connection_failure<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(u32, &SqlPoweredError) + Send + 'static,
    {
        self.failure_listeners.add(Box::new(listener))
    }

    pub fn remove_connection_failure_listener(&mut self, id: ListenerId) {
        self.failure_listeners.remove(id);
    }

    pub fn on_debug<F>(&mut self, listener: F) -> ListenerId
    where
        F: for<'a> FnMut(&DebugEvent<'a>) + Send + 'static,
    {
        self.debug_listeners.add(Box::new(listener))
    }

    pub fn remove_debug_listener(&mut self, id: ListenerId) {
        self.debug_listeners.remove(id);
    }

    /// Run `listener` once the connection is open.
    ///
    /// If the session is already connected the listener runs immediately and is not
    /// stored, so `None` is returned.
    pub fn on_connect<F>(&mut self, mut listener: F) -> Option<ListenerId>
    where
        F: FnMut(&mut C::Connection) + Send + 'static,
    {
        if let Some(connection) = self.connection.as_mut() {
            listener(connection);
            None
        } else {
            Some(self.connect_listeners.add(Box::new(listener)))
        }
    }

    pub fn remove_on_connect_listener(&mut self, id: ListenerId) {
        self.connect_listeners.remove(id);
    }

    /// The open connection, connecting first if needed.
    ///
    /// # Errors
    ///
    /// Returns `SqlPoweredError::ConnectionError` once every attempt has failed, or when an
    /// earlier call already gave up and dropped the configuration.
    pub async fn connection(&mut self) -> Result<&mut C::Connection, SqlPoweredError> {
        if self.connection.is_none() {
            self.connect().await?;
        }
        self.connection.as_mut().ok_or_else(|| {
            SqlPoweredError::ConnectionError("connection unavailable".to_string())
        })
    }

    async fn connect(&mut self) -> Result<(), SqlPoweredError> {
        loop {
            let Some(config) = self.config.as_deref() else {
                return Err(SqlPoweredError::ConnectionError(
                    "no connection configuration available".to_string(),
                ));
            };

            tracing::debug!(attempt = self.attempts + 1, "opening connection");
            match self.connector.connect(config).await {
                Ok(mut connection) => {
                    self.config = None;
                    for listener in self.connect_listeners.iter_mut() {
                        listener(&mut connection);
                    }
                    self.connection = Some(connection);
                    tracing::debug!("connection established");
                    return Ok(());
                }
                Err(err) => {
                    self.attempts += 1;
                    if self.attempts >= self.max_attempts {
                        self.config = None;
                        tracing::warn!(attempts = self.attempts, error = %err, "giving up on connection");
                        return Err(SqlPoweredError::ConnectionError(format!(
                            "failed after {} attempts: {err}",
                            self.attempts
                        )));
                    }

                    tracing::warn!(attempt = self.attempts, error = %err, "connection attempt failed");
                    for listener in self.failure_listeners.iter_mut() {
                        listener(self.attempts, &err);
                    }
                }
            }
        }
    }

    /// Run `query` with `params` and report it to the debug listeners.
    ///
    /// Listeners see `BeforeQuery` right before execution and `Query` after it succeeds.
    ///
    /// # Errors
    ///
    /// Returns connection errors from [`Session::connection`] and whatever the driver
    /// reports for the statement.
    pub async fn query(
        &mut self,
        query: &str,
        params: &BoundParams,
    ) -> Result<u64, SqlPoweredError> {
        self.connection().await?;
        self.emit(&DebugEvent::BeforeQuery);

        let connection = self.connection.as_mut().ok_or_else(|| {
            SqlPoweredError::ConnectionError("connection unavailable".to_string())
        })?;
        let affected = connection.execute(query, params).await?;

        self.emit(&DebugEvent::Query { query, params });
        Ok(affected)
    }

    /// Send a free-form notification to the debug listeners.
    pub fn debug(&mut self, name: &str, args: &[JsonValue]) {
        self.emit(&DebugEvent::Custom { name, args });
    }

    fn emit(&mut self, event: &DebugEvent<'_>) {
        for listener in self.debug_listeners.iter_mut() {
            listener(event);
        }
    }
}

impl<C: Connector> std::fmt::Debug for Session<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("connected", &self.is_connected())
            .field("attempts", &self.attempts)
            .field("max_attempts", &self.max_attempts)
            .finish_non_exhaustive()
    }
}

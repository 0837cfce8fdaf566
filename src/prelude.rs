//! Convenient imports for common functionality.
//!
//! This module re-exports the most commonly used types and functions
//! to make it easier to get started with the library.

pub use crate::config::{Config, ConfigBuilder, ConnectionConfig, DriverKind, DriverOptions, Dsn};
pub use crate::debug::{
    DebugDetail, DebugEvent, DebugParser, DebugRecord, ParamRecord, QueryRecord, tracing_listener,
};
pub use crate::error::SqlPoweredError;
pub use crate::listeners::{ListenerId, Listeners};
pub use crate::params::{BindTarget, BoundParams, Param, ParamKey, TypedParam};
pub use crate::render::{render_demo_query, resolve_literal};
pub use crate::session::{Connector, QueryExecutor, Session};
pub use crate::types::{RowValues, StorageKind};

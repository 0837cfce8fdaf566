//! Debug notifications emitted by a [`crate::session::Session`] and a parser that turns
//! them into loggable records.
//!
//! ```rust
//! use std::sync::{Arc, Mutex};
//! use sql_powered::prelude::*;
//!
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let sink = Arc::clone(&seen);
//! let mut listener = DebugParser::on_parse(move |record: DebugRecord| {
//!     sink.lock().unwrap().push(record);
//! });
//!
//! let params = BoundParams::positional([Param::from(1), Param::from("2")]);
//! listener(&DebugEvent::BeforeQuery);
//! listener(&DebugEvent::Query { query: "QUERY STRING ? ?", params: &params });
//!
//! let seen = seen.lock().unwrap();
//! let DebugDetail::Query(query) = &seen[0].detail else { panic!("expected a query record") };
//! assert_eq!(query.demo, "QUERY STRING 1 '2'");
//! ```

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use serde_json::Value as JsonValue;

use crate::params::BoundParams;
use crate::render::{render_demo_query, resolve_literal};

/// Notification passed to debug listeners.
#[derive(Debug, Clone, Copy)]
pub enum DebugEvent<'a> {
    /// A statement is about to run.
    BeforeQuery,
    /// A statement ran with these parameters.
    Query {
        query: &'a str,
        params: &'a BoundParams,
    },
    /// Any other notification, carrying free-form arguments.
    Custom {
        name: &'a str,
        args: &'a [JsonValue],
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct DebugRecord {
    pub time: DateTime<Utc>,
    #[serde(flatten)]
    pub detail: DebugDetail,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DebugDetail {
    Query(QueryRecord),
    Event { name: String, payload: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct QueryRecord {
    #[serde(serialize_with = "secs_f64")]
    pub execution_time: Duration,
    pub original: String,
    pub params: Vec<ParamRecord>,
    pub demo: String,
}

/// One bound parameter as it appears in a [`QueryRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParamRecord {
    pub key: String,
    pub literal: String,
}

fn secs_f64<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(duration.as_secs_f64())
}

/// Turns [`DebugEvent`]s into [`DebugRecord`]s, timing each query from its `BeforeQuery`.
#[derive(Debug, Default)]
pub struct DebugParser {
    started: Option<Instant>,
}

impl DebugParser {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parse(&mut self, event: &DebugEvent<'_>) -> Option<DebugRecord> {
        let detail = match *event {
            DebugEvent::BeforeQuery => {
                self.started = Some(Instant::now());
                return None;
            }
            DebugEvent::Query { query, params } => DebugDetail::Query(QueryRecord {
                execution_time: self.started.map_or(Duration::ZERO, |t| t.elapsed()),
                original: query.to_string(),
                params: params
                    .iter()
                    .map(|(key, param)| ParamRecord {
                        key: key.to_string(),
                        literal: resolve_literal(param),
                    })
                    .collect(),
                demo: render_demo_query(query, params).into_owned(),
            }),
            DebugEvent::Custom { name, args } => DebugDetail::Event {
                name: name.to_string(),
                payload: JsonValue::Array(args.to_vec()).to_string(),
            },
        };

        Some(DebugRecord {
            time: Utc::now(),
            detail,
        })
    }

    /// Wrap `callback` in a debug listener that owns its own parser.
    pub fn on_parse<F>(mut callback: F) -> impl FnMut(&DebugEvent<'_>) + Send + 'static
    where
        F: FnMut(DebugRecord) + Send + 'static,
    {
        let mut parser = DebugParser::new();
        move |event: &DebugEvent<'_>| {
            if let Some(record) = parser.parse(event) {
                callback(record);
            }
        }
    }
}

/// Debug listener that writes every record through `tracing` at DEBUG level.
pub fn tracing_listener() -> impl FnMut(&DebugEvent<'_>) + Send + 'static {
    DebugParser::on_parse(|record| match &record.detail {
        DebugDetail::Query(query) => tracing::debug!(
            elapsed_ms = query.execution_time.as_secs_f64() * 1000.0,
            original = %query.original,
            "{}",
            query.demo
        ),
        DebugDetail::Event { name, payload } => {
            tracing::debug!(event = %name, "{payload}");
        }
    })
}

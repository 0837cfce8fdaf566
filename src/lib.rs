//! Lazy-connecting SQL session glue with listener hooks, plus the "demo" query renderer that
//! turns a parameterized statement and its bound values into the literal SQL shown in logs.
//!
//! ```rust
//! use sql_powered::prelude::*;
//!
//! let params = BoundParams::positional([Param::from(1), Param::from("2")]);
//! assert_eq!(
//!     render_demo_query("QUERY '?' AND \"?\\\"\" ? ?", &params),
//!     "QUERY '?' AND \"?\\\"\" 1 '2'"
//! );
//! ```

pub mod config;
pub mod debug;
pub mod error;
pub mod listeners;
pub mod params;
pub mod prelude;
pub mod render;
pub mod session;
pub mod types;

pub use error::SqlPoweredError;
pub use render::{render_demo_query, resolve_literal};

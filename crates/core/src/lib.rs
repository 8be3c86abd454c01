//! Core library for building DCS avionics command streams and uploading them.
//!
//! This crate is UI-agnostic and transport-agnostic. It exposes:
//! - `stream`: append-only command streams with scoped `if`/`while` blocks.
//! - `builder`/`query`/`upload`: the builder contract, query round trips, and the
//!   all-or-nothing upload agent.
//! - `a10c`: the A-10C catalog, system settings and builders.
//! - `core_log::CoreLog`: thin logging trait the host (CLI/app) can implement.
//!
//! Import the `prelude` if you want the most common types in scope.

pub mod core_log;
pub mod error;
pub mod settings;

pub mod builder;
pub mod catalog;
pub mod config;
pub mod query;
pub mod stream;
pub mod transport;
pub mod upload;

pub mod a10c;

/// Convenient re-exports for downstream users (CLI/tests).
pub use core_log::CoreLog;

pub mod prelude {
    pub use crate::core_log::{CoreLog, NoopLog};
    pub use crate::error::{BuildError, QueryError, UploadError};
    pub use crate::settings::UploadSettings;

    // Streams and builders
    pub use crate::builder::{BuildContext, Builder, FieldRow, PendingAdvance};
    pub use crate::catalog::{Catalog, Device};
    pub use crate::query::{QueryBuilder, QueryCache, parse_response_map};
    pub use crate::stream::{Command, CommandStream};
    pub use crate::transport::{LoopbackTransport, ResponseHub, Subscription, Transport};
    pub use crate::upload::{UploadAgent, UploadPhase};

    // Configurations
    pub use crate::config::{Airframe, ConfigurationMeta, SystemSettings, SystemTag};

    // A-10C
    pub use crate::a10c::{A10C_CATALOG, A10CConfiguration, A10CUploadAgent};
}

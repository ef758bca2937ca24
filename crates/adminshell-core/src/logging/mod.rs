//! Diagnostics logging.
//!
//! Every fallback in the core (bad palette base color, unreadable theme
//! config, failed store persist) is reported through `tracing`. Hosts choose
//! where it goes; [`JsonlLayer`] keeps a machine-readable copy on disk:
//!
//! ```text
//! logs/
//! ├── adminshell-2026-10-16.jsonl
//! └── adminshell-2026-10-17.jsonl
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! use adminshell_core::logging::JsonlLayer;
//! use tracing_subscriber::prelude::*;
//!
//! let subscriber = tracing_subscriber::registry()
//!     .with(JsonlLayer::new("./logs")?)
//!     .with(tracing_subscriber::fmt::layer());
//!
//! tracing::subscriber::set_global_default(subscriber)?;
//! ```
//!
//! ### Querying logs with jq
//!
//! ```bash
//! # All palette fallbacks
//! jq 'select(.fields.base_color != null)' logs/*.jsonl
//! ```

pub mod entry;
pub mod layer;

pub use entry::LogEntry;
pub use layer::{read_entries, JsonlLayer, LOG_FILE_PREFIX};

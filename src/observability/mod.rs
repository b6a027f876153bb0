//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events on stderr)
//!     → report.rs (pretty JSON results on stdout)
//! ```
//!
//! # Design Decisions
//! - Structured logging via `tracing`, filterable with `RUST_LOG`
//! - A run ID span wraps the whole pipeline
//! - Results and logs use separate streams so stdout stays parseable

pub mod logging;
pub mod report;

pub use logging::init_logging;
pub use report::print_json;

//! OpenTelemetry-based observability with file-based trace export.
//!
//! ```text
//! tracing macros → EnvFilter → tracing-opentelemetry → SDK → FileSpanExporter → JSON file
//! ```
//!
//! - **File-Based Export**: `~/.local/share/zellij/eventboard/eventboard-otlp.json`,
//!   one OTLP JSON document per line
//! - **Automatic Rotation**: at 10MB, keeping 3 backups
//! - **Cross-request parenting**: the span handling an HTTP response is parented
//!   to the span that issued the request (see [`crate::api::TraceContext`])
//!
//! Trace level comes from the `trace_level` plugin option, default `"info"`.
//!
//! # Modules
//!
//! - [`init`]: Subscriber setup
//! - [`tracer`]: Tracer provider with the file exporter
//! - [`span_formatter`]: OTLP JSON serialization
//! - [`file_writer`]: Rotating line writer

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use file_writer::RotationPolicy;
pub use init::init_tracing;

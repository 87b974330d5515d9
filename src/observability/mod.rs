//! Span export to a local JSON-lines file.
//!
//! ```text
//! tracing spans → tracing-opentelemetry → OpenTelemetry SDK → FileSpanExporter → popcorn-traces.jsonl
//! ```
//!
//! Spans land in `~/.local/share/zellij/popcorn/popcorn-traces.jsonl`, one
//! JSON object per line. The file is moved to `popcorn-traces.jsonl.1` once
//! it passes 5 MB. Verbosity follows the `trace_level` plugin option
//! (an `EnvFilter` directive, default `"info"`).

mod exporter;
mod init;
mod record;

pub use init::{init_tracing, TRACE_FILE_NAME};

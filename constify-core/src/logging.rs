//! Structured logging for analysis audit trails using **tracing**.
//!
//! The analysis pipeline emits events through the `tracing` macros at its
//! call sites; this module only installs the collector. The JSON subscriber
//! provides machine-readable output for observability platforms, and
//! stderr keeps stdout clean for diagnostic output.

/// Initializes the global tracing collector (subscriber).
///
/// This should be called *once* at the beginning of the application's runtime.
/// It configures structured JSON output to stderr.
///
/// # Environment Variables
/// - `RUST_LOG`: Controls log filtering (e.g., `RUST_LOG=constify=debug`)
pub fn init_structured_logging() {
    tracing_subscriber::fmt()
        .json()
        .with_ansi(false)
        .with_level(true)
        .with_target(true)
        .with_current_span(true)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}

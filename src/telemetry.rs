//! Telemetry initialization.
//!
//! Controlled by `RIFT_TRACE`:
//! - unset → no-op (tracing disabled, zero overhead)
//! - `"stderr"` → JSON spans/events to stderr
//!
//! Event verbosity is filtered through the standard `RUST_LOG` env var,
//! defaulting to `info`.

use tracing_subscriber::EnvFilter;

/// Initialize telemetry based on `RIFT_TRACE`. Call once from `main`.
pub fn init() {
    match std::env::var("RIFT_TRACE").ok().as_deref() {
        Some("stderr") => init_stderr(),
        Some(other) if !other.is_empty() => {
            eprintln!("warning: unrecognized RIFT_TRACE value {other:?}; tracing disabled");
        }
        _ => {}
    }
}

/// JSON spans/events to stderr via tracing-subscriber's JSON formatter.
fn init_stderr() {
    use tracing_subscriber::layer::SubscriberExt as _;
    use tracing_subscriber::util::SubscriberInitExt as _;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr),
        )
        .init();
}

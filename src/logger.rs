pub use tracing::{debug, error, info, warn, trace, instrument};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt::{self, format::FmtSpan}};

/// Installs the global subscriber.
///
/// `RUST_LOG` takes precedence over `default_filter`. Span close events, which
/// carry the time spent decoding and estimating, are only printed when the
/// effective filter enables debug or trace output somewhere.
pub fn init(default_filter: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    let directives = env_filter.to_string();
    let span_events = if directives.contains("debug") || directives.contains("trace") {
        FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    // Scheduler and frame source run on named threads.
    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_thread_names(true)
        .with_timer(fmt::time::uptime())
        .with_span_events(span_events);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

//! Telemetry initialization (tracing/tracing-subscriber).
//!
//! LOG_LEVEL takes a filter ("debug", or full directives such as
//! "info,dashboard=debug,generator=debug"); LOG_FORMAT picks "pretty"
//! (default) or "json". Targets, file and line are included in the output so
//! generator events are easy to tell apart from HTTP-layer ones.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,dashboard=debug,generator=debug,tower_http=info,axum=info";

pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_env("LOG_LEVEL").unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    // The json/pretty builders are distinct types, so init inside the match.
    if matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json")) {
        builder.json().init();
    } else {
        builder.init();
    }
}

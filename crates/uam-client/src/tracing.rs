//! Log output for the admin console.
//!
//! The console draws its menus on stdout, so every log line goes to stderr
//! and can be redirected without touching the interactive view. Request and
//! screen events are emitted with `tracing` macros throughout the crate.

use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Environment;

/// Install the global subscriber for `env`.
///
/// Development prints multi-line records with source locations at `debug`;
/// production prints one JSON object per event at `info`, for piping into a
/// log collector. HTTP transport crates are kept a level quieter in both.
/// `RUST_LOG` replaces the default filter entirely, e.g.
/// `RUST_LOG=uam_client=trace,reqwest=debug`.
///
/// Call once at startup; a second call panics inside `tracing_subscriber`.
pub fn init_tracing(env: Environment) {
    if env.is_development() {
        init_development_tracing();
    } else {
        init_production_tracing();
    }
}

/// Filter used when `RUST_LOG` is unset
const fn default_directives(env: Environment) -> &'static str {
    match env {
        Environment::Development => "debug,hyper_util=info,reqwest=info",
        Environment::Production => "info,hyper_util=warn,reqwest=warn",
    }
}

fn init_development_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(Environment::Development)));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_line_number(true)
                .with_file(true)
                .pretty()
                .with_writer(std::io::stderr)
                .with_filter(env_filter),
        )
        .init();

    tracing::debug!(mode = "development", "Console logging ready");
}

fn init_production_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(Environment::Production)));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_list(true)
                .flatten_event(true)
                .with_target(true)
                .with_writer(std::io::stderr)
                .with_filter(env_filter),
        )
        .init();

    tracing::debug!(mode = "production", "Console logging ready");
}

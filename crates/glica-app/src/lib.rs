//! glica-app
//!
//! The application layer: screen state machine, session controller, and
//! configuration. The rendering shell drives a [`session::Session`] and
//! draws whatever [`screen::Screen`] it lands on — no clinical or
//! persistence logic lives outside the collaborator crates.

pub mod aws;
pub mod config;
pub mod error;
pub mod screen;
pub mod seed;
pub mod session;

/// Install the global tracing subscriber. Call once at startup.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}

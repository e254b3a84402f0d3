//! Release automation for the QR Reader app.
//!
//! - `seed-issues` creates the tag-suggestions backlog as GitHub issues from
//!   local markdown documents.
//! - `next-version-code` reads every Google Play track and prints the next
//!   version code that no track has used yet.

pub mod config;
pub mod error;
pub mod github;
pub mod pipeline;
pub mod play;
pub mod task;

/// Logs go to stderr; stdout is reserved for command output.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

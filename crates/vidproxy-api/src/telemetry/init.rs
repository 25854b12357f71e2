use tracing_subscriber::{
    fmt::format::Format, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

/// Install the console subscriber.
///
/// `RUST_LOG` overrides the default filter. Installing twice (e.g. several test
/// servers in one process) keeps the first subscriber.
pub fn init_tracing() {
    // Compact format keeps the message up front; structured fields follow it.
    let console_fmt = tracing_subscriber::fmt::layer().event_format(
        Format::default()
            .compact()
            .with_target(false)
            .without_time(),
    );

    let installed = tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vidproxy=debug,tower_http=debug".into()),
        )
        .with(console_fmt)
        .try_init();

    if installed.is_ok() {
        tracing::debug!("Tracing initialized");
    }
}

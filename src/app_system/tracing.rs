use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. `filter` takes precedence over
/// `RUST_LOG`; without either, `info` is used.
///
/// ```text
/// RUST_LOG=debug cargo run                           # everything, including client requests
/// DELIVERY_LOG=delivery_admin::feed=debug cargo run  # just the feed
/// ```
pub fn setup_tracing(filter: Option<&str>) {
    let env_filter = filter
        .and_then(|f| EnvFilter::try_new(f).ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_timer(tracing_subscriber::fmt::time::uptime())
        .compact()
        .init();
}

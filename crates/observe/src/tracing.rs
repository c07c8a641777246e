use {
    std::sync::Once,
    tracing_subscriber::{EnvFilter, fmt::format::FmtSpan},
};

/// Initializes the global tracing subscriber with the specified
/// `env_filter` directives (e.g. `"warn,order_router=debug"`).
///
/// Panics if a global subscriber was already installed. Use
/// [`initialize_reentrant`] from tests.
pub fn initialize(env_filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(env_filter))
        .with_ansi(atty::is(atty::Stream::Stderr))
        .with_writer(std::io::stderr)
        .with_span_events(FmtSpan::CLOSE)
        .init();
    ::tracing::info!(%env_filter, "initialized tracing");
}

/// Like [`initialize`], but can be called multiple times in a row. Later
/// calls are ignored. Output goes through the test writer so that it is
/// captured per test.
pub fn initialize_reentrant(env_filter: &str) {
    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        // Another harness may already own the global subscriber; that is
        // fine, events then go there instead.
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new(env_filter))
            .with_test_writer()
            .try_init();
    });
}

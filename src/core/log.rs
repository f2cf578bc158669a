use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter, filter::Targets, fmt, prelude::__tracing_subscriber_SubscriberExt,
    util::SubscriberInitExt,
};

/// Installs the global subscriber. Only this crate's events are shown, and
/// only with `verbose` or a `RUST_LOG` filter.
pub fn init_logging(verbose: bool) {
    let (level_filter, level) = if verbose {
        (LevelFilter::DEBUG, "debug")
    } else {
        (LevelFilter::OFF, "off")
    };
    let env_filter = EnvFilter::try_from_default_env();
    // RUST_LOG decides the level for our target when it is set
    let app_level = if env_filter.is_ok() {
        LevelFilter::TRACE
    } else {
        level_filter
    };
    let app_filter = Targets::new().with_target("fxconv", app_level);
    let env_filter = env_filter.unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().pretty().without_time().with_writer(std::io::stderr))
        .with(app_filter)
        .with(env_filter)
        .init();
}

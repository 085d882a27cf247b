use anyhow::Result;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Registry};

/// Level per `-v` count; counts past the end stay at `TRACE`.
const LEVELS: [Level; 5] = [
    Level::ERROR,
    Level::WARN,
    Level::INFO,
    Level::DEBUG,
    Level::TRACE,
];

#[must_use]
pub fn level(verbosity: u8) -> Level {
    LEVELS[usize::from(verbosity).min(LEVELS.len() - 1)]
}

/// Initialize logging on stderr so tables and JSON on stdout stay clean.
///
/// `RUST_LOG` directives are honoured on top of `level`.
///
/// # Errors
///
/// Returns an error if a filter directive does not parse or a global subscriber
/// is already set.
pub fn init(level: Level) -> Result<()> {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_target(false)
        .compact();

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy()
        .add_directive("hyper=error".parse()?)
        .add_directive("hyper_util=error".parse()?)
        .add_directive("tokio=error".parse()?);

    let subscriber = Registry::default().with(fmt_layer).with(filter);
    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}

use anyhow::{Context, Result};
use console::{Color, style};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing::{Subscriber, error, info};
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Environment variable overriding the file log filter
pub const LOG_ENV: &str = "DEBSETUP_LOG";

/// Events on this target go to the file only; `milestone` prints the
/// styled console line itself.
pub const MILESTONE_TARGET: &str = "debsetup::milestone";

const FILE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";

/// Initialize the global tracing subscriber.
///
/// Console: info and above on stdout, message only.
/// File: appended, timestamped, `debug` unless `DEBSETUP_LOG` or
/// `file_level` say otherwise.
pub fn init_logging(log_file: &Path, file_level: Option<&str>) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .with_context(|| format!("opening log file {:?}", log_file))?;

    let file_filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(file_level.unwrap_or("debug")));

    subscriber(std::io::stdout, Mutex::new(file), file_filter)
        .try_init()
        .context("installing tracing subscriber")?;

    Ok(())
}

fn subscriber<C, F>(console: C, file: F, file_filter: EnvFilter) -> impl Subscriber + Send + Sync
where
    C: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    F: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let console_layer = fmt::layer()
        .without_time()
        .with_level(false)
        .with_target(false)
        .with_writer(console)
        .with_filter(
            Targets::new()
                .with_default(LevelFilter::INFO)
                .with_target(MILESTONE_TARGET, LevelFilter::OFF),
        );

    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_target(false)
        .with_timer(ChronoLocal::new(FILE_TIME_FORMAT.to_string()))
        .with_writer(file)
        .with_filter(file_filter);

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
}

/// Bold coloured line on stdout, plain text in the log file.
///
/// The fmt layers escape control sequences inside messages, so styled text
/// cannot travel through them. Red milestones are logged at error level.
pub fn milestone(text: &str, color: Color) {
    println!("{}", style(text).fg(color).bold());

    if color == Color::Red {
        error!(target: MILESTONE_TARGET, "{text}");
    } else {
        info!(target: MILESTONE_TARGET, "{text}");
    }
}

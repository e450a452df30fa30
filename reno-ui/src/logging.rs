//! Log output for the desktop app: a terminal stream and an optional log
//! file, both behind one level filter that can be changed while running.

use std::fs::File;
use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use anyhow::{Context as _, Result};
use chrono::Local;
use tracing::{Event, Level, Subscriber, error, info, warn};
use tracing_subscriber::fmt::format::{FormatEvent, FormatFields, Writer};
use tracing_subscriber::fmt::{FmtContext, MakeWriter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Registry, reload};

use crate::config::LoggingSettings;

/// Levels offered in the status bar, quietest first.
pub const LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

const FALLBACK_LEVEL: &str = "info";

// ─── line format ─────────────────────────────────────────────────────────────

/// `14:03:27.512 WARN  reno_core::store: slot read failed error=...`
///
/// File lines also carry the date.
struct LineFormat {
    dated: bool,
}

fn level_colour(level: Level) -> &'static str {
    match level {
        Level::ERROR => "31",
        Level::WARN => "33",
        Level::INFO => "32",
        Level::DEBUG => "34",
        Level::TRACE => "35",
    }
}

impl<S, N> FormatEvent<S, N> for LineFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();
        let stamp = if self.dated {
            Local::now().format("%Y-%m-%d %H:%M:%S%.3f")
        } else {
            Local::now().format("%H:%M:%S%.3f")
        };

        if writer.has_ansi_escapes() {
            write!(
                writer,
                "\x1b[2m{stamp}\x1b[0m \x1b[1;{}m{:<5}\x1b[0m \x1b[2m{}:\x1b[0m ",
                level_colour(*meta.level()),
                meta.level(),
                meta.target()
            )?;
        } else {
            write!(writer, "{stamp} {:<5} {}: ", meta.level(), meta.target())?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

// ─── log file ────────────────────────────────────────────────────────────────

/// Shared between the file layer and [`LogControl`]. Events are dropped
/// while no file is open.
#[derive(Clone, Default)]
struct LogFile(Arc<Mutex<Option<OpenLog>>>);

struct OpenLog {
    path: PathBuf,
    file: File,
}

struct LogFileWriter<'a>(MutexGuard<'a, Option<OpenLog>>);

impl LogFile {
    fn slot(&self) -> MutexGuard<'_, Option<OpenLog>> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Write for LogFileWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self.0.as_mut() {
            Some(open) => open.file.write(buf),
            None => Ok(buf.len()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.0.as_mut() {
            Some(open) => open.file.flush(),
            None => Ok(()),
        }
    }
}

impl<'a> MakeWriter<'a> for LogFile {
    type Writer = LogFileWriter<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        LogFileWriter(self.slot())
    }
}

// ─── runtime control ─────────────────────────────────────────────────────────

/// Handle kept by the app to adjust logging after startup.
pub struct LogControl {
    filter: reload::Handle<EnvFilter, Registry>,
    level: String,
    file: LogFile,
    configured_file: Option<PathBuf>,
}

impl LogControl {
    /// The active filter directive, e.g. `"info"` or `"reno_core=debug"`.
    pub fn level(&self) -> &str {
        &self.level
    }

    /// Accepts a bare level or any `RUST_LOG`-style directive. An invalid
    /// directive leaves the current filter in place.
    pub fn set_level(&mut self, directive: &str) -> Result<()> {
        let filter = EnvFilter::try_new(directive)
            .with_context(|| format!("invalid log level '{directive}'"))?;
        self.filter
            .reload(filter)
            .context("log subscriber is no longer running")?;
        self.level = directive.to_string();
        info!(level = directive, "log level changed");
        Ok(())
    }

    /// The `[logging] file` setting, whether or not it is open.
    pub fn configured_file(&self) -> Option<&Path> {
        self.configured_file.as_deref()
    }

    /// File currently receiving log lines.
    pub fn log_file(&self) -> Option<PathBuf> {
        self.file.slot().as_ref().map(|open| open.path.clone())
    }

    /// Appends to `path`, replacing any open log file. The directory must
    /// already exist.
    pub fn open_file(&self, path: &Path) -> Result<()> {
        let file = File::options()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("cannot open log file '{}'", path.display()))?;
        *self.file.slot() = Some(OpenLog {
            path: path.to_path_buf(),
            file,
        });
        info!(path = %path.display(), "logging to file");
        Ok(())
    }

    pub fn close_file(&self) {
        if let Some(open) = self.file.slot().take() {
            info!(path = %open.path.display(), "log file closed");
        }
    }
}

/// `RUST_LOG` when it parses, then the configured level, then `info`.
fn starting_level(env: Option<String>, configured: &str) -> String {
    env.filter(|directive| EnvFilter::try_new(directive).is_ok())
        .or_else(|| EnvFilter::try_new(configured).is_ok().then(|| configured.to_string()))
        .unwrap_or_else(|| FALLBACK_LEVEL.to_string())
}

/// Builds the subscriber without installing it.
pub(crate) fn build(
    level: &str,
    configured_file: Option<PathBuf>,
    ansi: bool,
) -> (impl Subscriber + Send + Sync + 'static, LogControl) {
    let (filter, handle) = reload::Layer::new(
        EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new(FALLBACK_LEVEL)),
    );
    let file = LogFile::default();

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(LineFormat { dated: false })
                .with_ansi(ansi),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(LineFormat { dated: true })
                .with_ansi(false)
                .with_writer(file.clone()),
        );

    let control = LogControl {
        filter: handle,
        level: level.to_string(),
        file,
        configured_file,
    };
    (subscriber, control)
}

/// Installs the global subscriber and opens the configured log file.
///
/// Colour is used only when stdout is a terminal. A log file that cannot
/// be opened is reported and skipped.
pub fn init_logging(settings: &LoggingSettings) -> LogControl {
    let level = starting_level(std::env::var(EnvFilter::DEFAULT_ENV).ok(), &settings.level);
    let (subscriber, control) = build(&level, settings.file.clone(), io::stdout().is_terminal());

    if let Err(error) = tracing::subscriber::set_global_default(subscriber) {
        warn!(%error, "log subscriber already installed; runtime level changes will not apply");
    }
    if let Some(path) = control.configured_file() {
        if let Err(error) = control.open_file(path) {
            warn!(error = %format!("{error:#}"), "file logging disabled");
        }
    }
    control
}

/// Logs a background task failure with context.
pub fn log_task_error(task_name: &'static str, result: Result<()>) {
    if let Err(error) = result {
        error!(task = task_name, ?error, "background task failed");
    }
}

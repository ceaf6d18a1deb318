//! Single-shot and refresh-loop drivers.
//!
//! Both drivers write to a caller-supplied stream so they can run against
//! stdout in the binary and against an in-memory buffer in tests.

use std::future::Future;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use binclock_core::{
    ClockStateBuilder, DisplayMode, DisplayRegistry, FixedTimeSource, LocalTimeSource, Renderer,
    TimeComponents, TimeSource, VERSION, WriterRenderer,
};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::cli::Cli;
use crate::config::ClockConfig;
use crate::error::CliError;

/// Moves the cursor home after clearing the screen.
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Run settings after merging flags over the config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Output layout.
    pub mode: DisplayMode,
    /// Keep refreshing until shutdown.
    pub looping: bool,
    /// Fixed time of day to show instead of the host clock.
    pub time: Option<TimeComponents>,
    /// Clear the terminal before each refresh.
    pub clear_screen: bool,
    /// Refresh cadence.
    pub interval: Duration,
    /// Display registry slot bound.
    pub capacity: usize,
}

impl Settings {
    /// Merge command-line flags over file configuration.
    pub fn resolve(cli: &Cli, config: &ClockConfig) -> Self {
        Self {
            mode: cli.display.map_or(config.display.mode, DisplayMode::from),
            looping: cli.looping,
            time: cli.time,
            clear_screen: config.display.clear_screen,
            interval: Duration::from_millis(config.refresh.interval_ms),
            capacity: config.registry.capacity,
        }
    }

    /// Whether each refresh starts by clearing the terminal.
    ///
    /// JSON output is never cleared so it can be piped.
    pub const fn clears_screen(&self) -> bool {
        self.clear_screen && !matches!(self.mode, DisplayMode::Json)
    }

    /// The builder for this run: a fixed source for `--time`, else the host
    /// clock.
    pub fn builder(&self) -> ClockStateBuilder<Box<dyn TimeSource + Send>> {
        let source: Box<dyn TimeSource + Send> = match self.time {
            Some(time) => Box::new(FixedTimeSource::new(time)),
            None => Box::new(LocalTimeSource::new()),
        };
        ClockStateBuilder::new(source)
    }
}

/// Cloneable handle to one output stream.
///
/// The refresh loop writes its banner and clear sequences through one
/// handle while the registered renderer writes through another.
#[derive(Debug, Default)]
pub struct Console<W>(Arc<Mutex<W>>);

impl<W> Clone for Console<W> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<W> Console<W> {
    /// Wrap `writer`.
    pub fn new(writer: W) -> Self {
        Self(Arc::new(Mutex::new(writer)))
    }

    /// Run `f` with exclusive access to the stream.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if another holder panicked mid-write.
    pub fn with<R>(&self, f: impl FnOnce(&mut W) -> R) -> io::Result<R> {
        let mut writer = self
            .0
            .lock()
            .map_err(|err| io::Error::other(err.to_string()))?;
        Ok(f(&mut writer))
    }
}

impl<W: Write> Write for Console<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.with(|writer| writer.write(buf))?
    }

    fn flush(&mut self) -> io::Result<()> {
        self.with(Write::flush)?
    }
}

/// Render one state and return.
///
/// # Errors
///
/// Returns [`CliError::ClockUnavailable`] if the state could not be built,
/// or [`CliError::Render`] if writing it failed.
pub fn run_once<S, W>(
    builder: &ClockStateBuilder<S>,
    mode: DisplayMode,
    out: W,
) -> Result<(), CliError>
where
    S: TimeSource,
    W: Write + Send,
{
    let state = builder.current_state();
    if !state.is_valid() {
        return Err(CliError::ClockUnavailable);
    }
    WriterRenderer::new(mode, out).render(&state)?;
    Ok(())
}

/// Refresh the selected display every interval until `shutdown` resolves.
///
/// A tick whose state cannot be built is logged and skipped. Renderer
/// failures are logged by the registry and do not stop the loop.
///
/// # Errors
///
/// Returns [`CliError::Registry`] if the display cannot be registered,
/// [`CliError::Console`] if the banner or clear sequence cannot be
/// written, or [`CliError::Signal`] if `shutdown` reports an error.
pub async fn run_loop<S, W, F>(
    builder: &ClockStateBuilder<S>,
    settings: &Settings,
    console: Console<W>,
    shutdown: F,
) -> Result<(), CliError>
where
    S: TimeSource,
    W: Write + Send + 'static,
    F: Future<Output = io::Result<()>>,
{
    let mut out = console.clone();
    write!(out, "🌚🌝 Binary Clock v{VERSION} 🌝🌚\nPress Ctrl+C to exit\n\n")?;
    out.flush()?;

    let mut registry = DisplayRegistry::with_capacity(settings.capacity);
    let id = registry.register(WriterRenderer::new(settings.mode, console))?;
    info!(
        id = id.get(),
        mode = %settings.mode,
        interval_ms = settings.interval.as_millis(),
        "refresh loop started"
    );

    let mut ticker = tokio::time::interval(settings.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    tokio::pin!(shutdown);

    let mut ticks: u64 = 0;
    loop {
        tokio::select! {
            result = &mut shutdown => {
                result.map_err(|source| CliError::Signal { source })?;
                break;
            }
            _ = ticker.tick() => {
                ticks = ticks.saturating_add(1);
                if settings.clears_screen() {
                    out.write_all(CLEAR_SCREEN.as_bytes())?;
                    out.flush()?;
                }
                match builder.try_current_state() {
                    Ok(state) => {
                        registry.dispatch_all(&state);
                    }
                    Err(err) => warn!(tick = ticks, error = %err, "skipping refresh"),
                }
            }
        }
    }

    write!(out, "\n\nBinary clock stopped.\n")?;
    out.flush()?;
    debug!(ticks, "refresh loop stopped");
    Ok(())
}

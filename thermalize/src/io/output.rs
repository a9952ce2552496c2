//! Output formatting and logging utilities

use color_eyre::eyre::{Result, WrapErr};
use ising::{energy, render, Lattice};
use std::fmt;
use std::fs::File;
use std::io::Write;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing::info;
use tracing_subscriber::{
    filter::LevelFilter, fmt::format::Writer, fmt::layer, fmt::time::FormatTime,
    layer::SubscriberExt, util::SubscriberInitExt, Layer, Registry,
};

/// Stamps each log line with the wall time since logging started, so the
/// length of a thermalization run can be read straight off the log.
struct RunClock {
    start: Instant,
}

impl RunClock {
    fn start() -> Self {
        RunClock {
            start: Instant::now(),
        }
    }
}

impl FormatTime for RunClock {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        write!(w, "{}", format_elapsed(self.start.elapsed()))
    }
}

/// `+MM:SS.mmm`, with minutes running past 59 on long runs
fn format_elapsed(elapsed: Duration) -> String {
    let millis = elapsed.as_millis();
    format!(
        "+{:02}:{:02}.{:03}",
        millis / 60_000,
        (millis / 1000) % 60,
        millis % 1000
    )
}

/// Setup logging to a file or stdout
pub fn setup_output(output_path: Option<&String>, verbose: bool) -> Result<()> {
    let level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };

    match output_path {
        Some(path) => {
            let log = File::create(path)
                .wrap_err_with(|| format!("Could not create log file: {}", path))?;
            let file_layer = layer()
                .with_writer(Mutex::new(log))
                .with_timer(RunClock::start())
                .with_ansi(false)
                .with_filter(level);
            Registry::default().with(file_layer).init();
            info!("Log will be written to: {}", path);
        }
        None => {
            let stdout_layer = layer()
                .with_writer(std::io::stdout)
                .with_timer(RunClock::start())
                .with_ansi(true)
                .with_filter(level);
            Registry::default().with(stdout_layer).init();
        }
    }

    Ok(())
}

/// Print a titled lattice followed by its energy
pub fn print_lattice<W: Write>(writer: &mut W, title: &str, lattice: &Lattice) -> Result<()> {
    writeln!(writer, "{}", title)?;
    render(lattice, writer)?;
    writeln!(writer, "Energy: {}", energy(lattice))?;
    Ok(())
}

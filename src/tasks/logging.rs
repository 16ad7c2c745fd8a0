use crate::FailResult;

use log::{Level, LevelFilter};
use std::fmt;
use std::path::{Path, PathBuf};

/// Builder-style setup for logging
#[derive(Debug, Clone, Default)]
pub struct GlobalLogger {
    path: Option<PathBuf>,
    verbosity: Verbosity,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum Verbosity { Default, Loud, Louder }

impl Default for Verbosity {
    fn default() -> Self { Verbosity::Default }
}

impl GlobalLogger {
    /// Also write the log to this file.
    pub fn path<P: AsRef<Path>>(&mut self, path: P) -> &mut Self
    { self.path = Some(path.as_ref().to_owned()); self }

    /// Any integer will be accepted; the level will be truncated
    /// to the most extreme value supported.
    pub fn verbosity(&mut self, level: u64) -> &mut Self
    {
        self.verbosity = match level {
            0 => Verbosity::Default,
            1 => Verbosity::Loud,
            _ => Verbosity::Louder,
        };
        self
    }

    fn level(&self) -> LevelFilter {
        match self.verbosity {
            Verbosity::Default => LevelFilter::Info,
            Verbosity::Loud => LevelFilter::Debug,
            Verbosity::Louder => LevelFilter::Trace,
        }
    }

    /// Install the logger.  Can only succeed once per process.
    ///
    /// Messages go to stderr, since stdout is reserved for output data.
    pub fn apply(&mut self) -> FailResult<()>
    {
        use std::time::Instant;

        let start = Instant::now();
        let mut fern = fern::Dispatch::new();
        fern = fern.format(move |out, message, record| {
                let t = start.elapsed();
                out.finish(format_args!("[{:>4}.{:03}s][{}][{}] {}",
                    t.as_secs(),
                    t.subsec_millis(),
                    record.target(),
                    ColorizedLevel(record.level()),
                    message))
            })
            .level(LevelFilter::Warn)
            .level_for("factorlab_tasks", self.level())
            .level_for("factorlab_linalg", self.level())
            .chain(std::io::stderr());

        if let Some(path) = self.path.as_ref() {
            fern = fern.chain(fern::log_file(path)?);
        }

        fern.apply()?;
        Ok(())
    }
}

#[derive(Debug, Copy, Clone)]
pub struct ColorizedLevel(pub Level);
impl fmt::Display for ColorizedLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let style = match self.0 {
            Level::Error => ansi_term::Colour::Red.bold(),
            Level::Warn  => ansi_term::Colour::Red.normal(),
            Level::Info  => ansi_term::Colour::Cyan.bold(),
            Level::Debug => ansi_term::Colour::Yellow.dimmed(),
            Level::Trace => ansi_term::Colour::Cyan.normal(),
        };
        write!(f, "{}", style.paint(self.0.to_string()))
    }
}

use std::fmt;
use std::io::{stderr, Write};
use std::process;
use std::sync::atomic::{AtomicBool, Ordering};

use log::{Level, LevelFilter, Log, Metadata, Record};

static DEBUG: AtomicBool = AtomicBool::new(false);
static LOGGER: StderrLogger = StderrLogger;

const LOG_PREFIX: &str = "strings-rs";

/// Installs the stderr logger. Debug messages are only shown when `verbose`.
pub(crate) fn init(verbose: bool) {
    if verbose {
        enable_debug();
    }

    // a logger may already be installed (e.g. in tests)
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(LevelFilter::Debug);
    }
}

pub(crate) fn enable_debug() {
    DEBUG.store(true, Ordering::Relaxed);
}

#[cfg(test)]
pub(crate) fn disable_debug() {
    DEBUG.store(false, Ordering::Relaxed);
}

pub(crate) fn is_debug_enabled() -> bool {
    DEBUG.load(Ordering::Relaxed)
}

fn format_line(args: &fmt::Arguments) -> String {
    format!("{LOG_PREFIX}[{}]: {}", process::id(), args)
}

struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Info || is_debug_enabled()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = format_line(record.args());
        // nowhere left to report a failing stderr
        let _ = writeln!(stderr(), "{line}");
    }

    fn flush(&self) {
        let _ = stderr().flush();
    }
}

//! ## Features
//!
//! - Standard logging levels (info, warn, error, debug, success, verbose)
//! - Multi-line message support with consistent prefixes
//! - Every line is mirrored into `tracing` so a subscriber can collect it
//! - A process-wide verbosity gate for `--quiet` / `--verbose` front ends
//! - All output to stderr, leaving stdout for command results
//!
//! ## Usage
//!
//! Functions: `info()`, `warn()`, `error()`, `debug()`, `success()`, `verbose()`
//!
//! Macros with format arguments: `bentley::info!("loaded {} customers", n)`

use colored::*;
use std::sync::atomic::{AtomicU8, Ordering};

/// How much bentley writes to stderr
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
  /// Errors only
  Quiet = 0,
  /// Everything except debug and verbose lines
  Normal = 1,
  /// Everything
  Verbose = 2,
}

/// Severity of a single log line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
  Verbose,
  Debug,
  Info,
  Success,
  Warn,
  Error,
}

impl Level {
  fn prefix(self) -> &'static str {
    match self {
      Level::Verbose => "verb",
      Level::Debug => "debug",
      Level::Info => "info",
      Level::Success => "sccs",
      Level::Warn => "warn",
      Level::Error => "error",
    }
  }

  fn color(self) -> Color {
    match self {
      Level::Verbose => Color::Cyan,
      Level::Debug => Color::Magenta,
      Level::Info => Color::Blue,
      Level::Success => Color::Green,
      Level::Warn => Color::Yellow,
      Level::Error => Color::Red,
    }
  }

  /// Lowest verbosity at which this level reaches stderr
  fn threshold(self) -> Verbosity {
    match self {
      Level::Verbose | Level::Debug => Verbosity::Verbose,
      Level::Info | Level::Success | Level::Warn => Verbosity::Normal,
      Level::Error => Verbosity::Quiet,
    }
  }
}

static VERBOSITY: AtomicU8 = AtomicU8::new(Verbosity::Normal as u8);

/// Set the process-wide verbosity gate
pub fn set_verbosity(verbosity: Verbosity) {
  VERBOSITY.store(verbosity as u8, Ordering::Relaxed);
}

/// Current process-wide verbosity
pub fn verbosity() -> Verbosity {
  match VERBOSITY.load(Ordering::Relaxed) {
    0 => Verbosity::Quiet,
    2 => Verbosity::Verbose,
    _ => Verbosity::Normal,
  }
}

/// Whether a line at `level` would be written to stderr right now
pub fn enabled(level: Level) -> bool {
  verbosity() >= level.threshold()
}

/// Format a colored prefix for log messages
fn format_prefix(level: Level) -> String {
  let prefix = level.prefix();
  format!("[{}]{:<width$}", prefix.color(level.color()).bold(), "", width = 7 - prefix.len() - 2)
}

fn forward(level: Level, line: &str) {
  match level {
    Level::Verbose => tracing::trace!(target: "bentley", "{line}"),
    Level::Debug => tracing::debug!(target: "bentley", "{line}"),
    Level::Info | Level::Success => tracing::info!(target: "bentley", "{line}"),
    Level::Warn => tracing::warn!(target: "bentley", "{line}"),
    Level::Error => tracing::error!(target: "bentley", "{line}"),
  }
}

/// Prefixed stderr lines for a message, one per input line
fn render_lines(level: Level, message: &str) -> Vec<String> {
  let prefix = format_prefix(level);
  message.lines().map(|line| format!("{prefix} {line}")).collect()
}

/// Core logging function that handles the actual output
pub fn log(level: Level, message: &str) {
  for line in message.lines() {
    forward(level, line);
  }
  if enabled(level) {
    for line in render_lines(level, message) {
      eprintln!("{line}");
    }
  }
}

/// Create a banner line of the specified length and character
pub fn banner_line(length: usize, char: char) -> String {
  char.to_string().repeat(length)
}

pub fn verbose(message: &str) {
  log(Level::Verbose, message);
}

/// Info level logging - general information
pub fn info(message: &str) {
  log(Level::Info, message);
}

/// Warning level logging - something needs attention
pub fn warn(message: &str) {
  log(Level::Warn, message);
}

/// Error level logging - something went wrong
pub fn error(message: &str) {
  log(Level::Error, message);
}

/// Debug level logging - detailed diagnostic information
pub fn debug(message: &str) {
  log(Level::Debug, message);
}

/// Success level logging - something completed successfully
pub fn success(message: &str) {
  log(Level::Success, message);
}

#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => {
    $crate::info(&format!($($arg)*))
  };
}

#[macro_export]
macro_rules! warn {
  ($($arg:tt)*) => {
    $crate::warn(&format!($($arg)*))
  };
}

#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => {
    $crate::error(&format!($($arg)*))
  };
}

#[macro_export]
macro_rules! verbose {
  ($($arg:tt)*) => {
    $crate::verbose(&format!($($arg)*))
  };
}

#[macro_export]
macro_rules! debug {
  ($($arg:tt)*) => {
    $crate::debug(&format!($($arg)*))
  };
}

#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => {
    $crate::success(&format!($($arg)*))
  };
}

//! Leveled diagnostic ring buffer.
//!
//! The engine cannot print, so notable decisions (layout changes, buffering
//! strategy, settings resets, sleep transitions, the power-budget latch) are
//! recorded here and drained by the host.
//!
//! # Log Levels
//!
//! - `Trace`: per-frame detail
//! - `Debug`: internal state changes
//! - `Info`: normal lifecycle events
//! - `Warn`: recoverable problems (invalid settings, fallback strategies)
//! - `Error`: rejected host input
//!
//! # Usage
//!
//! ```ignore
//! let mut log = EventLog::new();
//! log.push(LogLevel::Info, "layout ready");
//! log_fmt!(log, LogLevel::Warn, "{} settings reset", count);
//!
//! for entry in log.drain() {
//!     println!("[{}] {}", entry.level.prefix(), entry.message);
//! }
//! ```

use core::fmt::{self, Write};

use heapless::{Deque, String};

// =============================================================================
// Event Log Configuration
// =============================================================================

/// Maximum number of entries kept before the oldest is dropped.
pub const LOG_ENTRIES: usize = 16;

/// Maximum characters per log message.
pub const LOG_MSG_LEN: usize = 48;

// =============================================================================
// Levels and Entries
// =============================================================================

/// Log severity level.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Default)]
#[repr(u8)]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    #[default]
    Info = 2,
    Warn = 3,
    Error = 4,
}

impl LogLevel {
    /// Single-character prefix for this level.
    pub const fn prefix(self) -> char {
        match self {
            Self::Trace => 'T',
            Self::Debug => 'D',
            Self::Info => 'I',
            Self::Warn => 'W',
            Self::Error => 'E',
        }
    }
}

/// A single log entry.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct LogEntry {
    pub level: LogLevel,
    /// Message, truncated to `LOG_MSG_LEN - 1` characters.
    pub message: String<LOG_MSG_LEN>,
    /// Frame counter value when the entry was recorded.
    pub frame: u32,
}

impl LogEntry {
    pub fn new(
        level: LogLevel,
        message: &str,
        frame: u32,
    ) -> Self {
        let mut msg: String<LOG_MSG_LEN> = String::new();
        for (i, c) in message.chars().enumerate() {
            if i >= LOG_MSG_LEN - 1 {
                break;
            }
            msg.push(c).ok();
        }
        Self { level, message: msg, frame }
    }
}

// =============================================================================
// Ring Buffer
// =============================================================================

/// Bounded log of recent events, oldest first.
pub struct EventLog {
    buffer: Deque<LogEntry, LOG_ENTRIES>,
    min_level: LogLevel,
    frame: u32,
}

impl EventLog {
    /// Empty log recording `Debug` and above.
    pub const fn new() -> Self {
        Self {
            buffer: Deque::new(),
            min_level: LogLevel::Debug,
            frame: 0,
        }
    }

    /// Drop entries below `level` from now on.
    pub fn set_min_level(
        &mut self,
        level: LogLevel,
    ) {
        self.min_level = level;
    }

    /// Set the frame counter stamped on new entries.
    #[inline]
    pub fn set_frame(
        &mut self,
        frame: u32,
    ) {
        self.frame = frame;
    }

    /// Record a message. If the buffer is full the oldest entry is dropped.
    pub fn push(
        &mut self,
        level: LogLevel,
        msg: &str,
    ) {
        if level < self.min_level {
            return;
        }
        if self.buffer.is_full() {
            self.buffer.pop_front();
        }
        self.buffer.push_back(LogEntry::new(level, msg, self.frame)).ok();
    }

    /// Record a formatted message. Output past `LOG_MSG_LEN` is cut off.
    pub fn push_fmt(
        &mut self,
        level: LogLevel,
        args: fmt::Arguments<'_>,
    ) {
        if level < self.min_level {
            return;
        }
        let mut line = Truncating(String::new());
        line.write_fmt(args).ok();
        self.push(level, &line.0);
    }

    /// Remove and yield every entry, oldest first.
    pub fn drain(&mut self) -> impl Iterator<Item = LogEntry> + '_ {
        core::iter::from_fn(move || self.buffer.pop_front())
    }

    /// Iterate over entries without removing them.
    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> {
        self.buffer.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new()
    }
}

/// Writer that silently stops at capacity instead of failing the whole write.
struct Truncating(String<LOG_MSG_LEN>);

impl Write for Truncating {
    fn write_str(
        &mut self,
        s: &str,
    ) -> fmt::Result {
        for c in s.chars() {
            if self.0.push(c).is_err() {
                break;
            }
        }
        Ok(())
    }
}

/// Format into an [`EventLog`] without allocating.
#[macro_export]
macro_rules! log_fmt {
    ($log:expr, $level:expr, $($arg:tt)*) => {
        $log.push_fmt($level, format_args!($($arg)*))
    };
}

// =============================================================================
// Tests
// =============================================================================

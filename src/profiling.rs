//! Render timing for full and partial frames.
//!
//! # Usage
//!
//! ```ignore
//! let mut metrics = ProfilingMetrics::new();
//!
//! let start = Instant::now();
//! let kind = face.on_partial_update(&mut display, &input);
//! metrics.record_frame(kind, start.elapsed());
//!
//! println!("{}", metrics.summary());
//! ```

use std::fmt::Write;
use std::time::Duration;

use heapless::String;
use watchface_common::FrameKind;

/// Min/max/average of one frame kind, in microseconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameStats {
    pub count: u32,
    pub last_us: u32,
    pub min_us: u32,
    pub max_us: u32,
    avg_us: f32,
}

impl FrameStats {
    /// Exponential moving average alpha (0.1 for smooth updates).
    const EMA_ALPHA: f32 = 0.1;

    const fn new() -> Self {
        Self {
            count: 0,
            last_us: 0,
            min_us: u32::MAX,
            max_us: 0,
            avg_us: 0.0,
        }
    }

    fn record(
        &mut self,
        us: u32,
    ) {
        self.last_us = us;
        self.min_us = self.min_us.min(us);
        self.max_us = self.max_us.max(us);
        self.avg_us = if self.count == 0 {
            us as f32
        } else {
            Self::EMA_ALPHA.mul_add(us as f32, (1.0 - Self::EMA_ALPHA) * self.avg_us)
        };
        self.count += 1;
    }

    /// Rolling average in microseconds.
    #[inline]
    pub const fn avg_us(&self) -> u32 {
        self.avg_us as u32
    }
}

/// Render timing split by frame kind.
pub struct ProfilingMetrics {
    pub full: FrameStats,
    pub partial: FrameStats,
    /// Update callbacks that drew nothing (no layout yet).
    pub skipped: u32,
}

impl ProfilingMetrics {
    pub const fn new() -> Self {
        Self {
            full: FrameStats::new(),
            partial: FrameStats::new(),
            skipped: 0,
        }
    }

    /// Record one update callback and how long it took.
    pub fn record_frame(
        &mut self,
        kind: Option<FrameKind>,
        render_time: Duration,
    ) {
        let us = u32::try_from(render_time.as_micros()).unwrap_or(u32::MAX);
        match kind {
            Some(FrameKind::Full) => self.full.record(us),
            Some(FrameKind::Partial) => self.partial.record(us),
            None => self.skipped += 1,
        }
    }

    /// One-line summary, e.g. `full 3x avg 812us | partial 30x avg 95us`.
    pub fn summary(&self) -> String<96> {
        let mut s = String::new();
        write!(s, "full {}x avg {}us", self.full.count, self.full.avg_us()).ok();
        if self.partial.count > 0 {
            write!(
                s,
                " | partial {}x avg {}us (min {} max {})",
                self.partial.count,
                self.partial.avg_us(),
                self.partial.min_us,
                self.partial.max_us
            )
            .ok();
        }
        if self.skipped > 0 {
            write!(s, " | skipped {}", self.skipped).ok();
        }
        s
    }
}

impl Default for ProfilingMetrics {
    fn default() -> Self {
        Self::new()
    }
}

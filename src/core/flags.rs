//! Output flags controlling caller location and header time parts

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Bitset of rendering options for a logger
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct LogFlags: u8 {
        /// Print the caller file as reported by the compiler, eg: src/net/conn.rs:23
        const FILE_LONG = 1 << 0;

        /// Print only the caller file name, eg: conn.rs:23
        const FILE_SHORT = 1 << 1;

        /// Date part of the header, eg: 2009-01-23
        const TIME_DATE = 1 << 2;

        /// Time part of the header, eg: 01:23:23
        const TIME_TIME = 1 << 3;

        /// Millisecond suffix of the time part, eg: 01:23:23.675
        const TIME_MILLI = 1 << 4;

        /// Standard header time: date, time and milliseconds
        const TIME_STD = Self::TIME_DATE.bits() | Self::TIME_TIME.bits() | Self::TIME_MILLI.bits();
    }
}

impl Default for LogFlags {
    fn default() -> Self {
        LogFlags::TIME_STD
    }
}

impl LogFlags {
    const FILE_MASK: LogFlags = LogFlags::FILE_LONG.union(LogFlags::FILE_SHORT);

    /// Select caller location output, long or short form
    ///
    /// The two forms are exclusive; selecting one clears the other.
    #[must_use]
    pub fn with_line(self, long: bool) -> Self {
        let form = if long {
            LogFlags::FILE_LONG
        } else {
            LogFlags::FILE_SHORT
        };
        self.difference(Self::FILE_MASK).union(form)
    }

    /// Whether any caller location form is selected
    pub fn prints_location(&self) -> bool {
        self.intersects(Self::FILE_MASK)
    }

    /// strftime pattern for the header time, if any time part is selected
    pub fn time_pattern(&self) -> Option<String> {
        let mut parts = Vec::with_capacity(2);
        if self.contains(LogFlags::TIME_DATE) {
            parts.push("%Y-%m-%d".to_string());
        }
        if self.contains(LogFlags::TIME_TIME) {
            if self.contains(LogFlags::TIME_MILLI) {
                parts.push("%H:%M:%S%.3f".to_string());
            } else {
                parts.push("%H:%M:%S".to_string());
            }
        }
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }
}

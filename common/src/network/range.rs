//! # Port Range Model
//!
//! A continuous, inclusive range of TCP ports on the loopback interface.
//!
//! Ranges are written as `START-END` (e.g. `6969-7069`) or as a single port.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

use crate::config::{DEFAULT_END_PORT, DEFAULT_START_PORT};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RangeError {
    #[error("invalid port range: start {start} is greater than end {end}")]
    Inverted { start: u16, end: u16 },
    #[error("port 0 cannot be probed")]
    ZeroPort,
    #[error("invalid port '{0}'")]
    InvalidPort(String),
}

/// Represents a continuous range of TCP ports, inclusive.
///
/// Construction guarantees `start <= end` and that neither bound is 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct PortRange {
    start: u16,
    end: u16,
}

impl PortRange {
    pub fn new(start: u16, end: u16) -> Result<Self, RangeError> {
        if start == 0 || end == 0 {
            return Err(RangeError::ZeroPort);
        }
        if start > end {
            return Err(RangeError::Inverted { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn single(port: u16) -> Result<Self, RangeError> {
        Self::new(port, port)
    }

    pub fn start(&self) -> u16 {
        self.start
    }

    pub fn end(&self) -> u16 {
        self.end
    }

    pub fn contains(&self, port: u16) -> bool {
        (self.start..=self.end).contains(&port)
    }

    pub fn len(&self) -> usize {
        usize::from(self.end - self.start) + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Ports in ascending order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = u16> + Clone {
        self.start..=self.end
    }
}

impl Default for PortRange {
    fn default() -> Self {
        Self {
            start: DEFAULT_START_PORT,
            end: DEFAULT_END_PORT,
        }
    }
}

impl fmt::Display for PortRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

impl FromStr for PortRange {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('-') {
            Some((start, end)) => Self::new(parse_port(start)?, parse_port(end)?),
            None => Self::single(parse_port(s)?),
        }
    }
}

fn parse_port(s: &str) -> Result<u16, RangeError> {
    let trimmed: &str = s.trim();
    trimmed
        .parse::<u16>()
        .map_err(|_| RangeError::InvalidPort(trimmed.to_string()))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

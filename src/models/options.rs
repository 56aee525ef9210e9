use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use tracing::warn;

use super::Zone;

pub const DEFAULT_MIN_DAYS: i64 = 20;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Report format selected with `--output`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputKind {
    #[default]
    Table,
    Json,
    Text,
}

impl FromStr for OutputKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "table" => Ok(OutputKind::Table),
            "json" => Ok(OutputKind::Json),
            "text" => Ok(OutputKind::Text),
            other => Err(format!("unknown output type: {}", other)),
        }
    }
}

impl fmt::Display for OutputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputKind::Table => "table",
            OutputKind::Json => "json",
            OutputKind::Text => "text",
        };
        f.write_str(name)
    }
}

/// Display options, built once from the command line and read-only afterwards.
#[derive(Debug, Clone)]
pub struct Options {
    /// Certificates with fewer days left than this count as expiring.
    pub min_days: i64,
    pub output: OutputKind,
    /// Only report domains that are expiring.
    pub only_expiring: bool,
    /// Color the days-left and status columns of the table.
    pub colors: bool,
    /// Bold table header.
    pub formatting: bool,
    pub zone: Zone,
    /// Connect, read and write timeout for each domain.
    pub timeout: Duration,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            min_days: DEFAULT_MIN_DAYS,
            output: OutputKind::default(),
            only_expiring: false,
            colors: false,
            formatting: false,
            zone: Zone::default(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl Options {
    /// Apply a `--location` value. Unknown zones are ignored.
    pub fn with_location(mut self, location: Option<&str>) -> Self {
        if let Some(name) = location {
            match name.parse::<Zone>() {
                Ok(zone) => self.zone = zone,
                Err(e) => warn!(location = name, "{}, keeping {}", e, self.zone),
            }
        }
        self
    }

    /// Apply an `--output` value. Unknown kinds are ignored.
    pub fn with_output(mut self, output: Option<&str>) -> Self {
        if let Some(kind) = output {
            match kind.parse::<OutputKind>() {
                Ok(parsed) => self.output = parsed,
                Err(e) => warn!(output = kind, "{}, keeping {}", e, self.output),
            }
        }
        self
    }

    /// Whether a domain with this many days left belongs in the report.
    pub fn shows(&self, days_left: i64) -> bool {
        !self.only_expiring || days_left < self.min_days
    }
}

use chrono::{DateTime, FixedOffset, Local, Utc};
use chrono_tz::Tz;
use std::fmt;
use std::str::FromStr;

/// Time zone used to present certificate end dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Zone {
    /// The zone of the machine running the check.
    #[default]
    Local,
    /// An IANA zone such as `Europe/Stockholm`.
    Named(Tz),
}

impl Zone {
    /// Convert an instant into this zone, keeping the offset that applied at that instant.
    pub fn convert(&self, instant: DateTime<Utc>) -> DateTime<FixedOffset> {
        match self {
            Zone::Local => instant.with_timezone(&Local).fixed_offset(),
            Zone::Named(tz) => instant.with_timezone(tz).fixed_offset(),
        }
    }

    /// Current time in this zone.
    pub fn now(&self) -> DateTime<FixedOffset> {
        self.convert(Utc::now())
    }
}

impl FromStr for Zone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "Local" {
            return Ok(Zone::Local);
        }
        s.parse::<Tz>()
            .map(Zone::Named)
            .map_err(|_| format!("unknown time zone: {}", s))
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Zone::Local => write!(f, "Local"),
            Zone::Named(tz) => write!(f, "{}", tz.name()),
        }
    }
}

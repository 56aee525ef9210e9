use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Certificate Types
// ============================================================================

/// Leaf certificate details kept from a successful handshake
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafCertificate {
    pub subject: String,
    pub issuer: String,
    pub not_before: DateTime<Utc>,
    pub not_after: DateTime<Utc>,
}

// ============================================================================
// Report Types
// ============================================================================

/// Snapshot of one domain, as written by the JSON and text reports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainData {
    pub name: String,
    #[serde(rename = "daysLeft")]
    pub days_left: i64,
    #[serde(rename = "endTime")]
    pub end_time: DateTime<FixedOffset>,
    pub status: String,
}

/// Top-level JSON document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainList {
    pub domains: Vec<DomainData>,
}

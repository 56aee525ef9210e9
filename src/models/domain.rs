use chrono::{DateTime, FixedOffset, Utc};

use super::{DomainData, FetchError, LeafCertificate, Zone};

/// Unix timestamp of 0001-01-01T00:00:00Z, the end time reported for
/// domains without a certificate.
const ZERO_TIME_UNIX: i64 = -62_135_596_800;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Outcome of checking a single domain.
///
/// Holds the leaf certificate, or the reason there is none. Everything that
/// depends on the current time is derived on request.
#[derive(Debug, Clone)]
pub struct DomainStatus {
    pub name: String,
    pub certificate: Option<LeafCertificate>,
    pub error: Option<FetchError>,
}

impl DomainStatus {
    pub fn with_certificate(name: impl Into<String>, certificate: LeafCertificate) -> Self {
        Self {
            name: name.into(),
            certificate: Some(certificate),
            error: None,
        }
    }

    pub fn failed(name: impl Into<String>, error: FetchError) -> Self {
        Self {
            name: name.into(),
            certificate: None,
            error: Some(error),
        }
    }

    /// Last instant the certificate is valid, in `zone`.
    pub fn end_time(&self, zone: &Zone) -> DateTime<FixedOffset> {
        match &self.certificate {
            Some(cert) => zone.convert(cert.not_after),
            None => zero_time(),
        }
    }

    /// Whole days until the certificate expires, floored. Negative once expired.
    ///
    /// Without a certificate this is the full, unsaturated distance back to
    /// the zero time, roughly -739,000 days today.
    pub fn days_left(&self, zone: &Zone) -> i64 {
        self.days_left_at(zone, zone.now())
    }

    pub fn days_left_at(&self, zone: &Zone, now: DateTime<FixedOffset>) -> i64 {
        let remaining = self.end_time(zone) - now;
        remaining.num_milliseconds().div_euclid(MILLIS_PER_DAY)
    }

    /// `ok`, or a short description of what went wrong.
    pub fn status(&self) -> String {
        match &self.error {
            None => "ok".to_string(),
            Some(err) => err.status(),
        }
    }

    pub fn to_data(&self, zone: &Zone) -> DomainData {
        DomainData {
            name: self.name.clone(),
            days_left: self.days_left(zone),
            end_time: self.end_time(zone),
            status: self.status(),
        }
    }
}

fn zero_time() -> DateTime<FixedOffset> {
    DateTime::<Utc>::from_timestamp(ZERO_TIME_UNIX, 0)
        .unwrap_or_default()
        .fixed_offset()
}

use chrono::{DateTime, Utc};
use openssl::asn1::{Asn1Time, Asn1TimeRef};
use openssl::nid::Nid;
use openssl::ssl::{HandshakeError, SslConnector, SslMethod, SslStream};
use openssl::x509::{X509NameRef, X509VerifyResult, X509};
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;
use tracing::{debug, instrument};

use crate::models::{DomainStatus, FetchError, LeafCertificate};

pub const HTTPS_PORT: u16 = 443;

/// Anything that can turn a domain name into a [`DomainStatus`].
pub trait CertificateSource {
    fn fetch(&self, domain: &str) -> DomainStatus;
}

/// Fetches the leaf certificate over a blocking TLS connection with the
/// system trust store.
pub struct TlsFetcher {
    port: u16,
    timeout: Duration,
}

impl TlsFetcher {
    pub fn new(timeout: Duration) -> Self {
        Self {
            port: HTTPS_PORT,
            timeout,
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    fn leaf_certificate(&self, domain: &str) -> Result<LeafCertificate, FetchError> {
        let connector = SslConnector::builder(SslMethod::tls())
            .map_err(|e| FetchError::Connection(format!("tls setup: {}", first_reason(&e))))?
            .build();

        let addrs = self.resolve(domain)?;
        let stream = dial(&addrs, self.timeout)?;

        let mut tls = connector
            .connect(domain, stream)
            .map_err(|e| FetchError::Connection(handshake_failure(domain, e)))?;

        let leaf = tls.ssl().peer_certificate();
        close(&mut tls);

        match leaf {
            Some(cert) => parse_leaf(&cert),
            None => Err(FetchError::NoCertificate),
        }
    }

    fn resolve(&self, domain: &str) -> Result<Vec<SocketAddr>, FetchError> {
        let addrs: Vec<SocketAddr> = (domain, self.port)
            .to_socket_addrs()
            .map_err(|e| FetchError::Connection(format!("lookup {}: {}", domain, e)))?
            .collect();
        if addrs.is_empty() {
            return Err(FetchError::Connection(format!("lookup {}: no such host", domain)));
        }
        Ok(addrs)
    }
}

/// Try each address in order; the first one that connects wins, otherwise
/// the last dial error is reported.
fn dial(addrs: &[SocketAddr], timeout: Duration) -> Result<TcpStream, FetchError> {
    let mut last_error = None;
    for addr in addrs {
        let connected = TcpStream::connect_timeout(addr, timeout).and_then(|stream| {
            stream.set_read_timeout(Some(timeout))?;
            stream.set_write_timeout(Some(timeout))?;
            Ok(stream)
        });
        match connected {
            Ok(stream) => return Ok(stream),
            Err(e) => {
                debug!(%addr, error = %e, "dial failed");
                last_error = Some(FetchError::Connection(format!("dial tcp {}: {}", addr, e)));
            }
        }
    }
    Err(last_error.unwrap_or_else(|| FetchError::Connection("dial tcp: no address".to_string())))
}

impl CertificateSource for TlsFetcher {
    #[instrument(skip(self), fields(port = self.port))]
    fn fetch(&self, domain: &str) -> DomainStatus {
        match self.leaf_certificate(domain) {
            Ok(cert) => {
                debug!(
                    subject = %cert.subject,
                    issuer = %cert.issuer,
                    not_before = %cert.not_before,
                    not_after = %cert.not_after,
                    "fetched leaf certificate"
                );
                DomainStatus::with_certificate(domain, cert)
            }
            Err(e) => {
                debug!(error = %e, "certificate fetch failed");
                DomainStatus::failed(domain, e)
            }
        }
    }
}

/// Send close_notify; the socket itself is released when the stream drops.
fn close(tls: &mut SslStream<TcpStream>) {
    if let Err(e) = tls.shutdown() {
        debug!(error = %e, "tls shutdown");
    }
}

fn handshake_failure(domain: &str, err: HandshakeError<TcpStream>) -> String {
    let cause = match err {
        HandshakeError::SetupFailure(stack) => first_reason(&stack),
        HandshakeError::Failure(mid) => {
            let verify = mid.ssl().verify_result();
            if verify != X509VerifyResult::OK {
                verify.error_string().to_string()
            } else if let Some(io) = mid.error().io_error() {
                io.to_string()
            } else if let Some(stack) = mid.error().ssl_error() {
                first_reason(stack)
            } else {
                mid.error().code().as_raw().to_string()
            }
        }
        HandshakeError::WouldBlock(_) => "i/o timeout".to_string(),
    };
    format!("tls handshake {}: {}", domain, cause)
}

fn first_reason(stack: &openssl::error::ErrorStack) -> String {
    stack
        .errors()
        .first()
        .and_then(|e| e.reason())
        .map(str::to_string)
        .unwrap_or_else(|| "handshake failure".to_string())
}

fn parse_leaf(cert: &X509) -> Result<LeafCertificate, FetchError> {
    Ok(LeafCertificate {
        subject: common_name(cert.subject_name()).unwrap_or_default(),
        issuer: organization(cert.issuer_name())
            .or_else(|| common_name(cert.issuer_name()))
            .unwrap_or_else(|| "Unknown Issuer".to_string()),
        not_before: asn1_to_utc(cert.not_before())?,
        not_after: asn1_to_utc(cert.not_after())?,
    })
}

fn common_name(name: &X509NameRef) -> Option<String> {
    name_entry(name, Nid::COMMONNAME)
}

fn organization(name: &X509NameRef) -> Option<String> {
    name_entry(name, Nid::ORGANIZATIONNAME)
}

fn name_entry(name: &X509NameRef, nid: Nid) -> Option<String> {
    name.entries_by_nid(nid)
        .next()
        .map(|e| String::from_utf8_lossy(e.data().as_slice()).into_owned())
}

/// Convert an ASN.1 time by measuring its distance from the Unix epoch.
fn asn1_to_utc(time: &Asn1TimeRef) -> Result<DateTime<Utc>, FetchError> {
    let unreadable = |e: openssl::error::ErrorStack| FetchError::Certificate(first_reason(&e));
    let epoch = Asn1Time::from_unix(0).map_err(unreadable)?;
    let diff = epoch.diff(time).map_err(unreadable)?;
    let secs = i64::from(diff.days) * 86_400 + i64::from(diff.secs);

    DateTime::<Utc>::from_timestamp(secs, 0)
        .ok_or_else(|| FetchError::Certificate(format!("time out of range: {}", time)))
}

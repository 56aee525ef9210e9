mod cert_fetcher;

pub use cert_fetcher::{CertificateSource, TlsFetcher, HTTPS_PORT};

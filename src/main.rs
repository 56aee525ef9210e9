use anyhow::Result;
use clap::Parser;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use certexpiry::commands;
use certexpiry::models::Options;
use certexpiry::services::TlsFetcher;

#[derive(Parser)]
#[command(name = "certexpiry")]
#[command(version)]
#[command(about = "Check days left on TLS certificates", long_about = None)]
struct Cli {
    /// Domains to check
    #[arg(value_name = "DOMAINS")]
    domains: Vec<String>,

    /// Days left on certificate before warning
    #[arg(short, long, default_value_t = 20, allow_negative_numbers = true)]
    days: i64,

    /// Time zone for end dates, e.g. Europe/Stockholm. Defaults to local
    #[arg(short, long)]
    location: Option<String>,

    /// Output format: table (default), json or text
    #[arg(short, long)]
    output: Option<String>,

    /// Only show certificates expiring within --days
    #[arg(short, long)]
    expiring: bool,

    /// Add colors in table output
    #[arg(short, long)]
    colors: bool,

    /// Use bold in table header
    #[arg(short, long)]
    formatting: bool,

    /// Connection timeout in seconds, per domain
    #[arg(long, default_value = "10", value_parser = clap::value_parser!(u64).range(1..))]
    timeout: u64,
}

impl Cli {
    fn options(&self) -> Options {
        Options {
            min_days: self.days,
            only_expiring: self.expiring,
            colors: self.colors,
            formatting: self.formatting,
            timeout: Duration::from_secs(self.timeout),
            ..Options::default()
        }
        .with_location(self.location.as_deref())
        .with_output(self.output.as_deref())
    }
}

/// Set SSL_CERT_FILE so vendored OpenSSL can find the system CA trust store.
fn init_ssl_certs() {
    if std::env::var_os("SSL_CERT_FILE").is_some() {
        return;
    }

    let probe = openssl_probe::probe();
    if let Some(cert_file) = probe.cert_file {
        std::env::set_var("SSL_CERT_FILE", cert_file);
        return;
    }

    // probe misses the bundle on macOS
    for path in ["/etc/ssl/cert.pem", "/usr/local/etc/openssl@3/cert.pem"] {
        if std::path::Path::new(path).exists() {
            std::env::set_var("SSL_CERT_FILE", path);
            return;
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let options = cli.options();

    init_ssl_certs();
    let fetcher = TlsFetcher::new(options.timeout);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    commands::run_check(&cli.domains, &options, &fetcher, &mut out)
}

use anyhow::Result;
use std::io::Write;
use tracing::{debug, info};

use crate::models::{DomainStatus, Options};
use crate::output::render;
use crate::services::CertificateSource;

/// Check every domain in order and write one report for all of them.
///
/// Per-domain failures end up in that domain's status; only write errors
/// abort the run.
pub fn run_check<S, W>(domains: &[String], options: &Options, source: &S, out: &mut W) -> Result<()>
where
    S: CertificateSource,
    W: Write,
{
    if domains.is_empty() {
        debug!("no domains given, nothing to report");
        return Ok(());
    }

    info!(count = domains.len(), zone = %options.zone, "checking certificates");

    let statuses: Vec<DomainStatus> = domains.iter().map(|d| source.fetch(d)).collect();

    render(&statuses, options, out)?;
    out.flush()?;
    Ok(())
}

use anyhow::Result;
use std::io::Write;
use tracing::debug;

use crate::models::{DomainData, DomainList, DomainStatus, Options, OutputKind};
use crate::output::colors::{status_color, Attribute};
use crate::output::table::{Column, ColumnAlign, Table};

const TABLE_PADDING: usize = 3;
const TABLE_PAD: &str = " ";
const END_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Write the report for `domains` in the format selected by `options`.
pub fn render<W: Write>(domains: &[DomainStatus], options: &Options, out: &mut W) -> Result<()> {
    match options.output {
        OutputKind::Table => write_table(domains, options, out),
        OutputKind::Json => write_json(domains, options, out),
        OutputKind::Text => write_text(domains, options, out),
    }
}

/// Snapshots of the domains that pass the expiring filter, paired with their status.
fn visible<'a>(
    domains: &'a [DomainStatus],
    options: &Options,
) -> Vec<(&'a DomainStatus, DomainData)> {
    domains
        .iter()
        .map(|d| (d, d.to_data(&options.zone)))
        .filter(|(_, data)| {
            let shown = options.shows(data.days_left);
            if !shown {
                debug!(domain = %data.name, days_left = data.days_left, "filtered out");
            }
            shown
        })
        .collect()
}

/// Aligned table with a header row
pub fn write_table<W: Write>(
    domains: &[DomainStatus],
    options: &Options,
    out: &mut W,
) -> Result<()> {
    let mut table = Table::new(
        TABLE_PADDING,
        TABLE_PAD,
        vec![
            ColumnAlign::left().with_center_header(),
            ColumnAlign::right().with_center_header(),
            ColumnAlign::left().with_center_header(),
            ColumnAlign::center().with_center_header(),
        ],
    );

    let header_format = if options.formatting {
        vec![Attribute::Bold]
    } else {
        Vec::new()
    };
    table.add_row(
        ["Domain", "Days left", "End date", "Status"]
            .into_iter()
            .map(|label| Column::new(label).with_format(header_format.clone()))
            .collect(),
    );

    for (domain, data) in visible(domains, options) {
        let day_color = status_color(options.colors, data.days_left >= options.min_days);
        let state_color = status_color(options.colors, domain.error.is_none());

        table.add_row(vec![
            Column::new(data.name),
            Column::new(data.days_left.to_string()).with_format(day_color),
            Column::new(data.end_time.format(END_DATE_FORMAT).to_string()),
            Column::new(data.status).with_format(state_color),
        ]);
    }

    table.write_to(out)?;
    Ok(())
}

/// Single-line JSON document: `{"domains":[...]}`
pub fn write_json<W: Write>(
    domains: &[DomainStatus],
    options: &Options,
    out: &mut W,
) -> Result<()> {
    let list = DomainList {
        domains: visible(domains, options)
            .into_iter()
            .map(|(_, data)| data)
            .collect(),
    };
    writeln!(out, "{}", serde_json::to_string(&list)?)?;
    Ok(())
}

/// One `name|daysLeft|endTime|status` line per domain
pub fn write_text<W: Write>(
    domains: &[DomainStatus],
    options: &Options,
    out: &mut W,
) -> Result<()> {
    for (_, data) in visible(domains, options) {
        writeln!(
            out,
            "{}|{}|{}|{}",
            data.name, data.days_left, data.end_time, data.status
        )?;
    }
    Ok(())
}

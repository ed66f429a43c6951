pub mod formats;

use crate::export::formats::table::{ReportTable, RowView};
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::ser::Serializer;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Csv,
    Json,
}

/// JSON document wrapping the result rows of one run.
#[derive(Debug, Serialize)]
pub struct SummaryExport<'a> {
    pub version: &'static str,
    #[serde(serialize_with = "serialize_datetime")]
    pub created_at: DateTime<Utc>,
    pub tool_version: &'static str,
    pub command: &'a str,
    pub rows: Vec<RowView<'a>>,
}

impl<'a> SummaryExport<'a> {
    pub fn new(command: &'a str, table: &'a ReportTable) -> Self {
        Self {
            version: "1.0",
            created_at: Utc::now(),
            tool_version: env!("CARGO_PKG_VERSION"),
            command,
            rows: table.records().collect(),
        }
    }
}

fn serialize_datetime<S>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&date.to_rfc3339())
}

/// Write `table` in the requested format.
pub fn write_table<W: Write>(
    table: &ReportTable,
    format: OutputFormat,
    command: &str,
    writer: &mut W,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Csv => table.write_csv(writer)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *writer, &SummaryExport::new(command, table))?;
            writeln!(writer)?;
        }
    }
    writer.flush()?;
    Ok(())
}

use std::io::{IsTerminal, Write};

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;
use shuntlog_record::{columns, Snapshot};

use crate::exit::{csv_error, CliResult};

#[derive(Clone, Debug, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Csv,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

/// Tabular writer: one header row, then one row per snapshot.
pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
    rows: u64,
}

impl<W: Write> CsvSink<W> {
    pub fn new(inner: W, channel_count: usize) -> CliResult<Self> {
        let mut writer = csv::Writer::from_writer(inner);
        writer
            .write_record(columns(channel_count))
            .map_err(|err| csv_error("failed to write CSV header", err))?;
        Ok(Self { writer, rows: 0 })
    }

    pub fn write(&mut self, snapshot: &Snapshot) -> CliResult<()> {
        self.writer
            .write_record(snapshot.row())
            .map_err(|err| csv_error("failed to write CSV row", err))?;
        self.rows += 1;
        Ok(())
    }

    pub fn rows(&self) -> u64 {
        self.rows
    }

    pub fn finish(mut self) -> CliResult<()> {
        self.writer
            .flush()
            .map_err(|err| crate::exit::io_error("failed to flush CSV", err))
    }
}

pub fn print_snapshot(snapshot: &Snapshot, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string(snapshot).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["CHANNEL", "BUS V", "SHUNT V", "CURRENT A", "POWER W"]);
            for (n, channel) in snapshot.channels.iter().enumerate() {
                table.add_row(vec![
                    (n + 1).to_string(),
                    format!("{:.4}", channel.bus_volts),
                    format!("{:.6}", channel.shunt_volts),
                    format!("{:.3}", channel.current_amps),
                    format!("{:.3}", channel.power_watts),
                ]);
            }
            println!("{}\n{table}", snapshot.timestamp_string());
        }
        OutputFormat::Pretty | OutputFormat::Csv => {
            let channels: Vec<String> = snapshot
                .channels
                .iter()
                .enumerate()
                .map(|(n, c)| {
                    format!(
                        "ch{}={:.3}V/{:.3}A/{:.3}W",
                        n + 1,
                        c.bus_volts,
                        c.current_amps,
                        c.power_watts
                    )
                })
                .collect();
            println!("{} {}", snapshot.timestamp_string(), channels.join(" "));
        }
    }
}

/// Outcome of reading a whole capture.
#[derive(Debug, Serialize)]
pub struct Summary {
    pub input: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    pub snapshots: u64,
    pub first: Option<String>,
    pub last: Option<String>,
    pub error: Option<String>,
}

pub fn print_summary(summary: &Summary, format: OutputFormat) {
    match format {
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string(summary).unwrap_or_else(|_| "{}".to_string())
        ),
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["INPUT", "SNAPSHOTS", "FIRST", "LAST", "STATUS"])
                .add_row(vec![
                    summary.input.clone(),
                    summary.snapshots.to_string(),
                    summary.first.clone().unwrap_or_else(|| "-".to_string()),
                    summary.last.clone().unwrap_or_else(|| "-".to_string()),
                    summary.error.clone().unwrap_or_else(|| "ok".to_string()),
                ]);
            println!("{table}");
        }
        OutputFormat::Pretty | OutputFormat::Csv => {
            let range = match (&summary.first, &summary.last) {
                (Some(first), Some(last)) => format!(" from {first} to {last}"),
                _ => String::new(),
            };
            let target = summary
                .output
                .as_deref()
                .map(|out| format!(" -> {out}"))
                .unwrap_or_default();
            println!(
                "{}{target}: {} snapshots{range}",
                summary.input, summary.snapshots
            );
            if let Some(error) = &summary.error {
                println!("error: {error}");
            }
        }
    }
}

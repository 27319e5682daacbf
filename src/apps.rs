use std::error::Error;
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, ValueEnum, error::ErrorKind};
use serde::Serialize;

use crate::config::{CivilZone, DisplayLocale, MonitorConfig};
use crate::constants::status::STATUS_APPLIED;
use crate::format::{compact_line, description_text, detail_line};
use crate::index::default_owner;
use crate::ingestion::JobStore;
use crate::pipeline::OwnerReport;
use crate::source::FileJobSource;
use crate::types::{DisplayText, OwnerId};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LocaleArg {
    EnGb,
    EnUs,
    Iso,
}

impl From<LocaleArg> for DisplayLocale {
    fn from(value: LocaleArg) -> Self {
        match value {
            LocaleArg::EnGb => DisplayLocale::EnGb,
            LocaleArg::EnUs => DisplayLocale::EnUs,
            LocaleArg::Iso => DisplayLocale::Iso,
        }
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "job_monitor",
    disable_help_subcommand = true,
    about = "Per-client job application report",
    long_about = "Load a job payload file and print, per client, the status census, the applications currently in the reference status (newest first), and those that fall on a chosen day.",
    after_help = "When --date is omitted the report uses today's date in the --utc-offset zone. Pass --no-date to skip the day filter."
)]
struct JobMonitorCli {
    #[arg(
        long,
        value_name = "PATH",
        help = "JSON payload file with a top-level jobDB array"
    )]
    payload: PathBuf,
    #[arg(
        long,
        value_name = "OWNER_ID",
        help = "Client to report on; defaults to the first client in the payload"
    )]
    owner: Option<String>,
    #[arg(long = "all-owners", conflicts_with = "owner", help = "Report every client")]
    all_owners: bool,
    #[arg(
        long,
        value_name = "YYYY-MM-DD",
        value_parser = parse_date_arg,
        help = "Calendar day for the day filter"
    )]
    date: Option<NaiveDate>,
    #[arg(long = "no-date", conflicts_with = "date", help = "Skip the day filter")]
    no_date: bool,
    #[arg(
        long = "utc-offset",
        value_name = "OFFSET",
        value_parser = parse_zone_arg,
        default_value = "+00:00",
        help = "Civil zone for reading and printing dates, e.g. +05:30"
    )]
    zone: CivilZone,
    #[arg(long, value_enum, default_value_t = LocaleArg::EnGb, help = "Date layout for printed dates")]
    locale: LocaleArg,
    #[arg(
        long,
        value_name = "LABEL",
        default_value = STATUS_APPLIED,
        help = "Status label that marks an application as active"
    )]
    status: String,
    #[arg(long, help = "Print the client list and reports as JSON")]
    json: bool,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    owners: &'a [OwnerId],
    reports: Vec<&'a OwnerReport>,
}

/// Run the `job_monitor` report CLI over `args_iter` (program name excluded).
pub fn run_job_monitor<I>(args_iter: I) -> Result<(), Box<dyn Error>>
where
    I: Iterator<Item = String>,
{
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let Some(cli) =
        parse_cli::<JobMonitorCli, _>(std::iter::once("job_monitor".to_string()).chain(args_iter))?
    else {
        return Ok(());
    };

    let config = MonitorConfig {
        zone: cli.zone,
        locale: cli.locale.into(),
        ..MonitorConfig::default()
    }
    .with_reference_status(&cli.status)?;
    let filter_date = if cli.no_date {
        None
    } else {
        Some(cli.date.unwrap_or_else(|| config.zone.today()))
    };

    let store = JobStore::new(config);
    let source = FileJobSource::new(&cli.payload);
    store.refresh(&source)?;

    let owners = store.owners();
    let selected: Vec<OwnerId> = if cli.all_owners {
        owners.clone()
    } else if let Some(owner) = cli.owner {
        vec![owner]
    } else {
        default_owner(&owners).map(str::to_string).into_iter().collect()
    };
    let reports: Vec<_> = selected
        .iter()
        .map(|owner| store.owner_report(owner, filter_date))
        .collect();

    if cli.json {
        let output = JsonOutput {
            owners: &owners,
            reports: reports.iter().map(|report| report.as_ref()).collect(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!(
        "Records: {} ({} without a client)",
        store.len(),
        store.unowned_count()
    );
    println!("Clients ({}):", owners.len());
    for owner in &owners {
        println!("  {owner}");
    }
    if owners.is_empty() {
        println!("No clients found in {}.", cli.payload.display());
        return Ok(());
    }

    for report in &reports {
        println!();
        for line in render_owner_report(report, store.config()) {
            println!("{line}");
        }
    }

    Ok(())
}

/// Render the report for one owner as printable lines.
fn render_owner_report(report: &OwnerReport, config: &MonitorConfig) -> Vec<DisplayText> {
    let mut lines = vec![format!("Jobs for {}", report.owner)];

    lines.push("Status overview:".to_string());
    if report.census.is_empty() {
        lines.push("  No jobs for this client.".to_string());
    }
    for share in report.census.shares() {
        lines.push(format!(
            "  {:<14} {:>4}  ({:.0}%)",
            share.label,
            share.count,
            share.share * 100.0
        ));
    }

    lines.push(format!(
        "{} ({}):",
        capitalize(&config.reference_status),
        report.applied.len()
    ));
    for entry in &report.applied {
        lines.push(format!("  {}", compact_line(&entry.record, entry.instant, config)));
    }

    match report.filter_date {
        Some(date) => {
            lines.push(format!(
                "{} on {}: {}",
                capitalize(&config.reference_status),
                date.format("%Y-%m-%d"),
                report.applied_on_count()
            ));
            if report.applied_on.is_empty() {
                lines.push(format!(
                    "  No {} jobs for the selected date.",
                    config.reference_status
                ));
            }
            for entry in &report.applied_on {
                lines.push(format!("  {}", detail_line(&entry.record, entry.instant, config)));
                if let Some(description) = description_text(&entry.record) {
                    lines.push(format!("    {description}"));
                }
            }
        }
        None => lines.push("Pick a date to see jobs for that day.".to_string()),
    }

    lines
}

fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn parse_date_arg(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| format!("invalid --date value '{}': expected YYYY-MM-DD", raw))
}

fn parse_zone_arg(raw: &str) -> Result<CivilZone, String> {
    raw.parse::<CivilZone>().map_err(|err| err.to_string())
}

fn parse_cli<T, I>(args: I) -> Result<Option<T>, Box<dyn Error>>
where
    T: Parser,
    I: IntoIterator,
    I::Item: Into<std::ffi::OsString> + Clone,
{
    match T::try_parse_from(args) {
        Ok(cli) => Ok(Some(cli)),
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                err.print()?;
                Ok(None)
            }
            _ => Err(err.into()),
        },
    }
}

//! Read-only scan commands.

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use dashmark_core::error::AppError;
use dashmark_entity::scan::{QueryMode, ResultEntry};
use dashmark_service::scan::{ScanService, ScanSummary, WalkReport, filter_entries};

use super::Context;

/// Arguments shared by the scan commands
#[derive(Debug, Args)]
pub struct ScanArgs {
    /// Only show entries whose title, URL or folder contains this text
    #[arg(short, long)]
    pub search: Option<String>,
}

/// Result display row
#[derive(Debug, Serialize, Tabled)]
pub struct EntryRow {
    /// Node ID
    #[tabled(rename = "ID")]
    pub id: String,
    /// Title
    #[tabled(rename = "Title")]
    pub title: String,
    /// URL
    #[tabled(rename = "URL")]
    pub url: String,
    /// Folder path
    #[tabled(rename = "Folder")]
    pub folder: String,
}

impl From<&ResultEntry> for EntryRow {
    fn from(entry: &ResultEntry) -> Self {
        Self {
            id: entry.id.to_string(),
            title: entry.title.clone(),
            url: entry.url.clone(),
            folder: entry.folder_path.clone(),
        }
    }
}

/// JSON shape of a scan command's output
#[derive(Debug, Serialize)]
struct ScanOutput<'a> {
    summary: ScanSummary,
    results: &'a [ResultEntry],
    skipped: &'a [dashmark_service::scan::SkippedNode],
}

/// `dashmark duplicates`
pub async fn duplicates(args: &ScanArgs, ctx: &Context<'_>) -> Result<(), AppError> {
    let report = run(QueryMode::Duplicates, ctx).await?;
    print_report(&report, args, ctx.format, "Total Duplicates");
    Ok(())
}

/// `dashmark empty-folders`
pub async fn empty_folders(args: &ScanArgs, ctx: &Context<'_>) -> Result<(), AppError> {
    let report = run(QueryMode::EmptyFolders, ctx).await?;
    print_report(&report, args, ctx.format, "Empty Folders");
    Ok(())
}

/// `dashmark list`
pub async fn list(args: &ScanArgs, ctx: &Context<'_>) -> Result<(), AppError> {
    let report = run(QueryMode::AllBookmarks, ctx).await?;
    print_report(&report, args, ctx.format, "Total Bookmarks");
    Ok(())
}

async fn run(mode: QueryMode, ctx: &Context<'_>) -> Result<WalkReport, AppError> {
    let config = ctx.load_config()?;
    let store = ctx.open_store(&config).await?;
    ScanService::new(store, config.scan).query(mode).await
}

fn print_report(report: &WalkReport, args: &ScanArgs, format: OutputFormat, label: &str) {
    let entries = match &args.search {
        Some(term) => filter_entries(&report.entries, term),
        None => report.entries.clone(),
    };
    let summary = ScanSummary::from_entries(&entries);

    match format {
        OutputFormat::Json => output::print_json(&ScanOutput {
            summary,
            results: &entries,
            skipped: &report.skipped,
        }),
        OutputFormat::Table => {
            let rows: Vec<EntryRow> = entries.iter().map(EntryRow::from).collect();
            output::print_list(&rows, format);
            println!();
            output::print_kv(label, &summary.total_urls.to_string());
            output::print_kv("Distinct URLs", &summary.distinct_urls.to_string());
            for node in &report.skipped {
                output::print_warning(&format!("Skipped {}: {}", node.id, node.reason));
            }
        }
    }
}

//! Destructive commands: dedupe, prune and remove.

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use dashmark_core::error::AppError;
use dashmark_core::types::BookmarkId;
use dashmark_entity::scan::ResultEntry;
use dashmark_service::cleanup::{CleanupReport, CleanupService};

use super::Context;
use super::scan::EntryRow;

/// Arguments for planned cleanups
#[derive(Debug, Args)]
pub struct ConfirmArgs {
    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    /// Show what would be removed without removing anything
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the remove command
#[derive(Debug, Args)]
pub struct RemoveArgs {
    /// Ids of the bookmarks or folders to remove
    #[arg(required = true)]
    pub ids: Vec<String>,

    /// Remove folders together with their contents
    #[arg(short, long)]
    pub recursive: bool,

    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Failure display row
#[derive(Debug, Serialize, Tabled)]
struct FailureRow {
    /// Node ID
    #[tabled(rename = "ID")]
    id: String,
    /// Error message
    #[tabled(rename = "Error")]
    error: String,
}

/// `dashmark dedupe`
pub async fn dedupe(args: &ConfirmArgs, ctx: &Context<'_>) -> Result<(), AppError> {
    let service = service(ctx).await?;
    let plan = service.plan_dedupe().await?;
    let ids = confirm_plan(&plan, args, ctx.format, "duplicate bookmark")?;
    if ids.is_empty() {
        return Ok(());
    }

    let report = service.delete(&ids, false).await;
    print_report(&report, ctx.format);
    Ok(())
}

/// `dashmark prune-empty`
pub async fn prune_empty(args: &ConfirmArgs, ctx: &Context<'_>) -> Result<(), AppError> {
    let service = service(ctx).await?;
    let plan = service.plan_prune().await?;
    let ids = confirm_plan(&plan, args, ctx.format, "empty folder")?;
    if ids.is_empty() {
        return Ok(());
    }

    let report = service.delete(&ids, false).await;
    print_report(&report, ctx.format);
    Ok(())
}

/// `dashmark remove`
pub async fn remove(args: &RemoveArgs, ctx: &Context<'_>) -> Result<(), AppError> {
    let service = service(ctx).await?;
    let ids: Vec<BookmarkId> = args.ids.iter().map(|id| BookmarkId::from(id.as_str())).collect();

    let what = if args.recursive {
        format!("Remove {} node(s) and everything inside them?", ids.len())
    } else {
        format!("Remove {} node(s)?", ids.len())
    };
    if !args.yes && !confirm(&what)? {
        println!("Cancelled.");
        return Ok(());
    }

    let report = service.delete(&ids, args.recursive).await;
    print_report(&report, ctx.format);
    if report.is_clean() {
        Ok(())
    } else {
        Err(AppError::storage(format!(
            "{} removal(s) failed",
            report.failed.len()
        )))
    }
}

async fn service(ctx: &Context<'_>) -> Result<CleanupService, AppError> {
    let config = ctx.load_config()?;
    let store = ctx.open_store(&config).await?;
    Ok(CleanupService::new(store, config.scan))
}

/// Show the plan and ask for confirmation. Returns the ids to remove,
/// empty when there is nothing to do or the user declined.
fn confirm_plan(
    plan: &[ResultEntry],
    args: &ConfirmArgs,
    format: OutputFormat,
    noun: &str,
) -> Result<Vec<BookmarkId>, AppError> {
    if plan.is_empty() {
        output::print_success(&format!("No {noun}s to remove."));
        return Ok(Vec::new());
    }

    let rows: Vec<EntryRow> = plan.iter().map(EntryRow::from).collect();
    output::print_list(&rows, format);

    if args.dry_run {
        println!("Dry run: {} {noun}(s) would be removed.", plan.len());
        return Ok(Vec::new());
    }

    if !args.yes && !confirm(&format!("Remove {} {noun}(s)?", plan.len()))? {
        println!("Cancelled.");
        return Ok(Vec::new());
    }

    Ok(plan.iter().map(|entry| entry.id.clone()).collect())
}

fn confirm(prompt: &str) -> Result<bool, AppError> {
    dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| AppError::internal(format!("Input error: {}", e)))
}

fn print_report(report: &CleanupReport, format: OutputFormat) {
    if format == OutputFormat::Json {
        output::print_json(report);
        return;
    }

    output::print_success(&format!("Removed {} node(s).", report.removed.len()));
    if !report.missing.is_empty() {
        output::print_warning(&format!(
            "{} node(s) were already gone.",
            report.missing.len()
        ));
    }
    if !report.failed.is_empty() {
        let rows: Vec<FailureRow> = report
            .failed
            .iter()
            .map(|f| FailureRow {
                id: f.id.to_string(),
                error: f.error.clone(),
            })
            .collect();
        output::print_list(&rows, format);
    }
}

//! `imgfetch fetch` – run one batch over the given URLs.

use anyhow::{bail, Context, Result};
use imgfetch_core::batch::{normalize_urls, split_url_list};
use imgfetch_core::config::ImageFetchConfig;
use imgfetch_core::{BatchRunner, BatchSummary, DedupIndex, FetchOutcome, FetchResult, ImageFetcher};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

const PROGRESS_CHANNEL_CAPACITY: usize = 16;

pub(crate) const BANNER: &str = "Welcome to the Ubuntu Image Fetcher
A tool for mindfully collecting images from the web
\"A person is a person through other persons.\" - Ubuntu philosophy
";

#[derive(Debug)]
pub struct FetchArgs {
    pub urls: Vec<String>,
    pub dir: Option<PathBuf>,
    pub jobs: Option<usize>,
    pub json: bool,
}

pub async fn run_fetch(cfg: &ImageFetchConfig, args: FetchArgs) -> Result<()> {
    if !args.json {
        println!("{}", BANNER);
    }
    let urls = if args.urls.is_empty() {
        let line = tokio::task::spawn_blocking(prompt_for_urls)
            .await
            .context("stdin reader task")??;
        split_url_list(&line)
    } else {
        normalize_urls(&args.urls)
    };
    if urls.is_empty() {
        bail!("no URLs provided");
    }

    let dest_dir = args.dir.unwrap_or_else(|| cfg.download_dir.clone());
    let workers = args.jobs.unwrap_or(cfg.workers).max(1);
    let json = args.json;

    if !json {
        println!("Preparing to fetch {} image(s) into {}", urls.len(), dest_dir.display());
    }

    let (progress_tx, mut progress_rx) =
        tokio::sync::mpsc::channel::<FetchResult>(PROGRESS_CHANNEL_CAPACITY);
    let progress_handle = tokio::spawn(async move {
        while let Some(result) = progress_rx.recv().await {
            if !json {
                println!("{}", format_result_line(&result));
            }
        }
    });

    let runner = BatchRunner::new(ImageFetcher::from_config(cfg), dest_dir).with_workers(workers);
    let summary = tokio::task::spawn_blocking(move || {
        let dedup = DedupIndex::new();
        runner.run_with_progress(&urls, &dedup, Some(&progress_tx))
    })
    .await
    .context("batch task")?;

    let _ = progress_handle.await;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary_json(&summary))?);
    } else {
        print_summary(&summary);
    }
    Ok(())
}

fn prompt_for_urls() -> Result<String> {
    print!("Please enter image URLs (separate multiple URLs with commas): ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line).context("read URLs from stdin")?;
    Ok(line)
}

pub(crate) fn format_result_line(result: &FetchResult) -> String {
    match &result.outcome {
        FetchOutcome::Saved { path, .. } => {
            format!("✓ saved {} ({} bytes) -> {}", result.url, result.bytes, path.display())
        }
        FetchOutcome::SkippedDuplicate => format!("⏭ duplicate skipped: {}", result.url),
        FetchOutcome::Failed(e) => format!("✗ {}: {}", result.url, e),
    }
}

fn print_summary(summary: &BatchSummary) {
    println!("{}", "=".repeat(50));
    println!("Download summary:");
    println!("✓ Successful: {}", summary.saved);
    println!("✗ Failed: {}", summary.failed);
    println!("Total images in collection: {}", summary.total_distinct);
    if summary.saved > 0 {
        println!("\nConnection strengthened. Community enriched.");
    } else {
        println!("\nNo images were fetched this time, but the connection remains.");
    }
}

pub(crate) fn summary_json(summary: &BatchSummary) -> serde_json::Value {
    let results: Vec<serde_json::Value> = summary
        .results
        .iter()
        .map(|r| match &r.outcome {
            FetchOutcome::Saved { filename, path } => serde_json::json!({
                "url": r.url,
                "status": "saved",
                "filename": filename,
                "path": path.display().to_string(),
                "bytes": r.bytes,
            }),
            FetchOutcome::SkippedDuplicate => serde_json::json!({
                "url": r.url,
                "status": "duplicate",
                "bytes": r.bytes,
            }),
            FetchOutcome::Failed(e) => serde_json::json!({
                "url": r.url,
                "status": "failed",
                "kind": e.kind(),
                "error": e.to_string(),
            }),
        })
        .collect();

    let mut value = serde_json::to_value(summary).unwrap_or_else(|_| serde_json::json!({}));
    value["results"] = serde_json::Value::Array(results);
    value
}

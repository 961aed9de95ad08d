//! One function per subcommand. Results go to stdout, diagnostics to the log.

use std::path::Path;

use anyhow::{bail, Context, Result};
use engine_logging::engine_info;
use jobfetch_engine::{
    body_preview, detect_fetch_type, read_posting_document, CancellationToken, CvResult, Engine,
    FetchOutcome, FetchResult,
};

pub(crate) async fn fetch_posting(engine: &Engine, url: &str, name: Option<&str>) -> Result<()> {
    let cancel = cancel_on_ctrl_c();
    let result = engine
        .fetch_posting(url, name, &cancel)
        .await
        .with_context(|| format!("fetching posting {url}"))?;
    print_posting(&result);
    Ok(())
}

pub(crate) async fn fetch_cv(engine: &Engine, target: &str) -> Result<()> {
    let cancel = cancel_on_ctrl_c();
    let result = engine
        .fetch_cv(target, &cancel)
        .await
        .with_context(|| format!("fetching CV for {target}"))?;
    print_cv(&result);
    Ok(())
}

pub(crate) async fn fetch_auto(engine: &Engine, input: &str, name: Option<&str>) -> Result<()> {
    let cancel = cancel_on_ctrl_c();
    let outcome = engine
        .fetch_auto(input, name, &cancel)
        .await
        .with_context(|| format!("fetching {input}"))?;
    match outcome {
        FetchOutcome::Posting(result) => print_posting(&result),
        FetchOutcome::Cv(result) => print_cv(&result),
    }
    Ok(())
}

pub(crate) fn detect(input: &str) {
    println!("{}", detect_fetch_type(input));
}

pub(crate) fn show(path: &Path, max_bytes: usize) -> Result<()> {
    let Some(doc) = read_posting_document(path)
        .with_context(|| format!("reading {}", path.display()))?
    else {
        bail!("{} is not a saved posting (no front matter)", path.display());
    };

    println!("source:   {}", doc.source);
    println!("fetched:  {}", doc.fetched);
    if let Some(company) = &doc.company {
        println!("company:  {company}");
    }
    if let Some(position) = &doc.position {
        println!("position: {position}");
    }
    println!();
    println!("{}", body_preview(&doc.body, max_bytes));
    Ok(())
}

fn print_posting(result: &FetchResult) {
    println!(
        "Saved posting to {} ({} bytes)",
        result.output_path.display(),
        result.size_bytes
    );
    if !result.organization.is_empty() {
        println!("  company:  {}", result.organization);
    }
    if !result.title.is_empty() {
        println!("  position: {}", result.title);
    }
}

fn print_cv(result: &CvResult) {
    println!(
        "Saved CV from {} to {} ({} bytes)",
        result.url,
        result.output_path.display(),
        result.size_bytes
    );
    if !result.name.is_empty() {
        println!("  name:  {}", result.name);
    }
    if !result.label.is_empty() {
        println!("  label: {}", result.label);
    }
}

/// Token cancelled on the first Ctrl-C.
fn cancel_on_ctrl_c() -> CancellationToken {
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            engine_info!("Interrupted, cancelling the request");
            trigger.cancel();
        }
    });
    cancel
}

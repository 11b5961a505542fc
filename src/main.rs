mod config;
mod extract;
mod fetch;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

use config::Config;
use extract::ExtractionResult;
use fetch::Fetcher;

#[derive(Parser)]
#[command(
    name = "urn_extractor",
    about = "Resolve LinkedIn profile URNs from vanity names"
)]
struct Cli {
    /// Profile vanity names (e.g. "janedoe")
    #[arg(required = true)]
    vanity_names: Vec<String>,

    /// Enable detailed logging
    #[arg(short, long)]
    verbose: bool,

    /// Path to the config file with session cookies
    #[arg(long, default_value = "config.json")]
    config: PathBuf,

    /// Delay between requests in batch mode (ms)
    #[arg(long, default_value = "1000")]
    delay_ms: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .init();

    let config = Config::load(&cli.config)?;
    let fetcher = Fetcher::new(config)?;

    let any_failed = if cli.vanity_names.len() == 1 {
        run_single(&fetcher, &cli.vanity_names[0]).await
    } else {
        run_batch(
            &fetcher,
            &cli.vanity_names,
            Duration::from_millis(cli.delay_ms),
        )
        .await
    };

    if any_failed {
        std::process::exit(1);
    }
    Ok(())
}

/// Fetch one page and run extraction on it. Remote errors become failed
/// results instead of aborting, so batch processing always continues.
async fn resolve(fetcher: &Fetcher, vanity_name: &str) -> ExtractionResult {
    match fetcher.fetch_profile_page(vanity_name).await {
        Ok(html) => extract::extract(&html, vanity_name),
        Err(e) => ExtractionResult::failed(vanity_name, e),
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SingleReport<'a> {
    vanity_name: &'a str,
    profile_urn: &'a str,
}

async fn run_single(fetcher: &Fetcher, vanity_name: &str) -> bool {
    println!("Looking up URN for: {}\n", vanity_name);
    let result = resolve(fetcher, vanity_name).await;

    println!("{}", "-".repeat(55));
    if let Some(urn) = &result.profile_urn {
        println!("SUCCESS");
        println!("{}\n", "-".repeat(55));
        println!("Input:  {}", result.vanity_name);
        println!("Output: {}", urn);
        if let Some(method) = result.method {
            println!("Method: {}", method);
        }
        let report = SingleReport {
            vanity_name: &result.vanity_name,
            profile_urn: urn,
        };
        println!(
            "\nJSON:\n{}",
            serde_json::to_string_pretty(&report).expect("report serializes")
        );
        false
    } else {
        println!("FAILED");
        println!("{}\n", "-".repeat(55));
        println!("Profile: {}", result.vanity_name);
        if let Some(error) = &result.error {
            println!("Error:   {}", error);
        }
        true
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BatchReport<'a> {
    vanity_name: &'a str,
    profile_urn: Option<&'a str>,
    success: bool,
}

async fn run_batch(fetcher: &Fetcher, vanity_names: &[String], delay: Duration) -> bool {
    println!("Resolving {} profiles...", vanity_names.len());

    let pb = ProgressBar::new(vanity_names.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40} {pos}/{len} ({per_sec})")
            .expect("valid progress template")
            .progress_chars("=> "),
    );

    let mut results = Vec::with_capacity(vanity_names.len());
    for (i, vanity_name) in vanity_names.iter().enumerate() {
        results.push(resolve(fetcher, vanity_name).await);
        pb.inc(1);

        // Rate limiting: pause between requests, not after the last one
        if i < vanity_names.len() - 1 {
            tokio::time::sleep(delay).await;
        }
    }
    pb.finish_and_clear();

    let successful: Vec<&ExtractionResult> = results.iter().filter(|r| r.success()).collect();
    let failed: Vec<&ExtractionResult> = results.iter().filter(|r| !r.success()).collect();

    println!("\n{}", "-".repeat(55));
    println!("BATCH RESULTS");
    println!("{}\n", "-".repeat(55));
    println!(
        "Total: {} | Success: {} | Failed: {}\n",
        results.len(),
        successful.len(),
        failed.len()
    );

    if !successful.is_empty() {
        println!("Successful:");
        for r in &successful {
            println!(
                "  {} -> {}",
                r.vanity_name,
                r.profile_urn.as_deref().unwrap_or("")
            );
        }
        println!();
    }

    if !failed.is_empty() {
        println!("Failed:");
        for r in &failed {
            let reason = r
                .error
                .as_ref()
                .map(|e| e.to_string())
                .unwrap_or_default();
            println!("  {}: {}", r.vanity_name, reason);
        }
        println!();
    }

    let reports: Vec<BatchReport> = results
        .iter()
        .map(|r| BatchReport {
            vanity_name: &r.vanity_name,
            profile_urn: r.profile_urn.as_deref(),
            success: r.success(),
        })
        .collect();
    println!(
        "JSON:\n{}",
        serde_json::to_string_pretty(&reports).expect("reports serialize")
    );

    !failed.is_empty()
}

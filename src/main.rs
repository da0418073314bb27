use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use mfstaj_scraper::fetch::Fetcher;
use mfstaj_scraper::jobs::{detail, listing, Job};
use mfstaj_scraper::portal::Portal;
use mfstaj_scraper::settings::Settings;

#[derive(Parser)]
#[command(
    name = "mfstaj_scraper",
    about = "Bilkent summer-training company directory scraper"
)]
struct Cli {
    /// "list" or "details". Note that you must have run list beforehand to be able to run details
    crawl_type: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();
    let Ok(job) = cli.crawl_type.parse::<Job>() else {
        println!("Argument must be \"list\" or \"details\"");
        return Ok(());
    };

    let settings = Settings::load()?;
    let portal = Portal::new(&settings.base_url)
        .with_context(|| format!("Invalid base URL {:?}", settings.base_url))?;
    let mut fetcher = Fetcher::new(settings.delay())?;

    let t0 = Instant::now();
    info!("starting crawling process");

    match job {
        Job::List => {
            let companies =
                listing::run_to_file(&mut fetcher, &portal, &settings.listing_path).await?;
            info!("crawling process finished");

            println!("final companies list");
            println!("{}", serde_json::to_string_pretty(&companies)?);
            println!(
                "\n{} unique companies written to {} ({} requests)",
                companies.len(),
                settings.listing_path.display(),
                fetcher.requests()
            );
        }
        Job::Details => {
            let rows = detail::run_from_file(
                &mut fetcher,
                &portal,
                &settings.listing_path,
                &settings.detail_path,
            )
            .await?;
            info!("crawling process finished");

            println!(
                "{} company details written to {}",
                rows,
                settings.detail_path.display()
            );
        }
    }

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }
    Ok(())
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}

use std::io::Write;
use std::path::Path;

use tracing::{debug, info};

use super::{create_output, progress_bar};
use crate::error::{Result, ScrapeError};
use crate::fetch::Fetcher;
use crate::parse;
use crate::portal::{Portal, ALL_COMPANIES};
use crate::records::CompanyDirectory;

pub const LISTING_HEADER: [&str; 5] = ["company", "id", "city", "dep", "sec"];

/// Walk every index page and write one row per company id.
///
/// Rows are written on first sight of an id with the values seen then.
/// Later sightings only update the returned directory.
pub async fn run<W: Write>(
    fetcher: &mut Fetcher,
    portal: &Portal,
    out: W,
) -> Result<CompanyDirectory> {
    let first = portal.index_url(0, None);
    let total = parse::page_count(&fetcher.get_document(&first).await?).ok_or_else(|| {
        ScrapeError::PageIndicatorMissing {
            url: first.to_string(),
        }
    })?;
    debug!("last_page_num={}", total);

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(out);
    writer.write_record(LISTING_HEADER)?;

    let mut companies = CompanyDirectory::new();
    let mut written = 0usize;
    let pb = progress_bar(total);

    for page in 0..total {
        let url = portal.index_url(page, Some(ALL_COMPANIES));
        let rows = parse::listing_page(&fetcher.get_document(&url).await?)?.rows;
        debug!("page {}: {} rows", page, rows.len());

        for record in rows {
            if !companies.contains(&record.id) {
                writer.serialize(&record)?;
                written += 1;
            }
            companies.merge(record);
        }
        writer.flush()?;
        pb.inc(1);
    }

    pb.finish_and_clear();
    info!("Wrote {} companies from {} index pages", written, total);
    Ok(companies)
}

pub async fn run_to_file(
    fetcher: &mut Fetcher,
    portal: &Portal,
    path: &Path,
) -> Result<CompanyDirectory> {
    let file = create_output(path)?;
    run(fetcher, portal, file).await
}

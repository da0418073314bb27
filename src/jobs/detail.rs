use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use super::{create_output, progress_bar};
use crate::error::{Result, ScrapeError};
use crate::fetch::Fetcher;
use crate::parse;
use crate::portal::Portal;

pub const DETAIL_HEADER: [&str; 9] = [
    "address", "info", "sector", "name", "country", "city", "phone", "fax", "site",
];

#[derive(Deserialize)]
struct IdColumn {
    id: String,
}

/// The `id` column of a listing table, in file order, duplicates kept.
pub fn read_ids<R: Read>(input: R) -> Result<Vec<String>> {
    csv::Reader::from_reader(input)
        .deserialize::<IdColumn>()
        .map(|row| row.map(|r| r.id).map_err(ScrapeError::from))
        .collect()
}

/// Fetch one detail page per id and write its fields as a row.
///
/// Row width follows whatever the page holds; it is not checked against
/// the header.
pub async fn run<W: Write>(
    fetcher: &mut Fetcher,
    portal: &Portal,
    ids: &[String],
    out: W,
) -> Result<usize> {
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(out);
    writer.write_record(DETAIL_HEADER)?;

    let pb = progress_bar(ids.len());
    for id in ids {
        let url = portal.detail_url(id);
        let fields = parse::detail_fields(&fetcher.get_document(&url).await?)?;
        writer.write_record(&fields)?;
        pb.inc(1);
    }
    writer.flush()?;

    pb.finish_and_clear();
    info!("Wrote {} company details", ids.len());
    Ok(ids.len())
}

pub async fn run_from_file(
    fetcher: &mut Fetcher,
    portal: &Portal,
    input: &Path,
    output: &Path,
) -> Result<usize> {
    let listing = match File::open(input) {
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(ScrapeError::InputFileMissing(input.to_path_buf()))
        }
        other => other?,
    };
    let ids = read_ids(listing)?;
    info!("Loaded {} company ids from {}", ids.len(), input.display());

    let out = create_output(output)?;
    run(fetcher, portal, &ids, out).await
}

//! Everything that depends on the portal's markup lives here.
//!
//! Listing pages carry a `table#companies` with a page indicator span
//! (`"current / total"`) and one `tr.company` per company. Detail pages
//! expose their fields as `textarea.inputText` and `input.inputText`
//! form controls.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::error::{Result, ScrapeError};
use crate::records::{CompanyDetail, CompanyRecord};

static COMPANIES_TABLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("table#companies").unwrap());
static INDICATOR_CELL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"td[style="font-size:0.9em;"]"#).unwrap());
static INDICATOR_SPAN: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"span[style="font-size:1.2em;"]"#).unwrap());
static COMPANY_ROW: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tr.company").unwrap());
static CELL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("td").unwrap());
static LINK: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a").unwrap());
static DETAIL_TEXTAREA: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("textarea.inputText").unwrap());
static DETAIL_INPUT: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("input.inputText").unwrap());

static PAGE_INDICATOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*/\s*(\d+)").unwrap());

const COMPANY_ID_PARAM: &str = "CompanyID=";

/// One parsed index page.
#[derive(Debug, Default)]
pub struct ListingPage {
    pub rows: Vec<CompanyRecord>,
    /// Total page count from the indicator, if the page has one.
    pub total_pages: Option<usize>,
}

pub fn listing_page(doc: &Html) -> Result<ListingPage> {
    let rows = doc
        .select(&COMPANY_ROW)
        .map(company_row)
        .collect::<Result<Vec<_>>>()?;

    Ok(ListingPage {
        rows,
        total_pages: page_count(doc),
    })
}

/// Total page count from the `"current / total"` indicator.
pub fn page_count(doc: &Html) -> Option<usize> {
    let indicator: String = doc
        .select(&COMPANIES_TABLE)
        .next()?
        .select(&INDICATOR_CELL)
        .next()?
        .select(&INDICATOR_SPAN)
        .next()?
        .text()
        .collect();
    let caps = PAGE_INDICATOR_RE.captures(&indicator)?;
    caps[2].parse().ok()
}

fn company_row(row: ElementRef<'_>) -> Result<CompanyRecord> {
    let cells: Vec<ElementRef> = row.select(&CELL).collect();
    let &[name_cell, city, departments, sector, ..] = cells.as_slice() else {
        return Err(ScrapeError::PageStructure(format!(
            "company row has {} cells, expected 4",
            cells.len()
        )));
    };

    let href = name_cell
        .select(&LINK)
        .next()
        .and_then(|a| a.value().attr("href"))
        .ok_or_else(|| ScrapeError::PageStructure("company name cell has no link".into()))?;
    let id = href
        .split(COMPANY_ID_PARAM)
        .nth(1)
        .ok_or_else(|| {
            ScrapeError::PageStructure(format!("no {COMPANY_ID_PARAM} in link {href:?}"))
        })?;

    Ok(CompanyRecord {
        name: cell_text(name_cell),
        id: id.to_string(),
        city: cell_text(city),
        departments: cell_text(departments),
        sector: cell_text(sector),
    })
}

/// Cell text with surrounding spaces removed. Other whitespace is kept.
fn cell_text(cell: ElementRef<'_>) -> String {
    cell.text().collect::<String>().trim_matches(' ').to_string()
}

/// Textarea contents first, then input values, each in document order.
pub fn detail_fields(doc: &Html) -> Result<CompanyDetail> {
    let mut fields: CompanyDetail = doc
        .select(&DETAIL_TEXTAREA)
        .map(|t| t.text().collect::<String>().trim().to_string())
        .collect();

    for input in doc.select(&DETAIL_INPUT) {
        let value = input.value().attr("value").ok_or_else(|| {
            ScrapeError::PageStructure("detail input without a value attribute".into())
        })?;
        fields.push(value.trim().to_string());
    }
    Ok(fields)
}

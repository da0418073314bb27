//! Scraper for the Bilkent summer-training company directory.
//!
//! `list` walks the paginated company index into a summary CSV; `details`
//! reads that CSV back and fetches every company's detail page.

pub mod error;
pub mod fetch;
pub mod jobs;
pub mod parse;
pub mod portal;
pub mod records;
pub mod settings;

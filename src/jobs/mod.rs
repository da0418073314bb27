pub mod detail;
pub mod listing;

use std::fmt;
use std::fs::{self, File};
use std::path::Path;
use std::str::FromStr;

use indicatif::{ProgressBar, ProgressStyle};

use crate::error::Result;

/// The two crawls the binary can run; `Details` reads what `List` wrote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Job {
    List,
    Details,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownJob(pub String);

impl fmt::Display for UnknownJob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown crawl type {:?}", self.0)
    }
}

impl std::error::Error for UnknownJob {}

impl FromStr for Job {
    type Err = UnknownJob;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "list" => Ok(Job::List),
            "details" => Ok(Job::Details),
            other => Err(UnknownJob(other.to_string())),
        }
    }
}

/// Create (or truncate) `path`, making its parent directory first.
fn create_output(path: &Path) -> Result<File> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    Ok(File::create(path)?)
}

fn progress_bar(len: usize) -> ProgressBar {
    let pb = ProgressBar::new(len as u64);
    let style =
        ProgressStyle::with_template("[{elapsed_precise}] {bar:40} {pos}/{len} ({per_sec}, eta {eta})")
            .map(|s| s.progress_chars("=> "))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
    pb.set_style(style);
    pb
}

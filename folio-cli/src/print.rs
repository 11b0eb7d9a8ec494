//! PDF output through headless Chrome/Chromium.
//!
//! The print-pdf document is written to a temporary directory and handed to a
//! Chrome binary running in headless mode, which prints it to PDF. Page size and
//! margins come from the document's own `@page` rule.
//!
//! The browser is chosen once per export, first match wins:
//! `FOLIO_CHROME_BIN`, then `export.print.chrome` from the configuration, then
//! the first Chrome/Chromium/Edge executable found on `PATH`.

use folio_config::PrintConfig;
use folio_core::PageSize;
use std::env;
use std::fmt;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::process::{Command, ExitStatus};
use tempfile::tempdir;
use url::Url;
use which::which;

#[derive(Debug)]
pub enum PrintError {
    ChromeNotFound,
    Io(io::Error),
    Launch { chrome: PathBuf, source: io::Error },
    ChromeFailed(ExitStatus),
    InvalidPath(PathBuf),
}

impl fmt::Display for PrintError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrintError::ChromeNotFound => write!(
                f,
                "Could not find Chrome or Chromium on PATH. Set FOLIO_CHROME_BIN or \
                 export.print.chrome to the browser binary"
            ),
            PrintError::Io(err) => write!(f, "Temporary file error: {err}"),
            PrintError::Launch { chrome, source } => {
                write!(f, "Failed to launch Chrome ({}): {source}", chrome.display())
            }
            PrintError::ChromeFailed(status) => write!(f, "Chrome exited with status {status}"),
            PrintError::InvalidPath(path) => {
                write!(f, "Failed to construct file:// URL for {}", path.display())
            }
        }
    }
}

impl std::error::Error for PrintError {}

impl From<io::Error> for PrintError {
    fn from(err: io::Error) -> Self {
        PrintError::Io(err)
    }
}

/// Browser window size used while laying out the page.
fn viewport(page_size: PageSize) -> (u32, u32) {
    match page_size {
        PageSize::A4 => (1240, 1754),
        PageSize::Letter => (1275, 1650),
        PageSize::A5 => (874, 1240),
    }
}

const CHROME_ENV: &str = "FOLIO_CHROME_BIN";

const PATH_CANDIDATES: &[&str] = &[
    "chromium",
    "chromium-browser",
    "google-chrome",
    "google-chrome-stable",
    "chrome",
    "msedge",
];

/// Where the browser binary came from, for the log line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Origin {
    Env,
    Config,
    Path,
}

/// A headless browser ready to print folio documents
#[derive(Debug)]
pub struct Printer {
    chrome: PathBuf,
    origin: Origin,
}

impl Printer {
    pub fn locate(config: &PrintConfig) -> Result<Self, PrintError> {
        let env_path = env::var_os(CHROME_ENV)
            .filter(|path| !path.is_empty())
            .map(PathBuf::from);
        Self::choose(env_path, config.chrome.clone(), |name| which(name).ok())
    }

    fn choose(
        env_path: Option<PathBuf>,
        config_path: Option<PathBuf>,
        search: impl Fn(&str) -> Option<PathBuf>,
    ) -> Result<Self, PrintError> {
        let found = env_path
            .map(|chrome| (chrome, Origin::Env))
            .or_else(|| config_path.map(|chrome| (chrome, Origin::Config)))
            .or_else(|| {
                PATH_CANDIDATES
                    .iter()
                    .find_map(|name| search(name))
                    .map(|chrome| (chrome, Origin::Path))
            });
        match found {
            Some((chrome, origin)) => Ok(Printer { chrome, origin }),
            None => Err(PrintError::ChromeNotFound),
        }
    }

    /// Print a rendered print-pdf document to PDF bytes
    pub fn print(&self, html: &str, page_size: PageSize) -> Result<Vec<u8>, PrintError> {
        log::info!("printing with {} ({:?})", self.chrome.display(), self.origin);

        let temp_dir = tempdir()?;
        let html_path = temp_dir.path().join("folio-export.html");
        fs::write(&html_path, html)?;

        let pdf_path = temp_dir.path().join("folio-export.pdf");
        let file_url = Url::from_file_path(&html_path)
            .map_err(|_| PrintError::InvalidPath(html_path.clone()))?;

        let (w, h) = viewport(page_size);
        let status = Command::new(&self.chrome)
            .arg("--headless")
            .arg("--disable-gpu")
            .arg("--no-sandbox")
            .arg("--disable-dev-shm-usage")
            .arg("--print-to-pdf-no-header")
            .arg(format!("--print-to-pdf={}", pdf_path.display()))
            .arg(format!("--window-size={w},{h}"))
            .arg(file_url.as_str())
            .status()
            .map_err(|source| PrintError::Launch {
                chrome: self.chrome.clone(),
                source,
            })?;

        if !status.success() {
            return Err(PrintError::ChromeFailed(status));
        }

        Ok(fs::read(&pdf_path)?)
    }
}

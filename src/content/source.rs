use std::fs;
use std::io;
use std::path::PathBuf;

use rust_embed::Embed;

use crate::content::{LoadError, RawItem};

/// Where page data files come from. Implementations must be shareable with
/// the background threads that run cleared-page checks and searches.
pub trait PageSource: Send + Sync {
    /// Fetch the raw items of one page.
    fn fetch(&self, page: u32) -> Result<Vec<RawItem>, LoadError>;

    /// Explicit list of valid page numbers, if the source carries one.
    /// `None` means the caller falls back to sequential probing.
    fn manifest(&self) -> Option<Vec<u32>>;
}

/// Build the page registry: the manifest when present, otherwise probe
/// page 1, 2, 3, ... until a page fails to load or `cap` pages have been
/// probed. Probing conflates "missing page" with a transient read failure,
/// which is why the manifest is preferred.
pub fn discover_pages(source: &dyn PageSource, cap: u32) -> Vec<u32> {
    if let Some(mut pages) = source.manifest() {
        pages.sort_unstable();
        pages.dedup();
        return pages;
    }

    let mut pages = Vec::new();
    for page in 1..=cap {
        if source.fetch(page).is_err() {
            break;
        }
        pages.push(page);
    }
    pages
}

/// Page files in a directory: `page1.json`, `page2.json`, ... with an
/// optional `manifest.json` listing valid page numbers.
pub struct DirSource {
    dir: PathBuf,
}

impl DirSource {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }
}

impl PageSource for DirSource {
    fn fetch(&self, page: u32) -> Result<Vec<RawItem>, LoadError> {
        let path = self.dir.join(format!("page{page}.json"));
        let content = fs::read_to_string(&path).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                LoadError::Missing { page }
            } else {
                LoadError::Io { page, source: e }
            }
        })?;
        serde_json::from_str(&content).map_err(|e| LoadError::Parse { page, source: e })
    }

    fn manifest(&self) -> Option<Vec<u32>> {
        let content = fs::read_to_string(self.dir.join("manifest.json")).ok()?;
        serde_json::from_str(&content).ok()
    }
}

#[derive(Embed)]
#[folder = "assets/pages/"]
struct PageAssets;

/// Sample pages embedded in the binary, so the app is usable before the
/// user points it at their own data directory.
pub struct BundledSource;

impl PageSource for BundledSource {
    fn fetch(&self, page: u32) -> Result<Vec<RawItem>, LoadError> {
        let file = PageAssets::get(&format!("page{page}.json"))
            .ok_or(LoadError::Missing { page })?;
        serde_json::from_slice(file.data.as_ref())
            .map_err(|e| LoadError::Parse { page, source: e })
    }

    fn manifest(&self) -> Option<Vec<u32>> {
        let file = PageAssets::get("manifest.json")?;
        serde_json::from_slice(file.data.as_ref()).ok()
    }
}

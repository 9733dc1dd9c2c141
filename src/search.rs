use crate::content::SentenceItem;
use crate::content::loader;
use crate::content::source::PageSource;

/// Result of one scan: every match in registry order, plus a warning per
/// page that could not be read. Search is best-effort — a failed page is
/// skipped with a warning instead of failing the whole scan, unlike deck
/// builds, which are fail-fast.
pub struct ScanResult {
    pub hits: Vec<SentenceItem>,
    pub warnings: Vec<String>,
}

/// Case-insensitive substring match against both language fields, scanning
/// pages in registry order. Accumulates all matches; no early termination,
/// no de-duplication across pages. A blank query matches nothing.
pub fn scan(source: &dyn PageSource, registry: &[u32], query: &str) -> ScanResult {
    let query = query.trim().to_lowercase();
    let mut result = ScanResult {
        hits: Vec::new(),
        warnings: Vec::new(),
    };
    if query.is_empty() {
        return result;
    }

    for &page in registry {
        match loader::load_pages(source, &[page]) {
            Ok(items) => {
                result.hits.extend(items.into_iter().filter(|item| {
                    item.tr.to_lowercase().contains(&query)
                        || item.en.to_lowercase().contains(&query)
                }));
            }
            Err(e) => result.warnings.push(e.to_string()),
        }
    }
    result
}

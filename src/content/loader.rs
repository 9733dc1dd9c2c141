use crate::content::source::PageSource;
use crate::content::{LoadError, SentenceItem};

/// Load the requested pages into one flat sequence, tagging every item with
/// its originating page. Per-page order and the order of the requested page
/// list are preserved. Fail-fast: any page that cannot be read or parsed
/// fails the whole call, so a failed page never silently contributes zero
/// items.
pub fn load_pages(
    source: &dyn PageSource,
    pages: &[u32],
) -> Result<Vec<SentenceItem>, LoadError> {
    let mut items = Vec::new();
    for &page in pages {
        let raw = source.fetch(page)?;
        items.extend(raw.into_iter().map(|r| SentenceItem::new(r, page)));
    }
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::source::DirSource;
    use std::fs;
    use tempfile::TempDir;

    fn make_source(pages: &[(u32, &str)]) -> (TempDir, DirSource) {
        let dir = TempDir::new().unwrap();
        for (page, json) in pages {
            fs::write(dir.path().join(format!("page{page}.json")), json).unwrap();
        }
        let source = DirSource::new(dir.path().to_path_buf());
        (dir, source)
    }

    #[test]
    fn test_load_tags_items_with_page() {
        let (_dir, source) = make_source(&[
            (1, r#"[{"tr":"Merhaba","en":"Hello"},{"tr":"Evet","en":"Yes"}]"#),
            (2, r#"[{"tr":"Hayır","en":"No"}]"#),
        ]);

        let items = load_pages(&source, &[1, 2]).unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].page, 1);
        assert_eq!(items[1].page, 1);
        assert_eq!(items[2].page, 2);
        assert_eq!(items[2].en, "No");
    }

    #[test]
    fn test_load_preserves_request_order() {
        let (_dir, source) = make_source(&[
            (1, r#"[{"tr":"a","en":"a"}]"#),
            (2, r#"[{"tr":"b","en":"b"}]"#),
        ]);

        let items = load_pages(&source, &[2, 1]).unwrap();
        assert_eq!(items[0].page, 2);
        assert_eq!(items[1].page, 1);
    }

    #[test]
    fn test_load_fails_fast_on_missing_page() {
        let (_dir, source) = make_source(&[(1, "[]")]);

        let err = load_pages(&source, &[1, 7]).unwrap_err();
        assert_eq!(err.page(), 7);
    }

    #[test]
    fn test_load_fails_on_unparsable_page() {
        let (_dir, source) = make_source(&[(1, "{broken")]);

        assert!(matches!(
            load_pages(&source, &[1]),
            Err(LoadError::Parse { page: 1, .. })
        ));
    }
}

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::mpsc;
use std::thread;

use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::config::Config;
use crate::content::SentenceItem;
use crate::content::loader;
use crate::content::source::{self, BundledSource, DirSource, PageSource};
use crate::deck::{self, DeckMode};
use crate::event::AppEvent;
use crate::progress::StatusSets;
use crate::progress::profile::ProfileData;
use crate::progress::store::ProgressStore;
use crate::search;
use crate::session::cursor::{Outcome, SessionCursor};
use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Study,
    Search,
}

pub struct App {
    pub screen: AppScreen,
    pub config: Config,
    pub theme: &'static Theme,
    pub source: Arc<dyn PageSource>,
    pub registry: Vec<u32>,
    pub current_page: u32,
    pub review_mode: bool,
    pub session: SessionCursor,
    pub card_flipped: bool,
    pub store: ProgressStore,
    pub profile: ProfileData,
    pub cleared: BTreeMap<u32, bool>,
    pub query: String,
    pub search_hits: Vec<SentenceItem>,
    pub search_selected: usize,
    pub search_pending: bool,
    pub confirm_reset: bool,
    pub status_line: Option<String>,
    pub should_quit: bool,
    tx: mpsc::Sender<AppEvent>,
    cleared_generation: u64,
    search_generation: u64,
    rng: SmallRng,
}

impl App {
    pub fn new(config: Config, store: ProgressStore, tx: mpsc::Sender<AppEvent>) -> Self {
        let loaded_theme = Theme::load(&config.theme).unwrap_or_default();
        let theme: &'static Theme = Box::leak(Box::new(loaded_theme));

        let source: Arc<dyn PageSource> = match config.data_dir {
            Some(ref dir) => Arc::new(DirSource::new(dir.clone())),
            None => Arc::new(BundledSource),
        };
        let registry = source::discover_pages(source.as_ref(), config.max_probe_pages);

        // load_profile returns None if file exists but can't parse (schema mismatch)
        let profile = match store.load_profile() {
            Some(p) if !p.needs_reset() => p,
            _ => ProfileData::default(),
        };

        let current_page = registry.first().copied().unwrap_or(1);

        let mut app = Self {
            screen: AppScreen::Study,
            config,
            theme,
            source,
            registry,
            current_page,
            review_mode: false,
            session: SessionCursor::new(Vec::new()),
            card_flipped: false,
            store,
            profile,
            cleared: BTreeMap::new(),
            query: String::new(),
            search_hits: Vec::new(),
            search_selected: 0,
            search_pending: false,
            confirm_reset: false,
            status_line: None,
            should_quit: false,
            tx,
            cleared_generation: 0,
            search_generation: 0,
            rng: SmallRng::from_entropy(),
        };
        app.rebuild_deck();
        app
    }

    /// Build a fresh shuffled deck for the current page or review selection
    /// and reset the cursor. Deck builds are fail-fast: a page that cannot
    /// be loaded empties the deck and surfaces the failure inline.
    pub fn rebuild_deck(&mut self) {
        self.card_flipped = false;
        self.confirm_reset = false;
        let status = self.store.status_sets();

        let (pages, mode) = if self.review_mode {
            (self.registry.clone(), DeckMode::Review)
        } else {
            (vec![self.current_page], DeckMode::Study)
        };

        match loader::load_pages(self.source.as_ref(), &pages) {
            Ok(items) => {
                let deck = deck::build(items, mode, &status, &mut self.rng);
                self.session = SessionCursor::new(deck);
                self.status_line = None;
            }
            Err(e) => {
                self.session = SessionCursor::new(Vec::new());
                self.status_line = Some(format!("load failed: {e}"));
            }
        }

        if !self.review_mode {
            self.spawn_cleared_checks(status);
        }
    }

    /// Recompute the cleared indicator for every known page. Each page is
    /// checked on its own thread and applied as its result arrives; results
    /// from a superseded generation are discarded.
    fn spawn_cleared_checks(&mut self, status: StatusSets) {
        self.cleared_generation += 1;
        let generation = self.cleared_generation;

        for &page in &self.registry {
            let tx = self.tx.clone();
            let source = Arc::clone(&self.source);
            let status = status.clone();
            thread::spawn(move || {
                let cleared = loader::load_pages(source.as_ref(), &[page])
                    .map(|items| {
                        items
                            .iter()
                            .all(|item| status.excludes_from_study(&item.key()))
                    })
                    .unwrap_or(false);
                let _ = tx.send(AppEvent::PageCleared {
                    generation,
                    page,
                    cleared,
                });
            });
        }
    }

    pub fn apply_page_cleared(&mut self, generation: u64, page: u32, cleared: bool) {
        if generation == self.cleared_generation {
            self.cleared.insert(page, cleared);
        }
    }

    pub fn select_page(&mut self, page: u32) {
        if !self.registry.contains(&page) {
            return;
        }
        self.current_page = page;
        self.review_mode = false;
        self.rebuild_deck();
    }

    pub fn select_adjacent_page(&mut self, forward: bool) {
        let Some(pos) = self.registry.iter().position(|&p| p == self.current_page) else {
            return;
        };
        let next = if forward {
            (pos + 1) % self.registry.len()
        } else if pos == 0 {
            self.registry.len() - 1
        } else {
            pos - 1
        };
        self.select_page(self.registry[next]);
    }

    pub fn toggle_review(&mut self) {
        self.review_mode = !self.review_mode;
        self.rebuild_deck();
    }

    pub fn flip_card(&mut self) {
        if !self.session.is_complete() {
            self.card_flipped = !self.card_flipped;
        }
    }

    /// Record the outcome for the current card. The status store write is
    /// durable before the cursor advances.
    pub fn classify(&mut self, outcome: Outcome) {
        if self.session.is_complete() {
            return;
        }
        match self.session.classify(outcome, &self.store) {
            Ok(()) => {
                self.card_flipped = false;
                self.profile.record_classification(outcome);
                if let Err(e) = self.store.save_profile(&self.profile) {
                    self.status_line = Some(format!("profile not saved: {e}"));
                }
                if self.session.is_complete() && !self.review_mode {
                    let status = self.store.status_sets();
                    self.spawn_cleared_checks(status);
                }
            }
            Err(e) => self.status_line = Some(format!("could not record card: {e}")),
        }
    }

    pub fn request_reset(&mut self) {
        self.confirm_reset = true;
    }

    pub fn cancel_reset(&mut self) {
        self.confirm_reset = false;
    }

    /// Clear both status lists and rebuild. The cleared indicators are
    /// wiped immediately so stale strike-through marks never outlive the
    /// reset; the background checks repopulate them.
    pub fn reset_progress(&mut self) {
        self.confirm_reset = false;
        if let Err(e) = self.store.reset() {
            self.status_line = Some(format!("reset failed: {e}"));
            return;
        }
        self.cleared.clear();
        self.review_mode = false;
        self.rebuild_deck();
    }

    pub fn open_search(&mut self) {
        self.screen = AppScreen::Search;
        self.query.clear();
        self.search_hits.clear();
        self.search_selected = 0;
        self.search_pending = false;
    }

    pub fn close_search(&mut self) {
        self.screen = AppScreen::Study;
        self.query.clear();
        self.search_hits.clear();
        self.search_pending = false;
    }

    pub fn search_input(&mut self, ch: char) {
        self.query.push(ch);
        self.spawn_search();
    }

    pub fn search_backspace(&mut self) {
        self.query.pop();
        if self.query.is_empty() {
            self.search_generation += 1;
            self.search_hits.clear();
            self.search_pending = false;
        } else {
            self.spawn_search();
        }
    }

    /// Scan all pages on a worker thread. Every input change starts a new
    /// generation; the completion of an older scan is ignored when it lands.
    fn spawn_search(&mut self) {
        self.search_generation += 1;
        self.search_pending = true;
        let generation = self.search_generation;
        let tx = self.tx.clone();
        let source = Arc::clone(&self.source);
        let registry = self.registry.clone();
        let query = self.query.clone();
        thread::spawn(move || {
            let result = search::scan(source.as_ref(), &registry, &query);
            let _ = tx.send(AppEvent::SearchDone {
                generation,
                hits: result.hits,
                warnings: result.warnings,
            });
        });
    }

    pub fn apply_search_done(
        &mut self,
        generation: u64,
        hits: Vec<SentenceItem>,
        warnings: Vec<String>,
    ) {
        if generation != self.search_generation {
            return;
        }
        self.search_pending = false;
        self.search_selected = if hits.is_empty() {
            0
        } else {
            self.search_selected.min(hits.len() - 1)
        };
        self.search_hits = hits;
        if let Some(warning) = warnings.first() {
            self.status_line = Some(format!("search skipped a page: {warning}"));
        }
    }

    pub fn search_move(&mut self, down: bool) {
        if self.search_hits.is_empty() {
            return;
        }
        if down {
            self.search_selected = (self.search_selected + 1).min(self.search_hits.len() - 1);
        } else {
            self.search_selected = self.search_selected.saturating_sub(1);
        }
    }

    /// Jump straight to the selected hit: the active deck is replaced with
    /// a singleton containing just that card, bypassing the deck builder.
    pub fn jump_to_hit(&mut self) {
        let Some(item) = self.search_hits.get(self.search_selected).cloned() else {
            return;
        };
        self.current_page = item.page;
        self.review_mode = false;
        self.session = SessionCursor::new(vec![item]);
        self.card_flipped = false;
        self.status_line = None;
        self.close_search();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::RawItem;
    use std::time::Duration;
    use tempfile::TempDir;

    fn make_app(pages: &[(u32, &str)]) -> (TempDir, TempDir, App, mpsc::Receiver<AppEvent>) {
        let data_dir = TempDir::new().unwrap();
        for (page, json) in pages {
            std::fs::write(
                data_dir.path().join(format!("page{page}.json")),
                json,
            )
            .unwrap();
        }
        let store_dir = TempDir::new().unwrap();
        let (tx, rx) = mpsc::channel();

        let config = Config {
            data_dir: Some(data_dir.path().to_path_buf()),
            ..Config::default()
        };
        let store = ProgressStore::with_base_dir(store_dir.path().to_path_buf()).unwrap();
        let app = App::new(config, store, tx);
        (data_dir, store_dir, app, rx)
    }

    fn drain_cleared(app: &mut App, rx: &mpsc::Receiver<AppEvent>) {
        while let Ok(event) = rx.recv_timeout(Duration::from_secs(2)) {
            match event {
                AppEvent::PageCleared {
                    generation,
                    page,
                    cleared,
                } => {
                    app.apply_page_cleared(generation, page, cleared);
                    if app.cleared.len() == app.registry.len() {
                        break;
                    }
                }
                _ => {}
            }
        }
    }

    const PAGE1: &str = r#"[{"tr":"Merhaba","en":"Hello"},{"tr":"Evet","en":"Yes"}]"#;
    const PAGE2: &str = r#"[{"tr":"Hayır","en":"No"}]"#;

    #[test]
    fn test_startup_builds_study_deck() {
        let (_d, _s, app, _rx) = make_app(&[(1, PAGE1), (2, PAGE2)]);
        assert_eq!(app.registry, vec![1, 2]);
        assert_eq!(app.current_page, 1);
        assert_eq!(app.session.len(), 2);
        assert!(!app.session.is_complete());
    }

    #[test]
    fn test_classify_both_cards_completes_page() {
        let (_d, _s, mut app, _rx) = make_app(&[(1, PAGE1)]);
        app.classify(Outcome::Known);
        app.classify(Outcome::Unlearned);
        assert!(app.session.is_complete());
        assert!(!app.session.started_empty());

        let status = app.store.status_sets();
        assert_eq!(status.hidden.len(), 1);
        assert_eq!(status.unlearned.len(), 1);
    }

    #[test]
    fn test_rebuild_after_classification_excludes_seen_cards() {
        let (_d, _s, mut app, _rx) = make_app(&[(1, PAGE1)]);
        app.classify(Outcome::Known);
        app.classify(Outcome::Unlearned);

        app.rebuild_deck();
        assert!(app.session.started_empty());
    }

    #[test]
    fn test_review_deck_spans_all_pages() {
        let (_d, _s, mut app, _rx) = make_app(&[(1, PAGE1), (2, PAGE2)]);
        // Mark one card per page for review
        app.classify(Outcome::Unlearned);
        app.select_page(2);
        app.classify(Outcome::Unlearned);

        app.toggle_review();
        assert!(app.review_mode);
        assert_eq!(app.session.len(), 2);
    }

    #[test]
    fn test_cleared_indicator_after_finishing_page() {
        let (_d, _s, mut app, rx) = make_app(&[(1, PAGE1), (2, PAGE2)]);
        app.classify(Outcome::Known);
        app.classify(Outcome::Known);
        drain_cleared(&mut app, &rx);

        assert_eq!(app.cleared.get(&1), Some(&true));
        assert_eq!(app.cleared.get(&2), Some(&false));
    }

    #[test]
    fn test_stale_cleared_result_is_discarded() {
        let (_d, _s, mut app, _rx) = make_app(&[(1, PAGE1)]);
        let stale = app.cleared_generation - 1;
        app.apply_page_cleared(stale, 1, true);
        assert!(app.cleared.is_empty());
    }

    #[test]
    fn test_reset_clears_status_and_indicators() {
        let (_d, _s, mut app, _rx) = make_app(&[(1, PAGE1)]);
        app.classify(Outcome::Known);
        app.cleared.insert(1, true);

        app.reset_progress();
        assert!(app.cleared.is_empty());
        let status = app.store.status_sets();
        assert!(status.hidden.is_empty());
        assert!(status.unlearned.is_empty());
        assert_eq!(app.session.len(), 2);
    }

    #[test]
    fn test_stale_search_result_is_discarded() {
        let (_d, _s, mut app, _rx) = make_app(&[(1, PAGE1)]);
        app.open_search();
        app.query = "mer".to_string();
        app.search_generation = 5;

        let stale_hit = SentenceItem::new(
            RawItem {
                tr: "eski".to_string(),
                en: "stale".to_string(),
            },
            1,
        );
        app.apply_search_done(4, vec![stale_hit], Vec::new());
        assert!(app.search_hits.is_empty());
    }

    #[test]
    fn test_jump_replaces_deck_with_singleton() {
        let (_d, _s, mut app, _rx) = make_app(&[(1, PAGE1), (2, PAGE2)]);
        app.open_search();
        app.search_hits = vec![SentenceItem::new(
            RawItem {
                tr: "Hayır".to_string(),
                en: "No".to_string(),
            },
            2,
        )];

        app.jump_to_hit();
        assert_eq!(app.screen, AppScreen::Study);
        assert_eq!(app.current_page, 2);
        assert_eq!(app.session.len(), 1);
        assert_eq!(app.session.current().unwrap().en, "No");
    }

    #[test]
    fn test_load_failure_empties_deck_and_surfaces_error() {
        let (data_dir, _s, mut app, _rx) = make_app(&[(1, PAGE1)]);
        std::fs::write(data_dir.path().join("page1.json"), "broken").unwrap();

        app.rebuild_deck();
        assert!(app.session.started_empty());
        assert!(app.status_line.is_some());
    }
}

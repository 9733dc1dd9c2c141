use std::collections::BTreeSet;
use std::fs;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use tempfile::TempDir;

use flipdeck::content::source::{DirSource, discover_pages};
use flipdeck::content::{CardKey, loader};
use flipdeck::deck::{self, DeckMode};
use flipdeck::progress::store::{HIDDEN_LIST, ProgressStore, UNLEARNED_LIST};
use flipdeck::search;
use flipdeck::session::cursor::{Outcome, SessionCursor};

fn write_page(dir: &TempDir, page: u32, json: &str) {
    fs::write(dir.path().join(format!("page{page}.json")), json).unwrap();
}

fn make_fixture() -> (TempDir, DirSource, TempDir, ProgressStore) {
    let data_dir = TempDir::new().unwrap();
    write_page(
        &data_dir,
        1,
        r#"[{"tr":"Merhaba","en":"Hello"},{"tr":"Evet","en":"Yes"}]"#,
    );
    write_page(
        &data_dir,
        2,
        r#"[{"tr":"Hayır","en":"No"},{"tr":"Lütfen","en":"Please"}]"#,
    );
    let source = DirSource::new(data_dir.path().to_path_buf());

    let store_dir = TempDir::new().unwrap();
    let store = ProgressStore::with_base_dir(store_dir.path().to_path_buf()).unwrap();
    (data_dir, source, store_dir, store)
}

#[test]
fn full_study_pass_over_one_page() {
    let (_data_dir, source, _store_dir, store) = make_fixture();

    let registry = discover_pages(&source, 50);
    assert_eq!(registry, vec![1, 2]);

    // Fresh store: the study deck holds both page 1 cards
    let items = loader::load_pages(&source, &[1]).unwrap();
    let mut rng = SmallRng::seed_from_u64(42);
    let deck = deck::build(items, DeckMode::Study, &store.status_sets(), &mut rng);
    assert_eq!(deck.len(), 2);

    let mut cursor = SessionCursor::new(deck);

    // First card known, second unlearned
    cursor.classify(Outcome::Known, &store).unwrap();
    let remaining = cursor.current().unwrap().key();
    cursor.classify(Outcome::Unlearned, &store).unwrap();
    assert!(cursor.is_complete());

    let hidden = store.set(HIDDEN_LIST);
    let unlearned = store.set(UNLEARNED_LIST);
    assert_eq!(hidden.len(), 1);
    assert_eq!(unlearned.len(), 1);
    assert!(unlearned.contains(&remaining));

    // A rebuilt study deck for page 1 is now empty, i.e. the page is cleared
    let items = loader::load_pages(&source, &[1]).unwrap();
    let deck = deck::build(items, DeckMode::Study, &store.status_sets(), &mut rng);
    assert!(deck.is_empty());

    // Page 2 is untouched
    let items = loader::load_pages(&source, &[2]).unwrap();
    let deck = deck::build(items, DeckMode::Study, &store.status_sets(), &mut rng);
    assert_eq!(deck.len(), 2);
}

#[test]
fn review_deck_holds_only_unlearned_cards_across_pages() {
    let (_data_dir, source, _store_dir, store) = make_fixture();
    store.mark_unlearned(&CardKey::new(1, "Yes")).unwrap();

    let registry = discover_pages(&source, 50);
    let items = loader::load_pages(&source, &registry).unwrap();
    let mut rng = SmallRng::seed_from_u64(1);
    let deck = deck::build(items, DeckMode::Review, &store.status_sets(), &mut rng);

    assert_eq!(deck.len(), 1);
    assert_eq!(deck[0].key(), CardKey::new(1, "Yes"));
}

#[test]
fn review_then_known_moves_card_out_of_review() {
    let (_data_dir, source, _store_dir, store) = make_fixture();
    store.mark_unlearned(&CardKey::new(2, "No")).unwrap();

    let registry = discover_pages(&source, 50);
    let items = loader::load_pages(&source, &registry).unwrap();
    let mut rng = SmallRng::seed_from_u64(1);
    let deck = deck::build(items, DeckMode::Review, &store.status_sets(), &mut rng);
    let mut cursor = SessionCursor::new(deck);

    cursor.classify(Outcome::Known, &store).unwrap();

    assert!(store.set(UNLEARNED_LIST).is_empty());
    assert!(store.set(HIDDEN_LIST).contains(&CardKey::new(2, "No")));

    // Nothing left to review
    let items = loader::load_pages(&source, &registry).unwrap();
    let deck = deck::build(items, DeckMode::Review, &store.status_sets(), &mut rng);
    assert!(deck.is_empty());
}

#[test]
fn reset_restores_the_full_study_deck() {
    let (_data_dir, source, _store_dir, store) = make_fixture();
    store.mark_hidden(&CardKey::new(1, "Hello")).unwrap();
    store.mark_unlearned(&CardKey::new(1, "Yes")).unwrap();

    store.reset().unwrap();

    let items = loader::load_pages(&source, &[1]).unwrap();
    let mut rng = SmallRng::seed_from_u64(1);
    let deck = deck::build(items, DeckMode::Study, &store.status_sets(), &mut rng);
    let keys: BTreeSet<CardKey> = deck.iter().map(|i| i.key()).collect();

    assert_eq!(keys.len(), 2);
    assert!(keys.contains(&CardKey::new(1, "Hello")));
    assert!(keys.contains(&CardKey::new(1, "Yes")));
}

#[test]
fn search_spans_pages_and_matches_both_fields() {
    let (_data_dir, source, _store_dir, _store) = make_fixture();
    let registry = discover_pages(&source, 50);

    let result = search::scan(&source, &registry, "lüt");
    assert_eq!(result.hits.len(), 1);
    assert_eq!(result.hits[0].en, "Please");

    let result = search::scan(&source, &registry, "HELLO");
    assert_eq!(result.hits.len(), 1);
    assert_eq!(result.hits[0].page, 1);

    let result = search::scan(&source, &registry, "xyz");
    assert!(result.hits.is_empty());
}

#[test]
fn search_hit_drives_a_singleton_session() {
    let (_data_dir, source, _store_dir, store) = make_fixture();
    let registry = discover_pages(&source, 50);

    let result = search::scan(&source, &registry, "please");
    let hit = result.hits.into_iter().next().unwrap();
    assert_eq!(hit.page, 2);

    let mut cursor = SessionCursor::new(vec![hit]);
    assert_eq!(cursor.len(), 1);
    cursor.classify(Outcome::Known, &store).unwrap();
    assert!(cursor.is_complete());
    assert!(store.set(HIDDEN_LIST).contains(&CardKey::new(2, "Please")));
}

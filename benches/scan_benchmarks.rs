use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::SmallRng;

use flipdeck::content::source::{BundledSource, discover_pages};
use flipdeck::content::{RawItem, SentenceItem, loader};
use flipdeck::deck::{self, DeckMode};
use flipdeck::progress::StatusSets;
use flipdeck::search;

fn bench_search_scan(c: &mut Criterion) {
    let source = BundledSource;
    let registry = discover_pages(&source, 50);

    c.bench_function("scan_bundled_pages", |b| {
        b.iter(|| search::scan(&source, black_box(&registry), black_box("bir")))
    });
}

fn bench_deck_build(c: &mut Criterion) {
    let items: Vec<SentenceItem> = (0..1000)
        .map(|i| {
            SentenceItem::new(
                RawItem {
                    tr: format!("cümle {i}"),
                    en: format!("sentence {i}"),
                },
                i / 50 + 1,
            )
        })
        .collect();
    let status = StatusSets::default();

    c.bench_function("build_deck_1000", |b| {
        b.iter_with_setup(
            || (items.clone(), SmallRng::seed_from_u64(7)),
            |(items, mut rng)| deck::build(items, DeckMode::Study, &status, &mut rng),
        )
    });
}

fn bench_load_pages(c: &mut Criterion) {
    let source = BundledSource;
    let registry = discover_pages(&source, 50);

    c.bench_function("load_bundled_pages", |b| {
        b.iter(|| loader::load_pages(&source, black_box(&registry)))
    });
}

criterion_group!(benches, bench_search_scan, bench_deck_build, bench_load_pages);
criterion_main!(benches);

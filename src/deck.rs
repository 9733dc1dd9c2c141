use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

use crate::content::SentenceItem;
use crate::progress::StatusSets;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeckMode {
    /// Single page, excluding items already known or marked for review.
    Study,
    /// All pages, restricted to items marked for review.
    Review,
}

/// Filter the loaded items by status, then shuffle. The result is a
/// permutation of the filtered input: every surviving item exactly once.
pub fn build(
    items: Vec<SentenceItem>,
    mode: DeckMode,
    status: &StatusSets,
    rng: &mut SmallRng,
) -> Vec<SentenceItem> {
    let mut deck: Vec<SentenceItem> = items
        .into_iter()
        .filter(|item| {
            let key = item.key();
            match mode {
                DeckMode::Study => !status.excludes_from_study(&key),
                DeckMode::Review => status.unlearned.contains(&key),
            }
        })
        .collect();
    deck.shuffle(rng);
    deck
}

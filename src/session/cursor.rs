use anyhow::Result;
use thiserror::Error;

use crate::content::SentenceItem;
use crate::progress::store::ProgressStore;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Known,
    Unlearned,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CursorError {
    #[error("cursor is past the end of the deck")]
    OutOfRange,
}

/// Sequential pointer through the active deck. `index == deck.len()` is the
/// Complete state; callers must check `is_complete` before `current`.
pub struct SessionCursor {
    deck: Vec<SentenceItem>,
    index: usize,
    started_empty: bool,
}

impl SessionCursor {
    pub fn new(deck: Vec<SentenceItem>) -> Self {
        let started_empty = deck.is_empty();
        Self {
            deck,
            index: 0,
            started_empty,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.index >= self.deck.len()
    }

    /// True when the deck had nothing to study from the start. Lets the
    /// caller show a "no items" state instead of the completion banner.
    pub fn started_empty(&self) -> bool {
        self.started_empty
    }

    pub fn len(&self) -> usize {
        self.deck.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deck.is_empty()
    }

    /// Zero-based position of the card being shown.
    pub fn position(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> Result<&SentenceItem, CursorError> {
        self.deck.get(self.index).ok_or(CursorError::OutOfRange)
    }

    /// Record the outcome for the current card and advance. The store write
    /// happens before the cursor moves, so a classification is durable
    /// before the card counts as passed.
    pub fn classify(&mut self, outcome: Outcome, store: &ProgressStore) -> Result<()> {
        let key = self.current()?.key();
        match outcome {
            Outcome::Known => store.mark_hidden(&key)?,
            Outcome::Unlearned => store.mark_unlearned(&key)?,
        }
        self.index += 1;
        Ok(())
    }
}

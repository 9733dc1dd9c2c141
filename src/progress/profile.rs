use serde::{Deserialize, Serialize};

use crate::session::cursor::Outcome;

const SCHEMA_VERSION: u32 = 1;

/// Cumulative study history. Survives progress resets: the status lists
/// record what is currently known, the profile records what was done.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProfileData {
    pub schema_version: u32,
    pub total_known: u32,
    pub total_unlearned: u32,
    pub streak_days: u32,
    pub best_streak: u32,
    pub last_study_date: Option<String>,
}

impl Default for ProfileData {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            total_known: 0,
            total_unlearned: 0,
            streak_days: 0,
            best_streak: 0,
            last_study_date: None,
        }
    }
}

impl ProfileData {
    /// Check if loaded data has a stale schema version and needs reset.
    pub fn needs_reset(&self) -> bool {
        self.schema_version != SCHEMA_VERSION
    }

    pub fn record_classification(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Known => self.total_known += 1,
            Outcome::Unlearned => self.total_unlearned += 1,
        }
        self.touch_streak(chrono::Utc::now().format("%Y-%m-%d").to_string());
    }

    fn touch_streak(&mut self, today: String) {
        if self.last_study_date.as_deref() == Some(&today) {
            return;
        }
        if let Some(ref last) = self.last_study_date {
            let yesterday = (chrono::Utc::now() - chrono::Duration::days(1))
                .format("%Y-%m-%d")
                .to_string();
            if last == &yesterday {
                self.streak_days += 1;
            } else {
                self.streak_days = 1;
            }
        } else {
            self.streak_days = 1;
        }
        self.best_streak = self.best_streak.max(self.streak_days);
        self.last_study_date = Some(today);
    }

    pub fn total_classified(&self) -> u32 {
        self.total_known + self.total_unlearned
    }
}

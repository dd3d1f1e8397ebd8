//! Best-run records
//!
//! Exactly two persisted scalars: the longest survival time and the highest
//! score. Each is compared and updated independently at the end of a run.

use serde::{Deserialize, Serialize};

use crate::error::PersistError;
use crate::sim::SessionResult;

/// Persisted personal bests
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestRecords {
    /// Longest survival in whole seconds
    #[serde(default)]
    pub best_time_secs: u64,
    #[serde(default)]
    pub best_score: u64,
}

/// Which records a run broke
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NewBests {
    pub time: bool,
    pub score: bool,
}

impl NewBests {
    pub fn any(&self) -> bool {
        self.time || self.score
    }
}

impl BestRecords {
    /// Fold a finished run in; values only change when strictly exceeded
    pub fn submit(&mut self, result: &SessionResult) -> NewBests {
        let mut broke = NewBests::default();
        if result.time_secs > self.best_time_secs {
            self.best_time_secs = result.time_secs;
            broke.time = true;
        }
        if result.score > self.best_score {
            self.best_score = result.score;
            broke.score = true;
        }
        broke
    }
}

/// Where best records live between runs
pub trait BestStore {
    fn load(&self) -> Result<BestRecords, PersistError>;
    fn save(&mut self, records: &BestRecords) -> Result<(), PersistError>;
}

/// Volatile store (tests, or hosts without storage)
#[derive(Debug, Default)]
pub struct MemoryStore {
    pub records: Option<BestRecords>,
    /// Refuse every save, like a browser in private mode
    pub read_only: bool,
}

impl BestStore for MemoryStore {
    fn load(&self) -> Result<BestRecords, PersistError> {
        Ok(self.records.unwrap_or_default())
    }

    fn save(&mut self, records: &BestRecords) -> Result<(), PersistError> {
        if self.read_only {
            return Err(PersistError::Unavailable { backend: "memory" });
        }
        self.records = Some(*records);
        Ok(())
    }
}

/// Load bests, falling back to zeros on any failure
pub fn load_or_default(store: &dyn BestStore) -> BestRecords {
    match store.load() {
        Ok(records) => {
            log::info!(
                "Loaded bests: {}s / {} points",
                records.best_time_secs,
                records.best_score
            );
            records
        }
        Err(err) => {
            log::warn!("Could not load best records ({}), starting fresh", err);
            BestRecords::default()
        }
    }
}
